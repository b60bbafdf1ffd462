use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct NavigateQuery {
    /// Location fragment such as `#catalog?category=Sports`. Empty means home.
    pub fragment: Option<String>,
}

impl NavigateQuery {
    pub fn fragment(&self) -> &str {
        self.fragment.as_deref().unwrap_or_default()
    }
}
