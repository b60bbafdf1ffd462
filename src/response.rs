use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub schema_version: Option<u32>,
    pub total: Option<usize>,
}

impl Meta {
    pub fn new(schema_version: u32, total: Option<usize>) -> Self {
        Self {
            schema_version: Some(schema_version),
            total,
        }
    }

    pub fn empty() -> Self {
        Self {
            schema_version: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
