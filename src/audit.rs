use serde_json::Value;

use crate::models::UserId;

/// Records a committed domain change on the `audit` tracing target.
pub fn log_audit(user_id: Option<UserId>, action: &str, resource: Option<&str>, metadata: Option<Value>) {
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        user_id = ?user_id,
        action,
        resource = resource.unwrap_or("-"),
        metadata = %metadata,
        "audit"
    );
}
