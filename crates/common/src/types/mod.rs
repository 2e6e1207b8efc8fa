use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of the `status` field every response carries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Client-side problem (4xx).
    Fail,
    /// Server-side problem (5xx).
    Error,
}

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: ResponseStatus,
    pub message: &'static str,
}

impl Health {
    pub fn new(message: &'static str) -> Self {
        Self { status: ResponseStatus::Success, message }
    }
}

/// Build `{"status": ..., <fields>}`. Object payloads are merged at the top
/// level; anything else is placed under `data`.
pub fn envelope(status: ResponseStatus, payload: Value) -> Value {
    let mut map = Map::new();
    map.insert("status".into(), serde_json::to_value(status).unwrap_or(Value::Null));
    match payload {
        Value::Object(fields) => map.extend(fields),
        Value::Null => {}
        other => {
            map.insert("data".into(), other);
        }
    }
    Value::Object(map)
}
