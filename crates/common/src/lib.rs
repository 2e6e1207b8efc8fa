//! Shared building blocks for the shop workspace: response envelope types and
//! logging setup.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::types::{envelope, Health, ResponseStatus};

    #[test]
    fn health_type_ok() {
        let h = Health::new("ok");
        assert_eq!(h.status, ResponseStatus::Success);
        assert_eq!(serde_json::to_value(&h).unwrap()["status"], "success");
    }

    #[test]
    fn envelope_merges_fields() {
        let v = envelope(ResponseStatus::Success, serde_json::json!({"token": "abc"}));
        assert_eq!(v["status"], "success");
        assert_eq!(v["token"], "abc");
    }

    #[test]
    fn envelope_wraps_non_object_under_data() {
        let v = envelope(ResponseStatus::Fail, serde_json::json!([1, 2]));
        assert_eq!(v["status"], "fail");
        assert_eq!(v["data"], serde_json::json!([1, 2]));
    }
}
