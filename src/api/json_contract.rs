use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::aggregate::AuditSummary;
use crate::error::{ChartError, ChartResult};

/// Decodes a JSON array of records.
///
/// Anything other than an array, `null` included, is an `InvalidShape`
/// error. Elements that fail to decode are skipped with a
/// warning so one bad record never aborts a chart.
pub fn decode_records<T: DeserializeOwned>(value: &Value) -> ChartResult<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ChartError::InvalidShape(format!(
                "expected an array of records, got {}",
                json_kind(other)
            )));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(record) => records.push(record),
            Err(error) => warn!(index, error = %error, "skipping malformed record"),
        }
    }
    Ok(records)
}

/// Parses `input` and decodes it with [`decode_records`].
pub fn decode_records_str<T: DeserializeOwned>(input: &str) -> ChartResult<Vec<T>> {
    let value: Value = serde_json::from_str(input)?;
    decode_records(&value)
}

/// Decodes the audit totals of one learner.
///
/// Accepts a bare object, a one-element array (the usual query result shape)
/// or `null`/an empty array for "no audit data".
pub fn decode_audit_summary(value: &Value) -> ChartResult<Option<AuditSummary>> {
    let object = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => match items.as_slice() {
            [] => return Ok(None),
            [single] => single,
            _ => {
                return Err(ChartError::InvalidShape(format!(
                    "expected at most one audit summary, got {}",
                    items.len()
                )));
            }
        },
        object @ Value::Object(_) => object,
        other => {
            return Err(ChartError::InvalidShape(format!(
                "expected an audit summary object, got {}",
                json_kind(other)
            )));
        }
    };

    AuditSummary::deserialize(object)
        .map(Some)
        .map_err(|e| ChartError::InvalidData(format!("malformed audit summary: {e}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::XpTransaction;
    use serde_json::json;

    #[test]
    fn malformed_elements_are_skipped() {
        let value = json!([
            {"amount": 100, "createdAt": "2024-01-01"},
            {"amount": "lots"},
            {"amount": 50, "createdAt": "2024-01-02", "object": {"name": "quad", "type": "project"}}
        ]);
        let records: Vec<XpTransaction> = decode_records(&value).expect("records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].object_name(), "quad");
    }

    #[test]
    fn non_array_input_is_invalid_shape() {
        let result = decode_records::<XpTransaction>(&json!({"amount": 1}));
        assert!(matches!(result, Err(ChartError::InvalidShape(_))));
    }

    #[test]
    fn null_records_are_invalid_shape() {
        let result = decode_records::<XpTransaction>(&Value::Null);
        assert!(matches!(result, Err(ChartError::InvalidShape(message)) if message.contains("null")));
    }

    #[test]
    fn audit_summary_accepts_single_element_array() {
        let value = json!([{"totalUp": 30, "totalDown": 10, "auditRatio": 3.0}]);
        let summary = decode_audit_summary(&value).expect("decode").expect("summary");
        assert_eq!(summary.total_up, 30.0);
        assert_eq!(summary.audit_ratio, Some(3.0));
        assert!(decode_audit_summary(&Value::Null).expect("decode").is_none());
    }
}
