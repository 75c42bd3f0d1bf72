use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

/// A single failed rule, addressed by the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub path: Vec<String>,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            message: message.into(),
        }
    }

    /// Whether this violation targets the given top-level field
    pub fn is_for(&self, field: &str) -> bool {
        self.path.first().map(String::as_str) == Some(field)
    }
}

/// A string field of a JSON body: its key on the wire and the struct field
/// `validator` reports its errors under.
#[derive(Debug, Clone, Copy)]
pub struct BodyField {
    pub json: &'static str,
    pub rust: &'static str,
}

/// Short name of a JSON value's kind, as used in type-mismatch messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a rule failure carrying its own code and message, for `custom` validators
pub fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Deserialize `raw` into `T` and run its `#[validate(...)]` rules.
///
/// Every field is checked and every failure reported, in the order of
/// `fields`. A field that is missing or not a string is reported as such and
/// its rules are skipped. Within a field, failures are ordered by their
/// position in `rule_order`.
pub fn validate_payload<T>(raw: &Value, fields: &[BodyField], rule_order: &[&str]) -> Result<T, Vec<FieldViolation>>
where
    T: DeserializeOwned + Validate,
{
    let object = match raw {
        Value::Object(map) => map,
        other => {
            return Err(vec![FieldViolation::new(
                &[],
                format!("Expected object, received {}", json_kind(other)),
            )]);
        }
    };

    // Wrong shapes are recorded here and replaced by an empty string so the
    // rest of the body still deserializes and gets its rules checked
    let mut shape = Vec::with_capacity(fields.len());
    let mut strings = Map::new();
    for field in fields {
        let problem = match object.get(field.json) {
            Some(Value::String(s)) => {
                strings.insert(field.json.to_string(), Value::String(s.clone()));
                None
            }
            None => Some("Required".to_string()),
            Some(other) => Some(format!("Expected string, received {}", json_kind(other))),
        };
        if problem.is_some() {
            strings.insert(field.json.to_string(), Value::String(String::new()));
        }
        shape.push(problem);
    }

    let payload: T = serde_json::from_value(Value::Object(strings))
        .map_err(|e| vec![FieldViolation::new(&[], e.to_string())])?;
    let rule_errors = payload.validate().err();

    let mut violations = Vec::new();
    for (field, problem) in fields.iter().zip(shape) {
        match problem {
            Some(message) => violations.push(FieldViolation::new(&[field.json], message)),
            None => {
                if let Some(errors) = &rule_errors {
                    violations.extend(
                        field_messages(errors, field, rule_order)
                            .into_iter()
                            .map(|msg| FieldViolation::new(&[field.json], msg)),
                    );
                }
            }
        }
    }

    if violations.is_empty() { Ok(payload) } else { Err(violations) }
}

// Messages for one field, ordered by rule code
fn field_messages(errors: &ValidationErrors, field: &BodyField, rule_order: &[&str]) -> Vec<String> {
    let field_errors = errors.field_errors();
    let mut errs: Vec<&ValidationError> = Vec::new();
    for (name, list) in &field_errors {
        let name: &str = name;
        if name == field.rust || name == field.json {
            errs.extend(list.iter());
        }
    }

    let rank = |code: &str| rule_order.iter().position(|c| *c == code).unwrap_or(rule_order.len());
    errs.sort_by_key(|e| rank(&*e.code));

    errs.into_iter()
        .map(|e| e.message.clone().unwrap_or_else(|| "Invalid input".into()).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(
            length(min = 2, code = "too_small", message = "too short"),
            custom(function = "not_shouting")
        )]
        name: String,
        #[validate(length(min = 1, code = "too_small", message = "empty"))]
        note: String,
    }

    fn not_shouting(value: &str) -> Result<(), ValidationError> {
        if value.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(rule_error("shouting", "no capitals"));
        }
        Ok(())
    }

    const FIELDS: &[BodyField] = &[
        BodyField { json: "name", rust: "name" },
        BodyField { json: "note", rust: "note" },
    ];
    const ORDER: &[&str] = &["too_small", "shouting"];

    #[test]
    fn test_validate_payload_ok() {
        let p: TestPayload = validate_payload(&json!({ "name": "ok", "note": "hi", "extra": 1 }), FIELDS, ORDER).unwrap();
        assert_eq!(p.name, "ok");
        assert_eq!(p.note, "hi");
    }

    #[test]
    fn test_validate_payload_orders_failures_by_field_then_rule() {
        let errs = validate_payload::<TestPayload>(&json!({ "name": "A", "note": "" }), FIELDS, ORDER).unwrap_err();
        assert_eq!(
            errs,
            vec![
                FieldViolation::new(&["name"], "too short"),
                FieldViolation::new(&["name"], "no capitals"),
                FieldViolation::new(&["note"], "empty"),
            ]
        );
    }

    #[test]
    fn test_validate_payload_wrong_shapes_skip_their_rules() {
        let errs = validate_payload::<TestPayload>(&json!({ "name": 42 }), FIELDS, ORDER).unwrap_err();
        assert_eq!(
            errs,
            vec![
                FieldViolation::new(&["name"], "Expected string, received number"),
                FieldViolation::new(&["note"], "Required"),
            ]
        );
    }

    #[test]
    fn test_validate_payload_non_object() {
        let errs = validate_payload::<TestPayload>(&json!([1, 2]), FIELDS, ORDER).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].path.is_empty());
        assert_eq!(errs[0].message, "Expected object, received array");
    }
}
