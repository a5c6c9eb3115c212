//! Entity rows and JSON validation.
//!
//! `Supplier` and `Item` are the persisted rows. `SupplierFields` and
//! `ItemFields` are the validated, not-yet-persisted field sets produced from
//! untyped JSON bodies. Validation either yields a fully-populated fields
//! struct or a `ValidationError`; nothing is partially written.

use crate::error::ValidationError;
use serde::Serialize;
use serde_json::{Map, Value};

/// A supplier row. `id` is server-assigned on create and never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub available: bool,
    pub address: String,
    pub rating: f64,
}

/// An item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Validated supplier fields, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierFields {
    pub name: String,
    pub available: bool,
    pub address: String,
    pub rating: f64,
}

/// Validated item fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
}

impl SupplierFields {
    /// Validate an untyped JSON body. Required: name, available, address, rating.
    /// `available` must be a JSON boolean exactly; `rating` is coerced to f64
    /// first, so numeric strings like "4.5" pass and non-numeric strings fail.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let map = as_object(body)?;
        let name = required_string(map, "name")?;
        let available = required_bool(map, "available")?;
        let address = required_text(map, "address")?;
        let rating = required_rating(map)?;
        Ok(SupplierFields {
            name,
            available,
            address,
            rating,
        })
    }

    /// Attach a persisted identity to the validated fields.
    pub fn with_id(self, id: i64) -> Supplier {
        Supplier {
            id,
            name: self.name,
            available: self.available,
            address: self.address,
            rating: self.rating,
        }
    }
}

impl ItemFields {
    /// Validate an untyped JSON body. Required: name.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let map = as_object(body)?;
        let name = required_string(map, "name")?;
        Ok(ItemFields { name })
    }

    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
        }
    }
}

impl Supplier {
    /// Update requires an identity assigned by a prior create.
    pub fn require_id(&self) -> Result<i64, ValidationError> {
        if self.id == 0 {
            return Err(ValidationError::MissingId);
        }
        Ok(self.id)
    }
}

impl Item {
    pub fn require_id(&self) -> Result<i64, ValidationError> {
        if self.id == 0 {
            return Err(ValidationError::MissingId);
        }
        Ok(self.id)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::MalformedBody)
}

fn required<'a>(
    map: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    map.get(field).ok_or(ValidationError::MissingField(field))
}

/// JSON type name for error messages.
fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required_string(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    let s = required_text(map, field)?;
    if s.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(s)
}

fn required_text(map: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    let v = required(map, field)?;
    v.as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::WrongType {
            field,
            expected: "string",
            actual: json_type_name(v),
        })
}

fn required_bool(map: &Map<String, Value>, field: &'static str) -> Result<bool, ValidationError> {
    let v = required(map, field)?;
    v.as_bool().ok_or(ValidationError::WrongType {
        field,
        expected: "boolean",
        actual: json_type_name(v),
    })
}

/// `rating` is the one field with explicit numeric coercion: a JSON number is
/// taken as-is, a string is parsed as f64, anything else is a type error.
fn required_rating(map: &Map<String, Value>) -> Result<f64, ValidationError> {
    let v = required(map, "rating")?;
    match v {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::WrongType {
            field: "rating",
            expected: "number",
            actual: "number",
        }),
        Value::String(s) => s.parse::<f64>().map_err(|_| ValidationError::WrongType {
            field: "rating",
            expected: "number",
            actual: "string",
        }),
        other => Err(ValidationError::WrongType {
            field: "rating",
            expected: "number",
            actual: json_type_name(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_supplier_body() -> Value {
        json!({
            "name": "Amazon",
            "available": true,
            "address": "NY",
            "rating": 4.7
        })
    }

    #[test]
    fn valid_supplier_round_trips() {
        let fields = SupplierFields::from_json(&valid_supplier_body()).unwrap();
        let supplier = fields.with_id(1);
        let out = serde_json::to_value(&supplier).unwrap();
        assert_eq!(out["name"], "Amazon");
        assert_eq!(out["available"], true);
        assert_eq!(out["address"], "NY");
        assert_eq!(out["rating"], 4.7);
        assert_eq!(out["id"], 1);
    }

    #[test]
    fn missing_field_names_the_field() {
        for field in ["name", "available", "address", "rating"] {
            let mut body = valid_supplier_body();
            body.as_object_mut().unwrap().remove(field);
            let err = SupplierFields::from_json(&body).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
        }
    }

    #[test]
    fn available_as_string_is_rejected() {
        let mut body = valid_supplier_body();
        body["available"] = json!("true");
        let err = SupplierFields::from_json(&body).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                field: "available",
                expected: "boolean",
                actual: "string",
            }
        );
    }

    #[test]
    fn numeric_string_rating_is_coerced() {
        let mut body = valid_supplier_body();
        body["rating"] = json!("4.5");
        let fields = SupplierFields::from_json(&body).unwrap();
        assert_eq!(fields.rating, 4.5);
    }

    #[test]
    fn non_numeric_string_rating_fails() {
        let mut body = valid_supplier_body();
        body["rating"] = json!("excellent");
        let err = SupplierFields::from_json(&body).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                field: "rating",
                expected: "number",
                actual: "string",
            }
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut body = valid_supplier_body();
        body["name"] = json!("");
        let err = SupplierFields::from_json(&body).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("name"));
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = SupplierFields::from_json(&json!("just a string")).unwrap_err();
        assert_eq!(err, ValidationError::MalformedBody);
        let err = ItemFields::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::MalformedBody);
    }

    #[test]
    fn item_requires_name() {
        let err = ItemFields::from_json(&json!({})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name"));
        let fields = ItemFields::from_json(&json!({"name": "bolt"})).unwrap();
        assert_eq!(fields.name, "bolt");
    }

    #[test]
    fn item_name_must_be_a_string() {
        let err = ItemFields::from_json(&json!({"name": 42})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                field: "name",
                expected: "string",
                actual: "number",
            }
        );
    }

    #[test]
    fn update_requires_assigned_id() {
        let fields = SupplierFields::from_json(&valid_supplier_body()).unwrap();
        let unsaved = fields.clone().with_id(0);
        assert_eq!(unsaved.require_id().unwrap_err(), ValidationError::MissingId);
        let persisted = fields.with_id(9);
        assert_eq!(persisted.require_id().unwrap(), 9);
    }
}
