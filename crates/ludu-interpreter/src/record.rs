//! Output records emitted by `obj` statements.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::Value;

/// 2^53: above this not every integer is representable as an `f64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A stored field value. Serializes as a bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Field {
    /// Reads the field back as a runtime value. Floats with no fractional
    /// part come back integer-typed while they are exactly representable.
    pub fn to_value(&self) -> Value {
        match self {
            Field::Int(n) => Value::int(*n),
            Field::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => Value::int(*f as i64),
            Field::Float(f) => Value::float(*f),
            Field::Str(s) => Value::Str(s.clone()),
            Field::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<Value> for Field {
    fn from(v: Value) -> Self {
        match v {
            Value::Num {
                value,
                integer: true,
            } => Field::Int(value as i64),
            Value::Num { value, .. } => Field::Float(value),
            Value::Str(s) => Field::Str(s),
            Value::Bool(b) => Field::Bool(b),
        }
    }
}

/// One emitted object: `class`, `id` and every field assigned in its body.
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    /// A record with only `class` set; the id follows via [`Record::set_id`].
    pub(crate) fn new(class: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("class".to_string(), Field::Str(class.to_string()));
        Self { fields }
    }

    /// Numbers stay numeric; anything else is stored as its string form.
    pub(crate) fn set_id(&mut self, id: Value) {
        let id = match id {
            v @ Value::Num { .. } => Field::from(v),
            other => Field::Str(other.to_string()),
        };
        self.fields.insert("id".to_string(), id);
    }

    pub fn class(&self) -> &str {
        match self.fields.get("class") {
            Some(Field::Str(s)) => s,
            _ => "",
        }
    }

    pub fn id(&self) -> Option<&Field> {
        self.fields.get("id")
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub(crate) fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), Field::from(value));
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_fields_read_back() {
        assert_eq!(Field::Float(3.0).to_value(), Value::int(3));
        assert_eq!(Field::Float(2.5).to_value(), Value::float(2.5));
        assert_eq!(Field::Float(-4096.0).to_value(), Value::int(-4096));
    }

    #[test]
    fn test_huge_float_fields_stay_float() {
        assert_eq!(Field::Float(1e20).to_value(), Value::float(1e20));
        assert_eq!(Field::Float(-1e300).to_value(), Value::float(-1e300));
    }

    #[test]
    fn test_record_id_forms() {
        let mut record = Record::new("Wolf");
        assert_eq!(record.id(), None);
        record.set_id(Value::int(3));
        assert_eq!(record.id(), Some(&Field::Int(3)));
        record.set_id(Value::Bool(false));
        assert_eq!(record.id(), Some(&Field::Str("false".to_string())));
        assert_eq!(record.class(), "Wolf");
    }
}
