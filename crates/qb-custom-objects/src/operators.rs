//! Special update operators: in-place changes the backend applies to a
//! stored record (increments and array edits) instead of overwriting fields.
//!
//! ```rust
//! use quickblox_custom_objects::SpecialUpdateOperators;
//! use serde_json::json;
//!
//! let ops = SpecialUpdateOperators::new()
//!     .inc("views", 1)
//!     .push("tags", "classic");
//!
//! assert_eq!(
//!     ops.to_value().unwrap(),
//!     json!({"inc": {"views": 1}, "push": {"tags": "classic"}})
//! );
//! ```

use std::collections::BTreeMap;

use quickblox_client::security::names;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Operators applied to one record in a single update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialUpdateOperators {
    operators: BTreeMap<&'static str, Map<String, Value>>,
    elements: Map<String, Value>,
    invalid_field: Option<String>,
}

impl SpecialUpdateOperators {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(mut self, operator: &'static str, field: &str, value: Value) -> Self {
        if !names::is_valid_field_name(field) {
            self.invalid_field.get_or_insert_with(|| field.to_string());
            return self;
        }
        self.operators
            .entry(operator)
            .or_default()
            .insert(field.to_string(), value);
        self
    }

    /// Add `amount` to a numeric field (negative to decrement).
    pub fn inc(self, field: &str, amount: impl Into<Value>) -> Self {
        self.add("inc", field, amount.into())
    }

    /// Remove every occurrence of `value` from an array field.
    pub fn pull(self, field: &str, value: impl Into<Value>) -> Self {
        self.add("pull", field, value.into())
    }

    /// Remove every occurrence of each of `values` from an array field.
    pub fn pull_all<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.add("pull_all", field, Value::Array(values))
    }

    /// Remove the first element of an array field.
    pub fn pop_first(self, field: &str) -> Self {
        self.add("pop", field, Value::from(-1))
    }

    /// Remove the last element of an array field.
    pub fn pop_last(self, field: &str) -> Self {
        self.add("pop", field, Value::from(1))
    }

    /// Append `value` to an array field.
    pub fn push(self, field: &str, value: impl Into<Value>) -> Self {
        self.add("push", field, value.into())
    }

    /// Append `value` to an array field unless already present.
    pub fn add_to_set(self, field: &str, value: impl Into<Value>) -> Self {
        self.add("add_to_set", field, value.into())
    }

    /// Replace the element at `index` of an array field.
    pub fn set_element(mut self, field: &str, index: usize, value: impl Into<Value>) -> Self {
        let path = format!("{}.{}", field, index);
        if !names::is_valid_field_name(field) || !names::is_valid_field_name(&path) {
            self.invalid_field.get_or_insert_with(|| field.to_string());
            return self;
        }
        self.elements.insert(path, value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty() && self.elements.is_empty() && self.invalid_field.is_none()
    }

    /// Names of all fields touched by an operator.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.operators
            .values()
            .flat_map(|fields| fields.keys())
            .chain(self.elements.keys())
            .map(String::as_str)
    }

    fn check_valid(&self) -> Result<()> {
        match self.invalid_field {
            Some(ref field) => Err(Error::invalid_input(
                "INVALID_FIELD",
                format!("Invalid field name: {}", field),
            )),
            None => Ok(()),
        }
    }

    /// The operators as a JSON object.
    pub fn to_value(&self) -> Result<Value> {
        let mut body = Map::new();
        self.merge_into(&mut body)?;
        Ok(Value::Object(body))
    }

    /// Merge the operators into an update body.
    ///
    /// Fails if an operator targets a field the body already sets, or if a
    /// field name was invalid.
    pub fn merge_into(&self, body: &mut Map<String, Value>) -> Result<()> {
        self.check_valid()?;

        if let Some(field) = self.fields().find(|f| body.contains_key(*f)) {
            return Err(Error::invalid_input(
                "INVALID_FIELD",
                format!("Field {} is both set and updated by an operator", field),
            ));
        }

        for (operator, fields) in &self.operators {
            match body.get_mut(*operator) {
                Some(Value::Object(existing)) => {
                    existing.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Some(_) => {
                    return Err(Error::invalid_input(
                        "INVALID_FIELD",
                        format!("Field {} clashes with the {} operator", operator, operator),
                    ));
                }
                None => {
                    body.insert(operator.to_string(), Value::Object(fields.clone()));
                }
            }
        }
        body.extend(self.elements.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}
