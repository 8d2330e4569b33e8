//! Custom object records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::permissions::Permissions;

/// Wire name of the record id.
pub(crate) const ID_FIELD: &str = "_id";
/// Wire name of the parent record id.
pub(crate) const PARENT_ID_FIELD: &str = "_parent_id";

/// Fields the backend manages itself; they are never sent in a request body.
const SERVER_MANAGED: &[&str] = &[ID_FIELD, "user_id", "created_at", "updated_at", "class_name"];

/// A record of a custom object class.
///
/// User-defined fields live in [`fields`](Self::fields); the system fields
/// (`_id`, `_parent_id`, `user_id`, timestamps) have typed accessors.
///
/// ```rust
/// use quickblox_custom_objects::CustomObject;
/// use serde_json::json;
///
/// let movie = CustomObject::new("Movie")
///     .with_field("name", "Alien")
///     .with_field("rating", 8.5);
///
/// assert_eq!(movie.field("name"), Some(&json!("Alien")));
/// assert!(movie.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomObject {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Class the record belongs to. Filled in by the client from the request
    /// or the response envelope.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,

    /// Owner of the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(rename = "_parent_id", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Access rules to apply on create or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CustomObject {
    /// Create an empty record of the given class.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Default::default()
        }
    }

    /// Set the record id, as needed for updates.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Link the record to a parent record.
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set a user-defined field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the access rules sent on create or update.
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Get a user-defined field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field, returning the previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Remove a user-defined field, returning its value.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Build the JSON body sent on create or update.
    ///
    /// Server managed fields are left out; `_id` is included only when
    /// `include_id` is set (bulk updates address records by it).
    pub(crate) fn to_body(&self, include_id: bool) -> Map<String, Value> {
        let mut body: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(name, _)| !SERVER_MANAGED.contains(&name.as_str()) && name.as_str() != PARENT_ID_FIELD)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        if include_id {
            if let Some(ref id) = self.id {
                body.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            }
        }
        if let Some(ref parent_id) = self.parent_id {
            body.insert(PARENT_ID_FIELD.to_string(), Value::String(parent_id.clone()));
        }
        if let Some(permissions) = self.permissions.as_ref().filter(|p| !p.is_empty()) {
            body.insert("permissions".to_string(), permissions.to_json());
        }
        body
    }

    /// Field names set plainly on this record (used to detect operator clashes).
    pub(crate) fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
