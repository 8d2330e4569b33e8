//! Builder for filtered, sorted and paged record listings.
//!
//! Field names are validated before they are put into a parameter name, so
//! user input cannot inject extra parameters or operators.
//!
//! # Example
//!
//! ```rust
//! use quickblox_custom_objects::ExtendedRequest;
//!
//! let request = ExtendedRequest::builder()
//!     .gt("rating", 7)
//!     .in_values("genre", ["sci-fi", "horror"])
//!     .sort_desc("created_at")
//!     .limit(20)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     request.to_query_string(),
//!     "rating%5Bgt%5D=7&genre%5Bin%5D=sci-fi%2Chorror&sort_desc=created_at&limit=20"
//! );
//! ```

use std::fmt::Display;

use quickblox_client::security::names;

use crate::error::{Error, Result};

/// Largest page the backend serves.
pub const MAX_LIMIT: u32 = 1000;

/// Query parameters for [`get_objects_extended`](crate::CustomObjectsClient::get_objects_extended).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedRequest {
    params: Vec<(String, String)>,
}

impl ExtendedRequest {
    pub fn builder() -> ExtendedRequestBuilder {
        ExtendedRequestBuilder::default()
    }

    /// Parameters in insertion order (`limit` and `skip` last).
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.params.clone()
    }

    /// URL-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(&self.params).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Value of a parameter, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builder for [`ExtendedRequest`].
#[derive(Debug, Clone, Default)]
pub struct ExtendedRequestBuilder {
    params: Vec<(String, String)>,
    limit: Option<u32>,
    skip: Option<u32>,
    invalid_field: Option<String>,
}

impl ExtendedRequestBuilder {
    fn check_field(&mut self, field: &str) -> bool {
        if names::is_valid_field_name(field) {
            return true;
        }
        if self.invalid_field.is_none() {
            self.invalid_field = Some(field.to_string());
        }
        false
    }

    fn push(mut self, name: String, value: String) -> Self {
        self.params.push((name, value));
        self
    }

    fn operator(mut self, field: &str, op: &str, value: String) -> Self {
        if !self.check_field(field) {
            return self;
        }
        self.push(format!("{}[{}]", field, op), value)
    }

    fn join<I, V>(values: I) -> String
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `field = value`
    pub fn eq(mut self, field: &str, value: impl Display) -> Self {
        if !self.check_field(field) {
            return self;
        }
        self.push(field.to_string(), value.to_string())
    }

    pub fn lt(self, field: &str, value: impl Display) -> Self {
        self.operator(field, "lt", value.to_string())
    }

    pub fn lte(self, field: &str, value: impl Display) -> Self {
        self.operator(field, "lte", value.to_string())
    }

    pub fn gt(self, field: &str, value: impl Display) -> Self {
        self.operator(field, "gt", value.to_string())
    }

    pub fn gte(self, field: &str, value: impl Display) -> Self {
        self.operator(field, "gte", value.to_string())
    }

    pub fn ne(self, field: &str, value: impl Display) -> Self {
        self.operator(field, "ne", value.to_string())
    }

    /// Field value is one of `values`.
    pub fn in_values<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.operator(field, "in", Self::join(values))
    }

    /// Field value is none of `values`.
    pub fn not_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.operator(field, "nin", Self::join(values))
    }

    /// Array field contains all of `values`.
    pub fn all<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.operator(field, "all", Self::join(values))
    }

    /// String field contains `value`.
    pub fn contains(self, field: &str, value: impl Display) -> Self {
        self.operator(field, "ctn", value.to_string())
    }

    /// Field equals any of `values`.
    pub fn or<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.operator(field, "or", Self::join(values))
    }

    /// Location field within `max_distance` meters of a point.
    pub fn near(self, field: &str, longitude: f64, latitude: f64, max_distance: u32) -> Self {
        self.operator(field, "near", format!("{},{};{}", longitude, latitude, max_distance))
    }

    pub fn sort_asc(mut self, field: &str) -> Self {
        if !self.check_field(field) {
            return self;
        }
        self.push("sort_asc".to_string(), field.to_string())
    }

    pub fn sort_desc(mut self, field: &str) -> Self {
        if !self.check_field(field) {
            return self;
        }
        self.push("sort_desc".to_string(), field.to_string())
    }

    /// Page size, clamped to `1..=1000`.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.clamp(1, MAX_LIMIT));
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Return only these fields.
    pub fn include_fields(mut self, fields: &[&str]) -> Self {
        if !fields.iter().all(|f| self.check_field(f)) {
            return self;
        }
        self.push("output[include]".to_string(), fields.join(","))
    }

    /// Return every field except these.
    pub fn exclude_fields(mut self, fields: &[&str]) -> Self {
        if !fields.iter().all(|f| self.check_field(f)) {
            return self;
        }
        self.push("output[exclude]".to_string(), fields.join(","))
    }

    pub fn group_by(mut self, field: &str) -> Self {
        if !self.check_field(field) {
            return self;
        }
        self.push("group_by".to_string(), field.to_string())
    }

    /// Add a parameter as-is.
    ///
    /// The name is not validated; it is still URL-encoded on the wire.
    pub fn param(self, name: impl Into<String>, value: impl Display) -> Self {
        self.push(name.into(), value.to_string())
    }

    /// Finish the request, failing on the first invalid field name.
    pub fn build(self) -> Result<ExtendedRequest> {
        if let Some(field) = self.invalid_field {
            return Err(Error::invalid_input(
                "INVALID_FIELD",
                format!("Invalid field name: {}", field),
            ));
        }

        let mut params = self.params;
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("skip".to_string(), skip.to_string()));
        }
        Ok(ExtendedRequest { params })
    }
}
