//! Input validation for values that end up in request paths and parameters.
//!
//! Class names, record ids, and field names are interpolated into URLs such
//! as `/data/{class}/{id}/file.json`. Every such value MUST pass the checks
//! in this module before a request is built.
//!
//! ```rust
//! use quickblox_client::security::names;
//!
//! assert!(names::is_valid_class_name("Movie"));
//! assert!(!names::is_valid_class_name("../users"));
//! ```

/// Validation of class, field, and record identifiers.
pub mod names {
    /// Longest class name accepted.
    pub const MAX_CLASS_NAME_LEN: usize = 64;
    /// Longest record id accepted.
    pub const MAX_ID_LEN: usize = 64;
    /// Longest field name (including dotted path) accepted.
    pub const MAX_FIELD_NAME_LEN: usize = 128;

    /// Validate a custom object class name.
    ///
    /// Class names start with an ASCII letter and continue with ASCII
    /// alphanumerics or underscores.
    ///
    /// ```rust
    /// use quickblox_client::security::names;
    ///
    /// assert!(names::is_valid_class_name("Movie"));
    /// assert!(names::is_valid_class_name("Movie_Review2"));
    /// assert!(!names::is_valid_class_name("2Movie"));
    /// assert!(!names::is_valid_class_name("Movie.json"));
    /// ```
    #[must_use]
    pub fn is_valid_class_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        name.len() <= MAX_CLASS_NAME_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Validate a record id.
    ///
    /// The backend issues 24-character hexadecimal ids; anything alphanumeric
    /// is accepted so ids from other deployments still pass.
    ///
    /// ```rust
    /// use quickblox_client::security::names;
    ///
    /// assert!(names::is_valid_object_id("5f4b8c2e9d1a3b0012ab34cd"));
    /// assert!(!names::is_valid_object_id("5f4b,5f4c"));
    /// assert!(!names::is_valid_object_id("../../etc"));
    /// ```
    #[must_use]
    pub fn is_valid_object_id(id: &str) -> bool {
        !id.is_empty() && id.len() <= MAX_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// Validate a field name.
    ///
    /// Field names start with a letter or underscore. Dots are allowed after
    /// the first character so array elements and nested values can be
    /// addressed (`tags.0`, `location.city`).
    ///
    /// ```rust
    /// use quickblox_client::security::names;
    ///
    /// assert!(names::is_valid_field_name("rating"));
    /// assert!(names::is_valid_field_name("_parent_id"));
    /// assert!(names::is_valid_field_name("tags.0"));
    /// assert!(!names::is_valid_field_name("rating[gt]"));
    /// ```
    #[must_use]
    pub fn is_valid_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            _ => return false,
        }
        name.len() <= MAX_FIELD_NAME_LEN
            && !name.ends_with('.')
            && !name.contains("..")
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    }

    /// Return the first invalid field name in `fields`, if any.
    pub fn first_invalid_field<'a>(fields: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
        fields.into_iter().find(|f| !is_valid_field_name(f))
    }
}

/// Path building for Custom Objects URLs.
pub mod url {
    /// Build the `data/...` path for a class, optionally followed by record ids.
    ///
    /// Returns `None` if the class name or any id fails validation.
    ///
    /// ```rust
    /// use quickblox_client::security::url;
    ///
    /// assert_eq!(url::data_path("Movie", &[]), Some("data/Movie.json".to_string()));
    /// assert_eq!(
    ///     url::data_path("Movie", &["a1", "b2"]),
    ///     Some("data/Movie/a1,b2.json".to_string())
    /// );
    /// assert_eq!(url::data_path("Movie", &["a1/.."]), None);
    /// ```
    #[must_use]
    pub fn data_path(class_name: &str, ids: &[&str]) -> Option<String> {
        use super::names::{is_valid_class_name, is_valid_object_id};

        if !is_valid_class_name(class_name) {
            return None;
        }
        if ids.is_empty() {
            return Some(format!("data/{}.json", class_name));
        }
        if !ids.iter().all(|id| is_valid_object_id(id)) {
            return None;
        }
        Some(format!("data/{}/{}.json", class_name, ids.join(",")))
    }
}

#[cfg(test)]
mod tests {
    mod names_tests {
        use super::super::names::*;

        #[test]
        fn test_class_names() {
            assert!(is_valid_class_name("Movie"));
            assert!(is_valid_class_name("M"));
            assert!(is_valid_class_name("Movie_2024"));

            assert!(!is_valid_class_name(""));
            assert!(!is_valid_class_name("_Movie"));
            assert!(!is_valid_class_name("Movie-Review"));
            assert!(!is_valid_class_name("Movie/1"));
            assert!(!is_valid_class_name(&"M".repeat(MAX_CLASS_NAME_LEN + 1)));
        }

        #[test]
        fn test_object_ids() {
            assert!(is_valid_object_id("5f4b8c2e9d1a3b0012ab34cd"));
            assert!(is_valid_object_id("42"));

            assert!(!is_valid_object_id(""));
            assert!(!is_valid_object_id("5f4b 8c2e"));
            assert!(!is_valid_object_id("id,other"));
            assert!(!is_valid_object_id("id.json"));
        }

        #[test]
        fn test_field_names() {
            assert!(is_valid_field_name("name"));
            assert!(is_valid_field_name("_id"));
            assert!(is_valid_field_name("location.city"));
            assert!(is_valid_field_name("scores.3"));

            assert!(!is_valid_field_name(""));
            assert!(!is_valid_field_name("1st"));
            assert!(!is_valid_field_name("name."));
            assert!(!is_valid_field_name("a..b"));
            assert!(!is_valid_field_name("name[gt]"));
            assert!(!is_valid_field_name("name&limit=1"));
        }

        #[test]
        fn test_first_invalid_field() {
            assert_eq!(first_invalid_field(["name", "rating"]), None);
            assert_eq!(first_invalid_field(["name", "bad field", "x"]), Some("bad field"));
        }
    }

    mod url_tests {
        use super::super::url::*;

        #[test]
        fn test_data_path() {
            assert_eq!(data_path("Movie", &[]), Some("data/Movie.json".to_string()));
            assert_eq!(
                data_path("Movie", &["5f4b8c2e9d1a3b0012ab34cd"]),
                Some("data/Movie/5f4b8c2e9d1a3b0012ab34cd.json".to_string())
            );
            assert_eq!(data_path("Bad Class", &[]), None);
            assert_eq!(data_path("Movie", &["ok", ""]), None);
        }
    }
}
