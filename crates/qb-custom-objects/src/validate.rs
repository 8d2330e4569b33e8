//! Argument checks run before any request is built.

use quickblox_client::security::names;

use crate::error::{Error, Result};
use crate::object::CustomObject;

/// Most records a single bulk request may carry.
pub const MAX_BATCH_SIZE: usize = 100;

pub(crate) fn class_name(class_name: &str) -> Result<()> {
    if names::is_valid_class_name(class_name) {
        Ok(())
    } else {
        Err(Error::invalid_input("INVALID_CLASS_NAME", "Invalid class name"))
    }
}

pub(crate) fn object_id(id: &str) -> Result<()> {
    if names::is_valid_object_id(id) {
        Ok(())
    } else {
        Err(Error::invalid_input("INVALID_ID", "Invalid object ID format"))
    }
}

pub(crate) fn field_name(field: &str) -> Result<()> {
    if names::is_valid_field_name(field) {
        Ok(())
    } else {
        Err(Error::invalid_input("INVALID_FIELD", "Invalid field name"))
    }
}

pub(crate) fn batch_size(len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::invalid_input("EMPTY_BATCH", "At least one record is required"));
    }
    if len > MAX_BATCH_SIZE {
        return Err(Error::invalid_input(
            "BATCH_TOO_LARGE",
            format!("At most {} records per request, got {}", MAX_BATCH_SIZE, len),
        ));
    }
    Ok(())
}

pub(crate) fn object_ids(ids: &[&str]) -> Result<()> {
    batch_size(ids.len())?;
    ids.iter().try_for_each(|id| object_id(id))
}

/// The id of a record that must already exist.
pub(crate) fn existing_id(object: &CustomObject) -> Result<&str> {
    let id = object
        .id
        .as_deref()
        .ok_or_else(|| Error::invalid_input("MISSING_ID", "Record has no ID"))?;
    object_id(id)?;
    Ok(id)
}

/// A record being written as part of `class_name`.
pub(crate) fn belongs_to(object: &CustomObject, class_name: &str) -> Result<()> {
    if object.class_name.is_empty() || object.class_name == class_name {
        Ok(())
    } else {
        Err(Error::invalid_input(
            "CLASS_MISMATCH",
            format!(
                "Record of class {} cannot be written to {}",
                object.class_name, class_name
            ),
        ))
    }
}

/// Every user field name of a record.
pub(crate) fn fields(object: &CustomObject) -> Result<()> {
    match names::first_invalid_field(object.field_names()) {
        Some(field) => Err(Error::invalid_input(
            "INVALID_FIELD",
            format!("Invalid field name: {}", field),
        )),
        None => Ok(()),
    }
}
