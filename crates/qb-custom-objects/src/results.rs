//! Results of collection, bulk and permission requests.

use serde::{Deserialize, Serialize};

use crate::object::CustomObject;
use crate::permissions::Permissions;

/// A page of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagedObjects {
    pub class_name: String,
    pub skip: u32,
    pub limit: u32,
    pub items: Vec<CustomObject>,
    /// Total number of matching records, when the backend reports it.
    pub count: Option<u64>,
    /// Ids a bulk update could not find.
    pub not_found_ids: Vec<String>,
}

impl PagedObjects {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of the returned records, in response order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().filter_map(|item| item.id.as_deref()).collect()
    }
}

impl IntoIterator for PagedObjects {
    type Item = CustomObject;
    type IntoIter = std::vec::IntoIter<CustomObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdList {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Envelope of every collection response.
#[derive(Debug, Deserialize)]
pub(crate) struct PagedEnvelope {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub items: Vec<CustomObject>,
    #[serde(default, alias = "count")]
    pub items_count: Option<u64>,
    #[serde(default)]
    pub not_found: Option<IdList>,
}

impl PagedEnvelope {
    /// Convert into [`PagedObjects`], stamping `class_name` on every item.
    ///
    /// `fallback_class` is used when the envelope does not name the class.
    pub fn into_paged(self, fallback_class: &str) -> PagedObjects {
        let class_name = if self.class_name.is_empty() {
            fallback_class.to_string()
        } else {
            self.class_name
        };
        let items = self
            .items
            .into_iter()
            .map(|mut item| {
                item.class_name.clone_from(&class_name);
                item
            })
            .collect();

        PagedObjects {
            class_name,
            skip: self.skip,
            limit: self.limit,
            items,
            count: self.items_count,
            not_found_ids: self.not_found.map(|n| n.ids).unwrap_or_default(),
        }
    }
}

/// Outcome of deleting several records at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MultiDeleteResult {
    pub deleted_ids: Vec<String>,
    pub not_found_ids: Vec<String>,
    pub wrong_permissions_ids: Vec<String>,
}

impl MultiDeleteResult {
    /// Returns true if every requested record was deleted.
    pub fn all_deleted(&self) -> bool {
        self.not_found_ids.is_empty() && self.wrong_permissions_ids.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MultiDeleteEnvelope {
    #[serde(rename = "SuccessfullyDeleted", default)]
    successfully_deleted: IdList,
    #[serde(rename = "NotFound", default)]
    not_found: IdList,
    #[serde(rename = "WrongPermissions", default)]
    wrong_permissions: IdList,
}

impl From<MultiDeleteEnvelope> for MultiDeleteResult {
    fn from(envelope: MultiDeleteEnvelope) -> Self {
        Self {
            deleted_ids: envelope.successfully_deleted.ids,
            not_found_ids: envelope.not_found.ids,
            wrong_permissions_ids: envelope.wrong_permissions.ids,
        }
    }
}

/// Permissions of a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPermissions {
    pub record_id: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Body of a `count=1` request.
#[derive(Debug, Deserialize)]
pub(crate) struct CountEnvelope {
    #[serde(alias = "count")]
    pub items_count: u64,
}
