//! Record-level access control.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Who may perform an action on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Any user of the application.
    Open,
    /// Only the record owner.
    Owner,
    /// Nobody, including the owner.
    NotAllowed,
    /// The users listed in [`AccessRule::ids`].
    OpenForUsersIds,
    /// Users tagged with one of [`AccessRule::groups`].
    OpenForGroups,
}

impl AccessLevel {
    /// Wire name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Open => "open",
            AccessLevel::Owner => "owner",
            AccessLevel::NotAllowed => "not_allowed",
            AccessLevel::OpenForUsersIds => "open_for_users_ids",
            AccessLevel::OpenForGroups => "open_for_groups",
        }
    }
}

/// Access rule for one action (read, update or delete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub access: AccessLevel,
    #[serde(default, deserialize_with = "deserialize_id_list", skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_id_list", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

impl AccessRule {
    fn with_access(access: AccessLevel) -> Self {
        Self {
            access,
            ids: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn open() -> Self {
        Self::with_access(AccessLevel::Open)
    }

    pub fn owner() -> Self {
        Self::with_access(AccessLevel::Owner)
    }

    pub fn not_allowed() -> Self {
        Self::with_access(AccessLevel::NotAllowed)
    }

    /// Allow only the given user ids.
    pub fn for_users<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
            ..Self::with_access(AccessLevel::OpenForUsersIds)
        }
    }

    fn to_json(&self) -> Value {
        let mut rule = Map::new();
        rule.insert("access".to_string(), Value::from(self.access.as_str()));
        if !self.ids.is_empty() {
            rule.insert("ids".to_string(), Value::from(self.ids.clone()));
        }
        if !self.groups.is_empty() {
            rule.insert("groups".to_string(), Value::from(self.groups.clone()));
        }
        Value::Object(rule)
    }

    /// Allow only users tagged with one of the given groups.
    pub fn for_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            ..Self::with_access(AccessLevel::OpenForGroups)
        }
    }
}

/// Permissions of a record. Unset actions keep the class default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<AccessRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<AccessRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<AccessRule>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read(mut self, rule: AccessRule) -> Self {
        self.read = Some(rule);
        self
    }

    pub fn with_update(mut self, rule: AccessRule) -> Self {
        self.update = Some(rule);
        self
    }

    pub fn with_delete(mut self, rule: AccessRule) -> Self {
        self.delete = Some(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.read.is_none() && self.update.is_none() && self.delete.is_none()
    }

    /// The `permissions` object of a request body.
    pub(crate) fn to_json(&self) -> Value {
        let rules = [("read", &self.read), ("update", &self.update), ("delete", &self.delete)];
        Value::Object(
            rules
                .into_iter()
                .filter_map(|(action, rule)| Some((action.to_string(), rule.as_ref()?.to_json())))
                .collect(),
        )
    }
}

/// Deserialize an id list sent as an array of strings or numbers, or as a
/// comma separated string.
fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdList {
        List(Vec<Id>),
        Joined(String),
    }

    Option::<IdList>::deserialize(deserializer).map(|list| match list {
        Some(IdList::List(ids)) => ids
            .into_iter()
            .map(|id| match id {
                Id::Number(n) => n.to_string(),
                Id::Text(s) => s,
            })
            .collect(),
        Some(IdList::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    })
}
