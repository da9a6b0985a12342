use serde::{Deserialize, Serialize};

/// A roster entry. Sourced from the roster provider and immutable afterwards;
/// `id` is the stable key used for selection membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Employee {
    /// Case-insensitive substring match against name or department.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .department
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
