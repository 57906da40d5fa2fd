use serde::{Deserialize, Serialize};

/// Name prefix that marks a gateway list as owned by hostsync.
pub const DEFAULT_LIST_PREFIX: &str = "[DNS Tools] AdBlock";

/// Hard item limit of a single gateway list.
pub const LIST_ITEM_LIMIT: usize = 1000;

/// Remote gateway list of domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: usize,
}

impl ManagedList {
    pub fn new(id: impl Into<String>, name: impl Into<String>, count: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
        }
    }

    pub fn is_managed(&self, prefix: &str) -> bool {
        self.name.starts_with(prefix)
    }

    /// Trailing integer of the list name (`"<prefix> 3"` → 3). Names without
    /// one count as 0.
    pub fn sequence_number(&self) -> u32 {
        self.name
            .rsplit(' ')
            .next()
            .and_then(|tail| tail.parse().ok())
            .unwrap_or(0)
    }

    pub fn spare_capacity(&self, limit: usize) -> usize {
        limit.saturating_sub(self.count)
    }
}

pub fn managed_list_name(prefix: &str, number: u32) -> String {
    format!("{} {}", prefix, number)
}

/// `1 + max(sequence numbers)`, or 1 when there are no lists.
pub fn next_list_number<'a>(lists: impl IntoIterator<Item = &'a ManagedList>) -> u32 {
    lists
        .into_iter()
        .map(ManagedList::sequence_number)
        .max()
        .unwrap_or(0)
        + 1
}
