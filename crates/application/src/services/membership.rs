use rustc_hash::FxHashMap;

/// One domain as stored remotely, and the managed lists that contain it in
/// list fetch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipEntry {
    /// Value exactly as the service returned it (used in removal payloads).
    pub value: String,
    pub list_ids: Vec<String>,
}

impl MembershipEntry {
    /// The list that keeps the domain after cross-list deduplication.
    pub fn owner(&self) -> &str {
        &self.list_ids[0]
    }

    pub fn is_duplicated(&self) -> bool {
        self.list_ids.len() > 1
    }
}

/// Domain → containing lists, keyed by lowercased domain, iterated in first
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct DomainMembership {
    entries: Vec<MembershipEntry>,
    index: FxHashMap<String, usize>,
}

impl DomainMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `list_id` contains `value`. Repeated (value, list) pairs
    /// are ignored.
    pub fn insert(&mut self, value: &str, list_id: &str) {
        let key = value.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                if !entry.list_ids.iter().any(|id| id == list_id) {
                    entry.list_ids.push(list_id.to_string());
                }
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(MembershipEntry {
                    value: value.to_string(),
                    list_ids: vec![list_id.to_string()],
                });
            }
        }
    }

    pub fn get(&self, domain: &str) -> Option<&MembershipEntry> {
        self.index
            .get(&domain.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.get(domain).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MembershipEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
