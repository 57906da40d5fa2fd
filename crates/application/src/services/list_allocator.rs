//! Planning for the block-list half of a sync.
//!
//! Everything here is pure: it works on a snapshot and returns plans that the
//! sync use case hands to the mutation executor.

use hostsync_domain::{block_rule_precedence, managed_list_name, GatewayRule, ManagedList};
use rustc_hash::{FxHashMap, FxHashSet};

use super::membership::DomainMembership;

/// How managed lists are named, sized and prioritised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLayout {
    pub prefix: String,
    pub item_limit: usize,
    pub block_precedence_base: i64,
}

/// Values to remove from one list in a single bulk call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRemoval {
    pub list_id: String,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockListPlan {
    /// Extra copies of domains held by more than one list.
    pub duplicate_removals: Vec<ListRemoval>,
    /// Domains no longer desired, removed from their owning list.
    pub stale_removals: Vec<ListRemoval>,
    /// Desired domains not present in any list, in input order.
    pub to_add: Vec<String>,
}

impl BlockListPlan {
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_removals.iter().map(|r| r.domains.len()).sum()
    }

    pub fn stale_count(&self) -> usize {
        self.stale_removals.iter().map(|r| r.domains.len()).sum()
    }

    pub fn is_noop(&self) -> bool {
        self.duplicate_removals.is_empty() && self.stale_removals.is_empty() && self.to_add.is_empty()
    }
}

/// Groups removals per list while keeping first-seen list order.
#[derive(Default)]
struct RemovalGroups {
    groups: Vec<ListRemoval>,
    index: FxHashMap<String, usize>,
}

impl RemovalGroups {
    fn push(&mut self, list_id: &str, domain: &str) {
        let i = *self.index.entry(list_id.to_string()).or_insert_with(|| {
            self.groups.push(ListRemoval {
                list_id: list_id.to_string(),
                domains: Vec::new(),
            });
            self.groups.len() - 1
        });
        self.groups[i].domains.push(domain.to_string());
    }

    fn into_vec(self) -> Vec<ListRemoval> {
        self.groups
    }
}

/// Diffs desired domains against current membership.
///
/// A domain found in several lists stays in the first one (fetch order) and
/// is scheduled for removal everywhere else. Owner lookups afterwards only
/// see that surviving list, so a domain being deduplicated is never mistaken
/// for a missing one.
pub fn plan_block_lists(desired: &[String], membership: &DomainMembership) -> BlockListPlan {
    let desired_keys: FxHashSet<String> = desired.iter().map(|d| d.to_lowercase()).collect();

    let mut duplicates = RemovalGroups::default();
    for entry in membership.iter().filter(|e| e.is_duplicated()) {
        for list_id in &entry.list_ids[1..] {
            duplicates.push(list_id, &entry.value);
        }
    }

    let mut stale = RemovalGroups::default();
    for entry in membership.iter() {
        if !desired_keys.contains(&entry.value.to_lowercase()) {
            stale.push(entry.owner(), &entry.value);
        }
    }

    let mut queued = FxHashSet::default();
    let to_add = desired
        .iter()
        .filter(|d| !membership.contains(d) && queued.insert(d.to_lowercase()))
        .cloned()
        .collect();

    BlockListPlan {
        duplicate_removals: duplicates.into_vec(),
        stale_removals: stale.into_vec(),
        to_add,
    }
}

/// Counts after `removed[list_id]` values have been taken out of each list.
/// Used when the lists cannot be re-read after the removal pass.
pub fn derive_counts(lists: &[ManagedList], removed: &FxHashMap<String, usize>) -> Vec<ManagedList> {
    lists
        .iter()
        .map(|l| {
            let gone = removed.get(&l.id).copied().unwrap_or(0);
            ManagedList::new(l.id.clone(), l.name.clone(), l.count.saturating_sub(gone))
        })
        .collect()
}

/// An empty list to delete, with the block rule that points at it if one
/// can be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyListCleanup {
    pub list: ManagedList,
    pub rule: Option<GatewayRule>,
}

pub fn plan_empty_list_cleanup(lists: &[ManagedList], rules: &[GatewayRule]) -> Vec<EmptyListCleanup> {
    lists
        .iter()
        .filter(|l| l.count == 0)
        .map(|list| EmptyListCleanup {
            list: list.clone(),
            rule: rules.iter().find(|r| r.references_list(list)).cloned(),
        })
        .collect()
}

/// Domains appended to an existing list's spare capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFill {
    pub list_id: String,
    pub list_name: String,
    pub domains: Vec<String>,
}

/// A list to create, the domains it starts with, and the precedence of the
/// block rule that will reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListBatch {
    pub number: u32,
    pub name: String,
    pub precedence: i64,
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationPlan {
    pub fills: Vec<ListFill>,
    pub new_lists: Vec<NewListBatch>,
}

impl AllocationPlan {
    pub fn domain_count(&self) -> usize {
        self.fills.iter().map(|f| f.domains.len()).sum::<usize>()
            + self.new_lists.iter().map(|n| n.domains.len()).sum::<usize>()
    }
}

/// Packs `to_add` into spare capacity of `lists` (in order), then into new
/// lists of at most `layout.item_limit` domains each.
///
/// New lists are numbered from `first_number` upwards, one per batch, so
/// names never collide within a run. Callers pass `next_list_number` over
/// every list that still exists, including ones excluded from filling.
pub fn plan_allocation(
    lists: &[ManagedList],
    to_add: &[String],
    layout: &ListLayout,
    first_number: u32,
) -> AllocationPlan {
    let mut plan = AllocationPlan::default();
    let mut remaining = to_add;

    for list in lists {
        if remaining.is_empty() {
            break;
        }
        let space = list.spare_capacity(layout.item_limit);
        if space == 0 {
            continue;
        }
        let take = space.min(remaining.len());
        let (chunk, rest) = remaining.split_at(take);
        plan.fills.push(ListFill {
            list_id: list.id.clone(),
            list_name: list.name.clone(),
            domains: chunk.to_vec(),
        });
        remaining = rest;
    }

    let mut number = first_number;
    for chunk in remaining.chunks(layout.item_limit.max(1)) {
        plan.new_lists.push(NewListBatch {
            number,
            name: managed_list_name(&layout.prefix, number),
            precedence: block_rule_precedence(layout.block_precedence_base, number),
            domains: chunk.to_vec(),
        });
        number += 1;
    }

    plan
}
