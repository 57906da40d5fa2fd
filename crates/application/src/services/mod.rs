pub mod list_allocator;
pub mod membership;
pub mod mutation_executor;
pub mod override_reconciler;
pub mod remote_state;

pub use list_allocator::{
    derive_counts, plan_allocation, plan_block_lists, plan_empty_list_cleanup, AllocationPlan,
    BlockListPlan, EmptyListCleanup, ListFill, ListLayout, ListRemoval, NewListBatch,
};
pub use membership::{DomainMembership, MembershipEntry};
pub use mutation_executor::MutationExecutor;
pub use override_reconciler::{
    index_overrides, plan_overrides, ExistingOverride, OverrideDecision, PrecedenceAllocator,
};
pub use remote_state::{RemoteSnapshot, RemoteStateReader};
