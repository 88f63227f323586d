//! Orchestration engine: plan each repository, fan out its checkers under
//! two bounded semaphores, and aggregate into a single [`WorkflowResult`]
//! (§4.9, §5).

pub mod execute;
pub mod plan;

pub use execute::Engine;
pub use plan::{plan_repository, ExecutionPlan};
pub use repoauditor_result::WorkflowResult;
