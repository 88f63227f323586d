//! Result model and fluent builder: a `CheckResult` is produced by exactly
//! one checker invocation and owned by its `RepositoryResult` once returned;
//! repository results roll up into one `WorkflowResult` per audit run.

pub mod check_result;
pub mod issue;
pub mod metric;
pub mod repository_result;
pub mod status;
pub mod workflow_result;

pub use check_result::{CheckResult, CheckResultBuilder};
pub use issue::{Issue, Location, Warning};
pub use metric::MetricValue;
pub use repository_result::{AnalysisResult, RepositoryResult};
pub use status::Status;
pub use workflow_result::{WorkflowResult, WorkflowSummary};
