//! Built-in checker implementations (§4.7).

pub mod branch_protection;
pub mod ci_status;
mod common;
pub mod cyclomatic_complexity;
pub mod dependencies;
pub mod deprecated_components;
pub mod documentation;
pub mod git_status;
pub mod last_commit;
pub mod license;
pub mod security;

pub use branch_protection::BranchProtectionChecker;
pub use ci_status::CiStatusChecker;
pub use cyclomatic_complexity::CyclomaticComplexityChecker;
pub use dependencies::DependenciesChecker;
pub use deprecated_components::DeprecatedComponentsChecker;
pub use documentation::DocumentationChecker;
pub use git_status::GitStatusChecker;
pub use last_commit::LastCommitChecker;
pub use license::LicenseChecker;
pub use security::SecurityChecker;
