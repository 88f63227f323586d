//! Configuration model, loading, overrides, and validation.

pub mod loader;
pub mod model;
pub mod overrides;
pub mod validation;

pub use loader::{load_config_file, load_config_str, load_repository_list};
pub use model::{
    AnalyzerConfig, CategoryConfig, CheckerConfig, Config, EngineConfig, OptionValue, Pipeline,
    PipelineStep, Profile, Repository,
};
pub use overrides::{apply_overrides, Condition, ConditionType, Operator, Override};
pub use validation::validate;
