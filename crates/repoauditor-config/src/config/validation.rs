//! Configuration validation.
//!
//! The rule set is a plain list of functions, each inspecting the whole
//! [`Config`] and returning a description on failure. New rules are added by
//! pushing another closure onto [`validation_rules`]; nothing here depends
//! on rule order beyond "all must pass".

use crate::config::model::Config;

type ValidationRule = fn(&Config) -> Result<(), String>;

fn validate_engine(config: &Config) -> Result<(), String> {
    let concurrency = config.engine.max_concurrency;
    if concurrency < 1 || concurrency > 100 {
        return Err(format!(
            "engine.max_concurrency must be between 1 and 100, got {concurrency}"
        ));
    }
    Ok(())
}

fn validate_profiles(config: &Config) -> Result<(), String> {
    for (name, profile) in &config.profiles {
        if profile.description.trim().is_empty() {
            return Err(format!("profile '{name}' requires a non-empty description"));
        }
    }
    Ok(())
}

fn validate_pipelines(config: &Config) -> Result<(), String> {
    for (name, pipeline) in &config.pipelines {
        if pipeline.steps.is_empty() {
            return Err(format!("pipeline '{name}' requires at least one step"));
        }
        for step in &pipeline.steps {
            if step.name.trim().is_empty() {
                return Err(format!("pipeline '{name}' has a step with no name"));
            }
        }
    }
    Ok(())
}

/// The built-in validation rules, in the order they are run.
#[must_use]
pub fn validation_rules() -> Vec<ValidationRule> {
    vec![validate_engine, validate_profiles, validate_pipelines]
}

/// Run every rule against `config`, collecting every failing description
/// rather than stopping at the first.
pub fn validate(config: &Config) -> Result<(), Vec<String>> {
    let errors: Vec<String> =
        validation_rules().into_iter().filter_map(|rule| rule(config).err()).collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{Pipeline, PipelineStep, Profile};

    #[test]
    fn rejects_concurrency_outside_one_to_one_hundred() {
        let mut config = Config::default();
        config.engine.max_concurrency = 0;
        assert!(validate(&config).is_err());

        config.engine.max_concurrency = 101;
        assert!(validate(&config).is_err());

        config.engine.max_concurrency = 50;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_profile_with_empty_description() {
        let mut config = Config::default();
        config.profiles.insert(
            "ci".to_string(),
            Profile {
                description: String::new(),
            },
        );
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_pipeline_with_no_steps() {
        let mut config = Config::default();
        config.pipelines.insert(
            "release".to_string(),
            Pipeline { steps: Vec::new() },
        );
        assert!(validate(&config).is_err());
    }

    #[test]
    fn accepts_pipeline_with_named_steps() {
        let mut config = Config::default();
        config.pipelines.insert(
            "release".to_string(),
            Pipeline {
                steps: vec![PipelineStep {
                    name: "build".to_string(),
                    depends_on: Vec::new(),
                }],
            },
        );
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn collects_every_failing_rule() {
        let mut config = Config::default();
        config.engine.max_concurrency = 0;
        config.profiles.insert(
            "ci".to_string(),
            Profile {
                description: String::new(),
            },
        );
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
