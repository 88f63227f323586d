//! Command-line interface for repoauditor.
//!
//! Thin glue: parse flags, load/validate configuration, plan or run the
//! audit through `repoauditor-engine`, and render the result through
//! `repoauditor-reporter`. `main.rs` only maps the returned [`ExitCode`] to
//! a process exit status; this module owns every other user-visible effect.

use clap::{Parser, Subcommand, ValueEnum};
use repoauditor_checkers::CheckerRegistry;
use repoauditor_config::config::model::{CheckerConfig, Config, OptionValue, Repository};
use repoauditor_engine::{plan_repository, Engine};
use repoauditor_executor::{CommandExecutor, CommandSpec};
use repoauditor_reporter::{exit_code_for, format_workflow, json::to_json, write_report};
use repoauditor_utils::exit_codes::ExitCode;
use repoauditor_utils::logging::init_tracing;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Maximum `--timeout` accepted on the command line, in seconds (§6).
const MAX_CLI_TIMEOUT_SECS: u64 = 7200;

/// repoauditor - a multi-repository health auditor
#[derive(Parser)]
#[command(name = "repoauditor")]
#[command(about = "Audit git hygiene, dependencies, security posture, and code health across a fleet of repositories")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the policy config file (YAML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the repository list file (YAML).
    #[arg(long, global = true)]
    pub repo_config: Option<PathBuf>,

    /// Comma-separated category list; narrows which checkers run.
    #[arg(long, global = true, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Only audit repositories carrying this tag.
    #[arg(long, global = true)]
    pub tag: Option<String>,

    /// When `false`, forces `engine.max_concurrency = 1`.
    #[arg(long, global = true)]
    pub parallel: Option<bool>,

    /// Overrides `engine.timeout`, in seconds (0 < timeout <= 7200).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print the execution plan (repositories x enabled checkers) and exit
    /// without running anything.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose formatter output plus debug-level logs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the rendered report to this file (atomically, mode 0600) in
    /// addition to stdout.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Force-enable the cyclomatic-complexity checker regardless of its
    /// per-checker config.
    #[arg(long, global = true)]
    pub complexity_report: bool,

    /// Overrides the complexity checker's `max_complexity` threshold.
    #[arg(long, global = true)]
    pub max_complexity: Option<u32>,

    /// Print every known checker category and exit. Runs no checks.
    #[arg(long, global = true)]
    pub list_categories: bool,

    /// Print a starter config file to stdout and exit. Runs no checks.
    #[arg(long, global = true)]
    pub gen_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full health audit (default when no subcommand is given).
    Health,
    /// Clone every repository in the repo list that isn't on disk yet.
    Clone,
    /// Write starter `config.yaml`/`repos.yaml` files.
    Init {
        #[arg(long, default_value = "config.yaml")]
        config_out: PathBuf,
        #[arg(long, default_value = "repos.yaml")]
        repos_out: PathBuf,
    },
}

/// Parse arguments, run the requested subcommand, and report the outcome.
///
/// On success: returns `Ok(())` after printing any output.
/// On error: prints a message and returns `Err(ExitCode)`.
///
/// `main.rs` only calls `std::process::exit(code.as_i32())` on error - it
/// does not print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    let _ = init_tracing(cli.verbose);

    if cli.list_categories {
        print_categories();
        return Ok(());
    }
    if cli.gen_config {
        print!("{}", starter_config_yaml());
        return Ok(());
    }
    if let Some(Commands::Init { config_out, repos_out }) = &cli.command {
        return run_init(config_out, repos_out);
    }

    let mut config = load_effective_config(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, &cli)?;

    if let Err(errors) = repoauditor_config::config::validate(&config) {
        for error in &errors {
            eprintln!("invalid configuration: {error}");
        }
        return Err(ExitCode::INVALID_CONFIG);
    }

    let repositories = load_repositories(&cli)?;
    let categories = category_filter(&cli);
    let registry = CheckerRegistry::with_builtins();

    if cli.dry_run {
        print_dry_run(&registry, &config, &repositories, categories.as_ref());
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| {
        eprintln!("failed to start async runtime: {e}");
        ExitCode::ORCHESTRATION_ERROR
    })?;

    match &cli.command {
        Some(Commands::Clone) => runtime.block_on(run_clone(&repositories)),
        _ => runtime.block_on(run_health(&cli, registry, &config, &repositories, categories.as_ref())),
    }
}

fn load_effective_config(path: Option<&Path>) -> Result<Config, ExitCode> {
    match path {
        None => Ok(Config::default()),
        Some(path) => repoauditor_config::config::load_config_file(path).map_err(|e| {
            eprintln!("failed to load config from {}: {e}", path.display());
            ExitCode::INVALID_CONFIG
        }),
    }
}

fn load_repositories(cli: &Cli) -> Result<Vec<Repository>, ExitCode> {
    let Some(path) = &cli.repo_config else {
        eprintln!("--repo-config PATH is required");
        return Err(ExitCode::INVALID_CONFIG);
    };
    repoauditor_config::config::load_repository_list(path, cli.tag.as_deref()).map_err(|e| {
        eprintln!("failed to load repository list from {}: {e}", path.display());
        ExitCode::INVALID_CONFIG
    })
}

fn category_filter(cli: &Cli) -> Option<HashSet<String>> {
    if cli.category.is_empty() {
        None
    } else {
        Some(cli.category.iter().cloned().collect())
    }
}

/// Apply `--parallel`, `--timeout`, `--complexity-report`, and
/// `--max-complexity` on top of the loaded config. CLI flags win over the
/// config file, matching the documented precedence (§6).
fn apply_cli_overrides(config: &mut Config, cli: &Cli) -> Result<(), ExitCode> {
    if let Some(false) = cli.parallel {
        config.engine.max_concurrency = 1;
    }

    if let Some(timeout_secs) = cli.timeout {
        if timeout_secs == 0 || timeout_secs > MAX_CLI_TIMEOUT_SECS {
            eprintln!("--timeout must be between 1 and {MAX_CLI_TIMEOUT_SECS} seconds, got {timeout_secs}");
            return Err(ExitCode::INVALID_CONFIG);
        }
        config.engine.timeout = Duration::from_secs(timeout_secs);
    }

    if cli.complexity_report {
        config.checkers.entry("cyclomatic-complexity".to_string()).or_insert_with(CheckerConfig::default).enabled = true;
    }

    if let Some(max_complexity) = cli.max_complexity {
        config
            .checkers
            .entry("cyclomatic-complexity".to_string())
            .or_insert_with(CheckerConfig::default)
            .options
            .insert("max_complexity".to_string(), OptionValue::Number(f64::from(max_complexity)));
    }

    Ok(())
}

fn print_categories() {
    let registry = CheckerRegistry::with_builtins();
    let mut seen = HashSet::new();
    for checker in registry.all() {
        if seen.insert(checker.category().to_string()) {
            println!("{}", checker.category());
        }
    }
}

fn starter_config_yaml() -> String {
    serde_yaml::to_string(&Config::default()).unwrap_or_else(|_| "version: \"1.0\"\n".to_string())
}

fn run_init(config_out: &Path, repos_out: &Path) -> Result<(), ExitCode> {
    let config_yaml = starter_config_yaml();
    let repos_yaml = "repositories:\n  - name: example\n    url: https://github.com/example/example.git\n    tags: [backend]\n";

    for (path, content) in [(config_out, config_yaml.as_str()), (repos_out, repos_yaml)] {
        let Some(utf8) = camino::Utf8Path::from_path(path) else {
            eprintln!("path is not valid UTF-8: {}", path.display());
            return Err(ExitCode::INVALID_CONFIG);
        };
        if let Err(e) = write_report(utf8, content) {
            eprintln!("failed to write {}: {e}", path.display());
            return Err(ExitCode::ORCHESTRATION_ERROR);
        }
    }

    println!("wrote {} and {}", config_out.display(), repos_out.display());
    Ok(())
}

fn print_dry_run(registry: &CheckerRegistry, config: &Config, repositories: &[Repository], categories: Option<&HashSet<String>>) {
    println!("execution plan ({} repositories):", repositories.len());
    for repository in repositories {
        let plan = plan_repository(registry, config, repository, categories);
        println!("  {} -> [{}]", repository.name, plan.checker_ids.join(", "));
    }
}

async fn run_clone(repositories: &[Repository]) -> Result<(), ExitCode> {
    let executor = CommandExecutor::new();
    let cancel = CancellationToken::new();
    let mut any_failed = false;

    for repository in repositories {
        let Some(url) = &repository.url else {
            continue;
        };
        if Path::new(&repository.path).exists() {
            println!("{}: already present, skipping", repository.name);
            continue;
        }

        let spec = CommandSpec::new("git").arg("clone").arg(url.as_str()).arg(&repository.path);
        let output = executor.execute(&spec, &cancel, None).await;
        if output.success() {
            println!("{}: cloned", repository.name);
        } else {
            eprintln!("{}: clone failed: {}", repository.name, output.stderr);
            any_failed = true;
        }
    }

    if any_failed {
        Err(ExitCode::ORCHESTRATION_ERROR)
    } else {
        Ok(())
    }
}

async fn run_health(
    cli: &Cli,
    registry: CheckerRegistry,
    config: &Config,
    repositories: &[Repository],
    categories: Option<&HashSet<String>>,
) -> Result<(), ExitCode> {
    let engine = Engine::new(registry);
    let result = engine.run(config, repositories, categories, CancellationToken::new()).await;

    let rendered = match cli.format {
        OutputFormat::Text => format_workflow(&result, cli.verbose),
        OutputFormat::Json => to_json(&result).map_err(|e| {
            eprintln!("failed to render JSON report: {e}");
            ExitCode::ORCHESTRATION_ERROR
        })?,
    };
    print!("{rendered}");

    if let Some(path) = &cli.output {
        let Some(utf8) = camino::Utf8Path::from_path(path) else {
            eprintln!("--output path is not valid UTF-8: {}", path.display());
            return Err(ExitCode::INVALID_CONFIG);
        };
        if let Err(e) = write_report(utf8, &rendered) {
            eprintln!("failed to write report to {}: {e}", path.display());
            return Err(ExitCode::ORCHESTRATION_ERROR);
        }
    }

    let code = exit_code_for(&result);
    if code.as_i32() == 0 {
        Ok(())
    } else {
        Err(code)
    }
}
