//! Small helpers shared by several checker implementations.

use crate::checker::CheckContext;
use repoauditor_executor::CommandSpec;
use std::path::Path;
use std::time::Duration;

/// Run a command rooted at `cwd`, bounded by `timeout`, honouring the
/// context's cancellation token.
pub async fn run(
    ctx: &CheckContext,
    cwd: &Path,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> repoauditor_executor::CommandOutput {
    let spec = CommandSpec::new(program).args(args.iter().copied()).cwd(cwd);
    ctx.executor.execute(&spec, &ctx.cancel, Some(timeout)).await
}

/// Whether `path` looks like a git checkout (has a `.git` entry, file or
/// directory — a worktree's `.git` is a file).
#[must_use]
pub fn is_git_repository(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Whether any file under `root` (non-recursive) matches one of the given
/// case-sensitive glob patterns, e.g. `["LICENSE*", "LICENCE*"]`.
#[must_use]
pub fn any_top_level_file_matches(root: &Path, globs: &[&str]) -> bool {
    globs.iter().any(|glob| {
        repoauditor_walker::find_files_simple(root, glob)
            .map(|files| files.iter().any(|f| f.parent() == Some(root)))
            .unwrap_or(false)
    })
}

pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(30);
