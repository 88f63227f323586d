use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command as TokioCommand;

/// Specification for a command to execute.
///
/// Every execution goes through this type to guarantee argv-style invocation:
/// arguments are stored as discrete `OsString` elements and never passed
/// through a shell, which rules out shell injection by construction.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    pub env: Option<HashMap<OsString, OsString>>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Program name as a lossy `String`, used for error messages and the
    /// `is_command_available` lookup.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    #[must_use]
    pub fn to_tokio_command(&self) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        if let Some(env) = &self.env {
            for (key, value) in env {
                cmd.env(key, value);
            }
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_collects_args_cwd_and_env() {
        let cmd = CommandSpec::new("git")
            .arg("status")
            .args(["--porcelain", "-b"])
            .cwd("/workspace/repo")
            .env("GIT_TERMINAL_PROMPT", "0");

        assert_eq!(cmd.program_name(), "git");
        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/workspace/repo")));
        assert_eq!(
            cmd.env.unwrap().get(&OsString::from("GIT_TERMINAL_PROMPT")),
            Some(&OsString::from("0"))
        );
    }

    #[test]
    fn shell_metacharacters_are_preserved_literally() {
        let cmd = CommandSpec::new("echo").arg("$(whoami)").arg("a;b|c");
        assert_eq!(cmd.args[0], OsString::from("$(whoami)"));
        assert_eq!(cmd.args[1], OsString::from("a;b|c"));
    }
}
