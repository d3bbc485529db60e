//! Command trait, registry, and name resolution.

use std::collections::HashMap;

use async_trait::async_trait;
use webterm_net::Transport;
use webterm_types::{Result, SessionConfig, ShellError};

use crate::services::Clock;
use crate::session::SessionState;

/// Shared mutable environment passed to every command.
pub struct Environment<'a> {
    /// Working directory, identity, and histories.
    pub session: &'a mut SessionState,
    /// The registry the command was resolved from (for `help`).
    pub registry: &'a CommandRegistry,
    /// Backend connection for remote-call commands.
    pub transport: &'a dyn Transport,
    /// Wall clock for `date`.
    pub clock: &'a dyn Clock,
    pub config: &'a SessionConfig,
    /// Output of the previous pipeline stage.
    pub stdin: Option<String>,
}

impl Environment<'_> {
    /// Piped input, or the empty string when not invoked from a pipe.
    pub fn input(&self) -> &str {
        self.stdin.as_deref().unwrap_or("")
    }
}

/// A single executable command.
#[async_trait]
pub trait Command: Send + Sync {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string shown under the description in `help`.
    fn usage(&self) -> Option<&str> {
        None
    }

    /// Whether the command reads the previous stage's output in a pipeline.
    fn accepts_pipe(&self) -> bool {
        false
    }

    /// Execute the command with the given arguments and environment.
    async fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<String>;
}

/// How a name resolves in a non-first pipeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeStage {
    /// A command that consumes piped input.
    Filter,
    /// A registered command that cannot take piped input.
    Unsupported,
    /// No command by that name.
    NotFound,
}

/// One command segment: a name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub args: Vec<String>,
}

impl Stage {
    /// Split a segment on whitespace into name and arguments.
    pub fn parse(segment: &str) -> Self {
        let mut words = segment.split_whitespace().map(str::to_string);
        let name = words.next().unwrap_or_default();
        Self {
            name,
            args: words.collect(),
        }
    }
}

/// Registry of available commands, kept in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Names must be unique.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name().to_string();
        if self.index.contains_key(&name) {
            log::warn!("rejected duplicate registration of '{name}'");
            return Err(ShellError::DuplicateCommand(name));
        }
        self.index.insert(name, self.commands.len());
        self.commands.push(cmd);
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&dyn Command> {
        self.index.get(name).map(|&i| self.commands[i].as_ref())
    }

    /// Classify a name appearing after a `|`.
    pub fn resolve_pipe_stage(&self, name: &str) -> PipeStage {
        match self.resolve(name) {
            Some(cmd) if cmd.accepts_pipe() => PipeStage::Filter,
            Some(_) => PipeStage::Unsupported,
            None => PipeStage::NotFound,
        }
    }

    /// All commands in registration order.
    pub fn list(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    /// Command names starting with `prefix`, in registration order.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.list()
            .map(|c| c.name())
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, bool);

    #[async_trait]
    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "test command"
        }
        fn accepts_pipe(&self) -> bool {
            self.1
        }
        async fn execute(&self, _args: &[String], _env: &mut Environment<'_>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn registry(names: &[(&'static str, bool)]) -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        for &(name, pipe) in names {
            reg.register(Box::new(Named(name, pipe))).unwrap();
        }
        reg
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut reg = registry(&[("ls", false)]);
        let err = reg.register(Box::new(Named("ls", true))).unwrap_err();
        assert!(matches!(err, ShellError::DuplicateCommand(ref n) if n == "ls"));
        assert_eq!(reg.len(), 1);
        assert!(!reg.resolve("ls").unwrap().accepts_pipe());
    }

    #[test]
    fn list_keeps_registration_order() {
        let reg = registry(&[("zeta", false), ("alpha", false), ("mid", false)]);
        let names: Vec<&str> = reg.list().map(|c| c.name()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let reg = registry(&[("ls", false)]);
        assert!(reg.resolve("ls").is_some());
        assert!(reg.resolve("LS").is_none());
    }

    #[test]
    fn pipe_stage_classification() {
        let reg = registry(&[("grep", true), ("ls", false)]);
        assert_eq!(reg.resolve_pipe_stage("grep"), PipeStage::Filter);
        assert_eq!(reg.resolve_pipe_stage("ls"), PipeStage::Unsupported);
        assert_eq!(reg.resolve_pipe_stage("nope"), PipeStage::NotFound);
    }

    #[test]
    fn completions_follow_registration_order() {
        let reg = registry(&[("history", false), ("help", false), ("ls", false)]);
        assert_eq!(reg.completions("h"), vec!["history", "help"]);
        assert!(reg.completions("x").is_empty());
    }

    #[test]
    fn stage_parse_splits_on_any_whitespace() {
        let stage = Stage::parse("  grep \t doc  ");
        assert_eq!(stage.name, "grep");
        assert_eq!(stage.args, vec!["doc"]);
        assert_eq!(Stage::parse("").name, "");
    }
}
