//! The session executor.
//!
//! Input is classified in priority order: empty, the literal `clear`,
//! statement chains (`;`), pipelines (`|`), then a single command. Every
//! failure is rendered into text; executing a line never returns an error.

use std::sync::Arc;

use serde_json::Value;
use webterm_net::Transport;
use webterm_types::{Result, SessionConfig, TransportError};

use crate::commands::register_builtins;
use crate::registry::{CommandRegistry, Environment, PipeStage, Stage};
use crate::services::{Clock, SystemClock};
use crate::session::{Direction, EventBus, SessionListener, SessionState};

/// An interactive terminal session.
pub struct Interpreter {
    registry: CommandRegistry,
    session: SessionState,
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    clock: Box<dyn Clock>,
}

impl Interpreter {
    /// Create a session with the built-in commands and no listeners.
    pub fn new(config: SessionConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::with_events(config, transport, EventBus::new())
    }

    /// Create a session that publishes to `events`.
    ///
    /// Fails with `ShellError::Config` when the history limits are inconsistent.
    pub fn with_events(
        config: SessionConfig,
        transport: Arc<dyn Transport>,
        events: EventBus,
    ) -> Result<Self> {
        config.validate()?;
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry)?;
        let session = SessionState::new(&config, events);
        log::info!(
            "session started for {}@{} with {} commands",
            config.user,
            config.hostname,
            registry.len()
        );
        Ok(Self {
            registry,
            session,
            config,
            transport,
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the clock `date` reads from.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Registry access for embedders adding their own commands.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Registered commands, in registration order.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Read-only view of the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The configuration the session was built from.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // -- Accessors for the rendering surface --

    /// Prompt shown before the input line.
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Title line for the terminal window.
    pub fn header(&self) -> String {
        self.session.header()
    }

    /// Rendered lines, oldest first.
    pub fn transcript(&self) -> &[String] {
        self.session.transcript()
    }

    /// Add a transcript listener; it receives the current snapshot at once.
    pub fn subscribe(&mut self, listener: Box<dyn SessionListener>) {
        self.session.subscribe(listener);
    }

    // -- Execution --

    /// Execute one line of user input and return its rendered result.
    pub async fn execute(&mut self, input: &str) -> String {
        let line = input.trim();
        if line.is_empty() {
            return String::new();
        }

        if line == "clear" {
            let output = self
                .invoke(&Stage::parse(line), None)
                .await
                .unwrap_or_default();
            self.session.reset_cursor();
            return output;
        }

        self.session.record_command(line);
        let echo = format!("{} {line}", self.session.prompt());
        self.session.push_transcript(echo);

        let output = if line.contains(';') {
            log::debug!("statements: {line}");
            self.run_statements(line).await
        } else if line.contains('|') {
            log::debug!("pipeline: {line}");
            self.run_pipeline(line).await
        } else {
            self.run_simple(line).await
        };

        if !output.trim().is_empty() {
            self.session.push_transcript(output.clone());
        }
        self.session.reset_cursor();
        output
    }

    /// Run `;`-separated statements left to right and join their results.
    async fn run_statements(&mut self, line: &str) -> String {
        let mut results = Vec::new();
        for statement in line.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let output = if statement.contains('|') {
                self.run_pipeline(statement).await
            } else {
                self.run_simple(statement).await
            };
            results.push(output);
        }
        results.join("\n")
    }

    /// Run `|`-separated stages, feeding each stage's output to the next.
    async fn run_pipeline(&mut self, line: &str) -> String {
        let mut output = String::new();
        for (i, segment) in line.split('|').map(str::trim).enumerate() {
            let stage = Stage::parse(segment);
            if i == 0 {
                output = match self.invoke(&stage, None).await {
                    Some(out) => out,
                    None => format!("{}: comando non trovato", stage.name),
                };
                continue;
            }
            output = match self.registry.resolve_pipe_stage(&stage.name) {
                PipeStage::Filter => self
                    .invoke(&stage, Some(output))
                    .await
                    .unwrap_or_default(),
                PipeStage::Unsupported => format!("{}: comando non supporta pipe", stage.name),
                PipeStage::NotFound => format!("{}: comando non trovato", stage.name),
            };
        }
        output
    }

    async fn run_simple(&mut self, line: &str) -> String {
        let stage = Stage::parse(line);
        match self.invoke(&stage, None).await {
            Some(output) => output,
            None => {
                log::debug!("unresolved command '{}'", stage.name);
                webterm_types::ShellError::CommandNotFound(stage.name).to_string()
            },
        }
    }

    /// Resolve and run one stage. `None` when the name is not registered.
    async fn invoke(&mut self, stage: &Stage, stdin: Option<String>) -> Option<String> {
        let command = self.registry.resolve(&stage.name)?;
        let mut env = Environment {
            session: &mut self.session,
            registry: &self.registry,
            transport: self.transport.as_ref(),
            clock: self.clock.as_ref(),
            config: &self.config,
            stdin,
        };
        let output = match command.execute(&stage.args, &mut env).await {
            Ok(output) => output,
            Err(e) => {
                log::debug!("{} failed: {e}", stage.name);
                e.render(&stage.name)
            },
        };
        Some(output)
    }

    // -- History recall and interaction --

    /// Step through the command history (arrow keys).
    pub fn recall(&mut self, direction: Direction) -> String {
        self.session.recall(direction)
    }

    /// Abandon the current input line (Ctrl-C).
    pub fn cancel(&mut self) {
        self.session.push_transcript("^C");
        self.session.reset_cursor();
    }

    /// Command names completing `prefix`.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        self.registry.completions(prefix)
    }

    /// Act on an `[utilizza:<name>]` link.
    pub async fn activate_entity(&mut self, name: &str) -> String {
        self.execute(&format!("use {name}")).await
    }

    /// Flip the theme and notify listeners. Returns the new dark flag.
    pub fn toggle_theme(&mut self) -> bool {
        let dark = !self.session.dark_theme();
        self.session.set_dark_theme(dark);
        dark
    }

    /// POST `body` to `<api_base>/<endpoint>`.
    ///
    /// Unlike interactive commands, failures propagate to the caller.
    pub async fn call_api(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> std::result::Result<Value, TransportError> {
        let path = self.config.api_path(endpoint);
        self.transport.post(&path, body).await.inspect_err(|e| {
            log::warn!("custom API call to {path} failed: {e}");
        })
    }
}
