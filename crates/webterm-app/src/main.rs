//! webterm console entry point.
//!
//! Reads lines from stdin and feeds them to a session interpreter talking to
//! the configured backend. The config file comes from the first CLI argument
//! or `WEBTERM_CONFIG`; without either the built-in defaults apply.
//! Set `NO_COLOR` to drop ANSI colours from the output.

mod input;
mod render;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use input::Action;
use webterm_net::HttpTransport;
use webterm_shell::{EventBus, Interpreter, SessionEvent};
use webterm_types::SessionConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WEBTERM_CONFIG").ok())
    {
        Some(path) => SessionConfig::load(&path)?,
        None => SessionConfig::default(),
    };
    log::info!("Starting webterm against {}", config.base_url);

    let transport = Arc::new(HttpTransport::new(&config)?);
    let mut events = EventBus::new();
    events.subscribe_fn(|event| match event {
        SessionEvent::TranscriptChanged(lines) => {
            log::trace!("transcript now {} entries", lines.len());
        },
        SessionEvent::ThemeChanged { dark } => {
            log::info!("theme: {}", if *dark { "dark" } else { "light" });
        },
    });
    let mut shell = Interpreter::with_events(config, transport, events)?;
    let color = std::env::var_os("NO_COLOR").is_none();

    println!("{}", shell.header());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", shell.prompt());
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match input::parse(&line) {
            Action::Execute(line) => shell.execute(&line).await,
            Action::Recall(direction) => shell.recall(direction),
            Action::Cancel => {
                shell.cancel();
                "^C".to_string()
            },
            Action::Complete(prefix) => shell.complete(&prefix).join("  "),
            Action::Activate(name) => shell.activate_entity(&name).await,
            Action::ToggleTheme => {
                let dark = shell.toggle_theme();
                format!("theme: {}", if dark { "dark" } else { "light" })
            },
            Action::Quit => break,
        };
        if !output.is_empty() {
            println!("{}", render::render(&output, color));
        }
    }

    log::info!("Session closed");
    Ok(())
}
