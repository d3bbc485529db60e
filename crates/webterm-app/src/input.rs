//! Console input classification.
//!
//! Plain lines go to the interpreter. Lines starting with `:` stand in for
//! the keys and clicks a graphical surface would deliver.

use webterm_shell::Direction;

/// What a console line asks the front end to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Execute the line.
    Execute(String),
    /// Arrow key through the command history.
    Recall(Direction),
    /// Ctrl-C.
    Cancel,
    /// Tab completion of a command name.
    Complete(String),
    /// Click on an `[utilizza:<name>]` link.
    Activate(String),
    ToggleTheme,
    Quit,
}

/// Classify one line of console input.
pub fn parse(line: &str) -> Action {
    let Some(control) = line.trim().strip_prefix(':') else {
        return Action::Execute(line.to_string());
    };
    let (word, rest) = control.split_once(' ').unwrap_or((control, ""));
    let rest = rest.trim().to_string();
    match word {
        "up" => Action::Recall(Direction::Up),
        "down" => Action::Recall(Direction::Down),
        "cancel" => Action::Cancel,
        "complete" => Action::Complete(rest),
        "use" if !rest.is_empty() => Action::Activate(rest),
        "theme" => Action::ToggleTheme,
        "quit" | "q" => Action::Quit,
        _ => Action::Execute(line.to_string()),
    }
}
