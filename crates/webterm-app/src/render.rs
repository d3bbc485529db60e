//! Console rendering of command output.

use webterm_shell::markup;

/// Prepare output for the console.
///
/// Entity links become a hint naming the control line that activates them.
/// Colour escapes are dropped when `color` is false.
pub fn render(output: &str, color: bool) -> String {
    let text = markup::replace_entity_links(output, |name| format!("(:use {name})"));
    if color { text } else { markup::strip(&text) }
}
