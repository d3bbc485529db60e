//! Markup conventions embedded in command output.
//!
//! The core only emits markup; interpreting it is the rendering surface's
//! job. Two conventions exist: ANSI colour directives from a fixed set,
//! and `[utilizza:<name>]` entity links that the surface turns into an
//! action feeding `use <name>` back to the interpreter.

/// Terminates a colour directive.
pub const RESET: &str = "\x1B[0m";

const LINK_OPEN: &str = "[utilizza:";

/// The recognised colour directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Bold green, used for command names.
    Green,
    /// Dim grey, used for usage hints.
    Gray,
    /// Bold red, used for errors.
    Red,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Green, Color::Gray, Color::Red];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Green => "\x1B[1;32m",
            Self::Gray => "\x1B[2;37m",
            Self::Red => "\x1B[1;31m",
        }
    }
}

/// Wrap `text` in a colour directive.
pub fn paint(color: Color, text: &str) -> String {
    format!("{}{text}{RESET}", color.code())
}

/// Remove every recognised colour directive.
pub fn strip(text: &str) -> String {
    let mut out = text.replace(RESET, "");
    for color in Color::ALL {
        out = out.replace(color.code(), "");
    }
    out
}

/// The link directive for an entity.
pub fn entity_link(name: &str) -> String {
    format!("{LINK_OPEN}{name}]")
}

/// Names of all entity links in `text`, in order of appearance.
pub fn entity_links(text: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(LINK_OPEN) {
        let after = &rest[start + LINK_OPEN.len()..];
        let Some(end) = after.find(']') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

/// Replace every entity link with the output of `render`.
pub fn replace_entity_links<F>(text: &str, mut render: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(LINK_OPEN) {
        let after = &rest[start + LINK_OPEN.len()..];
        let Some(end) = after.find(']') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&render(&after[..end]));
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_then_strip_is_identity() {
        let painted = paint(Color::Green, "help");
        assert_eq!(painted, "\x1B[1;32mhelp\x1B[0m");
        assert_eq!(strip(&painted), "help");
    }

    #[test]
    fn strip_leaves_unknown_escapes() {
        let text = "\x1B[4mx\x1B[0m";
        assert_eq!(strip(text), "\x1B[4mx");
    }

    #[test]
    fn finds_links_in_order() {
        let text = "   a [utilizza:a]\n   b [utilizza:b]\n";
        assert_eq!(entity_links(text), vec!["a", "b"]);
    }

    #[test]
    fn unterminated_link_is_ignored() {
        assert!(entity_links("x [utilizza:oops").is_empty());
        assert_eq!(
            replace_entity_links("x [utilizza:oops", |n| n.to_string()),
            "x [utilizza:oops"
        );
    }

    #[test]
    fn replace_renders_each_link() {
        let out = replace_entity_links("   utenti [utilizza:utenti]", |n| format!("<use {n}>"));
        assert_eq!(out, "   utenti <use utenti>");
        assert_eq!(entity_link("sales"), "[utilizza:sales]");
    }
}
