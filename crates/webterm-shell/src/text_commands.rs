//! Text filters that read piped input: grep, wc, head, tail.
//!
//! Invoked standalone they see the empty string, so `grep x` matches
//! nothing and `wc` reports `0   0   0`.

use async_trait::async_trait;
use webterm_types::{Result, ShellError};

use crate::registry::{Command, Environment};

/// Line count used by `head` and `tail` when none is given.
const DEFAULT_LINES: usize = 10;

// ---------------------------------------------------------------------------
// grep
// ---------------------------------------------------------------------------

pub(crate) struct GrepCmd;

#[async_trait]
impl Command for GrepCmd {
    fn name(&self) -> &str {
        "grep"
    }
    fn description(&self) -> &str {
        "Cerca pattern nel testo"
    }
    fn usage(&self) -> Option<&str> {
        Some("grep [pattern]")
    }
    fn accepts_pipe(&self) -> bool {
        true
    }
    async fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<String> {
        let pattern = args
            .first()
            .ok_or_else(|| ShellError::MissingOperand("grep: pattern mancante".to_string()))?;
        Ok(grep(pattern, env.input()))
    }
}

/// Lines of `input` containing `pattern` as a substring.
pub fn grep(pattern: &str, input: &str) -> String {
    let matched: Vec<&str> = input.split('\n').filter(|l| l.contains(pattern)).collect();
    matched.join("\n")
}

// ---------------------------------------------------------------------------
// wc
// ---------------------------------------------------------------------------

pub(crate) struct WcCmd;

#[async_trait]
impl Command for WcCmd {
    fn name(&self) -> &str {
        "wc"
    }
    fn description(&self) -> &str {
        "Conta linee, parole e caratteri"
    }
    fn usage(&self) -> Option<&str> {
        Some("wc")
    }
    fn accepts_pipe(&self) -> bool {
        true
    }
    async fn execute(&self, _args: &[String], env: &mut Environment<'_>) -> Result<String> {
        Ok(word_count(env.input()))
    }
}

/// `<non-blank lines>   <words>   <characters>`; newlines count as characters.
pub fn word_count(input: &str) -> String {
    let lines = input.split('\n').filter(|l| !l.trim().is_empty()).count();
    let words = input.split_whitespace().count();
    let chars = input.chars().count();
    format!("{lines}   {words}   {chars}")
}

// ---------------------------------------------------------------------------
// head / tail
// ---------------------------------------------------------------------------

pub(crate) struct HeadCmd;

#[async_trait]
impl Command for HeadCmd {
    fn name(&self) -> &str {
        "head"
    }
    fn description(&self) -> &str {
        "Mostra prime n linee"
    }
    fn usage(&self) -> Option<&str> {
        Some("head [-n]")
    }
    fn accepts_pipe(&self) -> bool {
        true
    }
    async fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<String> {
        Ok(head(line_count(args), env.input()))
    }
}

pub(crate) struct TailCmd;

#[async_trait]
impl Command for TailCmd {
    fn name(&self) -> &str {
        "tail"
    }
    fn description(&self) -> &str {
        "Mostra ultime n linee"
    }
    fn usage(&self) -> Option<&str> {
        Some("tail [-n]")
    }
    fn accepts_pipe(&self) -> bool {
        true
    }
    async fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<String> {
        Ok(tail(line_count(args), env.input()))
    }
}

/// The first `n` lines of `input`.
pub fn head(n: usize, input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').take(n).collect();
    lines.join("\n")
}

/// The last `n` lines of `input`. A count of zero keeps every line.
pub fn tail(n: usize, input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    let start = match n {
        0 => 0,
        n => lines.len().saturating_sub(n),
    };
    lines[start..].join("\n")
}

fn line_count(args: &[String]) -> usize {
    args.first().map_or(DEFAULT_LINES, |arg| parse_count(arg))
}

/// Parse a line count the lenient way: an optional leading `-` (as in
/// `head -3`) followed by digits; trailing garbage is ignored and an
/// argument without leading digits counts as zero lines.
pub fn parse_count(arg: &str) -> usize {
    let body = arg.strip_prefix('-').unwrap_or(arg);
    let digits: &str = {
        let end = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        &body[..end]
    };
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grep_keeps_matching_lines() {
        let input = "documenti\nfile1.txt\nvecchi documenti";
        assert_eq!(grep("documenti", input), "documenti\nvecchi documenti");
        assert_eq!(grep("zzz", input), "");
    }

    #[test]
    fn grep_on_empty_input_matches_nothing() {
        assert_eq!(grep("x", ""), "");
    }

    #[test]
    fn wc_counts_like_reference() {
        assert_eq!(word_count("a b\nc"), "2   3   5");
        assert_eq!(word_count(""), "0   0   0");
        assert_eq!(word_count("one\n\n  \ntwo"), "2   2   11");
    }

    #[test]
    fn count_parsing() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count("-3"), 3);
        assert_eq!(parse_count("5abc"), 5);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn head_and_tail_slice_lines() {
        let input = "a\nb\nc\nd";
        assert_eq!(head(2, input), "a\nb");
        assert_eq!(tail(2, input), "c\nd");
        assert_eq!(head(10, input), input);
        assert_eq!(tail(10, input), input);
    }

    #[test]
    fn zero_count_empties_head_but_not_tail() {
        let input = "a\nb\nc";
        assert_eq!(head(0, input), "");
        assert_eq!(tail(0, input), input);
        assert_eq!(tail(parse_count("x"), input), input);
    }

    #[test]
    fn missing_count_defaults_to_ten() {
        assert_eq!(line_count(&[]), 10);
        assert_eq!(line_count(&["x".to_string()]), 0);
    }
}
