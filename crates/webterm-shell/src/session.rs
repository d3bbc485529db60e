//! Session state: working directory, identity, histories, and the event bus.
//!
//! The interpreter is the only writer. Observers never read the state
//! directly; they receive a full transcript snapshot through the
//! [`EventBus`] every time the transcript changes.

use webterm_types::{HistoryLimits, SessionConfig};

// ---------------------------------------------------------------------------
// Event bus
// ---------------------------------------------------------------------------

/// Notifications pushed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent<'a> {
    /// The complete transcript after a mutation.
    TranscriptChanged(&'a [String]),
    /// The theme flag flipped.
    ThemeChanged { dark: bool },
}

/// Receiver of session events.
pub trait SessionListener: Send {
    fn on_event(&mut self, event: &SessionEvent<'_>);
}

struct FnListener<F>(F);

impl<F> SessionListener for FnListener<F>
where
    F: FnMut(&SessionEvent<'_>) + Send,
{
    fn on_event(&mut self, event: &SessionEvent<'_>) {
        (self.0)(event);
    }
}

/// Listener registry handed to the session at construction.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn SessionListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`EventBus::subscribe`].
    pub fn with_listener(mut self, listener: Box<dyn SessionListener>) -> Self {
        self.subscribe(listener);
        self
    }

    pub fn subscribe(&mut self, listener: Box<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    /// Subscribe a closure.
    pub fn subscribe_fn<F>(&mut self, f: F)
    where
        F: FnMut(&SessionEvent<'_>) + Send + 'static,
    {
        self.subscribe(Box::new(FnListener(f)));
    }

    pub fn publish(&mut self, event: &SessionEvent<'_>) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

// ---------------------------------------------------------------------------
// History navigation
// ---------------------------------------------------------------------------

/// Direction for command-history recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward older entries.
    Up,
    /// Toward newer entries, ending at the empty line.
    Down,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Mutable state of one terminal session.
pub struct SessionState {
    cwd: String,
    home: String,
    user: String,
    hostname: String,
    transcript: Vec<String>,
    commands: Vec<String>,
    /// Steps back from the newest command; `None` when not navigating.
    cursor: Option<usize>,
    limits: HistoryLimits,
    dark_theme: bool,
    events: EventBus,
}

impl SessionState {
    pub fn new(config: &SessionConfig, events: EventBus) -> Self {
        Self {
            cwd: config.home.clone(),
            home: config.home.clone(),
            user: config.user.clone(),
            hostname: config.hostname.clone(),
            transcript: Vec::new(),
            commands: Vec::new(),
            cursor: None,
            limits: config.history,
            dark_theme: config.dark_theme,
            events,
        }
    }

    // -- Identity and location --

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: impl Into<String>) {
        self.cwd = cwd.into();
    }

    /// The home sentinel the session started in.
    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn is_home(&self) -> bool {
        self.cwd == self.home
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// `<user>@<host>:<cwd>$`
    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$", self.user, self.hostname, self.cwd)
    }

    /// `<user>@<host>: <cwd>`
    pub fn header(&self) -> String {
        format!("{}@{}: {}", self.user, self.hostname, self.cwd)
    }

    // -- Transcript --

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Append a rendered line, trimming to the most recent entries on overflow.
    pub fn push_transcript(&mut self, line: impl Into<String>) {
        self.transcript.push(line.into());
        if self.transcript.len() > self.limits.transcript_max {
            let excess = self.transcript.len().saturating_sub(self.limits.transcript_keep);
            self.transcript.drain(..excess);
            log::debug!("transcript trimmed to {} entries", self.transcript.len());
        }
        self.notify_transcript();
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.notify_transcript();
    }

    fn notify_transcript(&mut self) {
        self.events
            .publish(&SessionEvent::TranscriptChanged(&self.transcript));
    }

    // -- Command history --

    pub fn command_history(&self) -> &[String] {
        &self.commands
    }

    /// Record a raw input line unless it repeats the previous one.
    pub fn record_command(&mut self, line: &str) {
        if self.commands.last().is_some_and(|last| last == line) {
            return;
        }
        self.commands.push(line.to_string());
        if self.commands.len() > self.limits.commands_max {
            let excess = self.commands.len().saturating_sub(self.limits.commands_keep);
            self.commands.drain(..excess);
            log::debug!("command history trimmed to {} entries", self.commands.len());
        }
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Move through the command history and return the entry under the
    /// cursor, or an empty string once the cursor is back on the live line.
    pub fn recall(&mut self, direction: Direction) -> String {
        if self.commands.is_empty() {
            return String::new();
        }
        let oldest = self.commands.len() - 1;
        self.cursor = match (direction, self.cursor) {
            (Direction::Up, None) => Some(0),
            (Direction::Up, Some(n)) => Some((n + 1).min(oldest)),
            (Direction::Down, None | Some(0)) => None,
            (Direction::Down, Some(n)) => Some(n - 1),
        };
        match self.cursor {
            Some(n) => self.commands[oldest - n].clone(),
            None => String::new(),
        }
    }

    // -- Observers and theme --

    /// Add a listener; it immediately receives the current transcript.
    pub fn subscribe(&mut self, mut listener: Box<dyn SessionListener>) {
        listener.on_event(&SessionEvent::TranscriptChanged(&self.transcript));
        self.events.subscribe(listener);
    }

    pub fn dark_theme(&self) -> bool {
        self.dark_theme
    }

    pub fn set_dark_theme(&mut self, dark: bool) {
        self.dark_theme = dark;
        self.events.publish(&SessionEvent::ThemeChanged { dark });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn state() -> SessionState {
        SessionState::new(&SessionConfig::default(), EventBus::new())
    }

    fn recorder() -> (EventBus, Arc<Mutex<Vec<Vec<String>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut bus = EventBus::new();
        bus.subscribe_fn(move |event| {
            if let SessionEvent::TranscriptChanged(lines) = event {
                sink.lock().unwrap().push(lines.to_vec());
            }
        });
        (bus, seen)
    }

    #[test]
    fn starts_at_home_with_prompt() {
        let s = state();
        assert_eq!(s.cwd(), "~");
        assert!(s.is_home());
        assert_eq!(s.prompt(), "user@linux-box:~$");
        assert_eq!(s.header(), "user@linux-box: ~");
        assert_eq!(s.history_cursor(), None);
    }

    #[test]
    fn transcript_trims_to_most_recent_half() {
        let mut s = state();
        for i in 0..1000 {
            s.push_transcript(format!("line {i}"));
        }
        assert_eq!(s.transcript().len(), 1000);
        s.push_transcript("line 1000");
        assert_eq!(s.transcript().len(), 500);
        assert_eq!(s.transcript()[0], "line 501");
        assert_eq!(s.transcript().last().unwrap(), "line 1000");
    }

    #[test]
    fn command_history_skips_consecutive_duplicates() {
        let mut s = state();
        s.record_command("ls");
        s.record_command("ls");
        s.record_command("pwd");
        s.record_command("ls");
        assert_eq!(s.command_history(), ["ls", "pwd", "ls"]);
    }

    #[test]
    fn command_history_trims_to_fifty() {
        let mut s = state();
        for i in 0..=100 {
            s.record_command(&format!("echo {i}"));
        }
        assert_eq!(s.command_history().len(), 50);
        assert_eq!(s.command_history()[0], "echo 51");
    }

    #[test]
    fn inverted_limits_never_underflow() {
        let mut config = SessionConfig::default();
        config.history = HistoryLimits {
            transcript_max: 2,
            transcript_keep: 4,
            commands_max: 3,
            commands_keep: 5,
        };
        let mut s = SessionState::new(&config, EventBus::new());
        for i in 0..5 {
            s.record_command(&format!("echo {i}"));
            s.push_transcript(format!("out {i}"));
        }
        assert_eq!(s.command_history().len(), 5);
        assert_eq!(s.transcript().len(), 5);
    }

    #[test]
    fn recall_walks_older_then_back_to_empty() {
        let mut s = state();
        s.record_command("one");
        s.record_command("two");
        s.record_command("three");
        assert_eq!(s.recall(Direction::Up), "three");
        assert_eq!(s.recall(Direction::Up), "two");
        assert_eq!(s.recall(Direction::Up), "one");
        // Clamped at the oldest entry.
        assert_eq!(s.recall(Direction::Up), "one");
        assert_eq!(s.recall(Direction::Down), "two");
        assert_eq!(s.recall(Direction::Down), "three");
        assert_eq!(s.recall(Direction::Down), "");
        assert_eq!(s.history_cursor(), None);
        assert_eq!(s.recall(Direction::Down), "");
    }

    #[test]
    fn recall_on_empty_history_is_empty() {
        let mut s = state();
        assert_eq!(s.recall(Direction::Up), "");
        assert_eq!(s.history_cursor(), None);
    }

    #[test]
    fn listeners_receive_full_snapshots() {
        let (bus, seen) = recorder();
        let mut s = SessionState::new(&SessionConfig::default(), bus);
        s.push_transcript("a");
        s.push_transcript("b");
        s.clear_transcript();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1], vec!["a".to_string(), "b".to_string()]);
        assert!(seen[2].is_empty());
    }

    #[test]
    fn late_subscriber_gets_current_snapshot() {
        let mut s = state();
        s.push_transcript("hello");
        let (mut bus, seen) = recorder();
        // Move the recorder's listener into the session.
        let listener = bus.listeners.pop().unwrap();
        s.subscribe(listener);
        assert_eq!(seen.lock().unwrap().as_slice(), [vec!["hello".to_string()]]);
    }

    #[test]
    fn theme_change_is_published() {
        let flags = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&flags);
        let mut bus = EventBus::new();
        bus.subscribe_fn(move |event| {
            if let SessionEvent::ThemeChanged { dark } = event {
                sink.lock().unwrap().push(*dark);
            }
        });
        let mut s = SessionState::new(&SessionConfig::default(), bus);
        s.set_dark_theme(true);
        s.set_dark_theme(false);
        assert_eq!(flags.lock().unwrap().as_slice(), [true, false]);
    }
}
