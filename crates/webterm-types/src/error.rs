//! Error types for webterm.

use std::io;

/// Failures reported by the transport capability.
///
/// Every non-2xx response or network-level failure lands in exactly one
/// variant, so callers can classify without assuming a structured body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Status 0: the backend could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// HTTP 404.
    #[error("endpoint not found")]
    NotFound,

    /// HTTP 5xx.
    #[error("server error (HTTP {0})")]
    Server(u16),

    /// Any other non-success outcome, including undecodable bodies.
    #[error("{message}")]
    Other {
        status: Option<u16>,
        message: String,
    },
}

impl TransportError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            0 => Self::Unreachable(message.into()),
            404 => Self::NotFound,
            s if s >= 500 => Self::Server(s),
            s => Self::Other {
                status: Some(s),
                message: message.into(),
            },
        }
    }

    /// Numeric status code, 0 when the backend was unreachable.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unreachable(_) => Some(0),
            Self::NotFound => Some(404),
            Self::Server(s) => Some(*s),
            Self::Other { status, .. } => *status,
        }
    }
}

/// Errors produced by the webterm session.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{0}: comando non trovato. Digita 'help' per la lista dei comandi")]
    CommandNotFound(String),

    /// A required argument was absent. Carries the full user-facing message.
    #[error("{0}")]
    MissingOperand(String),

    /// An argument named something that does not exist.
    #[error("{0}")]
    InvalidTarget(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("command already registered: {0}")]
    DuplicateCommand(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// Render this failure as the textual result of `command`.
    ///
    /// Transport failures are classified by status; local failures already
    /// carry their own message.
    pub fn render(&self, command: &str) -> String {
        match self {
            Self::Transport(TransportError::Unreachable(_)) => {
                format!("{command}: errore di connessione - Backend non raggiungibile")
            },
            Self::Transport(TransportError::NotFound) => {
                format!("{command}: endpoint non trovato")
            },
            Self::Transport(TransportError::Server(_)) => {
                format!("{command}: errore interno del server")
            },
            Self::Transport(TransportError::Other { message, .. }) => {
                let message = if message.trim().is_empty() {
                    "Errore sconosciuto"
                } else {
                    message.as_str()
                };
                format!("{command}: errore - {message}")
            },
            Self::CommandNotFound(_) | Self::MissingOperand(_) | Self::InvalidTarget(_) => {
                self.to_string()
            },
            other => format!("{command}: errore - {other}"),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_not_found_display() {
        let e = ShellError::CommandNotFound("foo".into());
        assert_eq!(
            format!("{e}"),
            "foo: comando non trovato. Digita 'help' per la lista dei comandi"
        );
    }

    #[test]
    fn local_errors_render_verbatim() {
        let e = ShellError::MissingOperand("mkdir: missing operand".into());
        assert_eq!(e.render("mkdir"), "mkdir: missing operand");
        let e = ShellError::InvalidTarget("cd: x: No such file or directory".into());
        assert_eq!(e.render("cd"), "cd: x: No such file or directory");
    }

    #[test]
    fn from_status_classifies() {
        assert!(matches!(
            TransportError::from_status(0, "down"),
            TransportError::Unreachable(_)
        ));
        assert_eq!(TransportError::from_status(404, ""), TransportError::NotFound);
        assert_eq!(TransportError::from_status(503, ""), TransportError::Server(503));
        assert_eq!(
            TransportError::from_status(401, "denied"),
            TransportError::Other {
                status: Some(401),
                message: "denied".into()
            }
        );
    }

    #[test]
    fn status_round_trips_through_classification() {
        assert_eq!(TransportError::Unreachable("x".into()).status(), Some(0));
        assert_eq!(TransportError::NotFound.status(), Some(404));
        assert_eq!(TransportError::Server(500).status(), Some(500));
        let other = TransportError::Other {
            status: None,
            message: "bad body".into(),
        };
        assert_eq!(other.status(), None);
    }

    #[test]
    fn transport_errors_render_by_class() {
        let unreachable: ShellError = TransportError::Unreachable("refused".into()).into();
        assert_eq!(
            unreachable.render("ping"),
            "ping: errore di connessione - Backend non raggiungibile"
        );
        let missing: ShellError = TransportError::NotFound.into();
        assert_eq!(missing.render("lista"), "lista: endpoint non trovato");
        let server: ShellError = TransportError::Server(502).into();
        assert_eq!(server.render("api-test"), "api-test: errore interno del server");
    }

    #[test]
    fn other_transport_error_falls_back_to_unknown() {
        let e: ShellError = TransportError::Other {
            status: Some(418),
            message: "  ".into(),
        }
        .into();
        assert_eq!(e.render("x"), "x: errore - Errore sconosciuto");

        let e: ShellError = TransportError::Other {
            status: Some(401),
            message: "unauthorized".into(),
        }
        .into();
        assert_eq!(e.render("x"), "x: errore - unauthorized");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: ShellError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: ShellError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }
}
