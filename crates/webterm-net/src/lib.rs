//! Transport capability for webterm.
//!
//! The session reaches the backend only through the [`Transport`] trait.
//! [`HttpTransport`] is the production implementation; [`MockTransport`]
//! (feature `mock`) serves canned responses to tests.

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod payload;
pub mod transport;

pub use http::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use payload::{EntityList, HealthStatus, PingReply, SystemInfo};
pub use transport::{Transport, get_json};
