//! mockexam-client — portal collaborators for the assessment engine.
//!
//! Implements the `TestSource` and `SubmissionSink` traits over the
//! portal's HTTP API, provides mock collaborators for tests, and hosts
//! the attempt session event loop that drives the engine's clock.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod session;

pub use config::{create_client, load_config, PortalConfig};
pub use error::ClientError;
pub use http::PortalClient;
pub use session::{AttemptSession, SessionCommand};
