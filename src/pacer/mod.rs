//! Event pacing.
//!
//! Server events are buffered and released one at a time, with a pause
//! after each kind of event so the table animates at a readable pace:
//! - `config`: the delay table ([`PacerConfig`])
//! - `queue`: the synchronous pacer ([`EventPacer`]) and its [`EventSink`]
//! - `driver`: a tokio task wiring a connection, the pacer and a [`Session`]

pub mod config;
pub mod queue;
pub mod driver;

pub use config::PacerConfig;
pub use queue::{EventPacer, EventSink};
pub use driver::{Command, PacerDriver, Session};
