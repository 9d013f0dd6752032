//! JSON wire protocol.
//!
//! Both directions use objects tagged by a `type` field:
//! - `event`: server -> client ([`ServerEvent`])
//! - `action`: client -> server ([`ClientAction`])
//!
//! Decoding never panics. Malformed text is an [`Error::Decode`](crate::core::Error::Decode);
//! a well-formed message of unknown type is [`ServerEvent::Unrecognized`].

pub mod event;
pub mod action;

pub use event::{EventKind, Lobby, MoveDestination, ServerEvent};
pub use action::{AiRequest, CardIds, ClientAction};
