//! Meld legality engine.
//!
//! Pure checks over cards and settings:
//! - `meld`: is a group of cards a valid set, run, or meld?
//! - `lay`: what can the local player do with their current selection?
//!
//! Nothing here mutates state. The client recomputes these after every
//! event and every selection change.

pub mod meld;
pub mod lay;

pub use meld::{MeldRules, MAX_RUN_SIZE, MIN_MELD_SIZE};
pub use lay::{can_meld_selection, melds_for_lay};
