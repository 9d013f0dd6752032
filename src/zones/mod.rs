//! Zone system for card locations.
//!
//! The board has a fixed set of zones: the deck, the discard pile, the melds
//! on the table and one hand per seat. All of them are ordered.
//!
//! ## Key Types
//!
//! - `ZoneStore`: zones plus the identity -> location index
//! - `ZoneLocation`: which zone a card is in
//! - `Placement`: where a relocation should put a card
//! - `Retarget`: identity swap produced by a redeck

pub mod store;
pub mod transition;

pub use store::{ZoneLocation, ZonePosition, ZoneStore};
pub use transition::{Placement, Relocation, Retarget};
