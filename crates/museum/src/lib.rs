//! # Museum
//!
//! A first-person walk through three connected rooms: the main hall, a
//! hallway of glass cabinets and the Pharaonic gallery. Walls and furniture
//! block the visitor, exhibits float or light up at the press of a key, and
//! some can be picked up for a closer look.

#![warn(missing_docs)]

pub mod config;
pub mod exhibit;
pub mod hud;
pub mod inspection;
pub mod interaction;
pub mod rooms;
pub mod scene;
pub mod tour;

pub use config::MuseumConfig;
pub use scene::SceneCoordinator;
