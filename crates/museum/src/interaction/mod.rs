//! "Press a key near an exhibit" interactions
//!
//! An [`InteractionZone`] tracks proximity and the rising edge of one key.
//! A [`ZoneSet`] groups every zone bound to the same key in a room and lets
//! only the closest in-range zone see the key in a given frame.

pub mod resolver;
pub mod zone;

pub use resolver::{ZoneEvent, ZoneSet};
pub use zone::{ActivationEvent, InteractionZone};
