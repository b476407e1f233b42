//! Exhibit placement and animation

pub mod animator;
pub mod placement;

pub use animator::ExhibitAnimator;
pub use placement::Placement;
