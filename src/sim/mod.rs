//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod screen;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::Rect;
pub use screen::{Screen, Trigger, transition};
pub use spawn::{populate_level, spawn_frame};
pub use state::{
    DecisionRecord, Entity, EntityKind, Player, Resolution, RunState, Tip, World,
};
pub use tick::{FrameReport, tick};
