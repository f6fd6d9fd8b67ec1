//! Player locomotion
//!
//! Look integration, translation flags and the teleport trigger, plus the
//! arc teleporter they drive. No rendering or platform dependencies; the
//! host supplies events and the frame clock.

pub mod input;
pub mod orientation;
pub mod state;
pub mod teleportation;
pub mod timer;
pub mod trajectory;

pub use input::{InputEvent, LocomotionEvent, SelectionEvent};
pub use orientation::{Euler, Orientation};
pub use state::{Locomotion, Viewport};
pub use teleportation::{ArcTeleporter, HIT_MARKER_ID, RAY_CURVE_ID, Teleportation};
pub use timer::{Debounce, Timer};
pub use trajectory::ArcTrajectory;
