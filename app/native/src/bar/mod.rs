//! Status and navigation bar modes.
//!
//! - `mode` - Pure classification of visibility flags into bar modes
//! - `transitions` - Rendering seam receiving mode changes
//! - `controller` - Current modes, window states and surface updates

pub mod controller;
pub mod mode;
pub mod transitions;

pub use controller::{BarModeController, BarSurfaces, ModeUpdate, WindowShowState};
pub use mode::{BarMode, classify, compute_mode, compute_mode_for};
pub use transitions::{BarTransitions, LoggedTransitions, RecordingTransitions, TransitionCall};
