//! Per-frame animation of the text mesh
//!
//! The [`AnimationDispatcher`] turns a [`RotationPattern`] and a resolved
//! speed into one incremental [`MeshTransform`](crate::foundation::math::MeshTransform)
//! update per display refresh. The [`FrameLoop`] owns at most one running
//! dispatcher and replaces it wholesale when a new generation starts.

pub mod pattern;
pub mod speed;
pub mod state;
pub mod dispatcher;
pub mod frame_loop;

pub use pattern::RotationPattern;
pub use speed::{SpeedPreset, SpeedSetting};
pub use state::{BreathingState, Direction, OscillationState};
pub use dispatcher::{AnimationDispatcher, AnimationParameters};
pub use frame_loop::{CancellationToken, FrameLoop, LoopState};
