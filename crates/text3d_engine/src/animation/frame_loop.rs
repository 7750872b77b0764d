//! Cancellable per-frame animation loop
//!
//! The host calls [`FrameLoop::tick`] from its display-refresh callback. At
//! most one task is ever pending; starting a new one cancels the old one
//! first, so a replaced mesh is never touched by a stale dispatcher.

use super::dispatcher::AnimationDispatcher;
use crate::foundation::math::MeshTransform;
use std::cell::Cell;
use std::rc::Rc;

/// Shared flag that stops an animation task
///
/// Clones observe the same flag. The loop is single-threaded, so the flag is
/// not `Send`.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    /// Create an uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Whether an animation is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Nothing scheduled
    Idle,
    /// A task will run on the next tick
    Running,
}

struct AnimationTask {
    id: u64,
    dispatcher: AnimationDispatcher,
    token: CancellationToken,
}

/// Owner of the single active animation task
#[derive(Default)]
pub struct FrameLoop {
    task: Option<AnimationTask>,
    started: u64,
}

impl FrameLoop {
    /// Create an idle loop
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `dispatcher`, cancelling whatever was running
    ///
    /// Returns a token that can stop the new task from outside the loop.
    pub fn start(&mut self, dispatcher: AnimationDispatcher) -> CancellationToken {
        self.cancel();

        self.started += 1;
        let token = CancellationToken::new();
        log::debug!(
            "Starting animation task {} ({})",
            self.started,
            dispatcher.parameters().pattern
        );
        self.task = Some(AnimationTask {
            id: self.started,
            dispatcher,
            token: token.clone(),
        });
        token
    }

    /// Cancel the running task, if any
    ///
    /// Returns `true` if a task was pending.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.token.cancel();
                log::debug!("Cancelled animation task {}", task.id);
                true
            }
            None => false,
        }
    }

    /// Run one tick of the pending task against `transform`
    ///
    /// Returns `false` when idle. A task whose token was cancelled externally
    /// is dropped here without touching `transform`.
    pub fn tick(&mut self, transform: &mut MeshTransform) -> bool {
        let cancelled = match &self.task {
            Some(task) => task.token.is_cancelled(),
            None => return false,
        };
        if cancelled {
            self.cancel();
            return false;
        }

        match self.task.as_mut() {
            Some(task) => {
                task.dispatcher.tick(transform);
                true
            }
            None => false,
        }
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        match &self.task {
            Some(task) if !task.token.is_cancelled() => LoopState::Running,
            _ => LoopState::Idle,
        }
    }

    /// Number of pending tick callbacks: always 0 or 1
    pub fn pending_callbacks(&self) -> usize {
        usize::from(self.state() == LoopState::Running)
    }

    /// Dispatcher of the running task
    pub fn dispatcher(&self) -> Option<&AnimationDispatcher> {
        self.task
            .as_ref()
            .filter(|task| !task.token.is_cancelled())
            .map(|task| &task.dispatcher)
    }

    /// How many tasks have been started over the loop's lifetime
    pub fn tasks_started(&self) -> u64 {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationParameters, RotationPattern, SpeedPreset, SpeedSetting};
    use approx::assert_relative_eq;

    fn dispatcher(pattern: RotationPattern) -> AnimationDispatcher {
        AnimationDispatcher::new(AnimationParameters::new(
            pattern,
            SpeedSetting::Preset(SpeedPreset::Normal),
        ))
    }

    #[test]
    fn test_idle_until_started() {
        let mut frames = FrameLoop::new();
        let mut transform = MeshTransform::identity();

        assert_eq!(frames.state(), LoopState::Idle);
        assert!(!frames.tick(&mut transform));
        assert_eq!(transform, MeshTransform::identity());

        frames.start(dispatcher(RotationPattern::Horizontal));
        assert_eq!(frames.state(), LoopState::Running);
        assert!(frames.tick(&mut transform));
        assert!(frames.tick(&mut transform));
        assert_eq!(frames.state(), LoopState::Running);
    }

    #[test]
    fn test_restart_leaves_single_pending_callback() {
        let mut frames = FrameLoop::new();
        let first = frames.start(dispatcher(RotationPattern::Horizontal));
        let second = frames.start(dispatcher(RotationPattern::Vertical));

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(frames.pending_callbacks(), 1);
        assert_eq!(frames.tasks_started(), 2);

        // Only the vertical pattern runs: no horizontal deltas leak through
        let mut transform = MeshTransform::identity();
        for _ in 0..10 {
            frames.tick(&mut transform);
        }
        assert_eq!(transform.rotation.y, 0.0);
        assert_relative_eq!(transform.rotation.x, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut frames = FrameLoop::new();
        frames.start(dispatcher(RotationPattern::Horizontal));

        assert!(frames.cancel());
        assert!(!frames.cancel());
        assert_eq!(frames.state(), LoopState::Idle);
        assert_eq!(frames.pending_callbacks(), 0);
        assert!(frames.dispatcher().is_none());
    }

    #[test]
    fn test_external_token_cancel_stops_ticks() {
        let mut frames = FrameLoop::new();
        let token = frames.start(dispatcher(RotationPattern::Horizontal));
        let mut transform = MeshTransform::identity();

        frames.tick(&mut transform);
        token.cancel();
        assert_eq!(frames.state(), LoopState::Idle);

        let before = transform;
        assert!(!frames.tick(&mut transform));
        assert_eq!(transform, before);
    }
}
