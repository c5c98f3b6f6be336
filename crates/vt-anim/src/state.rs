//! Animation lifecycle state.

/// Where the animation is in its lifecycle.  One per session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Nothing scheduled; cursor at 0 after a reset.
    #[default]
    Idle,
    /// Timer armed, marker advancing on every tick.
    Running,
    /// Stopped by the user; cursor kept where it was.
    Paused,
    /// Ran off the end of the route.
    Finished,
}

impl AnimationState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == AnimationState::Running
    }
}
