//! Fluent builder for constructing a [`Session`].

use tokio::sync::mpsc;

use vt_anim::AnimationController;
use vt_core::TrackerConfig;
use vt_mode::{Collaborators, ModeController};

use crate::{MapView, Presenter, Session, SessionHandle, SessionResult};

/// Capacity of the command channel.
pub const COMMAND_CAPACITY: usize = 64;

/// Fluent builder for [`Session<V>`].
///
/// # Required inputs
///
/// - [`Collaborators`] — routing, geocoding, history, location
/// - `V: MapView` — the map widget
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                    |
/// |----------------|----------------------------|
/// | `.config(c)`   | `TrackerConfig::default()` |
///
/// # Example
///
/// ```rust,ignore
/// let (mut session, handle) = SessionBuilder::new(services, HeadlessView)
///     .config(config)
///     .build()?;
/// tokio::spawn(async move { handle.start().await });
/// session.run().await;
/// ```
pub struct SessionBuilder<V: MapView> {
    config:   TrackerConfig,
    services: Collaborators,
    view:     V,
}

impl<V: MapView> SessionBuilder<V> {
    pub fn new(services: Collaborators, view: V) -> Self {
        Self { config: TrackerConfig::default(), services, view }
    }

    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and assemble the session.
    ///
    /// Nothing is started here; the initial mode is armed when
    /// [`Session::run`] begins.
    pub fn build(self) -> SessionResult<(Session<V>, SessionHandle)> {
        self.config.validate()?;

        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let anim      = AnimationController::from_config(&self.config);
        let presenter = Presenter::new(self.view, self.config.tick_period());
        let handle    = SessionHandle::new(command_tx, presenter.events().clone());
        let modes     = ModeController::new(self.services, self.config.clone());

        let session = Session {
            config: self.config,
            anim,
            modes,
            presenter,
            commands: command_rx,
            started: false,
        };
        Ok((session, handle))
    }
}
