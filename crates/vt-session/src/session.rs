//! The `Session` event loop.

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use vt_anim::{until_deadline, AnimationController, TrackerObserver};
use vt_core::{validate_period_ms, TrackerConfig};
use vt_mode::ModeController;

use crate::{Command, MapView, Presenter};

/// A running tracker: the animation controller, the mode controller and the
/// presenter, driven from one loop.
///
/// Build with [`SessionBuilder`](crate::SessionBuilder).
pub struct Session<V: MapView> {
    pub(crate) config:    TrackerConfig,
    pub(crate) anim:      AnimationController,
    pub(crate) modes:     ModeController,
    pub(crate) presenter: Presenter<V>,
    pub(crate) commands:  mpsc::Receiver<Command>,
    pub(crate) started:   bool,
}

impl<V: MapView> Session<V> {
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn anim(&self) -> &AnimationController {
        &self.anim
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    pub fn presenter(&self) -> &Presenter<V> {
        &self.presenter
    }

    /// Run until [`Command::Shutdown`] or until every handle is dropped.
    ///
    /// On first entry this centres the map, arms the configured initial
    /// mode and asks for a one-shot position fix.  Each pass waits for
    /// whichever comes first:
    ///
    /// ```text
    ///   command          → dispatch
    ///   tick deadline    → AnimationController::on_tick
    ///   source event     → ModeController::handle_event
    /// ```
    ///
    /// Commands win ties, so a `Stop` queued before a due tick takes effect
    /// first.  The active source is torn down on exit.
    pub async fn run(&mut self) {
        if !self.started {
            self.started = true;
            self.begin();
        }

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    None | Some(Command::Shutdown) => break,
                    Some(command) => self.dispatch(command),
                },
                () = until_deadline(self.anim.deadline()) => {
                    self.anim.on_tick(Instant::now(), &mut self.presenter);
                }
                event = self.modes.next_event() => {
                    self.modes.handle_event(event, &mut self.anim, &mut self.presenter);
                }
            }
            self.presenter.sync(&self.anim);
        }

        self.modes.teardown();
        info!(mode = %self.modes.mode(), "session stopped");
    }

    fn begin(&mut self) {
        info!(
            mode      = %self.config.initial_mode,
            period_ms = self.config.tick_period_ms,
            "session starting"
        );
        self.presenter.on_pan(self.anim.position(), Some(self.config.default_zoom));
        self.modes.select_mode(self.config.initial_mode, &mut self.anim, &mut self.presenter);
        self.modes.request_initial_fix();
    }

    fn dispatch(&mut self, command: Command) {
        debug!(?command, "command");
        match command {
            Command::Start => {
                if let Err(e) = self.anim.start(Instant::now(), &mut self.presenter) {
                    debug!(error = %e, "start ignored");
                }
            }
            Command::Stop => {
                self.anim.stop(&mut self.presenter);
            }
            Command::Reset => self.anim.reset(&mut self.presenter),
            Command::SetSpeed(ms) => match validate_period_ms(ms) {
                Ok(period) => self.anim.set_period(period, Instant::now()),
                Err(e) => warn!(ms, error = %e, "speed change rejected"),
            },
            Command::SelectMode(mode) => {
                self.modes.select_mode(mode, &mut self.anim, &mut self.presenter);
            }
            Command::Search(query) => self.modes.search(&query, &mut self.presenter),
            Command::MapClick(at) => self.modes.map_click(at, &mut self.anim, &mut self.presenter),
            Command::MarkerClicked => self.presenter.open_popup(),
            // Handled by the loop.
            Command::Shutdown => {}
        }
    }
}
