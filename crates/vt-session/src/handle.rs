//! `SessionHandle` — the command side of a running session.

use tokio::sync::{broadcast, mpsc};

use vt_core::{Coordinate, Mode};

use crate::{Command, SessionError, SessionResult, TrackerEvent};

/// Cloneable sender of [`Command`]s and source of [`TrackerEvent`]
/// subscriptions.
///
/// Every method fails with [`SessionError::Closed`] once the session has
/// been dropped.  The event loop exits when it receives
/// [`Command::Shutdown`] or when the last handle is dropped.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events:   broadcast::Sender<TrackerEvent>,
}

impl SessionHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Command>,
        events:   broadcast::Sender<TrackerEvent>,
    ) -> Self {
        Self { commands, events }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    pub async fn send(&self, command: Command) -> SessionResult<()> {
        self.commands.send(command).await.map_err(|_| SessionError::Closed)
    }

    pub async fn start(&self) -> SessionResult<()> {
        self.send(Command::Start).await
    }

    pub async fn stop(&self) -> SessionResult<()> {
        self.send(Command::Stop).await
    }

    pub async fn reset(&self) -> SessionResult<()> {
        self.send(Command::Reset).await
    }

    /// Change the tick period to `period_ms` milliseconds.
    pub async fn set_speed(&self, period_ms: u64) -> SessionResult<()> {
        self.send(Command::SetSpeed(period_ms)).await
    }

    pub async fn select_mode(&self, mode: Mode) -> SessionResult<()> {
        self.send(Command::SelectMode(mode)).await
    }

    pub async fn search(&self, query: impl Into<String>) -> SessionResult<()> {
        self.send(Command::Search(query.into())).await
    }

    pub async fn map_click(&self, at: Coordinate) -> SessionResult<()> {
        self.send(Command::MapClick(at)).await
    }

    pub async fn marker_clicked(&self) -> SessionResult<()> {
        self.send(Command::MarkerClicked).await
    }

    pub async fn shutdown(&self) -> SessionResult<()> {
        self.send(Command::Shutdown).await
    }
}
