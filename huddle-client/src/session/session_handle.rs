use crate::session::session_command::SessionCommand;
use tokio::sync::mpsc;
use tracing::warn;

/// Clone-safe handle for dispatching user actions into a running session.
#[derive(Clone)]
pub struct RoomHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl RoomHandle {
    pub(crate) fn new(tx: mpsc::Sender<SessionCommand>) -> Self {
        Self { tx }
    }

    pub async fn toggle_mute(&self) {
        self.send(SessionCommand::ToggleMute).await;
    }

    pub async fn toggle_video(&self) {
        self.send(SessionCommand::ToggleVideo).await;
    }

    pub async fn toggle_screen_share(&self) {
        self.send(SessionCommand::ToggleScreenShare).await;
    }

    pub async fn send_chat(&self, text: impl Into<String>) {
        self.send(SessionCommand::SendChat(text.into())).await;
    }

    pub async fn send_drawing(&self, payload: serde_json::Value) {
        self.send(SessionCommand::SendDrawing(payload)).await;
    }

    pub async fn leave(&self) {
        self.send(SessionCommand::Leave).await;
    }

    async fn send(&self, cmd: SessionCommand) {
        if self.tx.send(cmd).await.is_err() {
            warn!("Session is gone; command dropped");
        }
    }
}
