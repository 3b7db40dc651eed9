use async_trait::async_trait;
use huddle_core::SignalMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("signaling transport is closed")]
    Closed,
    #[error("websocket error: {0}")]
    WebSocket(String),
    #[error("failed to encode signal: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Events delivered by the transport into the session loop. Per-peer signal
/// ordering is not guaranteed beyond what the server happens to preserve,
/// which is why the session buffers early ICE candidates instead of assuming
/// strict ordering.
#[derive(Debug)]
pub enum TransportEvent {
    Signal(SignalMessage),
    /// The connection to the rendezvous server dropped. Existing peer links
    /// are left alone; reconnection is not a current capability.
    Closed,
}

/// Outbound half of the signaling channel, scoped to one room. The inbound
/// half is an `mpsc::Receiver<TransportEvent>` handed to the session at
/// construction time.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    /// Send one signal to the rendezvous server.
    async fn send(&self, msg: SignalMessage) -> Result<(), SignalingError>;

    /// Disconnect from the rendezvous server.
    async fn close(&self);
}
