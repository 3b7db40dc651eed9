use crate::media::LocalMediaBundle;
use crate::peer::RemoteStream;
use async_trait::async_trait;
use huddle_core::{ChatMessage, Participant, ParticipantId};

/// Callback surface for the rendering collaborator. Strictly a read-only
/// consumer of session state: it reacts to updates and drives the session
/// only through `RoomHandle`.
#[async_trait]
pub trait RoomObserver: Send + Sync + 'static {
    /// The participant set or some member's metadata changed.
    async fn on_participants_changed(&self, participants: Vec<Participant>);

    /// A remote participant's renderable media changed (new inbound track).
    async fn on_remote_stream(&self, stream: RemoteStream);

    /// A remote participant left; their media should no longer render.
    async fn on_remote_stream_removed(&self, peer_id: ParticipantId);

    /// The local preview bundle changed (acquired, or camera/screen swap).
    async fn on_local_media_changed(&self, bundle: LocalMediaBundle);

    /// A chat line arrived from the room.
    async fn on_chat_message(&self, message: ChatMessage);

    /// An opaque whiteboard payload arrived from the room.
    async fn on_drawing(&self, from: ParticipantId, payload: serde_json::Value) {
        let _ = (from, payload);
    }

    /// The signaling connection dropped. Peer links stay up; only an
    /// explicit leave tears the session down.
    async fn on_transport_closed(&self) {}
}
