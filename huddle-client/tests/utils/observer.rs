use async_trait::async_trait;
use huddle_client::{LocalMediaBundle, RemoteStream, RoomObserver};
use huddle_core::{ChatMessage, Participant, ParticipantId};
use std::sync::{Arc, Mutex};

/// Observer that records everything the session publishes, for polling in
/// assertions.
#[derive(Default)]
pub struct TestObserver {
    participants: Mutex<Vec<Participant>>,
    local_bundle: Mutex<Option<LocalMediaBundle>>,
    removed_streams: Mutex<Vec<ParticipantId>>,
    chats: Mutex<Vec<ChatMessage>>,
}

impl TestObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants.lock().unwrap().clone()
    }

    pub fn local_participant(&self) -> Option<Participant> {
        self.participants().into_iter().find(|p| p.is_local)
    }

    pub fn local_video_track_id(&self) -> Option<String> {
        self.local_bundle
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|b| b.video_track.as_ref().map(|t| t.id().to_owned()))
    }

    pub fn removed_streams(&self) -> Vec<ParticipantId> {
        self.removed_streams.lock().unwrap().clone()
    }

    pub fn chats(&self) -> Vec<ChatMessage> {
        self.chats.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomObserver for TestObserver {
    async fn on_participants_changed(&self, participants: Vec<Participant>) {
        *self.participants.lock().unwrap() = participants;
    }

    async fn on_remote_stream(&self, _stream: RemoteStream) {}

    async fn on_remote_stream_removed(&self, peer_id: ParticipantId) {
        self.removed_streams.lock().unwrap().push(peer_id);
    }

    async fn on_local_media_changed(&self, bundle: LocalMediaBundle) {
        *self.local_bundle.lock().unwrap() = Some(bundle);
    }

    async fn on_chat_message(&self, message: ChatMessage) {
        self.chats.lock().unwrap().push(message);
    }
}
