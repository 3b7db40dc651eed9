use crate::peer::{PeerLink, RemoteStream, RemoteTrack};
use dashmap::DashMap;
use huddle_core::{Participant, ParticipantId};
use std::sync::Arc;

/// Clone-safe, read-only view of session state for the rendering
/// collaborator: who is in the call, what media they deliver, and which
/// peers currently hold a negotiated link. All mutation happens on the
/// session task; the context only mirrors it.
#[derive(Clone)]
pub struct SessionContext {
    participants: Arc<DashMap<ParticipantId, Participant>>,
    streams: Arc<DashMap<ParticipantId, RemoteStream>>,
    links: Arc<DashMap<ParticipantId, Arc<PeerLink>>>,
}

impl SessionContext {
    pub(crate) fn new(links: Arc<DashMap<ParticipantId, Arc<PeerLink>>>) -> Self {
        Self {
            participants: Arc::new(DashMap::new()),
            streams: Arc::new(DashMap::new()),
            links,
        }
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<Participant> {
        self.participants.get(id).map(|entry| entry.value().clone())
    }

    pub fn remote_stream(&self, id: &ParticipantId) -> Option<RemoteStream> {
        self.streams.get(id).map(|entry| entry.value().clone())
    }

    pub fn has_link(&self, id: &ParticipantId) -> bool {
        self.links.contains_key(id)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn sync_participants(&self, snapshot: &[Participant]) {
        self.participants.clear();
        for participant in snapshot {
            self.participants
                .insert(participant.id.clone(), participant.clone());
        }
    }

    pub(crate) fn add_remote_track(
        &self,
        peer_id: &ParticipantId,
        track: RemoteTrack,
    ) -> RemoteStream {
        let mut entry = self
            .streams
            .entry(peer_id.clone())
            .or_insert_with(|| RemoteStream::new(peer_id.clone()));
        entry.tracks.push(track);
        entry.value().clone()
    }

    pub(crate) fn remove_stream(&self, peer_id: &ParticipantId) -> bool {
        self.streams.remove(peer_id).is_some()
    }

    pub(crate) fn clear(&self) {
        self.participants.clear();
        self.streams.clear();
    }
}
