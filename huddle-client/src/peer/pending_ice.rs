use huddle_core::{IceCandidate, ParticipantId};
use std::collections::HashMap;

/// Per-peer queues of ICE candidates that arrived before the peer's remote
/// description was set. A queue exists only while its link has no remote
/// description; draining removes the entry.
#[derive(Default)]
pub struct PendingIceBuffer {
    queues: HashMap<ParticipantId, Vec<IceCandidate>>,
}

impl PendingIceBuffer {
    pub fn push(&mut self, peer_id: ParticipantId, candidate: IceCandidate) {
        self.queues.entry(peer_id).or_default().push(candidate);
    }

    /// Take every buffered candidate for this peer, in arrival order, and
    /// remove the queue.
    pub fn drain(&mut self, peer_id: &ParticipantId) -> Vec<IceCandidate> {
        self.queues.remove(peer_id).unwrap_or_default()
    }

    pub fn clear(&mut self, peer_id: &ParticipantId) {
        self.queues.remove(peer_id);
    }

    pub fn clear_all(&mut self) {
        self.queues.clear();
    }

    pub fn len(&self, peer_id: &ParticipantId) -> usize {
        self.queues.get(peer_id).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
