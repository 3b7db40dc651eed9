use crate::peer::PeerConfig;
use huddle_core::{ParticipantId, RoomId};

/// Identity and connection parameters for one room session.
#[derive(Clone)]
pub struct SessionConfig {
    pub room: RoomId,
    pub local_id: ParticipantId,
    pub display_name: String,
    pub peer: PeerConfig,
}

impl SessionConfig {
    /// Configuration for an anonymous member with a generated identity.
    pub fn new(room: RoomId, display_name: impl Into<String>) -> Self {
        Self {
            room,
            local_id: ParticipantId::random(),
            display_name: display_name.into(),
            peer: PeerConfig::default(),
        }
    }

    /// Use an authenticated identity instead of a generated one.
    pub fn with_identity(mut self, local_id: ParticipantId) -> Self {
        self.local_id = local_id;
        self
    }
}
