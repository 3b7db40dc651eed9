use crate::model::participant::ParticipantId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    /// Public STUN endpoints used when no explicit ICE configuration is
    /// supplied. TURN is not part of the current scope, so meshes behind
    /// symmetric NAT may fail to connect.
    pub fn default_stun() -> Vec<Self> {
        [
            "stun:stun.l.google.com:19302",
            "stun:stun1.l.google.com:19302",
            "stun:stun2.l.google.com:19302",
            "stun:stun3.l.google.com:19302",
            "stun:stun4.l.google.com:19302",
        ]
        .iter()
        .map(|url| Self {
            urls: vec![(*url).to_owned()],
            username: None,
            credential: None,
        })
        .collect()
    }
}

/// A trickled ICE candidate as carried on the wire. Field names follow the
/// browser's `RTCIceCandidateInit` dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

/// Signaling messages exchanged through the rendezvous server, one room per
/// connection. `Join`, `ChatMessage` and `Drawing` are broadcast to the room;
/// `Offer`, `Answer` and `Ice` are addressed to a single peer via `dest`;
/// `UserLeft` is emitted by the server when a member's connection drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SignalMessage {
    Join {
        uuid: ParticipantId,
        display_name: String,
        room: RoomId,
    },
    Offer {
        uuid: ParticipantId,
        dest: ParticipantId,
        room: RoomId,
        sdp: String,
        display_name: String,
    },
    Answer {
        uuid: ParticipantId,
        dest: ParticipantId,
        room: RoomId,
        sdp: String,
        display_name: String,
    },
    Ice {
        uuid: ParticipantId,
        dest: ParticipantId,
        room: RoomId,
        candidate: IceCandidate,
    },
    ChatMessage {
        uuid: ParticipantId,
        room: RoomId,
        display_name: String,
        message: String,
        time: Option<String>,
    },
    Drawing {
        uuid: ParticipantId,
        room: RoomId,
        payload: serde_json::Value,
    },
    UserLeft {
        uuid: ParticipantId,
    },
}

impl SignalMessage {
    /// The member that originated this signal.
    pub fn sender(&self) -> &ParticipantId {
        match self {
            Self::Join { uuid, .. }
            | Self::Offer { uuid, .. }
            | Self::Answer { uuid, .. }
            | Self::Ice { uuid, .. }
            | Self::ChatMessage { uuid, .. }
            | Self::Drawing { uuid, .. }
            | Self::UserLeft { uuid } => uuid,
        }
    }

    /// Unicast destination, if this signal is addressed to a single peer.
    pub fn dest(&self) -> Option<&ParticipantId> {
        match self {
            Self::Offer { dest, .. } | Self::Answer { dest, .. } | Self::Ice { dest, .. } => {
                Some(dest)
            }
            _ => None,
        }
    }

}
