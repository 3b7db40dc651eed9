use crate::media::TrackKind;
use huddle_core::ParticipantId;
use std::sync::Arc;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::track::track_remote::TrackRemote;

/// One inbound track reported by a peer link.
#[derive(Clone)]
pub struct RemoteTrack {
    pub id: String,
    pub kind: TrackKind,
    pub track: Arc<TrackRemote>,
}

impl RemoteTrack {
    pub fn new(track: Arc<TrackRemote>) -> Self {
        let kind = match track.kind() {
            RTPCodecType::Audio => TrackKind::Audio,
            _ => TrackKind::Video,
        };
        Self {
            id: track.id(),
            kind,
            track,
        }
    }
}

/// The renderable media of one remote participant: every track their link
/// has delivered so far. This is the only bridge from negotiation state to
/// the rendering collaborator.
#[derive(Clone)]
pub struct RemoteStream {
    pub peer_id: ParticipantId,
    pub tracks: Vec<RemoteTrack>,
}

impl RemoteStream {
    pub fn new(peer_id: ParticipantId) -> Self {
        Self {
            peer_id,
            tracks: Vec::new(),
        }
    }

    pub fn video_track(&self) -> Option<&RemoteTrack> {
        self.tracks.iter().find(|t| t.kind == TrackKind::Video)
    }

    pub fn audio_tracks(&self) -> impl Iterator<Item = &RemoteTrack> {
        self.tracks.iter().filter(|t| t.kind == TrackKind::Audio)
    }
}
