use crate::peer::remote_stream::RemoteTrack;
use huddle_core::{IceCandidate, ParticipantId};
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;

/// Events emitted by peer links into the session loop. This is the explicit
/// surface for what the native connection reports through callbacks, keeping
/// all handling serialized on the session task.
pub enum PeerEvent {
    /// A locally discovered ICE candidate to trickle to the peer.
    CandidateGenerated(ParticipantId, IceCandidate),
    /// The peer's link delivered an inbound media track.
    TrackReceived(ParticipantId, RemoteTrack),
    /// Native connection state transition. Informational only: links are
    /// torn down by leave signals or local teardown, never by state flaps.
    StateChanged(ParticipantId, RTCPeerConnectionState),
}
