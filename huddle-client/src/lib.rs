//! Mesh video-call client engine: one `RoomSession` per joined room owns
//! the signaling choreography, a peer link per remote member, early-ICE
//! buffering, local media, and the participant directory. The embedding
//! application supplies a `SignalingTransport`, a `MediaSource` and a
//! `RoomObserver`, and drives the session through its `RoomHandle`.

pub mod media;
pub mod peer;
pub mod session;
pub mod signaling;

pub use media::*;
pub use peer::*;
pub use session::*;
pub use signaling::*;

pub use huddle_core::{
    ChatMessage, IceCandidate, IceServerConfig, Participant, ParticipantId, RoomId, SignalMessage,
};
