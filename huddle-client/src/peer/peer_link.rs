use crate::media::{LocalMediaBundle, LocalTrack};
use crate::peer::peer_config::PeerConfig;
use crate::peer::peer_event::PeerEvent;
use crate::peer::remote_stream::RemoteTrack;
use anyhow::{Context, Result, bail};
use huddle_core::{IceCandidate, ParticipantId};
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::info;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_sender::RTCRtpSender;
use webrtc::track::track_remote::TrackRemote;

/// One negotiated connection to a remote participant. Wraps the native
/// peer connection, pumps its callbacks into the session's event channel,
/// and keeps the outgoing video sender for in-place track replacement.
pub struct PeerLink {
    pub peer_id: ParticipantId,
    peer_connection: Arc<RTCPeerConnection>,
    video_sender: RwLock<Option<Arc<RTCRtpSender>>>,
}

impl PeerLink {
    /// Create the native connection, wire its callbacks into `event_tx`,
    /// and attach the current local media bundle.
    pub async fn connect(
        peer_id: ParticipantId,
        config: &PeerConfig,
        bundle: &LocalMediaBundle,
        event_tx: mpsc::Sender<PeerEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        // Callbacks clone the sender and peer id: they must be 'static.

        let state_tx = event_tx.clone();
        let uid_state = peer_id.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let uid = uid_state.clone();

                Box::pin(async move {
                    info!("Peer connection state changed for {}: {:?}", uid, s);
                    let _ = tx.send(PeerEvent::StateChanged(uid, s)).await;
                })
            },
        ));

        // Trickle ICE: forward each locally discovered candidate as it appears.
        let ice_tx = event_tx.clone();
        let uid_ice = peer_id.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let uid = uid_ice.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let candidate = IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                };
                let _ = tx.send(PeerEvent::CandidateGenerated(uid, candidate)).await;
            })
        }));

        let track_tx = event_tx.clone();
        let uid_track = peer_id.clone();
        peer_connection.on_track(Box::new(move |track: Arc<TrackRemote>, _receiver, _transceiver| {
            let tx = track_tx.clone();
            let uid = uid_track.clone();

            Box::pin(async move {
                let remote = RemoteTrack::new(track);
                info!("Inbound {:?} track {} from {}", remote.kind, remote.id, uid);
                let _ = tx.send(PeerEvent::TrackReceived(uid, remote)).await;
            })
        }));

        let link = Self {
            peer_id,
            peer_connection,
            video_sender: RwLock::new(None),
        };
        link.attach_bundle(bundle).await?;
        Ok(link)
    }

    async fn attach_bundle(&self, bundle: &LocalMediaBundle) -> Result<()> {
        for track in &bundle.audio_tracks {
            self.peer_connection
                .add_track(track.as_track_local())
                .await
                .context("Failed to add audio track")?;
        }
        if let Some(video) = &bundle.video_track {
            let sender = self
                .peer_connection
                .add_track(video.as_track_local())
                .await
                .context("Failed to add video track")?;
            *self.video_sender.write().await = Some(sender);
        }
        Ok(())
    }

    /// Create a local SDP offer and set it as the local description.
    pub async fn create_offer(&self) -> Result<String> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(offer.sdp)
    }

    /// Apply a remote SDP offer.
    pub async fn apply_remote_offer(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::offer(sdp)?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    /// Create a local SDP answer and set it as the local description.
    pub async fn create_answer(&self) -> Result<String> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(answer.sdp)
    }

    /// Apply a remote SDP answer.
    pub async fn apply_remote_answer(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::answer(sdp)?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    /// Whether a remote description has been committed. Candidates arriving
    /// before that must be buffered, not applied.
    pub async fn has_remote_description(&self) -> bool {
        self.peer_connection.remote_description().await.is_some()
    }

    /// Apply a trickled remote ICE candidate.
    pub async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: None,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .context("Failed to apply ICE candidate")?;
        Ok(())
    }

    /// Swap the outgoing video track in place. No renegotiation: the sender
    /// keeps its negotiated parameters and only the payload source changes.
    pub async fn replace_video(&self, track: &LocalTrack) -> Result<()> {
        let guard = self.video_sender.read().await;
        let Some(sender) = guard.as_ref() else {
            bail!("no video sender for peer {}", self.peer_id);
        };
        sender
            .replace_track(Some(track.as_track_local()))
            .await
            .context("Failed to replace outgoing video track")?;
        Ok(())
    }

    /// Close the native connection.
    pub async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
