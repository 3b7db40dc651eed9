use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// One locally-owned outgoing track, shared read-only by every peer link.
///
/// `enabled` is a media-layer flag read by whatever feeds samples into the
/// track; flipping it mutes/blanks the outgoing media without touching any
/// peer connection, so toggles never renegotiate.
#[derive(Clone)]
pub struct LocalTrack {
    kind: TrackKind,
    enabled: Arc<AtomicBool>,
    rtc: Arc<TrackLocalStaticSample>,
}

impl LocalTrack {
    pub fn new(kind: TrackKind, rtc: Arc<TrackLocalStaticSample>) -> Self {
        Self {
            kind,
            enabled: Arc::new(AtomicBool::new(true)),
            rtc,
        }
    }

    /// Opus audio track with the standard 48kHz/stereo capability.
    pub fn opus(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let rtc = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: "audio/opus".to_owned(),
                clock_rate: 48000,
                channels: 2,
                sdp_fmtp_line: String::new(),
                rtcp_feedback: vec![],
            },
            id.into(),
            stream_id.into(),
        ));
        Self::new(TrackKind::Audio, rtc)
    }

    /// VP8 video track with the standard 90kHz clock.
    pub fn vp8(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let rtc = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: "video/VP8".to_owned(),
                clock_rate: 90000,
                channels: 0,
                sdp_fmtp_line: String::new(),
                rtcp_feedback: vec![],
            },
            id.into(),
            stream_id.into(),
        ));
        Self::new(TrackKind::Video, rtc)
    }

    pub fn id(&self) -> &str {
        self.rtc.id()
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn rtc(&self) -> Arc<TrackLocalStaticSample> {
        self.rtc.clone()
    }

    pub fn as_track_local(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.rtc.clone()
    }
}
