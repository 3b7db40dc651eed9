use crate::media::local_track::LocalTrack;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("camera or microphone unavailable: {0}")]
    CaptureUnavailable(String),
    #[error("screen capture unavailable: {0}")]
    ScreenUnavailable(String),
}

/// Camera + microphone capture as one unit.
pub struct CameraBundle {
    pub audio_tracks: Vec<LocalTrack>,
    pub video_track: Option<LocalTrack>,
}

/// A live screen capture. Dropping it releases the capture; `ended` fires if
/// the capture stops outside our control (OS-level "stop sharing"), which
/// must run the same stop path as an explicit toggle.
pub struct ScreenShare {
    pub track: LocalTrack,
    pub ended: Arc<Notify>,
}

/// Acquisition seam for local capture devices. Implementations own the
/// actual device plumbing and feed samples into the returned tracks,
/// honoring each track's `enabled` flag.
#[async_trait]
pub trait MediaSource: Send + Sync + 'static {
    async fn acquire_camera(&self) -> Result<CameraBundle, MediaError>;

    async fn acquire_screen(&self) -> Result<ScreenShare, MediaError>;
}
