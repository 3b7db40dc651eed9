use crate::media::local_track::LocalTrack;
use crate::media::media_source::{CameraBundle, MediaError, MediaSource, ScreenShare};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;

/// Media source that hands out real sample tracks without any capture
/// hardware behind them. Used by the headless CLI client and by tests;
/// nothing ever writes samples into the tracks.
pub struct SyntheticMediaSource {
    stream_id: String,
    screen_ended: Arc<Notify>,
}

impl SyntheticMediaSource {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            screen_ended: Arc::new(Notify::new()),
        }
    }

    /// Simulate the OS ending the screen capture (e.g. the user pressing the
    /// system-level "stop sharing" button). Uses a stored permit so the
    /// session notices even if it is mid-event when the capture ends.
    pub fn end_screen_share(&self) {
        self.screen_ended.notify_one();
    }
}

impl Default for SyntheticMediaSource {
    fn default() -> Self {
        Self::new("synthetic")
    }
}

#[async_trait]
impl MediaSource for SyntheticMediaSource {
    async fn acquire_camera(&self) -> Result<CameraBundle, MediaError> {
        Ok(CameraBundle {
            audio_tracks: vec![LocalTrack::opus(
                format!("{}-mic", self.stream_id),
                self.stream_id.clone(),
            )],
            video_track: Some(LocalTrack::vp8(
                format!("{}-camera", self.stream_id),
                self.stream_id.clone(),
            )),
        })
    }

    async fn acquire_screen(&self) -> Result<ScreenShare, MediaError> {
        Ok(ScreenShare {
            track: LocalTrack::vp8(format!("{}-screen", self.stream_id), self.stream_id.clone()),
            ended: self.screen_ended.clone(),
        })
    }
}
