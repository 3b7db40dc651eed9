use crate::media::local_track::LocalTrack;
use crate::media::media_source::{MediaError, MediaSource, ScreenShare};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, info};

/// The set of tracks currently going out to every peer link: all audio
/// tracks plus the active video track (camera, or screen while sharing).
#[derive(Clone)]
pub struct LocalMediaBundle {
    pub audio_tracks: Vec<LocalTrack>,
    pub video_track: Option<LocalTrack>,
}

impl LocalMediaBundle {
    pub fn empty() -> Self {
        Self {
            audio_tracks: Vec::new(),
            video_track: None,
        }
    }
}

/// Owner of all local capture state. The sole mutator of track enablement
/// and of the camera/screen swap; peer links only ever read the bundle.
pub struct MediaSession {
    source: Arc<dyn MediaSource>,
    audio_tracks: Vec<LocalTrack>,
    camera_video: Option<LocalTrack>,
    screen: Option<ScreenShare>,
    muted: bool,
    video_off: bool,
}

impl MediaSession {
    pub fn new(source: Arc<dyn MediaSource>) -> Self {
        Self {
            source,
            audio_tracks: Vec::new(),
            camera_video: None,
            screen: None,
            muted: false,
            video_off: false,
        }
    }

    /// Acquire camera and microphone. On failure the session joins with no
    /// local tracks rather than failing the call.
    pub async fn acquire(&mut self) -> Result<(), MediaError> {
        let bundle = self.source.acquire_camera().await?;
        info!(
            "Local media acquired: {} audio track(s), video: {}",
            bundle.audio_tracks.len(),
            bundle.video_track.is_some()
        );
        self.audio_tracks = bundle.audio_tracks;
        self.camera_video = bundle.video_track;
        Ok(())
    }

    /// The tracks every peer link should currently be sending.
    pub fn bundle(&self) -> LocalMediaBundle {
        let video_track = match &self.screen {
            Some(share) => Some(share.track.clone()),
            None => self.camera_video.clone(),
        };
        LocalMediaBundle {
            audio_tracks: self.audio_tracks.clone(),
            video_track,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_video_off(&self) -> bool {
        self.video_off
    }

    pub fn is_screen_sharing(&self) -> bool {
        self.screen.is_some()
    }

    /// Flip audio enablement in place. Capture keeps running; nothing at the
    /// connection layer changes.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        for track in &self.audio_tracks {
            track.set_enabled(!self.muted);
        }
        debug!("Microphone muted: {}", self.muted);
        self.muted
    }

    /// Flip enablement of the active video track in place.
    pub fn toggle_video(&mut self) -> bool {
        self.video_off = !self.video_off;
        if let Some(track) = self.active_video() {
            track.set_enabled(!self.video_off);
        }
        debug!("Video off: {}", self.video_off);
        self.video_off
    }

    fn active_video(&self) -> Option<&LocalTrack> {
        match &self.screen {
            Some(share) => Some(&share.track),
            None => self.camera_video.as_ref(),
        }
    }

    /// Acquire a screen capture and return the track that should now be
    /// broadcast in place of the camera.
    pub async fn start_screen_share(&mut self) -> Result<LocalTrack, MediaError> {
        let share = self.source.acquire_screen().await?;
        let track = share.track.clone();
        track.set_enabled(!self.video_off);
        self.screen = Some(share);
        info!("Screen share started");
        Ok(track)
    }

    /// Release the screen capture and return the camera track to restore,
    /// if a camera is available. No-op when not sharing.
    pub fn stop_screen_share(&mut self) -> Option<LocalTrack> {
        if self.screen.take().is_none() {
            return None;
        }
        info!("Screen share stopped");
        if let Some(camera) = &self.camera_video {
            camera.set_enabled(!self.video_off);
        }
        self.camera_video.clone()
    }

    /// Notifier that fires if the active screen capture ends externally.
    pub fn screen_ended(&self) -> Option<Arc<Notify>> {
        self.screen.as_ref().map(|share| share.ended.clone())
    }

    /// Release every locally owned capture.
    pub fn stop_all(&mut self) {
        self.screen = None;
        self.audio_tracks.clear();
        self.camera_video = None;
    }
}
