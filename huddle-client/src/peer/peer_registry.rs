use crate::media::{LocalMediaBundle, LocalTrack};
use crate::peer::peer_config::PeerConfig;
use crate::peer::peer_event::PeerEvent;
use crate::peer::peer_link::PeerLink;
use anyhow::Result;
use dashmap::DashMap;
use huddle_core::ParticipantId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owner of every peer link in the room: at most one link per remote
/// participant, created lazily on first signaling interaction. The map is
/// shared read-only with the session context; only the registry mutates
/// link lifecycle.
pub struct PeerRegistry {
    links: Arc<DashMap<ParticipantId, Arc<PeerLink>>>,
    config: PeerConfig,
    event_tx: mpsc::Sender<PeerEvent>,
}

impl PeerRegistry {
    pub fn new(config: PeerConfig, event_tx: mpsc::Sender<PeerEvent>) -> Self {
        Self {
            links: Arc::new(DashMap::new()),
            config,
            event_tx,
        }
    }

    /// Shared view of the link map for the session context.
    pub(crate) fn links(&self) -> Arc<DashMap<ParticipantId, Arc<PeerLink>>> {
        self.links.clone()
    }

    pub fn get(&self, peer_id: &ParticipantId) -> Option<Arc<PeerLink>> {
        self.links.get(peer_id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, peer_id: &ParticipantId) -> bool {
        self.links.contains_key(peer_id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Return the existing link for this peer, or create one wired to the
    /// session's event channel with the current media bundle attached.
    pub async fn get_or_create(
        &self,
        peer_id: &ParticipantId,
        bundle: &LocalMediaBundle,
    ) -> Result<Arc<PeerLink>> {
        if let Some(link) = self.get(peer_id) {
            return Ok(link);
        }

        info!("Creating peer link for {}", peer_id);
        let link = Arc::new(
            PeerLink::connect(peer_id.clone(), &self.config, bundle, self.event_tx.clone()).await?,
        );
        self.links.insert(peer_id.clone(), link.clone());
        Ok(link)
    }

    /// Close and remove this peer's link. Safe to call for unknown peers
    /// and safe to call twice.
    pub async fn remove(&self, peer_id: &ParticipantId) {
        let Some((_, link)) = self.links.remove(peer_id) else {
            return;
        };
        if let Err(e) = link.close().await {
            warn!("Error closing link to {}: {:?}", peer_id, e);
        }
    }

    /// Swap the outgoing video track on every link. A failure on one peer
    /// is logged and does not roll back or block the others.
    pub async fn replace_video(&self, track: &LocalTrack) {
        let links: Vec<Arc<PeerLink>> = self.links.iter().map(|e| e.value().clone()).collect();
        for link in links {
            if let Err(e) = link.replace_video(track).await {
                warn!("Video replacement failed for {}: {:?}", link.peer_id, e);
            }
        }
    }

    /// Close every link and empty the registry.
    pub async fn close_all(&self) {
        let peers: Vec<ParticipantId> = self.links.iter().map(|e| e.key().clone()).collect();
        for peer_id in peers {
            self.remove(&peer_id).await;
        }
    }
}
