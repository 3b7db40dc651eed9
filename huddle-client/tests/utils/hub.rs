use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use huddle_client::{SignalingError, SignalingTransport, TransportEvent};
use huddle_core::{ParticipantId, SignalMessage};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// In-memory rendezvous hub wiring several sessions together with the real
/// server's routing rules: `dest`-addressed signals go to that peer, the
/// rest broadcast to the room, and a member disconnecting broadcasts
/// `user-left`. Broadcasts only reach members whose own `join` has been
/// processed — the room-membership rule that makes join order (and with it
/// the initiator role) well defined. Every routed signal is recorded for
/// assertions.
pub struct SignalingHub {
    peers: DashMap<ParticipantId, mpsc::Sender<TransportEvent>>,
    joined: DashSet<ParticipantId>,
    log: Mutex<Vec<SignalMessage>>,
}

impl SignalingHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            peers: DashMap::new(),
            joined: DashSet::new(),
            log: Mutex::new(Vec::new()),
        })
    }

    /// Register a member and hand back its transport plus inbound events.
    pub fn attach(
        self: &Arc<Self>,
        id: &ParticipantId,
    ) -> (Arc<HubTransport>, mpsc::Receiver<TransportEvent>) {
        let (tx, rx) = mpsc::channel(256);
        self.peers.insert(id.clone(), tx);
        let transport = Arc::new(HubTransport {
            hub: self.clone(),
            id: id.clone(),
        });
        (transport, rx)
    }

    /// Drop a member and tell the room, the way the server reacts to a
    /// closed socket. Safe to call for members already gone.
    pub async fn disconnect(&self, id: &ParticipantId) {
        self.joined.remove(id);
        if self.peers.remove(id).is_some() {
            self.route(SignalMessage::UserLeft { uuid: id.clone() }, id).await;
        }
    }

    async fn route(&self, msg: SignalMessage, from: &ParticipantId) {
        if let SignalMessage::Join { uuid, .. } = &msg {
            self.joined.insert(uuid.clone());
        }
        self.log.lock().await.push(msg.clone());

        match msg.dest() {
            Some(dest) => {
                let target = self.peers.get(dest).map(|entry| entry.value().clone());
                if let Some(tx) = target {
                    let _ = tx.send(TransportEvent::Signal(msg)).await;
                }
            }
            None => {
                // Collect first so no map guard is held across an await.
                let targets: Vec<_> = self
                    .peers
                    .iter()
                    .filter(|entry| entry.key() != from && self.joined.contains(entry.key()))
                    .map(|entry| entry.value().clone())
                    .collect();
                for tx in targets {
                    let _ = tx.send(TransportEvent::Signal(msg.clone())).await;
                }
            }
        }
    }

    pub async fn log(&self) -> Vec<SignalMessage> {
        self.log.lock().await.clone()
    }

    /// (sender, destination) of every offer routed so far.
    pub async fn offers(&self) -> Vec<(ParticipantId, ParticipantId)> {
        self.log
            .lock()
            .await
            .iter()
            .filter_map(|m| match m {
                SignalMessage::Offer { uuid, dest, .. } => Some((uuid.clone(), dest.clone())),
                _ => None,
            })
            .collect()
    }

    /// (sender, destination) of every answer routed so far.
    pub async fn answers(&self) -> Vec<(ParticipantId, ParticipantId)> {
        self.log
            .lock()
            .await
            .iter()
            .filter_map(|m| match m {
                SignalMessage::Answer { uuid, dest, .. } => Some((uuid.clone(), dest.clone())),
                _ => None,
            })
            .collect()
    }
}

/// One member's view of the hub.
pub struct HubTransport {
    hub: Arc<SignalingHub>,
    id: ParticipantId,
}

#[async_trait]
impl SignalingTransport for HubTransport {
    async fn send(&self, msg: SignalMessage) -> Result<(), SignalingError> {
        if !self.hub.peers.contains_key(&self.id) {
            return Err(SignalingError::Closed);
        }
        self.hub.route(msg, &self.id).await;
        Ok(())
    }

    async fn close(&self) {
        self.hub.disconnect(&self.id).await;
    }
}
