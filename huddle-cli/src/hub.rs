use anyhow::Result;
use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use huddle_core::{ParticipantId, RoomId, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Development rendezvous hub: relays room signaling with no semantics of
/// its own. `dest`-addressed signals are unicast, everything else is
/// broadcast to the sender's room, and a dropped socket broadcasts
/// `user-left` for the member it carried.
struct HubInner {
    members: DashMap<ParticipantId, Member>,
}

struct Member {
    room: RoomId,
    tx: mpsc::UnboundedSender<Message>,
}

#[derive(Clone)]
struct HubState {
    inner: Arc<HubInner>,
}

impl HubInner {
    fn send_to(&self, id: &ParticipantId, msg: &SignalMessage) {
        if let Some(member) = self.members.get(id) {
            match serde_json::to_string(msg) {
                Ok(json) => {
                    if let Err(e) = member.tx.send(Message::Text(json.into())) {
                        error!("Failed to forward signal to {}: {:?}", id, e);
                    }
                }
                Err(e) => error!("Failed to serialize signal: {}", e),
            }
        } else {
            warn!("Attempted to send signal to disconnected member {}", id);
        }
    }

    fn broadcast(&self, room: &RoomId, from: &ParticipantId, msg: &SignalMessage) {
        let targets: Vec<ParticipantId> = self
            .members
            .iter()
            .filter(|entry| &entry.value().room == room && entry.key() != from)
            .map(|entry| entry.key().clone())
            .collect();
        for id in targets {
            self.send_to(&id, msg);
        }
    }
}

pub async fn run(addr: &str) -> Result<()> {
    let state = HubState {
        inner: Arc::new(HubInner {
            members: DashMap::new(),
        }),
    };

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Rendezvous hub listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<HubState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: HubState) {
    info!("New signaling connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let inner = state.inner.clone();

        async move {
            // Identity is learned from the first join this socket carries.
            let mut member_id: Option<ParticipantId> = None;

            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(signal) => match &signal {
                            SignalMessage::Join { uuid, room, .. } => {
                                info!("Member {} joined room '{}'", uuid, room);
                                inner.members.insert(
                                    uuid.clone(),
                                    Member {
                                        room: room.clone(),
                                        tx: tx.clone(),
                                    },
                                );
                                member_id = Some(uuid.clone());
                                inner.broadcast(room, uuid, &signal);
                            }
                            _ => {
                                if let Some(dest) = signal.dest() {
                                    inner.send_to(dest, &signal);
                                } else if let Some(room) =
                                    inner.members.get(signal.sender()).map(|m| m.room.clone())
                                {
                                    inner.broadcast(&room, signal.sender(), &signal);
                                }
                            }
                        },
                        Err(e) => warn!("Invalid SignalMessage: {:?}", e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            // Socket gone: the member left, tell the room.
            if let Some(id) = member_id {
                let room = inner.members.remove(&id).map(|(_, m)| m.room);
                if let Some(room) = room {
                    info!("Member {} left room '{}'", id, room);
                    inner.broadcast(&room, &id, &SignalMessage::UserLeft { uuid: id.clone() });
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    info!("Signaling connection closed");
}
