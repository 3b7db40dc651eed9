use crate::signaling::{SignalingError, SignalingTransport, TransportEvent};
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use huddle_core::SignalMessage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// WebSocket implementation of the signaling transport.
pub struct WsSignaling {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsSignaling {
    /// Connect to the rendezvous server and spawn the send/receive pump
    /// tasks. Returns the outbound transport and the inbound event stream.
    pub async fn connect(
        url: &str,
    ) -> Result<(Arc<Self>, mpsc::Receiver<TransportEvent>), SignalingError> {
        info!("Connecting to signaling server: {}", url);

        let (ws_stream, _) = connect_async(url)
            .await
            .map_err(|e| SignalingError::WebSocket(e.to_string()))?;

        let (write, read) = ws_stream.split();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(256);

        tokio::spawn(Self::sender_task(write, out_rx));
        tokio::spawn(Self::receiver_task(read, event_tx));

        Ok((Arc::new(Self { tx: out_tx }), event_rx))
    }

    async fn sender_task(
        mut write: SplitSink<WsStream, Message>,
        mut rx: mpsc::UnboundedReceiver<Message>,
    ) {
        while let Some(msg) = rx.recv().await {
            if write.send(msg).await.is_err() {
                break;
            }
        }
        debug!("Signaling sender task terminated");
    }

    async fn receiver_task(mut read: SplitStream<WsStream>, event_tx: mpsc::Sender<TransportEvent>) {
        while let Some(Ok(msg)) = read.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<SignalMessage>(&text) {
                    Ok(signal) => {
                        if event_tx.send(TransportEvent::Signal(signal)).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => warn!("Invalid SignalMessage: {:?}", e),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }

        let _ = event_tx.send(TransportEvent::Closed).await;
        debug!("Signaling receiver task terminated");
    }
}

#[async_trait]
impl SignalingTransport for WsSignaling {
    async fn send(&self, msg: SignalMessage) -> Result<(), SignalingError> {
        let json = serde_json::to_string(&msg)?;
        self.tx
            .send(Message::Text(json))
            .map_err(|_| SignalingError::Closed)
    }

    async fn close(&self) {
        let _ = self.tx.send(Message::Close(None));
    }
}
