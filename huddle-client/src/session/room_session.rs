use crate::media::{MediaSession, MediaSource};
use crate::peer::{PeerEvent, PeerLink, PeerRegistry, PendingIceBuffer};
use crate::session::context::SessionContext;
use crate::session::directory::ParticipantDirectory;
use crate::session::observer::RoomObserver;
use crate::session::session_command::SessionCommand;
use crate::session::session_config::SessionConfig;
use crate::session::session_handle::RoomHandle;
use crate::signaling::{SignalingTransport, TransportEvent};
use huddle_core::{ChatMessage, Participant, ParticipantId, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The negotiation orchestrator: one task owning all per-room state,
/// consuming signaling events, peer-link events and user commands, and
/// driving every peer link through the offer/answer/ICE choreography.
///
/// Initiator roles are fixed by join order: the member already present when
/// a `join` arrives creates the offer, and a newcomer never offers. Exactly
/// one side of each pair offers, so there is no glare and no tie-break.
pub struct RoomSession {
    config: SessionConfig,
    transport: Arc<dyn SignalingTransport>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_open: bool,
    command_rx: mpsc::Receiver<SessionCommand>,
    peer_rx: mpsc::Receiver<PeerEvent>,
    registry: PeerRegistry,
    pending_ice: PendingIceBuffer,
    directory: ParticipantDirectory,
    media: MediaSession,
    ctx: SessionContext,
    observer: Arc<dyn RoomObserver>,
}

impl RoomSession {
    pub fn new(
        config: SessionConfig,
        transport: Arc<dyn SignalingTransport>,
        transport_rx: mpsc::Receiver<TransportEvent>,
        media_source: Arc<dyn MediaSource>,
        observer: Arc<dyn RoomObserver>,
    ) -> (Self, RoomHandle) {
        let (command_tx, command_rx) = mpsc::channel(64);
        let (peer_tx, peer_rx) = mpsc::channel(256);

        let registry = PeerRegistry::new(config.peer.clone(), peer_tx);
        let ctx = SessionContext::new(registry.links());
        let directory = ParticipantDirectory::new(Participant::local(
            config.local_id.clone(),
            config.display_name.clone(),
        ));

        let session = Self {
            config,
            transport,
            transport_rx,
            transport_open: true,
            command_rx,
            peer_rx,
            registry,
            pending_ice: PendingIceBuffer::default(),
            directory,
            media: MediaSession::new(media_source),
            ctx,
            observer,
        };
        let handle = RoomHandle::new(command_tx);
        (session, handle)
    }

    /// Read-only view for the rendering collaborator.
    pub fn context(&self) -> SessionContext {
        self.ctx.clone()
    }

    pub async fn run(mut self) {
        info!("Room session started for room {}", self.config.room);
        self.start().await;

        loop {
            // Recomputed each turn: present only while a screen capture is
            // live, so the arm below wakes exactly on external capture end.
            let screen_notify = self.media.screen_ended();

            tokio::select! {
                evt = self.transport_rx.recv(), if self.transport_open => {
                    match evt {
                        Some(TransportEvent::Signal(msg)) => self.handle_signal(msg).await,
                        Some(TransportEvent::Closed) | None => {
                            warn!("Signaling transport lost; peer links stay up until leave");
                            self.transport_open = false;
                            self.observer.on_transport_closed().await;
                        }
                    }
                }

                Some(evt) = self.peer_rx.recv() => {
                    self.handle_peer_event(evt).await;
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SessionCommand::Leave) | None => {
                            self.teardown().await;
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }

                _ = async {
                    match &screen_notify {
                        Some(notify) => notify.notified().await,
                        None => std::future::pending().await,
                    }
                } => {
                    info!("Screen capture ended externally");
                    self.stop_screen_share().await;
                }
            }
        }

        info!("Room session finished");
    }

    /// Acquire local media, then announce ourselves to the room. Media
    /// failure degrades the local participant to video-off; it never
    /// prevents the join.
    async fn start(&mut self) {
        match self.media.acquire().await {
            Ok(()) => {
                self.observer
                    .on_local_media_changed(self.media.bundle())
                    .await;
            }
            Err(e) => {
                warn!("Joining without local media: {}", e);
                self.directory.set_local_video_off(true);
            }
        }
        self.publish_participants().await;

        self.send_signal(SignalMessage::Join {
            uuid: self.config.local_id.clone(),
            display_name: self.config.display_name.clone(),
            room: self.config.room.clone(),
        })
        .await;
    }

    async fn handle_signal(&mut self, msg: SignalMessage) {
        if msg.sender() == &self.config.local_id {
            return;
        }

        match msg {
            SignalMessage::Join {
                uuid, display_name, ..
            } => {
                self.observe_peer(&uuid, Some(&display_name)).await;

                // We were here first, so we are the initiator for this pair.
                let link = match self.registry.get_or_create(&uuid, &self.media.bundle()).await {
                    Ok(link) => link,
                    Err(e) => {
                        error!("Failed to create peer link for {}: {:?}", uuid, e);
                        return;
                    }
                };
                match link.create_offer().await {
                    Ok(sdp) => {
                        self.send_signal(SignalMessage::Offer {
                            uuid: self.config.local_id.clone(),
                            dest: uuid,
                            room: self.config.room.clone(),
                            sdp,
                            display_name: self.config.display_name.clone(),
                        })
                        .await;
                    }
                    Err(e) => error!("Failed to create offer for {}: {:?}", uuid, e),
                }
            }

            SignalMessage::Offer {
                uuid,
                sdp,
                display_name,
                ..
            } => {
                self.observe_peer(&uuid, Some(&display_name)).await;

                let link = match self.registry.get_or_create(&uuid, &self.media.bundle()).await {
                    Ok(link) => link,
                    Err(e) => {
                        error!("Failed to create peer link for {}: {:?}", uuid, e);
                        return;
                    }
                };
                if let Err(e) = link.apply_remote_offer(sdp).await {
                    error!("Dropping bad offer from {}: {:?}", uuid, e);
                    return;
                }
                self.drain_pending(&uuid, &link).await;

                match link.create_answer().await {
                    Ok(sdp) => {
                        self.send_signal(SignalMessage::Answer {
                            uuid: self.config.local_id.clone(),
                            dest: uuid,
                            room: self.config.room.clone(),
                            sdp,
                            display_name: self.config.display_name.clone(),
                        })
                        .await;
                    }
                    Err(e) => error!("Failed to create answer for {}: {:?}", uuid, e),
                }
            }

            SignalMessage::Answer {
                uuid,
                sdp,
                display_name,
                ..
            } => {
                self.observe_peer(&uuid, Some(&display_name)).await;

                let link = match self.registry.get_or_create(&uuid, &self.media.bundle()).await {
                    Ok(link) => link,
                    Err(e) => {
                        error!("Failed to create peer link for {}: {:?}", uuid, e);
                        return;
                    }
                };
                if let Err(e) = link.apply_remote_answer(sdp).await {
                    error!("Dropping bad answer from {}: {:?}", uuid, e);
                    return;
                }
                self.drain_pending(&uuid, &link).await;
            }

            SignalMessage::Ice { uuid, candidate, .. } => {
                match self.registry.get(&uuid) {
                    Some(link) if link.has_remote_description().await => {
                        // Transient per-candidate failures (duplicates and
                        // the like) must not disturb a healthy link.
                        if let Err(e) = link.add_ice_candidate(candidate).await {
                            warn!("Dropping ICE candidate for {}: {:?}", uuid, e);
                        }
                    }
                    _ => {
                        debug!("Buffering early ICE candidate for {}", uuid);
                        self.pending_ice.push(uuid, candidate);
                    }
                }
            }

            SignalMessage::ChatMessage {
                display_name,
                message,
                time,
                ..
            } => {
                self.observer
                    .on_chat_message(ChatMessage {
                        display_name,
                        message,
                        time,
                    })
                    .await;
            }

            SignalMessage::Drawing { uuid, payload, .. } => {
                self.observer.on_drawing(uuid, payload).await;
            }

            SignalMessage::UserLeft { uuid } => {
                info!("Participant {} left", uuid);
                self.remove_peer(&uuid).await;
            }
        }
    }

    async fn handle_peer_event(&mut self, evt: PeerEvent) {
        match evt {
            PeerEvent::CandidateGenerated(peer_id, candidate) => {
                self.send_signal(SignalMessage::Ice {
                    uuid: self.config.local_id.clone(),
                    dest: peer_id,
                    room: self.config.room.clone(),
                    candidate,
                })
                .await;
            }

            PeerEvent::TrackReceived(peer_id, track) => {
                let stream = self.ctx.add_remote_track(&peer_id, track);
                self.observer.on_remote_stream(stream).await;
            }

            PeerEvent::StateChanged(peer_id, state) => {
                debug!("Link to {} is now {:?}", peer_id, state);
            }
        }
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::ToggleMute => {
                let muted = self.media.toggle_mute();
                self.directory.set_local_muted(muted);
                self.publish_participants().await;
            }

            SessionCommand::ToggleVideo => {
                let video_off = self.media.toggle_video();
                self.directory.set_local_video_off(video_off);
                self.publish_participants().await;
            }

            SessionCommand::ToggleScreenShare => {
                if self.media.is_screen_sharing() {
                    self.stop_screen_share().await;
                } else {
                    self.start_screen_share().await;
                }
            }

            SessionCommand::SendChat(text) => {
                self.send_signal(SignalMessage::ChatMessage {
                    uuid: self.config.local_id.clone(),
                    room: self.config.room.clone(),
                    display_name: self.config.display_name.clone(),
                    message: text,
                    time: None,
                })
                .await;
            }

            SessionCommand::SendDrawing(payload) => {
                self.send_signal(SignalMessage::Drawing {
                    uuid: self.config.local_id.clone(),
                    room: self.config.room.clone(),
                    payload,
                })
                .await;
            }

            // Leave is intercepted by the run loop.
            SessionCommand::Leave => {}
        }
    }

    async fn start_screen_share(&mut self) {
        match self.media.start_screen_share().await {
            Ok(track) => {
                self.registry.replace_video(&track).await;
                self.observer
                    .on_local_media_changed(self.media.bundle())
                    .await;
            }
            Err(e) => warn!("Screen share unavailable: {}", e),
        }
    }

    async fn stop_screen_share(&mut self) {
        if !self.media.is_screen_sharing() {
            return;
        }
        if let Some(camera) = self.media.stop_screen_share() {
            self.registry.replace_video(&camera).await;
        }
        self.observer
            .on_local_media_changed(self.media.bundle())
            .await;
    }

    /// Record a peer from signaling evidence, publishing the new membership
    /// if the entry is fresh.
    async fn observe_peer(&mut self, peer_id: &ParticipantId, display_name: Option<&str>) {
        if self.directory.observe_remote(peer_id, display_name) {
            self.publish_participants().await;
        }
    }

    /// Apply every candidate buffered for this peer, in arrival order. The
    /// caller has just committed the remote description, so the queue is
    /// retired here and never recreated for this exchange.
    async fn drain_pending(&mut self, peer_id: &ParticipantId, link: &Arc<PeerLink>) {
        let queued = self.pending_ice.drain(peer_id);
        if queued.is_empty() {
            return;
        }
        debug!("Draining {} buffered ICE candidate(s) for {}", queued.len(), peer_id);
        for candidate in queued {
            if let Err(e) = link.add_ice_candidate(candidate).await {
                warn!("Dropping buffered ICE candidate for {}: {:?}", peer_id, e);
            }
        }
    }

    /// Close and forget everything about a departed peer. Safe to run twice:
    /// every step tolerates an already-removed peer.
    async fn remove_peer(&mut self, peer_id: &ParticipantId) {
        self.registry.remove(peer_id).await;
        self.pending_ice.clear(peer_id);

        if self.ctx.remove_stream(peer_id) {
            self.observer.on_remote_stream_removed(peer_id.clone()).await;
        }
        if self.directory.remove(peer_id) {
            self.publish_participants().await;
        }
    }

    /// Full teardown in one task: every link closed, every local track
    /// stopped, transport disconnected. Nothing is left half-open.
    async fn teardown(&mut self) {
        info!("Leaving room {}", self.config.room);
        self.registry.close_all().await;
        self.pending_ice.clear_all();
        self.media.stop_all();
        self.ctx.clear();
        self.transport.close().await;
    }

    async fn publish_participants(&self) {
        let snapshot = self.directory.snapshot();
        self.ctx.sync_participants(&snapshot);
        self.observer.on_participants_changed(snapshot).await;
    }

    async fn send_signal(&self, msg: SignalMessage) {
        if let Err(e) = self.transport.send(msg).await {
            error!("Failed to send signal: {}", e);
        }
    }
}
