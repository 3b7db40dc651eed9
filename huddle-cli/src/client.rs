use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use dialoguer::{Input, Select};
use huddle_client::{
    LocalMediaBundle, RemoteStream, RoomObserver, RoomSession, SessionConfig,
    SyntheticMediaSource, WsSignaling,
};
use huddle_core::{ChatMessage, Participant, ParticipantId, RoomId};
use std::sync::Arc;

/// Prints room events as they arrive. Stands in for the rendering layer.
struct ConsoleObserver;

#[async_trait]
impl RoomObserver for ConsoleObserver {
    async fn on_participants_changed(&self, participants: Vec<Participant>) {
        let names: Vec<String> = participants
            .iter()
            .map(|p| {
                let mut name = p.display_name.clone();
                if p.is_local {
                    name.push_str(" (you)");
                }
                if p.is_muted {
                    name.push_str(" [muted]");
                }
                if p.is_video_off {
                    name.push_str(" [video off]");
                }
                name
            })
            .collect();
        println!("{} {}", "participants:".cyan().bold(), names.join(", "));
    }

    async fn on_remote_stream(&self, stream: RemoteStream) {
        println!(
            "{} {} ({} track(s))",
            "media from".green().bold(),
            stream.peer_id,
            stream.tracks.len()
        );
    }

    async fn on_remote_stream_removed(&self, peer_id: ParticipantId) {
        println!("{} {}", "media gone:".yellow(), peer_id);
    }

    async fn on_local_media_changed(&self, bundle: LocalMediaBundle) {
        let video = bundle
            .video_track
            .as_ref()
            .map_or("none".to_owned(), |t| t.id().to_owned());
        println!("{} video={}", "local media:".cyan(), video);
    }

    async fn on_chat_message(&self, message: ChatMessage) {
        println!(
            "{} {}: {}",
            "chat".magenta().bold(),
            message.display_name.bold(),
            message.message
        );
    }

    async fn on_transport_closed(&self) {
        println!("{}", "signaling connection lost".red().bold());
    }
}

const ACTIONS: &[&str] = &[
    "Toggle mute",
    "Toggle video",
    "Toggle screen share",
    "Send chat message",
    "Leave",
];

pub async fn run(url: &str, room: String, name: String, id: Option<String>) -> Result<()> {
    let (transport, transport_rx) = WsSignaling::connect(url)
        .await
        .context("Failed to reach the rendezvous hub")?;

    let mut config = SessionConfig::new(RoomId(room.clone()), name);
    if let Some(id) = id {
        config = config.with_identity(ParticipantId(id));
    }

    let source = Arc::new(SyntheticMediaSource::new(config.local_id.to_string()));
    let (session, handle) = RoomSession::new(
        config,
        transport,
        transport_rx,
        source,
        Arc::new(ConsoleObserver),
    );
    let session_task = tokio::spawn(session.run());

    println!("{} {}", "Joined room".green().bold(), room.bold());

    loop {
        let action = tokio::task::spawn_blocking(|| {
            Select::new()
                .with_prompt("Action")
                .items(ACTIONS)
                .default(0)
                .interact()
        })
        .await??;

        match action {
            0 => handle.toggle_mute().await,
            1 => handle.toggle_video().await,
            2 => handle.toggle_screen_share().await,
            3 => {
                let text: String = tokio::task::spawn_blocking(|| {
                    Input::new().with_prompt("Message").interact_text()
                })
                .await??;
                handle.send_chat(text).await;
            }
            _ => {
                handle.leave().await;
                break;
            }
        }
    }

    session_task.await?;
    println!("{}", "Left the room".yellow());
    Ok(())
}
