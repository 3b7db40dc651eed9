pub mod connection_tests;
pub mod media_tests;
pub mod messaging_tests;
pub mod multi_peer_tests;

use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use huddle_client::{
    RoomHandle, RoomSession, SessionConfig, SessionContext, SyntheticMediaSource,
};
use huddle_core::{ParticipantId, RoomId};

use crate::utils::{SignalingHub, TestObserver};

/// Polling deadline for signal choreography (ms).
pub const CHOREOGRAPHY_TIMEOUT_MS: u64 = 5000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// One spawned room member and every handle needed to drive and observe it.
pub struct Member {
    pub id: ParticipantId,
    pub handle: RoomHandle,
    pub ctx: SessionContext,
    pub observer: Arc<TestObserver>,
    pub source: Arc<SyntheticMediaSource>,
}

/// Attach a member to the hub and spawn its session loop.
pub fn join_room(hub: &Arc<SignalingHub>, room: &str, name: &str) -> Member {
    let id = ParticipantId::from(name);
    let (transport, transport_rx) = hub.attach(&id);
    let observer = TestObserver::new();
    let source = Arc::new(SyntheticMediaSource::new(name));

    let config = SessionConfig::new(RoomId::from(room), name).with_identity(id.clone());
    let (session, handle) = RoomSession::new(
        config,
        transport,
        transport_rx,
        source.clone(),
        observer.clone(),
    );
    let ctx = session.context();
    tokio::spawn(session.run());

    Member {
        id,
        handle,
        ctx,
        observer,
        source,
    }
}

/// Poll until the condition holds or the choreography deadline passes.
pub async fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
    let deadline = Duration::from_millis(CHOREOGRAPHY_TIMEOUT_MS);
    let start = tokio::time::Instant::now();
    while start.elapsed() < deadline {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("Timed out waiting for {what}");
}

/// Wait until both members hold a link to each other.
pub async fn wait_for_pair(a: &Member, b: &Member) {
    wait_for("pairwise links", || {
        a.ctx.has_link(&b.id) && b.ctx.has_link(&a.id)
    })
    .await;
}
