use std::time::Duration;

use crate::integration::{init_tracing, join_room, wait_for, wait_for_pair};
use crate::utils::SignalingHub;

#[tokio::test]
async fn screen_share_toggling_is_invisible_to_signaling() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");
    let bob = join_room(&hub, "r1", "bob");
    wait_for_pair(&alice, &bob).await;

    let offers_before = hub.offers().await.len();
    let answers_before = hub.answers().await.len();

    alice.handle.toggle_screen_share().await;
    wait_for("screen track active", || {
        alice
            .observer
            .local_video_track_id()
            .is_some_and(|id| id.ends_with("-screen"))
    })
    .await;

    alice.handle.toggle_screen_share().await;
    wait_for("camera track restored", || {
        alice
            .observer
            .local_video_track_id()
            .is_some_and(|id| id.ends_with("-camera"))
    })
    .await;

    // Give any stray renegotiation a chance to surface before asserting.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(hub.offers().await.len(), offers_before);
    assert_eq!(hub.answers().await.len(), answers_before);
    assert!(alice.ctx.has_link(&bob.id) && bob.ctx.has_link(&alice.id));
}

#[tokio::test]
async fn os_level_capture_end_restores_the_camera() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");
    let bob = join_room(&hub, "r1", "bob");
    wait_for_pair(&alice, &bob).await;

    alice.handle.toggle_screen_share().await;
    wait_for("screen track active", || {
        alice
            .observer
            .local_video_track_id()
            .is_some_and(|id| id.ends_with("-screen"))
    })
    .await;

    alice.source.end_screen_share();

    wait_for("camera track restored", || {
        alice
            .observer
            .local_video_track_id()
            .is_some_and(|id| id.ends_with("-camera"))
    })
    .await;
}
