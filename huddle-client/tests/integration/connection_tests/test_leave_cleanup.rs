use std::time::Duration;

use crate::integration::{init_tracing, join_room, wait_for, wait_for_pair};
use crate::utils::SignalingHub;

#[tokio::test]
async fn departing_member_is_fully_forgotten() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");
    let bob = join_room(&hub, "r1", "bob");
    wait_for_pair(&alice, &bob).await;

    bob.handle.leave().await;

    wait_for("bob removed from alice's session", || {
        alice.ctx.link_count() == 0 && alice.observer.participants().len() == 1
    })
    .await;
    assert!(alice.ctx.remote_stream(&bob.id).is_none());
    // No inbound media had flowed yet, so there was no stream to withdraw.
    assert!(alice.observer.removed_streams().is_empty());

    // A second user-left for the same member must change nothing.
    hub.disconnect(&bob.id).await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(alice.ctx.link_count(), 0);
    assert_eq!(alice.observer.participants().len(), 1);
}
