use huddle_core::ParticipantId;

use crate::integration::{init_tracing, join_room, wait_for, wait_for_pair};
use crate::utils::SignalingHub;

#[tokio::test]
async fn first_member_alone_creates_no_links() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");

    wait_for("local membership", || {
        alice.observer.participants().len() == 1
    })
    .await;
    let local = alice.observer.local_participant().unwrap();
    assert_eq!(local.display_name, "alice");
    assert!(!local.is_muted && !local.is_video_off);
    assert_eq!(alice.ctx.link_count(), 0);
    assert!(hub.offers().await.is_empty());
}

#[tokio::test]
async fn newcomer_is_offered_to_by_the_existing_member() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");
    wait_for("alice membership", || {
        alice.observer.participants().len() == 1
    })
    .await;

    let bob = join_room(&hub, "r1", "bob");
    wait_for_pair(&alice, &bob).await;

    // Exactly one offer direction per pair: the pre-existing member offers.
    assert_eq!(
        hub.offers().await,
        vec![(ParticipantId::from("alice"), ParticipantId::from("bob"))]
    );
    assert_eq!(
        hub.answers().await,
        vec![(ParticipantId::from("bob"), ParticipantId::from("alice"))]
    );

    wait_for("directories converge", || {
        alice.observer.participants().len() == 2 && bob.observer.participants().len() == 2
    })
    .await;

    let seen_by_alice = alice.observer.participants();
    let bob_entry = seen_by_alice.iter().find(|p| p.id == bob.id).unwrap();
    assert_eq!(bob_entry.display_name, "bob");
    assert!(!bob_entry.is_local);
}
