use std::collections::HashSet;

use crate::integration::{init_tracing, join_room, wait_for, wait_for_pair};
use crate::utils::SignalingHub;

#[tokio::test]
async fn three_members_form_a_full_mesh_with_one_offer_per_pair() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");
    wait_for("alice membership", || {
        alice.observer.participants().len() == 1
    })
    .await;

    let bob = join_room(&hub, "r1", "bob");
    wait_for_pair(&alice, &bob).await;

    let carol = join_room(&hub, "r1", "carol");
    wait_for_pair(&alice, &carol).await;
    wait_for_pair(&bob, &carol).await;

    for member in [&alice, &bob, &carol] {
        assert_eq!(member.ctx.link_count(), 2);
    }
    wait_for("directories converge", || {
        [&alice, &bob, &carol]
            .iter()
            .all(|m| m.observer.participants().len() == 3)
    })
    .await;

    // Join order fixes the initiator of every pair: whoever was already in
    // the room offers to the newcomer, so each pair negotiates exactly once.
    let offers: HashSet<(String, String)> = hub
        .offers()
        .await
        .into_iter()
        .map(|(from, to)| (from.0, to.0))
        .collect();
    let expected: HashSet<(String, String)> = [
        ("alice", "bob"),
        ("alice", "carol"),
        ("bob", "carol"),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_owned(), b.to_owned()))
    .collect();
    assert_eq!(offers, expected);
    assert_eq!(hub.offers().await.len(), 3);
    assert_eq!(hub.answers().await.len(), 3);
}
