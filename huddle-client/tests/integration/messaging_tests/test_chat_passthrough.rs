use huddle_core::SignalMessage;

use crate::integration::{init_tracing, join_room, wait_for, wait_for_pair};
use crate::utils::SignalingHub;

#[tokio::test]
async fn chat_lines_reach_the_other_members_unchanged() {
    init_tracing();
    let hub = SignalingHub::new();

    let alice = join_room(&hub, "r1", "alice");
    let bob = join_room(&hub, "r1", "bob");
    wait_for_pair(&alice, &bob).await;

    alice.handle.send_chat("hello bob").await;

    wait_for("chat delivery", || !bob.observer.chats().is_empty()).await;
    let chats = bob.observer.chats();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].display_name, "alice");
    assert_eq!(chats[0].message, "hello bob");

    // The sender is not echoed to; local display is the UI's concern.
    assert!(alice.observer.chats().is_empty());

    // The hub carried it as a plain broadcast, once.
    let chat_signals = hub
        .log()
        .await
        .iter()
        .filter(|m| matches!(m, SignalMessage::ChatMessage { .. }))
        .count();
    assert_eq!(chat_signals, 1);
}
