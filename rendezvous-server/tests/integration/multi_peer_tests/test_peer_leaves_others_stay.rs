use rendezvous_core::{RoomId, ServerMessage};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{connect, join, offer_sdp};

#[tokio::test]
async fn test_peer_leaves_others_stay() {
    init_tracing();

    let (relay, output, _rx) = create_test_relay();
    let room = RoomId::from("abc");

    let mut a = connect();
    let mut b = connect();
    let mut c = connect();
    join(&relay, &mut a, "abc", "Alice").await;
    join(&relay, &mut b, "abc", "Bob").await;
    join(&relay, &mut c, "abc", "Carol").await;
    output.clear().await;

    relay.leave_room(&mut b, &room).await.unwrap();

    for member in [&a, &c] {
        assert_eq!(
            output.messages_for(&member.id()).await,
            vec![ServerMessage::PeerLeft {
                peer_id: b.id(),
                name: "Bob".to_string(),
            }]
        );
    }
    assert_eq!(relay.registry().member_count(&room), 2);

    // Remaining pair still talks; B no longer receives.
    output.clear().await;
    relay.offer(&mut a, &room, offer_sdp("alice")).await.unwrap();

    assert_eq!(output.messages_for(&c.id()).await.len(), 1);
    assert!(output.messages_for(&b.id()).await.is_empty());

    // B may join somewhere else after an explicit leave.
    join(&relay, &mut b, "xyz", "Bob").await;
    assert!(relay.registry().contains(&RoomId::from("xyz"), &b.id()));
}

#[tokio::test]
async fn test_last_member_leaving_removes_room() {
    init_tracing();

    let (relay, output, _rx) = create_test_relay();

    let mut a = connect();
    let mut b = connect();
    join(&relay, &mut a, "abc", "Alice").await;
    join(&relay, &mut b, "abc", "Bob").await;

    relay.disconnect(&mut a).await;
    relay.disconnect(&mut b).await;

    assert_eq!(relay.registry().room_count(), 0);

    // A's departure reached B; B's departure reached nobody.
    let left: Vec<_> = output
        .deliveries()
        .await
        .into_iter()
        .filter(|d| matches!(d.message, ServerMessage::PeerLeft { .. }))
        .collect();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].to, b.id());
}
