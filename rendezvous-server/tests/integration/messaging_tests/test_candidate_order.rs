use rendezvous_core::{PeerId, RoomId, ServerMessage};
use rendezvous_server::{Connection, RelayError};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{candidate, connect, join};

#[tokio::test]
async fn test_candidate_order() {
    init_tracing();

    let (relay, _output, mut rx) = create_test_relay();
    let room = RoomId::from("abc");

    let mut x = connect();
    let mut y = connect();
    join(&relay, &mut x, "abc", "Alice").await;
    join(&relay, &mut y, "abc", "Bob").await;

    // Drain the peer-joined.
    let first = rx.recv().await.expect("peer-joined expected");
    assert_eq!(first.to, x.id());

    for n in 0..3 {
        relay
            .candidate(&mut x, &room, candidate(n))
            .await
            .expect("candidate failed");
    }

    for n in 0..3 {
        let delivery = rx.recv().await.expect("candidate delivery expected");
        assert_eq!(delivery.to, y.id());
        match delivery.message {
            ServerMessage::IceCandidate {
                sender,
                name,
                candidate: got,
            } => {
                assert_eq!(sender, x.id());
                assert_eq!(name, "Alice");
                assert_eq!(got, candidate(n), "Candidate {} out of order", n);
            }
            other => panic!("Expected candidate, got {:?}", other),
        }
    }

    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_candidate_flood_is_throttled() {
    init_tracing();

    let (relay, output, _rx) = create_test_relay();
    let room = RoomId::from("abc");

    let mut x = Connection::new(PeerId::new(), 5);
    let mut y = connect();
    join(&relay, &mut x, "abc", "Alice").await;
    join(&relay, &mut y, "abc", "Bob").await;
    output.clear().await;

    let mut dropped = 0;
    for n in 0..8 {
        match relay.candidate(&mut x, &room, candidate(n)).await {
            Ok(()) => {}
            Err(RelayError::RateLimited(_)) => dropped += 1,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    assert_eq!(dropped, 3);
    assert_eq!(output.messages_for(&y.id()).await.len(), 5);

    tokio::time::advance(std::time::Duration::from_secs(1)).await;
    relay
        .candidate(&mut x, &room, candidate(99))
        .await
        .expect("Budget should refill after a second");
    assert_eq!(output.messages_for(&y.id()).await.len(), 6);
}
