pub mod multi_peer_tests;

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;

use rendezvous_server::{Relay, RoomRegistry};

use crate::utils::{Delivery, MockSignalingOutput};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_relay() -> (
    Relay,
    MockSignalingOutput,
    mpsc::UnboundedReceiver<Delivery>,
) {
    let (output, delivery_rx) = MockSignalingOutput::new();
    let relay = Relay::new(RoomRegistry::new(), Arc::new(output.clone()));

    (relay, output, delivery_rx)
}
