use serde::{Deserialize, Serialize};

/// Side of a newly formed pair that is expected to send the first offer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationRole {
    Initiator,
    Responder,
}
