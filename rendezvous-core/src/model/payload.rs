use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque negotiation blob (session description or ICE candidate).
///
/// The relay carries it between peers without looking inside; only the
/// negotiation engine on each end gives it meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
