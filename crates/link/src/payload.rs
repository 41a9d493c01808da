use {
    agora_apps::Call,
    agora_common::Result,
    serde::{Deserialize, Serialize},
};

/// Wire version of parked resume payloads. Bumped when [`Call`] changes
/// incompatibly; decode rejects versions it does not understand so an old
/// server never misreads an in-flight link.
pub const PAYLOAD_VERSION: u32 = 1;

/// The parked continuation of a link handshake: everything needed to resume
/// execution after the external redirect, as data. The nonce ties the
/// payload to exactly one pending attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPayload {
    pub version: u32,
    pub nonce: String,
    pub call: Call,
}

impl LinkPayload {
    #[must_use]
    pub fn new(nonce: impl Into<String>, call: Call) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            nonce: nonce.into(),
            call,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let payload: Self = serde_json::from_slice(bytes)?;
        if payload.version != PAYLOAD_VERSION {
            return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "unsupported link payload version {}",
                payload.version
            ))
            .into());
        }
        Ok(payload)
    }
}
