use std::default::Default;

use machina_shared::{HOST_TICKS_PER_SECOND, MTU_SIZE_BYTES};

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Packets larger than this are neither sent nor decoded
    /// (capped at `MTU_SIZE_BYTES`, see `packet_limit`)
    pub max_packet_bytes: usize,
    /// Host step rate used when projecting ETAs for synced meters
    pub ticks_per_second: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_packet_bytes: MTU_SIZE_BYTES,
            ticks_per_second: HOST_TICKS_PER_SECOND,
        }
    }
}

impl ClientConfig {
    /// Effective packet size limit. `MTU_SIZE_BYTES` is the hard ceiling,
    /// since `Protocol::encode` never produces anything larger.
    pub fn packet_limit(&self) -> usize {
        self.max_packet_bytes.min(MTU_SIZE_BYTES)
    }
}
