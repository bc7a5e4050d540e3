use std::default::Default;

use machina_shared::MTU_SIZE_BYTES;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Incoming packets larger than this are rejected before decoding
    /// (capped at `MTU_SIZE_BYTES`, see `packet_limit`)
    pub max_packet_bytes: usize,
    /// Whether packets dropped by the receive pipeline are logged with `warn!`
    pub log_dropped_packets: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_packet_bytes: MTU_SIZE_BYTES,
            log_dropped_packets: true,
        }
    }
}

impl ServerConfig {
    /// Effective packet size limit. `MTU_SIZE_BYTES` is the hard ceiling,
    /// since `Protocol::encode` never produces anything larger.
    pub fn packet_limit(&self) -> usize {
        self.max_packet_bytes.min(MTU_SIZE_BYTES)
    }
}
