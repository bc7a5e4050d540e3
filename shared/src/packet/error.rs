use thiserror::Error;

use machina_serde::SerdeErr;

use crate::{packet::direction::PacketDirection, types::HostType};

/// Errors that can occur while encoding or decoding a packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// The buffer ended early or held an invalid value
    #[error("Malformed packet: {0}")]
    Decode(#[from] SerdeErr),

    /// Network ID not found in registry
    #[error("Network ID {net_id} not found in packet registry. Packet type must be registered with Protocol via add_packet()")]
    NetIdNotFound { net_id: u16 },

    /// Packet type not found in registry
    #[error("Packet type `{name}` not found in registry. Packet type must be registered with Protocol via add_packet()")]
    KindNotRegistered { name: &'static str },

    /// Packet exceeds the configured size limit
    #[error("Packet of {size} bytes exceeds the limit of {limit} bytes")]
    PacketTooLarge { size: usize, limit: usize },

    /// Packet body decoded but whole bytes were left over
    #[error("Packet `{name}` decoded with {bits} unread bits remaining (possible malformed or malicious data)")]
    TrailingBytes { name: &'static str, bits: usize },

    /// Attempted to send a packet the local host is not allowed to send
    #[error("Packet `{name}` travels {direction} and cannot be sent by the {host_type:?}")]
    InvalidSendDirection {
        name: &'static str,
        direction: PacketDirection,
        host_type: HostType,
    },
}
