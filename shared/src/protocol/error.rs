use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Packet type was registered twice
    #[error("Packet type `{name}` is already registered with this Protocol")]
    DuplicatePacket { name: &'static str },

    /// Net id space is exhausted
    #[error("Cannot register more than {limit} packet types")]
    TooManyPackets { limit: u16 },
}
