use thiserror::Error;

use machina_shared::PacketError;

/// Errors surfaced by the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// A session-bound request was sent while no session is open
    #[error("No session is open. Call Client::open_session() before sending session-bound packets")]
    NoActiveSession,

    /// Packet could not be encoded or decoded
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),
}
