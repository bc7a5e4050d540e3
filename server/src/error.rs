use thiserror::Error;

use machina_shared::PacketError;

use crate::UserKey;

/// Errors surfaced by the authoritative host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// No user is connected under this key
    #[error("No user exists for key {user_key:?}")]
    UserNotFound { user_key: UserKey },

    /// The user has no session for session-bound packets to target
    #[error("User {user_key:?} has no open session")]
    NoActiveSession { user_key: UserKey },

    /// Packet could not be encoded or decoded
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),
}
