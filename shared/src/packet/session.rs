use crate::types::{HostType, SessionId};

/// A live interaction on the receiving host that session-bound packets target
pub trait Session {
    fn session_id(&self) -> SessionId;
}

/// Everything a received packet may consult or mutate on the receiving host.
/// For the authoritative host this is the sending user's connection.
pub trait ReceivingContext {
    type Session: Session;

    fn host_type(&self) -> HostType;

    /// The session currently open for the sender, if any
    fn active_session(&self) -> Option<&Self::Session>;

    fn active_session_mut(&mut self) -> Option<&mut Self::Session>;

    fn active_session_id(&self) -> Option<SessionId> {
        self.active_session().map(Session::session_id)
    }
}
