use machina_shared::{HostType, ReceivingContext, Session, SessionId};

// UserKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct UserKey(u64);

impl UserKey {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

// User

/// A connected client as the server sees it. Received packets are handled
/// against the user that sent them.
pub struct User<S: Session> {
    key: UserKey,
    session: Option<S>,
}

impl<S: Session> User<S> {
    pub(crate) fn new(key: UserKey) -> Self {
        Self { key, session: None }
    }

    pub fn key(&self) -> UserKey {
        self.key
    }

    pub fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(Session::session_id)
    }

    /// Replaces any open session, returning the previous one
    pub(crate) fn open_session(&mut self, session: S) -> Option<S> {
        self.session.replace(session)
    }

    pub(crate) fn close_session(&mut self) -> Option<S> {
        self.session.take()
    }
}

impl<S: Session> ReceivingContext for User<S> {
    type Session = S;

    fn host_type(&self) -> HostType {
        HostType::Server
    }

    fn active_session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    fn active_session_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut()
    }
}
