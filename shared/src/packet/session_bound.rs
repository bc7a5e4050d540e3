use machina_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    constants::UNBOUND_SESSION_ID,
    packet::{
        direction::PacketDirection,
        packet::{DropReason, Packet, PacketHandler, PacketOutcome},
        session::{ReceivingContext, Session},
    },
    types::SessionId,
};

/// Payload of a session-bound request, applied to the session it resolves to
pub trait SessionAction<S>: Serde + Send + 'static {
    /// Extra check run before the session is resolved
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(self, session: &mut S);
}

/// A client-initiated request that only takes effect if the session it
/// carries is still the one open for the sender on the server.
///
/// Wire layout: `[session_id: i32, 4 bytes][payload]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionBound<P> {
    session_id: SessionId,
    payload: P,
}

impl<P> SessionBound<P> {
    pub fn new(session_id: SessionId, payload: P) -> Self {
        Self {
            session_id,
            payload,
        }
    }

    pub fn for_session<S: Session>(session: &S, payload: P) -> Self {
        Self::new(session.session_id(), payload)
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Looks up the sender's open session, if it is the one this packet was
    /// built for. A mismatch means the packet is stale or foreign.
    pub fn resolve_session<'c, C: ReceivingContext>(&self, context: &'c C) -> Option<&'c C::Session> {
        context
            .active_session()
            .filter(|session| session.session_id() == self.session_id)
    }

    pub fn resolve_session_mut<'c, C: ReceivingContext>(
        &self,
        context: &'c mut C,
    ) -> Option<&'c mut C::Session> {
        context
            .active_session_mut()
            .filter(|session| session.session_id() == self.session_id)
    }
}

impl<P: Default> Default for SessionBound<P> {
    fn default() -> Self {
        Self::new(UNBOUND_SESSION_ID, P::default())
    }
}

impl<P: Serde + Send + 'static> Packet for SessionBound<P> {
    const DIRECTION: PacketDirection = PacketDirection::ClientToServer;

    fn read(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let session_id = SessionId::de(reader)?;
        let payload = P::de(reader)?;
        Ok(Self {
            session_id,
            payload,
        })
    }

    fn write(&self, writer: &mut dyn BitWrite) {
        self.session_id.ser(writer);
        self.payload.ser(writer);
    }
}

impl<C: ReceivingContext, P: SessionAction<C::Session>> PacketHandler<C> for SessionBound<P> {
    fn is_valid(&self, _context: &C) -> bool {
        self.payload.is_valid()
    }

    fn handle(self, context: &mut C) -> PacketOutcome {
        let active = context.active_session_id();
        let Some(session) = self.resolve_session_mut(context) else {
            return PacketOutcome::Dropped(DropReason::SessionMismatch {
                carried: self.session_id,
                active,
            });
        };
        self.payload.apply(session);
        PacketOutcome::Applied
    }
}
