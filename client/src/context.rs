use std::collections::HashMap;

use log::trace;

use machina_shared::{
    DropReason, HostType, MeterSync, PacketHandler, PacketOutcome, ReceivingContext, Session,
    SessionId,
};

use crate::meter_view::MeterView;

/// The session the client believes it has open on the server
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientSession {
    session_id: SessionId,
}

impl ClientSession {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }
}

impl Session for ClientSession {
    fn session_id(&self) -> SessionId {
        self.session_id
    }
}

/// State that server packets are applied to on the client
#[derive(Default)]
pub struct ClientContext {
    session: Option<ClientSession>,
    meters: HashMap<String, MeterView>,
}

impl ClientContext {
    pub(crate) fn open_session(&mut self, session_id: SessionId) -> Option<ClientSession> {
        self.session.replace(ClientSession::new(session_id))
    }

    pub(crate) fn close_session(&mut self) -> Option<ClientSession> {
        self.session.take()
    }

    pub fn meter(&self, name: &str) -> Option<&MeterView> {
        self.meters.get(name)
    }

    pub fn meters(&self) -> impl Iterator<Item = &MeterView> {
        self.meters.values()
    }

    pub(crate) fn forget_meters(&mut self) {
        self.meters.clear();
    }
}

impl ReceivingContext for ClientContext {
    type Session = ClientSession;

    fn host_type(&self) -> HostType {
        HostType::Client
    }

    fn active_session(&self) -> Option<&ClientSession> {
        self.session.as_ref()
    }

    fn active_session_mut(&mut self) -> Option<&mut ClientSession> {
        self.session.as_mut()
    }
}

impl PacketHandler<ClientContext> for MeterSync {
    fn is_valid(&self, _context: &ClientContext) -> bool {
        self.maximum >= 0
    }

    fn handle(self, context: &mut ClientContext) -> PacketOutcome {
        // views belong to the open session, a late snapshot must not revive them
        let active = context.active_session_id();
        if active != Some(self.session_id) {
            return PacketOutcome::Dropped(DropReason::SessionMismatch {
                carried: self.session_id,
                active,
            });
        }

        trace!("meter `{}` synced at {}/{}", self.name, self.current, self.maximum);
        match context.meters.get_mut(&self.name) {
            Some(view) => view.apply(self),
            None => {
                context.meters.insert(self.name.clone(), MeterView::new(self));
            }
        }
        PacketOutcome::Applied
    }
}
