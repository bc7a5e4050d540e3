use log::{debug, info, warn};

use machina_shared::{
    Eta, HostType, MeterSync, Packet, PacketDispatcher, PacketError, PacketHandler, PacketOutcome,
    Protocol, ReceivingContext, Serde, Session, SessionBound, SessionId,
};

use crate::{
    client_config::ClientConfig, context::ClientContext, error::ClientError,
    meter_view::MeterView,
};

/// Client side of a machina connection. Wraps outgoing requests with the
/// open session id and applies server snapshots to local views.
pub struct Client {
    config: ClientConfig,
    protocol: Protocol,
    dispatcher: PacketDispatcher<ClientContext>,
    context: ClientContext,
}

impl Client {
    /// Create a new Client. The protocol is locked if it is not already.
    pub fn new<P: Into<Protocol>>(client_config: ClientConfig, protocol: P) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }

        let mut dispatcher = PacketDispatcher::new();
        dispatcher.add_handler::<MeterSync>();

        Self {
            config: client_config,
            protocol,
            dispatcher,
            context: ClientContext::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn add_handler<P: PacketHandler<ClientContext>>(&mut self) -> &mut Self {
        self.dispatcher.add_handler::<P>();
        self
    }

    // Sessions

    /// Records the session the server opened for this client. Requests sent
    /// from now on carry `session_id`.
    pub fn open_session(&mut self, session_id: SessionId) {
        if let Some(previous) = self.context.open_session(session_id) {
            debug!("replacing session {:?}", previous);
            self.context.forget_meters();
        }
        info!("opened session {}", session_id);
    }

    /// Closes the session and discards the meters synced for it
    pub fn close_session(&mut self) -> Option<SessionId> {
        let closed = self.context.close_session()?;
        self.context.forget_meters();

        let session_id = closed.session_id();
        info!("closed session {}", session_id);
        Some(session_id)
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.context.active_session_id()
    }

    // Packets

    /// Binds `payload` to the open session and frames it for the server
    pub fn send<P: Serde + Send + 'static>(&self, payload: P) -> Result<Vec<u8>, ClientError> {
        let Some(session_id) = self.session_id() else {
            warn!("Client Error: cannot send session-bound packet without an open session");
            return Err(ClientError::NoActiveSession);
        };
        self.encode(&SessionBound::new(session_id, payload))
    }

    pub fn encode<P: Packet>(&self, packet: &P) -> Result<Vec<u8>, ClientError> {
        if !P::DIRECTION.can_send(HostType::Client) {
            return Err(PacketError::InvalidSendDirection {
                name: P::name(),
                direction: P::DIRECTION,
                host_type: HostType::Client,
            }
            .into());
        }

        let bytes = self.protocol.encode(packet)?;
        if bytes.len() > self.config.packet_limit() {
            return Err(PacketError::PacketTooLarge {
                size: bytes.len(),
                limit: self.config.packet_limit(),
            }
            .into());
        }
        Ok(bytes)
    }

    pub fn receive(&mut self, bytes: &[u8]) -> Result<PacketOutcome, ClientError> {
        if bytes.len() > self.config.packet_limit() {
            warn!("Client Error: rejecting {} byte packet", bytes.len());
            return Err(PacketError::PacketTooLarge {
                size: bytes.len(),
                limit: self.config.packet_limit(),
            }
            .into());
        }

        let outcome = match self
            .dispatcher
            .receive(&self.protocol, bytes, &mut self.context)
        {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Client Error: cannot read malformed packet: {}", error);
                return Err(error.into());
            }
        };

        if let Some(reason) = outcome.drop_reason() {
            debug!("dropped packet: {}", reason);
        }
        Ok(outcome)
    }

    // Meters

    pub fn meter(&self, name: &str) -> Option<&MeterView> {
        self.context.meter(name)
    }

    pub fn meters(&self) -> impl Iterator<Item = &MeterView> {
        self.context.meters()
    }

    /// ETA of a synced meter at the configured host step rate
    pub fn meter_eta(&self, name: &str) -> Option<Eta> {
        self.meter(name)
            .map(|view| view.eta(self.config.ticks_per_second))
    }
}
