use std::collections::HashMap;

use log::{info, warn};

use machina_shared::{
    HostType, MeterSync, Packet, PacketDispatcher, PacketError, PacketHandler, PacketOutcome,
    ProgressMeter, Protocol, Session,
};

use crate::{
    error::ServerError,
    server::server_config::ServerConfig,
    user::{User, UserKey},
};

/// The authoritative host. Owns the connected users, the session each of
/// them has open, and the handlers for packets clients may send.
pub struct Server<S: Session> {
    config: ServerConfig,
    protocol: Protocol,
    dispatcher: PacketDispatcher<User<S>>,
    users: HashMap<UserKey, User<S>>,
    next_user_key: u64,
}

impl<S: Session> Server<S> {
    /// Create a new Server. The protocol is locked if it is not already.
    pub fn new<P: Into<Protocol>>(server_config: ServerConfig, protocol: P) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            config: server_config,
            protocol,
            dispatcher: PacketDispatcher::new(),
            users: HashMap::new(),
            next_user_key: 0,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Registers how a client packet type is applied on this host
    pub fn add_handler<P: PacketHandler<User<S>>>(&mut self) -> &mut Self {
        self.dispatcher.add_handler::<P>();
        self
    }

    // Users

    pub fn user_connect(&mut self) -> UserKey {
        let user_key = UserKey::new(self.next_user_key);
        self.next_user_key += 1;
        self.users.insert(user_key, User::new(user_key));

        info!("user {:?} connected", user_key);
        user_key
    }

    /// Removes the user along with any session it had open
    pub fn user_disconnect(&mut self, user_key: &UserKey) -> Result<Option<S>, ServerError> {
        let Some(mut user) = self.users.remove(user_key) else {
            return Err(ServerError::UserNotFound {
                user_key: *user_key,
            });
        };

        info!("user {:?} disconnected", user_key);
        Ok(user.close_session())
    }

    /// Returns whether or not a User exists for the given UserKey
    pub fn user_exists(&self, user_key: &UserKey) -> bool {
        self.users.contains_key(user_key)
    }

    /// Get the number of Users currently connected
    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    pub fn user_keys(&self) -> Vec<UserKey> {
        let mut output: Vec<UserKey> = self.users.keys().copied().collect();
        output.sort();
        output
    }

    pub fn user(&self, user_key: &UserKey) -> Result<&User<S>, ServerError> {
        self.users.get(user_key).ok_or(ServerError::UserNotFound {
            user_key: *user_key,
        })
    }

    fn user_mut(&mut self, user_key: &UserKey) -> Result<&mut User<S>, ServerError> {
        self.users.get_mut(user_key).ok_or(ServerError::UserNotFound {
            user_key: *user_key,
        })
    }

    // Sessions

    /// Opens a session for the user, replacing (and returning) any session
    /// already open. Packets bound to the replaced session stop applying.
    pub fn open_session(&mut self, user_key: &UserKey, session: S) -> Result<Option<S>, ServerError> {
        let session_id = session.session_id();
        let previous = self.user_mut(user_key)?.open_session(session);

        info!("user {:?} opened session {}", user_key, session_id);
        Ok(previous)
    }

    pub fn close_session(&mut self, user_key: &UserKey) -> Result<Option<S>, ServerError> {
        let closed = self.user_mut(user_key)?.close_session();

        if let Some(session) = &closed {
            info!("user {:?} closed session {}", user_key, session.session_id());
        }
        Ok(closed)
    }

    pub fn session(&self, user_key: &UserKey) -> Option<&S> {
        self.users.get(user_key).and_then(User::session)
    }

    pub fn session_mut(&mut self, user_key: &UserKey) -> Option<&mut S> {
        self.users.get_mut(user_key).and_then(User::session_mut)
    }

    // Packets

    /// Runs a packet received from `user_key` through the receive pipeline.
    ///
    /// Errors mean the bytes never became a packet. A decoded packet that is
    /// not applied comes back as `PacketOutcome::Dropped`.
    pub fn receive(&mut self, user_key: &UserKey, bytes: &[u8]) -> Result<PacketOutcome, ServerError> {
        if bytes.len() > self.config.packet_limit() {
            warn!(
                "Server Error: rejecting {} byte packet from {:?}",
                bytes.len(),
                user_key
            );
            return Err(PacketError::PacketTooLarge {
                size: bytes.len(),
                limit: self.config.packet_limit(),
            }
            .into());
        }

        let Some(user) = self.users.get_mut(user_key) else {
            warn!("Server Error: packet from unknown user {:?}", user_key);
            return Err(ServerError::UserNotFound {
                user_key: *user_key,
            });
        };

        let outcome = match self.dispatcher.receive(&self.protocol, bytes, user) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Server Error: cannot read malformed packet: {}", error);
                return Err(error.into());
            }
        };

        if let PacketOutcome::Dropped(reason) = &outcome {
            if self.config.log_dropped_packets {
                warn!("dropped packet from {:?}: {}", user_key, reason);
            }
        }
        Ok(outcome)
    }

    /// Frames a packet for delivery to clients
    pub fn encode<P: Packet>(&self, packet: &P) -> Result<Vec<u8>, ServerError> {
        if !P::DIRECTION.can_send(HostType::Server) {
            return Err(PacketError::InvalidSendDirection {
                name: P::name(),
                direction: P::DIRECTION,
                host_type: HostType::Server,
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

    /// Snapshots a meter for the user to display. The snapshot is bound to
    /// the user's open session and is dropped by a client that has moved on.
    pub fn sync_meter<C>(
        &self,
        user_key: &UserKey,
        meter: &ProgressMeter<C>,
    ) -> Result<Vec<u8>, ServerError> {
        let Some(session) = self.user(user_key)?.session() else {
            return Err(ServerError::NoActiveSession {
                user_key: *user_key,
            });
        };
        self.encode(&MeterSync::from_meter(meter, session.session_id()))
    }
}
