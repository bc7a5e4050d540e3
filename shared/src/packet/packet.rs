use std::fmt;

use machina_serde::{BitReader, BitWrite, SerdeErr};

use crate::{
    packet::{direction::PacketDirection, session::ReceivingContext},
    types::{HostType, SessionId},
};

/// A unit of cross-process communication with a statically fixed direction
pub trait Packet: Sized + Send + 'static {
    const DIRECTION: PacketDirection;

    /// Reads the packet body. Registered with `Protocol` as this type's factory.
    fn read(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Writes the packet body, the inverse of `read`
    fn write(&self, writer: &mut dyn BitWrite);

    fn direction(&self) -> PacketDirection {
        Self::DIRECTION
    }

    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Receiving-side behavior of a packet type, for a given receiving context
pub trait PacketHandler<C: ReceivingContext>: Packet {
    /// Gate run after the direction check and before any effect. The default
    /// only requires a statically defined direction, which every `Packet` has.
    fn is_valid(&self, _context: &C) -> bool {
        true
    }

    /// Applies the packet's effects, or reports why it was dropped
    fn handle(self, context: &mut C) -> PacketOutcome;
}

/// Terminal state of a received packet. Dropped packets are gone; the sender
/// is never told.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketOutcome {
    Applied,
    Dropped(DropReason),
}

impl PacketOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PacketOutcome::Applied)
    }

    pub fn is_dropped(&self) -> bool {
        !self.is_applied()
    }

    pub fn drop_reason(&self) -> Option<&DropReason> {
        match self {
            PacketOutcome::Applied => None,
            PacketOutcome::Dropped(reason) => Some(reason),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// The packet type is not meant to be received by this host
    WrongDirection {
        name: &'static str,
        direction: PacketDirection,
        receiver: HostType,
    },
    /// The packet's own validity check failed
    Invalid { name: &'static str },
    /// The carried session id does not match the sender's open session
    SessionMismatch {
        carried: SessionId,
        active: Option<SessionId>,
    },
    /// No handler was registered on this host for the packet type
    Unhandled { name: &'static str },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::WrongDirection {
                name,
                direction,
                receiver,
            } => write!(
                f,
                "`{}` travels {} and cannot be received by the {:?}",
                name, direction, receiver
            ),
            DropReason::Invalid { name } => write!(f, "`{}` failed validation", name),
            DropReason::SessionMismatch {
                carried,
                active: Some(active),
            } => write!(
                f,
                "packet targets session {} but session {} is open",
                carried, active
            ),
            DropReason::SessionMismatch {
                carried,
                active: None,
            } => write!(f, "packet targets session {} but no session is open", carried),
            DropReason::Unhandled { name } => write!(f, "no handler registered for `{}`", name),
        }
    }
}
