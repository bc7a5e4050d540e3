//! # Machina Shared
//! Tick-driven progress meters and the directional packet protocol shared
//! between machina-server & machina-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use machina_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SerdeIntegerConversion,
    SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
    MTU_SIZE_BITS, MTU_SIZE_BYTES,
};

mod constants;
mod meter;
mod packet;
mod protocol;
mod types;

pub use constants::{HOST_TICKS_PER_SECOND, UNBOUND_SESSION_ID};
pub use meter::{
    config::MeterConfig,
    direction::ProgressDirection,
    error::MeterError,
    eta::Eta,
    progress_meter::{MeterCallback, MeterPredicate, ProgressMeter},
    record::{CompoundRecord, MeterRecord, MAX_PROGRESS_KEY, PROGRESS_KEY},
    scheduler::{MeterHost, TickOutcome},
    sync::MeterSync,
};
pub use packet::{
    direction::PacketDirection,
    dispatcher::PacketDispatcher,
    error::PacketError,
    packet::{DropReason, Packet, PacketHandler, PacketOutcome},
    packet_kinds::{DecodedPacket, PacketKind, PacketKinds},
    session::{ReceivingContext, Session},
    session_bound::{SessionAction, SessionBound},
};
pub use protocol::{Protocol, ProtocolError, ProtocolPlugin};
pub use types::{HostTime, HostType, SessionId};
