use std::{any::Any, any::TypeId, collections::HashMap};

use machina_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{
    packet::{direction::PacketDirection, error::PacketError, packet::Packet},
    protocol::ProtocolError,
};

type NetId = u16;

/// Builds a decoded packet from the remaining buffer
type PacketFactory = fn(&mut BitReader) -> Result<Box<dyn Any + Send>, SerdeErr>;

/// Identifies a registered packet type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PacketKind {
    type_id: TypeId,
}

impl PacketKind {
    pub fn of<P: Packet>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
        }
    }
}

struct PacketEntry {
    kind: PacketKind,
    name: &'static str,
    direction: PacketDirection,
    factory: PacketFactory,
}

fn read_packet<P: Packet>(reader: &mut BitReader) -> Result<Box<dyn Any + Send>, SerdeErr> {
    Ok(Box::new(P::read(reader)?))
}

/// Registry mapping each packet type to the net id it travels under and the
/// factory that decodes it. Net ids follow registration order, so both hosts
/// must register the same types in the same order.
#[derive(Default)]
pub struct PacketKinds {
    net_ids: HashMap<PacketKind, NetId>,
    entries: Vec<PacketEntry>,
}

impl PacketKinds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_packet<P: Packet>(&mut self) -> Result<PacketKind, ProtocolError> {
        let kind = PacketKind::of::<P>();
        if self.net_ids.contains_key(&kind) {
            return Err(ProtocolError::DuplicatePacket { name: P::name() });
        }
        let net_id = NetId::try_from(self.entries.len())
            .map_err(|_| ProtocolError::TooManyPackets { limit: NetId::MAX })?;

        self.net_ids.insert(kind, net_id);
        self.entries.push(PacketEntry {
            kind,
            name: P::name(),
            direction: P::DIRECTION,
            factory: read_packet::<P>,
        });
        Ok(kind)
    }

    pub fn contains<P: Packet>(&self) -> bool {
        self.net_ids.contains_key(&PacketKind::of::<P>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn net_id(&self, kind: &PacketKind) -> Option<NetId> {
        self.net_ids.get(kind).copied()
    }

    pub fn kind(&self, net_id: NetId) -> Option<PacketKind> {
        self.entries.get(usize::from(net_id)).map(|entry| entry.kind)
    }

    pub fn name(&self, kind: &PacketKind) -> Option<&'static str> {
        self.entry(kind).map(|entry| entry.name)
    }

    pub fn direction(&self, kind: &PacketKind) -> Option<PacketDirection> {
        self.entry(kind).map(|entry| entry.direction)
    }

    fn entry(&self, kind: &PacketKind) -> Option<&PacketEntry> {
        let net_id = self.net_id(kind)?;
        self.entries.get(usize::from(net_id))
    }

    /// Writes the kind tag followed by the packet body
    pub fn write<P: Packet>(&self, packet: &P, writer: &mut dyn BitWrite) -> Result<(), PacketError> {
        let Some(net_id) = self.net_id(&PacketKind::of::<P>()) else {
            return Err(PacketError::KindNotRegistered { name: P::name() });
        };
        UnsignedVariableInteger::<7>::new(net_id).ser(writer);
        packet.write(writer);
        Ok(())
    }

    /// Reads the kind tag, then hands the rest of the buffer to the factory
    /// registered for it
    pub fn read(&self, reader: &mut BitReader) -> Result<DecodedPacket, PacketError> {
        let net_id: NetId = UnsignedVariableInteger::<7>::de(reader)?
            .try_to()
            .ok_or(PacketError::Decode(SerdeErr))?;
        let Some(entry) = self.entries.get(usize::from(net_id)) else {
            return Err(PacketError::NetIdNotFound { net_id });
        };
        let packet = (entry.factory)(reader)?;

        Ok(DecodedPacket {
            kind: entry.kind,
            name: entry.name,
            direction: entry.direction,
            packet,
        })
    }
}

/// A packet that has been decoded but not yet validated or applied
pub struct DecodedPacket {
    kind: PacketKind,
    name: &'static str,
    direction: PacketDirection,
    packet: Box<dyn Any + Send>,
}

impl DecodedPacket {
    pub fn kind(&self) -> PacketKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn direction(&self) -> PacketDirection {
        self.direction
    }

    pub fn is<P: Packet>(&self) -> bool {
        self.kind == PacketKind::of::<P>()
    }

    /// Recovers the concrete packet, or gives the decoded packet back if it
    /// is some other type
    pub fn downcast<P: Packet>(self) -> Result<P, Self> {
        if !self.is::<P>() {
            return Err(self);
        }
        let Self {
            kind,
            name,
            direction,
            packet,
        } = self;
        match packet.downcast::<P>() {
            Ok(packet) => Ok(*packet),
            Err(packet) => Err(Self {
                kind,
                name,
                direction,
                packet,
            }),
        }
    }

    pub(crate) fn into_inner(self) -> Box<dyn Any + Send> {
        self.packet
    }
}
