use log::trace;

use machina_serde::{BitReader, BitWriter, MTU_SIZE_BYTES};

use crate::{
    meter::sync::MeterSync,
    packet::{
        error::PacketError,
        packet::Packet,
        packet_kinds::{DecodedPacket, PacketKinds},
    },
};

pub mod error;
pub use error::ProtocolError;

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
/// The set of packet types both hosts agree on. Registration happens once at
/// startup; after `lock()` the registry is read-only.
pub struct Protocol {
    pub packet_kinds: PacketKinds,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        let mut packet_kinds = PacketKinds::new();
        if let Err(error) = packet_kinds.add_packet::<MeterSync>() {
            panic!("cannot register built-in packets: {}", error);
        }

        Self {
            packet_kinds,
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    /// # Panics
    ///
    /// Panics if the protocol is locked or `P` is already registered.
    pub fn add_packet<P: Packet>(&mut self) -> &mut Self {
        self.check_lock();
        if let Err(error) = self.packet_kinds.add_packet::<P>() {
            panic!("{}", error);
        }
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_packet<P: Packet>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.packet_kinds.add_packet::<P>()?;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Frames a packet as `[net id][body]`
    pub fn encode<P: Packet>(&self, packet: &P) -> Result<Vec<u8>, PacketError> {
        let mut writer = BitWriter::new();
        self.packet_kinds.write(packet, &mut writer)?;
        let bytes = writer.to_bytes();

        if bytes.len() > MTU_SIZE_BYTES {
            return Err(PacketError::PacketTooLarge {
                size: bytes.len(),
                limit: MTU_SIZE_BYTES,
            });
        }
        trace!("encoded `{}` into {} bytes", P::name(), bytes.len());
        Ok(bytes)
    }

    /// Reads one framed packet. The body must account for the whole buffer,
    /// apart from the padding of its final byte.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedPacket, PacketError> {
        let mut reader = BitReader::new(bytes);
        let decoded = self.packet_kinds.read(&mut reader)?;

        if !reader.is_exhausted() {
            return Err(PacketError::TrailingBytes {
                name: decoded.name(),
                bits: reader.bits_remaining(),
            });
        }
        Ok(decoded)
    }
}
