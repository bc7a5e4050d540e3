use machina_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    meter::{
        direction::ProgressDirection,
        eta::Eta,
        progress_meter::{progress_fraction, ProgressMeter},
    },
    packet::{direction::PacketDirection, packet::Packet},
    types::SessionId,
};

/// Snapshot of a meter sent from the authoritative host so the other side
/// can display it. Predicates and callbacks never travel.
///
/// Wire layout: `[session_id: i32, 4 bytes][name][state]`. A snapshot only
/// applies while the receiver has `session_id` open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeterSync {
    pub session_id: SessionId,
    pub name: String,
    pub current: i32,
    pub maximum: i32,
    pub increment: u32,
    pub tick_rate: u32,
    pub direction: ProgressDirection,
}

impl MeterSync {
    pub fn from_meter<C>(meter: &ProgressMeter<C>, session_id: SessionId) -> Self {
        Self {
            session_id,
            name: meter.name().to_string(),
            current: meter.current(),
            maximum: meter.maximum(),
            increment: meter.increment(),
            tick_rate: meter.tick_rate(),
            direction: meter.direction(),
        }
    }

    pub fn progress_fraction(&self) -> f32 {
        progress_fraction(self.current, self.maximum)
    }

    pub fn eta(&self, ticks_per_second: u32) -> Eta {
        Eta::projection(
            self.current,
            self.maximum,
            self.increment,
            self.tick_rate,
            self.direction,
            ticks_per_second,
        )
    }
}

impl Packet for MeterSync {
    const DIRECTION: PacketDirection = PacketDirection::ServerToClient;

    fn read(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let session_id = SessionId::de(reader)?;
        let name = String::de(reader)?;
        let current = i32::de(reader)?;
        let maximum = i32::de(reader)?;
        let increment = u32::de(reader)?;
        let tick_rate = u32::de(reader)?;
        let direction = ProgressDirection::de(reader)?;

        // a zero step would mean the sender skipped validation
        if increment == 0 || tick_rate == 0 {
            return Err(SerdeErr);
        }

        Ok(Self {
            session_id,
            name,
            current,
            maximum,
            increment,
            tick_rate,
            direction,
        })
    }

    fn write(&self, writer: &mut dyn BitWrite) {
        self.session_id.ser(writer);
        self.name.ser(writer);
        self.current.ser(writer);
        self.maximum.ser(writer);
        self.increment.ser(writer);
        self.tick_rate.ser(writer);
        self.direction.ser(writer);
    }

    fn name() -> &'static str {
        "MeterSync"
    }
}
