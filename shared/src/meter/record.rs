use std::collections::BTreeMap;

use log::warn;

use machina_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::meter::progress_meter::ProgressMeter;

pub const PROGRESS_KEY: &str = "progress";
pub const MAX_PROGRESS_KEY: &str = "maxProgress";

/// The durable part of a meter. Direction, increment, tick rate, predicates
/// and callbacks are code-defined and rebuilt by the owner on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MeterRecord {
    pub progress: i32,
    pub max_progress: i32,
}

impl MeterRecord {
    /// Writes exactly the `progress` and `maxProgress` keys
    pub fn write_to(&self, compound: &mut CompoundRecord) {
        compound.put_int(PROGRESS_KEY, self.progress);
        compound.put_int(MAX_PROGRESS_KEY, self.max_progress);
    }

    /// Reads both keys back, treating absent keys as `0`
    pub fn read_from(compound: &CompoundRecord) -> Self {
        Self {
            progress: compound.get_int(PROGRESS_KEY),
            max_progress: compound.get_int(MAX_PROGRESS_KEY),
        }
    }
}

impl Serde for MeterRecord {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.progress.ser(writer);
        self.max_progress.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            progress: i32::de(reader)?,
            max_progress: i32::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for MeterRecord {
    fn const_bit_length() -> u32 {
        <i32 as ConstBitLength>::const_bit_length() * 2
    }
}

/// Flat string-keyed integer mapping, the shape the host's save container
/// stores meter state in
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundRecord {
    values: BTreeMap<String, i32>,
}

impl CompoundRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_int<K: Into<String>>(&mut self, key: K, value: i32) {
        self.values.insert(key.into(), value);
    }

    /// Missing keys read as `0`
    pub fn get_int(&self, key: &str) -> i32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl<C> ProgressMeter<C> {
    pub fn save(&self) -> MeterRecord {
        MeterRecord {
            progress: self.current,
            max_progress: self.maximum,
        }
    }

    /// Overwrites `current` and `maximum` from a record. Everything else about
    /// the meter is left as configured.
    pub fn load(&mut self, record: &MeterRecord) {
        self.current = record.progress;
        if record.max_progress < 0 {
            warn!(
                "meter `{}` loaded a negative maximum ({}), clamping to 0",
                self.name, record.max_progress
            );
            self.maximum = 0;
        } else {
            self.maximum = record.max_progress;
        }
    }

    pub fn save_to(&self, compound: &mut CompoundRecord) {
        self.save().write_to(compound);
    }

    pub fn load_from(&mut self, compound: &CompoundRecord) {
        self.load(&MeterRecord::read_from(compound));
    }
}
