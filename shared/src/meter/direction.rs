use std::fmt;

use machina_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Whether qualifying ticks move a meter's progress up toward its maximum,
/// or down toward zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProgressDirection {
    #[default]
    Rising,
    Falling,
}

impl ProgressDirection {
    pub fn is_rising(&self) -> bool {
        *self == ProgressDirection::Rising
    }

    pub fn reverse(self) -> Self {
        match self {
            ProgressDirection::Rising => ProgressDirection::Falling,
            ProgressDirection::Falling => ProgressDirection::Rising,
        }
    }
}

impl fmt::Display for ProgressDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressDirection::Rising => write!(f, "rising"),
            ProgressDirection::Falling => write!(f, "falling"),
        }
    }
}

impl Serde for ProgressDirection {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.is_rising().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if bool::de(reader)? {
            Ok(ProgressDirection::Rising)
        } else {
            Ok(ProgressDirection::Falling)
        }
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for ProgressDirection {
    fn const_bit_length() -> u32 {
        1
    }
}
