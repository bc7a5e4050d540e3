use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr};

/// A type that can be written into, and read back out of, a bit stream
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes the value into the outgoing bit stream
    fn ser(&self, writer: &mut dyn BitWrite);

    /// Reads a value back out of an incoming bit stream
    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Number of bits `ser` will write for this value
    fn bit_length(&self) -> u32;
}

/// Implemented by types whose encoded size never depends on their value
pub trait ConstBitLength {
    fn const_bit_length() -> u32;
}
