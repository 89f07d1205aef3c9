use crate::{bit_counter::BitCounter, bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr};

/// A type that can be written to and read back from a bit stream
pub trait Serde: Sized {
    /// Writes the value into the given writer
    fn ser(&self, writer: &mut dyn BitWrite);

    /// Reads a value out of the given reader
    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Number of bits `ser` will write for this value
    fn bit_length(&self) -> u32 {
        let mut counter = BitCounter::new();
        self.ser(&mut counter);
        counter.bits_needed()
    }
}

/// Implemented by types whose encoded length does not depend on their value
pub trait ConstBitLength {
    fn const_bit_length() -> u32;
}
