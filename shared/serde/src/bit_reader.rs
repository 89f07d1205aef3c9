use crate::SerdeErr;

/// Reads bits in the order a [`crate::BitWriter`] wrote them.
pub struct BitReader<'b> {
    buffer: &'b [u8],
    bits_read: usize,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            bits_read: 0,
        }
    }

    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    /// True when every bit of every byte has been consumed, or only the
    /// zero padding of the final byte remains.
    pub fn is_exhausted(&self) -> bool {
        let total = self.buffer.len().saturating_mul(8);
        total.saturating_sub(self.bits_read) < 8
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        let byte_index = self.bits_read / 8;
        let Some(byte) = self.buffer.get(byte_index) else {
            return Err(SerdeErr::UnexpectedEnd {
                bits_read: self.bits_read,
            });
        };
        let bit = (byte >> (self.bits_read % 8)) & 1 != 0;
        self.bits_read += 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let mut output: u8 = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }
}
