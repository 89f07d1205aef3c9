use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength};

pub trait SerdeIntegerConversion<const SIGNED: bool, const VARIABLE: bool, const BITS: u8>:
    Sized
{
    fn try_from_integer(value: &SerdeInteger<SIGNED, VARIABLE, BITS>) -> Result<Self, SerdeErr>;
}

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

// The generic wrapper delegates to a non-generic inner type to keep monomorphized code small.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    inner: SerdeIntegerInner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct SerdeIntegerInner {
    inner_value: i128,
    signed: bool,
    variable: bool,
    bits: u8,
}

impl SerdeIntegerInner {
    fn new(signed: bool, variable: bool, bits: u8, value: i128) -> Self {
        if bits == 0 {
            panic!("can't create an integer with 0 bits...");
        }
        if bits > 127 {
            panic!("can't create an integer with more than 127 bits...");
        }

        if !signed && value < 0 {
            panic!("can't encode a negative number with an Unsigned Integer!");
        }

        if !variable {
            let max_value: u128 = 2_u128.pow(bits as u32);
            if value.unsigned_abs() >= max_value {
                panic!(
                    "with {} bits, can't encode number with magnitude of {} or more",
                    bits, max_value
                );
            }
        }

        Self {
            inner_value: value,
            signed,
            variable,
            bits,
        }
    }

    fn new_unchecked(signed: bool, variable: bool, bits: u8, value: i128) -> Self {
        Self {
            inner_value: value,
            signed,
            variable,
            bits,
        }
    }

    fn get(&self) -> i128 {
        self.inner_value
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        if self.signed {
            writer.write_bit(self.inner_value < 0);
        }

        let mut value: u128 = self.inner_value.unsigned_abs();

        if self.variable {
            loop {
                let proceed = value >= 2_u128.pow(self.bits as u32);
                writer.write_bit(proceed);
                for _ in 0..self.bits {
                    writer.write_bit(value & 1 != 0);
                    value >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..self.bits {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader, signed: bool, variable: bool, bits: u8) -> Result<Self, SerdeErr> {
        let mut negative = false;
        if signed {
            negative = reader.read_bit()?;
        }

        let mut output: u128 = 0;
        let mut shift: u32 = 0;

        if variable {
            loop {
                let proceed = reader.read_bit()?;

                for _ in 0..bits {
                    if reader.read_bit()? {
                        if shift >= 127 {
                            return Err(SerdeErr::IntegerOverflow);
                        }
                        output |= 1u128 << shift;
                    }
                    shift += 1;
                }

                if !proceed {
                    break;
                }
            }
        } else {
            for _ in 0..bits {
                if reader.read_bit()? {
                    output |= 1u128 << shift;
                }
                shift += 1;
            }
        }

        let value = output as i128;
        if negative {
            Ok(Self::new_unchecked(signed, variable, bits, -value))
        } else {
            Ok(Self::new_unchecked(signed, variable, bits, value))
        }
    }

    fn bit_length(&self) -> u32 {
        let mut output: u32 = 0;

        if self.signed {
            output += 1; // sign bit
        }

        if self.variable {
            let mut value = self.inner_value.unsigned_abs();
            loop {
                let proceed = value >= 2_u128.pow(self.bits as u32);
                output += 1; // proceed bit
                output += self.bits as u32;
                value >>= self.bits;
                if !proceed {
                    break;
                }
            }
        } else {
            output += self.bits as u32;
        }
        output
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    pub fn new<T: Into<i128>>(value: T) -> Self {
        Self {
            inner: SerdeIntegerInner::new(SIGNED, VARIABLE, BITS, value.into()),
        }
    }

    pub fn get(&self) -> i128 {
        self.inner.get()
    }

    pub fn try_to<T: SerdeIntegerConversion<SIGNED, VARIABLE, BITS>>(&self) -> Result<T, SerdeErr> {
        T::try_from_integer(self)
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde
    for SerdeInteger<SIGNED, VARIABLE, BITS>
{
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = SerdeIntegerInner::de(reader, SIGNED, VARIABLE, BITS)?;
        Ok(Self { inner })
    }

    fn bit_length(&self) -> u32 {
        self.inner.bit_length()
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        let mut output: u32 = 0;
        if SIGNED {
            output += 1;
        }
        output + BITS as u32
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8, T: TryFrom<i128>>
    SerdeIntegerConversion<SIGNED, VARIABLE, BITS> for T
{
    fn try_from_integer(value: &SerdeInteger<SIGNED, VARIABLE, BITS>) -> Result<Self, SerdeErr> {
        T::try_from(value.get()).map_err(|_| SerdeErr::OutOfRange {
            value: value.get(),
            target: std::any::type_name::<T>(),
        })
    }
}

// Tests
