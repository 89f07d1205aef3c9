use std::collections::BTreeMap;

use crate::{
    BitReader, BitWrite, ConstBitLength, Serde, SerdeErr, SignedVariableInteger,
    UnsignedVariableInteger,
};

// Unit

impl Serde for () {
    fn ser(&self, _: &mut dyn BitWrite) {}

    fn de(_: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(())
    }

    fn bit_length(&self) -> u32 {
        0
    }
}

// Booleans

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for bool {
    fn const_bit_length() -> u32 {
        1
    }
}

// Fixed-width integers

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for u8 {
    fn const_bit_length() -> u32 {
        8
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let low = reader.read_byte()?;
        let high = reader.read_byte()?;
        Ok(u16::from_le_bytes([low, high]))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for u16 {
    fn const_bit_length() -> u32 {
        16
    }
}

// Variable-width integers, small values dominate in practice

impl Serde for u32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(*self).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        UnsignedVariableInteger::<7>::de(reader)?.try_to()
    }
}

impl Serde for u64 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(*self).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        UnsignedVariableInteger::<7>::de(reader)?.try_to()
    }
}

impl Serde for usize {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(*self as u64).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        UnsignedVariableInteger::<7>::de(reader)?.try_to()
    }
}

impl Serde for i32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        SignedVariableInteger::<7>::new(*self).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        SignedVariableInteger::<7>::de(reader)?.try_to()
    }
}

// Strings

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.len().ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = usize::de(reader)?;
        let mut bytes = Vec::with_capacity(length.min(1024));
        for _ in 0..length {
            bytes.push(reader.read_byte()?);
        }
        String::from_utf8(bytes).map_err(|_| SerdeErr::InvalidUtf8)
    }
}

// Containers

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            Some(value) => {
                writer.write_bit(true);
                value.ser(writer);
            }
            None => {
                writer.write_bit(false);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if reader.read_bit()? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.len().ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = usize::de(reader)?;
        let mut output = Vec::with_capacity(length.min(1024));
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }
}

impl<K: Serde + Ord, V: Serde> Serde for BTreeMap<K, V> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.len().ser(writer);
        for (key, value) in self {
            key.ser(writer);
            value.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = usize::de(reader)?;
        let mut output = BTreeMap::new();
        for _ in 0..length {
            let key = K::de(reader)?;
            let value = V::de(reader)?;
            if output.insert(key, value).is_some() {
                return Err(SerdeErr::DuplicateKey);
            }
        }
        Ok(output)
    }
}

impl<A: Serde, B: Serde> Serde for (A, B) {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
        self.1.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok((A::de(reader)?, B::de(reader)?))
    }
}
