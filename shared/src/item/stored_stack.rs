use spatial_storage_serde::{BitReader, BitWrite, Serde, SerdeErr};

use super::item_kind::ItemKind;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoredStack {
    pub kind: ItemKind,
    pub quantity: u64,
}

impl StoredStack {
    pub fn new(kind: ItemKind, quantity: u64) -> Self {
        Self { kind, quantity }
    }

    pub fn empty(kind: ItemKind) -> Self {
        Self { kind, quantity: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

impl Serde for StoredStack {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.kind.ser(writer);
        self.quantity.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            kind: ItemKind::de(reader)?,
            quantity: u64::de(reader)?,
        })
    }
}
