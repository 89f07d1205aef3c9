use std::{collections::BTreeMap, fmt};

use spatial_storage_serde::{BitReader, BitWrite, Serde, SerdeErr};

use super::catalog::ItemCatalog;

const DEFAULT_NAMESPACE: &str = "minecraft";

// ItemId
/// Namespaced base item type, e.g. `minecraft:iron_ingot`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Ids without a namespace are placed in the default one.
    pub fn new(id: &str) -> Self {
        if id.contains(':') {
            Self(id.to_string())
        } else {
            Self(format!("{}:{}", DEFAULT_NAMESPACE, id))
        }
    }

    /// The source mod of this item
    pub fn namespace(&self) -> &str {
        match self.0.split_once(':') {
            Some((namespace, _)) => namespace,
            None => DEFAULT_NAMESPACE,
        }
    }

    pub fn path(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, path)) => path,
            None => &self.0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serde for ItemId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self::new(&String::de(reader)?))
    }
}

// ItemData
/// Auxiliary data that distinguishes otherwise identical items
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemData {
    pub damage: u32,
    pub custom_name: Option<String>,
    /// Enchantments and any other custom tags
    pub tags: BTreeMap<String, String>,
}

impl ItemData {
    pub fn is_plain(&self) -> bool {
        self.damage == 0 && self.custom_name.is_none() && self.tags.is_empty()
    }
}

impl Serde for ItemData {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.damage.ser(writer);
        self.custom_name.ser(writer);
        self.tags.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            damage: u32::de(reader)?,
            custom_name: Option::<String>::de(reader)?,
            tags: BTreeMap::<String, String>::de(reader)?,
        })
    }
}

// ItemKind
/// Identity of a stored item. Two stacks merge iff their kinds are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKind {
    id: ItemId,
    data: ItemData,
}

impl ItemKind {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: ItemData::default(),
        }
    }

    pub fn with_data(id: impl Into<ItemId>, data: ItemData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn namespace(&self) -> &str {
        self.id.namespace()
    }

    /// Custom name if the item carries one, otherwise the catalog name
    pub fn display_name(&self, catalog: &dyn ItemCatalog) -> String {
        match &self.data.custom_name {
            Some(name) => name.clone(),
            None => catalog.display_name(&self.id),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_plain() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}{{damage: {}, tags: {}}}", self.id, self.data.damage, self.data.tags.len())
        }
    }
}

impl Serde for ItemKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.id.ser(writer);
        self.data.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            id: ItemId::de(reader)?,
            data: ItemData::de(reader)?,
        })
    }
}
