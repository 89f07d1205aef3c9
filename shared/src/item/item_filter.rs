use spatial_storage_serde::{BitReader, BitWrite, Serde, SerdeErr};

use super::{catalog::ItemCatalog, item_kind::{ItemId, ItemKind}};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemFilterRule {
    /// Matches one base item, whatever its auxiliary data
    Item(ItemId),
    /// Matches every item of a source mod
    Namespace(String),
    /// Matches items carrying a catalog tag
    Tag(String),
}

impl ItemFilterRule {
    pub fn matches(&self, kind: &ItemKind, catalog: &dyn ItemCatalog) -> bool {
        match self {
            ItemFilterRule::Item(id) => kind.id() == id,
            ItemFilterRule::Namespace(namespace) => kind.namespace() == namespace,
            ItemFilterRule::Tag(tag) => catalog.has_tag(kind.id(), tag),
        }
    }
}

impl Serde for ItemFilterRule {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            ItemFilterRule::Item(id) => {
                0u8.ser(writer);
                id.ser(writer);
            }
            ItemFilterRule::Namespace(namespace) => {
                1u8.ser(writer);
                namespace.ser(writer);
            }
            ItemFilterRule::Tag(tag) => {
                2u8.ser(writer);
                tag.ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match u8::de(reader)? {
            0 => Ok(ItemFilterRule::Item(ItemId::de(reader)?)),
            1 => Ok(ItemFilterRule::Namespace(String::de(reader)?)),
            2 => Ok(ItemFilterRule::Tag(String::de(reader)?)),
            other => Err(SerdeErr::InvalidVariant {
                kind: "ItemFilterRule",
                value: other as u64,
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Only items matching a rule pass
    Allow,
    /// Items matching a rule are rejected
    Deny,
}

/// Per-device predicate deciding which items a linked machine may move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFilter {
    pub mode: FilterMode,
    pub rules: Vec<ItemFilterRule>,
}

impl ItemFilter {
    pub fn allow(rules: Vec<ItemFilterRule>) -> Self {
        Self {
            mode: FilterMode::Allow,
            rules,
        }
    }

    pub fn deny(rules: Vec<ItemFilterRule>) -> Self {
        Self {
            mode: FilterMode::Deny,
            rules,
        }
    }

    pub fn matches(&self, kind: &ItemKind, catalog: &dyn ItemCatalog) -> bool {
        let hit = self.rules.iter().any(|rule| rule.matches(kind, catalog));
        match self.mode {
            FilterMode::Allow => hit,
            FilterMode::Deny => !hit,
        }
    }
}

impl Serde for ItemFilter {
    fn ser(&self, writer: &mut dyn BitWrite) {
        (self.mode == FilterMode::Allow).ser(writer);
        self.rules.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mode = if bool::de(reader)? {
            FilterMode::Allow
        } else {
            FilterMode::Deny
        };
        Ok(Self {
            mode,
            rules: Vec::<ItemFilterRule>::de(reader)?,
        })
    }
}
