use std::fmt;

use spatial_storage_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{Direction, GlobalPos, ItemCatalog, ItemFilter, ItemKind};

// DeviceHandle
/// Identifies a bound machine by the position of its block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceHandle(GlobalPos);

impl DeviceHandle {
    pub fn new(pos: GlobalPos) -> Self {
        Self(pos)
    }

    pub fn pos(&self) -> GlobalPos {
        self.0
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serde for DeviceHandle {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(GlobalPos::de(reader)?))
    }
}

// DeviceBinding
/// Configuration supplied when a machine is bound with the book of calling.
/// The extraction face of a fresh binding is always unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceBinding {
    pub insertion_face: Option<Direction>,
    pub display_name: Option<String>,
    pub item_filter: Option<ItemFilter>,
}

// DeviceUpdate
/// Partial update applied by [`crate::LinkedDeviceDirectory::configure`].
/// `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceUpdate {
    pub insertion_face: Option<Option<Direction>>,
    pub extraction_face: Option<Option<Direction>>,
    pub display_name: Option<Option<String>>,
    pub item_filter: Option<Option<ItemFilter>>,
}

impl DeviceUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insertion_face(mut self, face: Option<Direction>) -> Self {
        self.insertion_face = Some(face);
        self
    }

    pub fn extraction_face(mut self, face: Option<Direction>) -> Self {
        self.extraction_face = Some(face);
        self
    }

    pub fn display_name(mut self, name: Option<String>) -> Self {
        self.display_name = Some(name);
        self
    }

    pub fn item_filter(mut self, filter: Option<ItemFilter>) -> Self {
        self.item_filter = Some(filter);
        self
    }
}

// DeviceLink
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceLink {
    device: DeviceHandle,
    insertion_face: Option<Direction>,
    extraction_face: Option<Direction>,
    display_name: Option<String>,
    item_filter: Option<ItemFilter>,
}

impl DeviceLink {
    pub(crate) fn from_binding(device: DeviceHandle, binding: DeviceBinding) -> Self {
        Self {
            device,
            insertion_face: binding.insertion_face,
            extraction_face: None,
            display_name: binding.display_name,
            item_filter: binding.item_filter,
        }
    }

    pub(crate) fn apply(&mut self, update: DeviceUpdate) {
        if let Some(face) = update.insertion_face {
            self.insertion_face = face;
        }
        if let Some(face) = update.extraction_face {
            self.extraction_face = face;
        }
        if let Some(name) = update.display_name {
            self.display_name = name;
        }
        if let Some(filter) = update.item_filter {
            self.item_filter = filter;
        }
    }

    pub fn device(&self) -> DeviceHandle {
        self.device
    }

    pub fn insertion_face(&self) -> Option<Direction> {
        self.insertion_face
    }

    pub fn extraction_face(&self) -> Option<Direction> {
        self.extraction_face
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn item_filter(&self) -> Option<&ItemFilter> {
        self.item_filter.as_ref()
    }

    /// Whether this machine may move the given item. Devices without a
    /// filter accept everything.
    pub fn accepts(&self, kind: &ItemKind, catalog: &dyn ItemCatalog) -> bool {
        match &self.item_filter {
            Some(filter) => filter.matches(kind, catalog),
            None => true,
        }
    }
}

impl Serde for DeviceLink {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.device.ser(writer);
        self.insertion_face.ser(writer);
        self.extraction_face.ser(writer);
        self.display_name.ser(writer);
        self.item_filter.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            device: DeviceHandle::de(reader)?,
            insertion_face: Option::<Direction>::de(reader)?,
            extraction_face: Option::<Direction>::de(reader)?,
            display_name: Option::<String>::de(reader)?,
            item_filter: Option::<ItemFilter>::de(reader)?,
        })
    }
}
