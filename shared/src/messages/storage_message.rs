use spatial_storage_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

use crate::{CapacityLedger, DeviceLink, StoredStack, SyncIndex};

use super::error::MessageError;

/// Ledger counters as shown in the storage UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapacitySnapshot {
    pub max_types: usize,
    pub max_total_count: u64,
    pub type_count: usize,
    pub total_count: u64,
}

impl From<&CapacityLedger> for CapacitySnapshot {
    fn from(ledger: &CapacityLedger) -> Self {
        Self {
            max_types: ledger.max_types(),
            max_total_count: ledger.max_total_count(),
            type_count: ledger.type_count(),
            total_count: ledger.total_count(),
        }
    }
}

impl Serde for CapacitySnapshot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.max_types.ser(writer);
        self.max_total_count.ser(writer);
        self.type_count.ser(writer);
        self.total_count.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            max_types: usize::de(reader)?,
            max_total_count: u64::de(reader)?,
            type_count: usize::de(reader)?,
            total_count: u64::de(reader)?,
        })
    }
}

/// Full listing of a network's stacks, in the network's stable order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackUpdateMessage {
    pub sync_index: SyncIndex,
    pub capacity: CapacitySnapshot,
    pub stacks: Vec<StoredStack>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedMachinesUpdateMessage {
    pub sync_index: SyncIndex,
    pub devices: Vec<DeviceLink>,
}

/// Server to client push for an open storage container
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageMessage {
    StackUpdate(StackUpdateMessage),
    LinkedMachinesUpdate(LinkedMachinesUpdateMessage),
}

const STACK_UPDATE_KIND: u8 = 0;
const LINKED_MACHINES_UPDATE_KIND: u8 = 1;

impl StorageMessage {
    pub fn sync_index(&self) -> SyncIndex {
        match self {
            StorageMessage::StackUpdate(message) => message.sync_index,
            StorageMessage::LinkedMachinesUpdate(message) => message.sync_index,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        match self {
            StorageMessage::StackUpdate(message) => {
                STACK_UPDATE_KIND.ser(&mut writer);
                message.sync_index.ser(&mut writer);
                message.capacity.ser(&mut writer);
                message.stacks.ser(&mut writer);
            }
            StorageMessage::LinkedMachinesUpdate(message) => {
                LINKED_MACHINES_UPDATE_KIND.ser(&mut writer);
                message.sync_index.ser(&mut writer);
                message.devices.ser(&mut writer);
            }
        }
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageError> {
        let mut reader = BitReader::new(bytes);
        match u8::de(&mut reader)? {
            STACK_UPDATE_KIND => Ok(StorageMessage::StackUpdate(StackUpdateMessage {
                sync_index: SyncIndex::de(&mut reader)?,
                capacity: CapacitySnapshot::de(&mut reader)?,
                stacks: Vec::<StoredStack>::de(&mut reader)?,
            })),
            LINKED_MACHINES_UPDATE_KIND => Ok(StorageMessage::LinkedMachinesUpdate(
                LinkedMachinesUpdateMessage {
                    sync_index: SyncIndex::de(&mut reader)?,
                    devices: Vec::<DeviceLink>::de(&mut reader)?,
                },
            )),
            kind => Err(MessageError::UnknownKind { kind }),
        }
    }
}
