use std::collections::BTreeMap;

use spatial_storage_serde::{BitReader, BitWriter, Serde};

use crate::{
    CapacityLedger, CapacityTier, DeviceLink, GlobalPos, LinkedDeviceDirectory, StorageConfig,
    StorageNetwork, StoredStack,
};

use super::error::PersistError;

const SAVE_FORMAT_VERSION: u8 = 1;

impl StorageNetwork {
    /// Encodes contents, limits, stabilizers and linked devices for the
    /// controller's save data.
    pub fn write_save(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();

        SAVE_FORMAT_VERSION.ser(&mut writer);
        self.ledger().max_types().ser(&mut writer);
        self.ledger().max_total_count().ser(&mut writer);

        let modules: Vec<(CapacityTier, u32)> = self
            .installed_modules()
            .iter()
            .map(|(tier, count)| (*tier, *count))
            .collect();
        modules.ser(&mut writer);

        self.stacks().ser(&mut writer);
        self.list_devices().ser(&mut writer);

        writer.to_bytes()
    }

    /// Rebuilds a network from [`Self::write_save`] output. The saved
    /// limits are restored as they were, even if `config` has changed since.
    pub fn read_save(
        controller: GlobalPos,
        config: StorageConfig,
        bytes: &[u8],
    ) -> Result<Self, PersistError> {
        let mut reader = BitReader::new(bytes);

        let version = u8::de(&mut reader)?;
        if version != SAVE_FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: version,
                expected: SAVE_FORMAT_VERSION,
            });
        }

        let max_types = usize::de(&mut reader)?;
        let max_total_count = u64::de(&mut reader)?;

        let mut modules = BTreeMap::new();
        for (tier, count) in Vec::<(CapacityTier, u32)>::de(&mut reader)? {
            if count > 0 {
                modules.insert(tier, count);
            }
        }

        let mut contents = BTreeMap::new();
        let mut total_count: u64 = 0;
        for stack in Vec::<StoredStack>::de(&mut reader)? {
            if stack.is_empty() {
                return Err(PersistError::EmptyStack {
                    kind: stack.kind.to_string(),
                });
            }
            total_count = total_count
                .checked_add(stack.quantity)
                .ok_or(PersistError::CountOverflow)?;
            if contents.insert(stack.kind.clone(), stack.quantity).is_some() {
                return Err(PersistError::DuplicateKind {
                    kind: stack.kind.to_string(),
                });
            }
        }

        let mut devices = LinkedDeviceDirectory::new();
        for link in Vec::<DeviceLink>::de(&mut reader)? {
            let device = link.device();
            if !devices.restore(link) {
                return Err(PersistError::DuplicateDevice {
                    device: device.to_string(),
                });
            }
        }

        let ledger = CapacityLedger::restore(max_types, max_total_count, contents.len(), total_count);

        Ok(StorageNetwork::from_parts(
            controller, config, contents, ledger, devices, modules,
        ))
    }
}
