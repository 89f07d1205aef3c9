use std::collections::BTreeMap;

use log::{info, warn};

use super::{
    device_link::{DeviceBinding, DeviceHandle, DeviceLink, DeviceUpdate},
    error::DeviceError,
};

/// Machines and terminals bound to one storage network, ordered by handle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkedDeviceDirectory {
    links: BTreeMap<DeviceHandle, DeviceLink>,
}

impl LinkedDeviceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device, replacing any previous binding for the same
    /// handle. The extraction face of the new link is always unset.
    pub fn bind(&mut self, device: DeviceHandle, binding: DeviceBinding) -> Option<DeviceLink> {
        let previous = self
            .links
            .insert(device, DeviceLink::from_binding(device, binding));

        if previous.is_some() {
            info!("LinkedDeviceDirectory: rebound device at {}, extraction face reset", device);
        } else {
            info!("LinkedDeviceDirectory: bound device at {}", device);
        }

        previous
    }

    /// Removes a device. Does nothing if it is not bound.
    pub fn unbind(&mut self, device: &DeviceHandle) -> Option<DeviceLink> {
        let removed = self.links.remove(device);
        if removed.is_some() {
            info!("LinkedDeviceDirectory: unbound device at {}", device);
        }
        removed
    }

    pub fn configure(&mut self, device: &DeviceHandle, update: DeviceUpdate) -> Result<(), DeviceError> {
        let Some(link) = self.links.get_mut(device) else {
            warn!("LinkedDeviceDirectory: cannot configure unbound device at {}", device);
            return Err(DeviceError::NotBound {
                device: device.to_string(),
            });
        };
        link.apply(update);
        Ok(())
    }

    pub fn get(&self, device: &DeviceHandle) -> Option<&DeviceLink> {
        self.links.get(device)
    }

    pub fn contains(&self, device: &DeviceHandle) -> bool {
        self.links.contains_key(device)
    }

    pub fn list_devices(&self) -> Vec<DeviceLink> {
        self.links.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceLink> {
        self.links.values()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub(crate) fn restore(&mut self, link: DeviceLink) -> bool {
        self.links.insert(link.device(), link).is_none()
    }
}
