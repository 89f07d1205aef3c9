pub mod device_link;
pub mod error;
pub mod linked_device_directory;
