pub mod error;
pub mod storage_message;
