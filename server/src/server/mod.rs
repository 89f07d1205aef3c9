mod server_config;
pub use server_config::ServerConfig;

mod storage_server;
pub use storage_server::StorageServer;
