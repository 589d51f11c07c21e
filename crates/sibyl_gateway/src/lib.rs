pub mod memory;
pub mod server;
pub mod types;

pub use server::GatewayServer;
