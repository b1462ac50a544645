// Infrastructure layer - External dependencies and adapters
pub mod assistant_client;
pub mod config;
pub mod evaluation_client;
pub mod fallback;
pub mod file_store;
pub mod intake_client;
