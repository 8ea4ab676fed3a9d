pub mod clients;
pub mod core;
pub mod models;
pub mod saloneo_interface_app;
pub mod storage;
pub mod store;
pub mod templates;
pub mod theme;
