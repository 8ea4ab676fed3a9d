pub mod profile;
pub mod settings;
pub mod templates;
pub mod uploads;
