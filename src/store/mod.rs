mod busy;
mod service;

pub use service::{ImageCheckReport, InterfaceDependencies, InterfaceSettingsService};
