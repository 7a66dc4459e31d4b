//! Configuration module
//!
//! Home directory resolution and user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
