//! Configuration loading from TOML files

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileAdmissionConfig, FileConfig, FileJudgeConfig, FileMonitorConfig, FilePanelConfig,
    FileProofConfig,
};
pub use loader::ConfigLoader;
