// Infrastructure: dataset files and run configuration

pub mod binary_format;
pub mod config;

pub use binary_format::{decode, read_instance, BinaryExporter, DecodeError, ExportError};
pub use config::{BatchConfig, ConfigError, RunConfig};
