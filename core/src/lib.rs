pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod templater;

pub use config::{GeneratorConfig, TraversalOrder};
pub use discovery::discover;
pub use error::{Result, UmbrellaError};
pub use generator::{GenerationReport, Generator, generate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
