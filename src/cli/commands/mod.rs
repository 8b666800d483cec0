//! CLI command implementations.

mod chunk;
mod config;
mod generate;
mod search;

pub use chunk::run_chunk;
pub use config::run_config;
pub use generate::run_generate;
pub use search::run_search;
