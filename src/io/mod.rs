pub mod config;
pub mod vectors;

pub use config::{load_config, parse_config, ConfigLine};
pub use vectors::{load_vectors, parse_row, parse_vectors};
