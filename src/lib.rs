//! A HOCON-style, JSON-superset configuration parser.
//!
//! Documents are parsed into an ordered [`Value`] tree. Dotted keys expand
//! into nested objects, repeated keys deep-merge, `+=` appends, `include`
//! splices other files in, and `${path}` substitutions are resolved against
//! the finished document.
//!
//! ```
//! let config = hocon_cfg::parse_string(r#"
//! defaults { port = 80 }
//! server.host = "localhost"
//! server.port = ${defaults.port}
//! "#)?;
//!
//! let port: u16 = config.get("server.port")?;
//! assert_eq!(port, 80);
//! # Ok::<(), hocon_cfg::HoconError>(())
//! ```

use std::path::Path;

pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod utils;

pub use ast::{Map, Substitution, Value, ValueKind, merge_objects};
pub use config::Config;
pub use error::HoconError;

/// Parse a configuration held in memory.
pub fn parse_string(content: &str) -> Result<Config, HoconError> {
    Config::from_str(content)
}

/// Read a configuration file fully and parse it. Relative includes resolve
/// against the file's directory.
pub fn parse_resource<P: AsRef<Path>>(path: P) -> Result<Config, HoconError> {
    Config::from_file(path)
}
