pub mod aliases;
pub mod args;
pub mod config;
pub mod error;
pub mod phases;
pub mod pipeline;

use crate::phases::TokenizePhase;

// Re-export the main types for convenience
pub use crate::aliases::Aliases;
pub use crate::args::{PicoArgs, Scope};
pub use crate::config::Config;
pub use crate::error::{Error, ErrorCode, Result};
pub use crate::phases::KeyValue;
pub use crate::pipeline::Pipeline;

/// Split an argument string into tokens, respecting quotes
pub fn split_line(line: &str) -> Vec<String> {
  TokenizePhase::new().tokenize(line)
}

/// Parse an argument string into the key/value entries a `PicoArgs` would start with
pub fn parse_line(line: &str, config: Config) -> Result<Vec<KeyValue>> {
  Pipeline::new(config).build_line(line)
}
