pub mod expand;
pub mod parse;
pub mod tokenize;

pub use expand::{ExpandPhase, Token};
pub use parse::{KeyValue, ParsePhase};
pub use tokenize::TokenizePhase;
