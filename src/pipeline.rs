use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::phases::{ExpandPhase, KeyValue, ParsePhase, Token, TokenizePhase};

pub struct Pipeline {
  pub tokenize: TokenizePhase,
  pub expand: ExpandPhase,
  pub parse: ParsePhase,
  config: Config,
}

impl Default for Pipeline {
  fn default() -> Self {
    Self::new(Config::default())
  }
}

impl Pipeline {
  pub fn new(config: Config) -> Self {
    Self {
      tokenize: TokenizePhase::new(),
      expand: ExpandPhase::new(),
      parse: ParsePhase::new(config.recognise_equals),
      config,
    }
  }

  /// Build the initial entries from pre-split arguments
  pub fn build(&self, tokens: Vec<String>) -> Result<Vec<KeyValue>> {
    let token_count = tokens.len();

    // Phase 1: Expand bundled switches (only alongside equals splitting)
    let tokens = if self.config.recognise_equals {
      self.expand.expand(tokens)?
    } else {
      tokens.into_iter().map(Token::Word).collect()
    };

    // Phase 2: Split keys and values
    let entries = self.parse.parse(tokens);

    debug!(
      tokens = token_count,
      entries = entries.len(),
      recognise_equals = self.config.recognise_equals,
      "built argument store"
    );
    Ok(entries)
  }

  /// Build the initial entries from a single argument string
  pub fn build_line(&self, line: &str) -> Result<Vec<KeyValue>> {
    let tokens = self.tokenize.tokenize(line);
    self.build(tokens)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ErrorCode;

  #[test]
  fn test_build_line_splits_keys_and_values() {
    let pipeline = Pipeline::default();
    let entries = pipeline
      .build_line("--file=file1.txt --print something --verbose=yes")
      .unwrap();
    assert_eq!(
      entries,
      vec![
        KeyValue::new("--file", Some("file1.txt".to_string())),
        KeyValue::key_only("--print"),
        KeyValue::key_only("something"),
        KeyValue::new("--verbose", Some("yes".to_string())),
      ]
    );
  }

  #[test]
  fn test_build_line_and_build_agree() {
    let pipeline = Pipeline::default();
    let line = "-abc codename --file=\"a b\" x";
    let from_line = pipeline.build_line(line).unwrap();
    let from_tokens = pipeline
      .build(vec![
        "-abc".to_string(),
        "codename".to_string(),
        "--file=a b".to_string(),
        "x".to_string(),
      ])
      .unwrap();
    assert_eq!(from_line, from_tokens);
    assert_eq!(from_line.len(), 6);
  }

  #[test]
  fn test_disabled_equals_skips_expansion_and_validation() {
    let pipeline = Pipeline::new(Config::new(false));
    let entries = pipeline.build_line("-abc=codename ---odd --o").unwrap();
    assert_eq!(
      entries,
      vec![
        KeyValue::key_only("-abc=codename"),
        KeyValue::key_only("---odd"),
        KeyValue::key_only("--o"),
      ]
    );
  }

  #[test]
  fn test_invalid_shape_fails_build() {
    let err = Pipeline::default().build_line("-x --o").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidParameter));
  }

  #[test]
  fn test_empty_line() {
    assert!(Pipeline::default().build_line("").unwrap().is_empty());
  }
}
