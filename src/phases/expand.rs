use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, ErrorCode, Result};

// -abc or -abc=value
static BUNDLE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)^-([A-Za-z]{2,})(?:=(.*))?$").expect("static regex must compile"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
  /// A command-line word, still subject to `--key=value` splitting
  Word(String),
  /// The value split off a bundle like `-abc=value`, taken as-is
  Value(String),
}

#[derive(Default)]
pub struct ExpandPhase;

impl ExpandPhase {
  pub fn new() -> Self {
    Self
  }

  /// Expand bundled short switches in place: `-abc` becomes `-a -b -c`,
  /// and `-abc=value` becomes `-a -b -c value`
  pub fn expand(&self, tokens: Vec<String>) -> Result<Vec<Token>> {
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
      self.check_shape(&token)?;
      let bundle = BUNDLE_RE
        .captures(&token)
        .map(|caps| (caps[1].to_string(), caps.get(2).map(|m| m.as_str().to_string())));
      let Some((letters, value)) = bundle else {
        expanded.push(Token::Word(token));
        continue;
      };
      for letter in letters.chars() {
        expanded.push(Token::Word(format!("-{}", letter)));
      }
      if let Some(value) = value {
        if value.starts_with(['"', '\'']) || value.ends_with(['"', '\'']) {
          return Err(Error::parse(
            ErrorCode::InvalidParameter,
            format!("Quoted values are not supported for combined switches: \"{}\"", token),
          ));
        }
        expanded.push(Token::Value(value));
      }
    }
    Ok(expanded)
  }

  /// Reject `---name` and `--x`; the key part is everything before the first `=`
  fn check_shape(&self, token: &str) -> Result<()> {
    if !token.starts_with('-') {
      return Ok(());
    }
    let key = token.split_once('=').map_or(token, |(key, _)| key);
    if key.starts_with("---") || (key.starts_with("--") && key.chars().count() == 3) {
      return Err(Error::parse(
        ErrorCode::InvalidParameter,
        format!("Invalid parameter \"{}\"", token),
      ));
    }
    Ok(())
  }
}
