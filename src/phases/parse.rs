use std::fmt;

use super::expand::Token;

/// A key and optional value, eg `--key=value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
  pub key: String,
  pub value: Option<String>,
}

impl KeyValue {
  pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
    Self {
      key: key.into(),
      value,
    }
  }

  pub fn key_only(key: impl Into<String>) -> Self {
    Self::new(key, None)
  }
}

impl fmt::Display for KeyValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.value {
      Some(value) => write!(f, "{}={}", self.key, value),
      None => write!(f, "{}", self.key),
    }
  }
}

pub struct ParsePhase {
  recognise_equals: bool,
}

impl ParsePhase {
  pub fn new(recognise_equals: bool) -> Self {
    Self { recognise_equals }
  }

  pub fn parse(&self, tokens: Vec<Token>) -> Vec<KeyValue> {
    tokens
      .into_iter()
      .map(|token| match token {
        Token::Word(word) => self.split(&word),
        Token::Value(value) => KeyValue::key_only(value),
      })
      .collect()
  }

  /// Split `-key=value` on the first `=`. Tokens without a leading dash are never split
  pub fn split(&self, token: &str) -> KeyValue {
    if !self.recognise_equals || !token.starts_with('-') {
      return KeyValue::key_only(token);
    }
    match token.split_once('=') {
      Some((key, value)) => KeyValue::new(key, Some(trim_quotes(value))),
      None => KeyValue::key_only(token),
    }
  }
}

/// Strip one matching pair of surrounding quotes, unescaping `\"` inside
fn trim_quotes(value: &str) -> String {
  let mut chars = value.chars();
  match (chars.next(), chars.next_back()) {
    (Some(first @ ('"' | '\'')), Some(last)) if first == last => chars.as_str().replace("\\\"", "\""),
    _ => value.to_string(),
  }
}
