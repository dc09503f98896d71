use thiserror::Error;

/// Kind of a parse or consumption failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
  /// `get_param` found no value for any of its aliases
  MissingRequiredParameter,
  /// A parameter switch was the last entry, so nothing follows it to act as the value
  ExpectedValueAfterSwitch,
  /// `get_command` found nothing, or found a switch
  MissingCommand,
  /// The completion check found entries nobody consumed
  UnrecognisedParameters,
  /// A bare switch carried an `=value`
  UnexpectedValue,
  /// A token had a malformed switch shape, e.g. `---x` or `--x`
  InvalidParameter,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("{message}")]
  Parse { code: ErrorCode, message: String },

  #[error("Must specify at least one option")]
  NoOptions,

  #[error("Invalid option name \"{0}\", expected -x or --name")]
  InvalidOption(String),

  #[error("Cannot use arguments after calling finish()")]
  Finished,
}

impl Error {
  pub(crate) fn parse(code: ErrorCode, message: impl Into<String>) -> Self {
    Error::Parse {
      code,
      message: message.into(),
    }
  }

  /// Sub-code of a parse error, `None` for usage errors
  pub fn code(&self) -> Option<ErrorCode> {
    match self {
      Error::Parse { code, .. } => Some(*code),
      _ => None,
    }
  }

  /// True when the caller misused the API rather than the command line being bad
  pub fn is_usage(&self) -> bool {
    !matches!(self, Error::Parse { .. })
  }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_error_exposes_code() {
    let err = Error::parse(ErrorCode::MissingCommand, "Expected command");
    assert_eq!(err.code(), Some(ErrorCode::MissingCommand));
    assert!(!err.is_usage());
    assert_eq!(err.to_string(), "Expected command");
  }

  #[test]
  fn test_usage_errors_have_no_code() {
    for err in [Error::NoOptions, Error::InvalidOption("-xy".to_string()), Error::Finished] {
      assert!(err.is_usage());
      assert_eq!(err.code(), None);
    }
    assert!(Error::InvalidOption("-xy".to_string()).to_string().contains("\"-xy\""));
  }
}
