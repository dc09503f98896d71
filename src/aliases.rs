use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// -x (one character) or --name (two or more), no '=' and no extra leading dash
static OPTION_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?:-[^-=]|--[^-=][^=]+)$").expect("static regex must compile"));

/// Option names an argument can be matched by, eg `"-v"` or `["-v", "--verbose"]`
pub trait Aliases<'a> {
  type Iter: Iterator<Item = &'a str>;
  fn iter(self) -> Self::Iter;
}

impl<'a> Aliases<'a> for &'a str {
  type Iter = std::iter::Once<&'a str>;

  fn iter(self) -> Self::Iter {
    std::iter::once(self)
  }
}

impl<'a> Aliases<'a> for &'a [&'a str] {
  type Iter = std::iter::Copied<std::slice::Iter<'a, &'a str>>;

  fn iter(self) -> Self::Iter {
    <[&str]>::iter(self).copied()
  }
}

impl<'a> Aliases<'a> for &'a Vec<&'a str> {
  type Iter = std::iter::Copied<std::slice::Iter<'a, &'a str>>;

  fn iter(self) -> Self::Iter {
    self.as_slice().iter().copied()
  }
}

impl<'a, const N: usize> Aliases<'a> for [&'a str; N] {
  type Iter = std::array::IntoIter<&'a str, N>;

  fn iter(self) -> Self::Iter {
    self.into_iter()
  }
}

pub fn is_valid_option(alias: &str) -> bool {
  OPTION_RE.is_match(alias)
}

/// Collect and validate aliases. Fails on an empty set or any malformed name
pub(crate) fn collect<'a, A: Aliases<'a>>(aliases: A) -> Result<Vec<&'a str>> {
  let aliases: Vec<&str> = aliases.iter().collect();
  if aliases.is_empty() {
    return Err(Error::NoOptions);
  }
  if let Some(bad) = aliases.iter().find(|alias| !is_valid_option(alias)) {
    return Err(Error::InvalidOption(bad.to_string()));
  }
  Ok(aliases)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_options() {
    for alias in ["-v", "-?", "-h", "--verbose", "--dry-run", "--ok"] {
      assert!(is_valid_option(alias), "{}", alias);
    }
  }

  #[test]
  fn test_invalid_options() {
    for alias in ["something", "-something", "--x", "---something", "-", "--", "", "--a=b", "-="] {
      assert!(!is_valid_option(alias), "{}", alias);
    }
  }

  #[test]
  fn test_collect_accepts_all_shapes() {
    assert_eq!(collect("-v").unwrap(), vec!["-v"]);
    assert_eq!(collect(["-v", "--verbose"]).unwrap(), vec!["-v", "--verbose"]);
    let names = vec!["-f", "--file"];
    assert_eq!(collect(&names).unwrap(), vec!["-f", "--file"]);
    assert_eq!(collect(&names[..1]).unwrap(), vec!["-f"]);
  }

  #[test]
  fn test_collect_rejects_empty_set() {
    let none: [&str; 0] = [];
    assert_eq!(collect(none).unwrap_err(), Error::NoOptions);
  }

  #[test]
  fn test_collect_reports_first_bad_alias() {
    assert_eq!(
      collect(["-x", "--x", "---y"]).unwrap_err(),
      Error::InvalidOption("--x".to_string())
    );
  }
}
