// Placeholder prepended to a bare argument string so its first real argument
// is not subject to the program-name rules. Dropped again after splitting.
const PROGRAM_NAME: &str = "echo";

#[derive(Default)]
pub struct TokenizePhase;

fn is_blank(c: char) -> bool {
  c == ' ' || c == '\t'
}

impl TokenizePhase {
  pub fn new() -> Self {
    Self
  }

  /// Split an argument string (no program name) into tokens
  pub fn tokenize(&self, line: &str) -> Vec<String> {
    self
      .command_line_to_argv(&format!("{} {}", PROGRAM_NAME, line))
      .into_iter()
      .skip(1)
      .collect()
  }

  /// Split a full command line, program name first, using the CommandLineToArgvW rules.
  ///
  /// # Rules
  ///
  /// - The program name runs to the next blank, or if it starts with `"` to the next `"`.
  ///   Backslashes in it are always literal.
  /// - Runs of space/tab separate arguments, outside quotes.
  /// - `2n` backslashes followed by `"` give `n` backslashes and the quote toggles quoting.
  /// - `2n + 1` backslashes followed by `"` give `n` backslashes and a literal `"`.
  /// - Backslashes not followed by `"` are literal.
  /// - Inside quotes, `""` gives a literal `"`.
  pub fn command_line_to_argv(&self, line: &str) -> Vec<String> {
    let mut argv = Vec::new();
    if line.trim().is_empty() {
      return argv;
    }

    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut current = String::new();
    let mut i = 0;

    // Program name
    if chars[0] == '"' {
      i += 1;
      while i < len && chars[i] != '"' {
        current.push(chars[i]);
        i += 1;
      }
      // Closing quote
      if i < len {
        i += 1;
      }
    } else {
      while i < len && !is_blank(chars[i]) {
        current.push(chars[i]);
        i += 1;
      }
    }
    argv.push(std::mem::take(&mut current));

    while i < len && is_blank(chars[i]) {
      i += 1;
    }

    let mut in_token = i < len;
    let mut quotes = 0u8;
    let mut backslashes = 0usize;

    while i < len {
      let c = chars[i];
      match c {
        ' ' | '\t' if quotes == 0 => {
          argv.push(std::mem::take(&mut current));
          backslashes = 0;
          while i < len && is_blank(chars[i]) {
            i += 1;
          }
          in_token = i < len;
        }
        '\\' => {
          current.push('\\');
          backslashes += 1;
          i += 1;
        }
        '"' => {
          // Backslashes are single bytes, so truncating by count is safe
          if backslashes % 2 == 0 {
            current.truncate(current.len() - backslashes / 2);
            quotes += 1;
          } else {
            current.truncate(current.len() - backslashes / 2 - 1);
            current.push('"');
          }
          backslashes = 0;
          i += 1;

          // The count already includes the opening quote, if any
          while i < len && chars[i] == '"' {
            quotes += 1;
            if quotes == 3 {
              current.push('"');
              quotes = 0;
            }
            i += 1;
          }
          if quotes == 2 {
            quotes = 0;
          }
        }
        _ => {
          current.push(c);
          backslashes = 0;
          i += 1;
        }
      }
    }

    if in_token {
      argv.push(current);
    }
    argv
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn split(line: &str) -> Vec<String> {
    TokenizePhase::new().tokenize(line)
  }

  #[test]
  fn test_split_on_whitespace_and_quotes() {
    assert_eq!(
      split("once upon a time \"in Hollywood\""),
      vec!["once", "upon", "a", "time", "in Hollywood"]
    );
  }

  #[test]
  fn test_whitespace_runs_and_tabs() {
    assert_eq!(split("  a \t b\t\tc  "), vec!["a", "b", "c"]);
  }

  #[test]
  fn test_empty_and_blank_input() {
    assert!(split("").is_empty());
    assert!(split("   \t ").is_empty());
    assert!(TokenizePhase::new().command_line_to_argv("").is_empty());
    assert!(TokenizePhase::new().command_line_to_argv("  ").is_empty());
  }

  #[test]
  fn test_leading_quoted_argument() {
    assert_eq!(split("\"hello world\" x"), vec!["hello world", "x"]);
  }

  #[test]
  fn test_quotes_inside_token_are_elided() {
    assert_eq!(split(r#"--file="item 4" d"e f"g"#), vec!["--file=item 4", "de fg"]);
  }

  #[test]
  fn test_backslashes_without_quote_are_literal() {
    assert_eq!(split(r"a\\b c\d"), vec![r"a\\b", r"c\d"]);
  }

  #[test]
  fn test_odd_backslashes_escape_quote() {
    assert_eq!(split(r#"a\"b c d"#), vec![r#"a"b"#, "c", "d"]);
    assert_eq!(split(r#"a\\\"b c d"#), vec![r#"a\"b"#, "c", "d"]);
  }

  #[test]
  fn test_even_backslashes_toggle_quote() {
    assert_eq!(split(r#"a\\\\"b c" d e"#), vec![r"a\\b c", "d", "e"]);
    assert_eq!(split(r#"a\\"b c" d"#), vec![r"a\b c", "d"]);
  }

  #[test]
  fn test_escaped_quotes_inside_quotes() {
    assert_eq!(split(r#""foo \"bar\" baz""#), vec![r#"foo "bar" baz"#]);
  }

  #[test]
  fn test_consecutive_quotes() {
    assert_eq!(split(r#""a""b""#), vec![r#"a"b"#]);
    assert_eq!(split(r#"x"""y"#), vec![r#"x"y"#]);
  }

  #[test]
  fn test_empty_quoted_argument() {
    assert_eq!(split(r#"a "" b"#), vec!["a", "", "b"]);
    assert_eq!(split(r#"a """#), vec!["a", ""]);
  }

  #[test]
  fn test_unterminated_quote_runs_to_end() {
    assert_eq!(split(r#"a "b c"#), vec!["a", "b c"]);
  }

  #[test]
  fn test_dashes_are_ordinary_tokens() {
    assert_eq!(split("- --hello --"), vec!["-", "--hello", "--"]);
  }

  #[test]
  fn test_single_quotes_are_not_special() {
    assert_eq!(split("--file='item 3'"), vec!["--file='item", "3'"]);
  }

  #[test]
  fn test_program_name_rules() {
    let tokenizer = TokenizePhase::new();
    assert_eq!(
      tokenizer.command_line_to_argv(r#""C:\Program Files\app.exe" -v"#),
      vec![r"C:\Program Files\app.exe", "-v"]
    );
    assert_eq!(
      tokenizer.command_line_to_argv(r#"C:\app\"x" y"#),
      vec![r#"C:\app\"x""#, "y"]
    );
    assert_eq!(tokenizer.command_line_to_argv("app"), vec!["app"]);
  }

  #[test]
  fn test_join_and_split_round_trip() {
    let cases: Vec<Vec<&str>> = vec![
      vec!["a"],
      vec!["--file", "file.txt", "-v"],
      vec!["-abc", "codename", "--x=y", "hello=world"],
      vec!["-", "--", "PRINT"],
    ];
    for tokens in cases {
      assert_eq!(split(&tokens.join(" ")), tokens);
    }
  }
}
