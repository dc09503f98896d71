/// Options fixed when the argument store is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Split `-key=value` tokens and expand bundled switches like `-abc`
  pub recognise_equals: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      recognise_equals: true,
    }
  }
}

impl Config {
  pub fn new(recognise_equals: bool) -> Self {
    Self { recognise_equals }
  }
}
