use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};

use crate::aliases::{self, Aliases};
use crate::config::Config;
use crate::error::{Error, ErrorCode, Result};
use crate::phases::KeyValue;
use crate::pipeline::Pipeline;

/// Tiny command line argument parser.
///
/// Built once from the command line, then drained by the `contains`/`get_*`
/// calls. `finish` checks that nothing is left over, after which only the
/// inspection methods may be used.
///
/// ```
/// # fn main() -> picoargs::Result<()> {
/// let mut pico = picoargs::PicoArgs::from_line("-v --file a.txt -f b.txt build")?;
/// let verbose = pico.contains(["-v", "--verbose"])?;
/// let files = pico.get_multiple_params(["-f", "--file"])?;
/// let command = pico.get_command()?;
/// pico.finish()?;
///
/// assert!(verbose);
/// assert_eq!(files, ["a.txt", "b.txt"]);
/// assert_eq!(command, "build");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PicoArgs {
  args: Vec<KeyValue>,
  finished: bool,
}

impl PicoArgs {
  /// Build from pre-split arguments, program name excluded
  pub fn new<I, S>(args: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::with_config(args, Config::default())
  }

  pub fn with_config<I, S>(args: I, config: Config) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let tokens = args.into_iter().map(Into::into).collect();
    let entries = Pipeline::new(config).build(tokens)?;
    Ok(Self::from_entries(entries))
  }

  /// Build from a single argument string, split with the Windows command line rules
  pub fn from_line(line: &str) -> Result<Self> {
    Self::from_line_with_config(line, Config::default())
  }

  pub fn from_line_with_config(line: &str, config: Config) -> Result<Self> {
    let entries = Pipeline::new(config).build_line(line)?;
    Ok(Self::from_entries(entries))
  }

  fn from_entries(args: Vec<KeyValue>) -> Self {
    Self {
      args,
      finished: false,
    }
  }

  /// Consume a switch, returning true if any of the aliases was present
  pub fn contains<'a, A: Aliases<'a>>(&mut self, aliases: A) -> Result<bool> {
    self.check_finished()?;
    let aliases = aliases::collect(aliases)?;

    let Some(index) = self.find(&aliases) else {
      return Ok(false);
    };
    if self.args[index].value.is_some() {
      return Err(Error::parse(
        ErrorCode::UnexpectedValue,
        format!("Unexpected value for \"{}\"", self.args[index]),
      ));
    }

    let switch = self.args.remove(index);
    trace!(switch = %switch.key, "consumed switch");
    Ok(true)
  }

  /// Consume a parameter and its value, eg `-f value`, `--file value` or `--file=value`.
  ///
  /// The entry after the switch is taken as the value even if it looks like a
  /// switch itself, so `--text --something` gives `--something`. An entry that
  /// was already split is rebuilt as `key=value`, without any quotes trimmed
  /// from the value, so `--text --ab="x y"` gives `--ab=x y`.
  pub fn get_param_opt<'a, A: Aliases<'a>>(&mut self, aliases: A) -> Result<Option<String>> {
    self.check_finished()?;
    let aliases = aliases::collect(aliases)?;
    self.take_param(&aliases)
  }

  /// Like `get_param_opt`, but the parameter is required
  pub fn get_param<'a, A: Aliases<'a>>(&mut self, aliases: A) -> Result<String> {
    self.check_finished()?;
    let aliases = aliases::collect(aliases)?;
    self.take_param(&aliases)?.ok_or_else(|| {
      Error::parse(
        ErrorCode::MissingRequiredParameter,
        format!("Expected value for \"{}\"", aliases.join(", ")),
      )
    })
  }

  /// Consume every occurrence of a parameter, in command line order.
  /// Returns an empty list if there are none
  pub fn get_multiple_params<'a, A: Aliases<'a>>(&mut self, aliases: A) -> Result<Vec<String>> {
    self.check_finished()?;
    let aliases = aliases::collect(aliases)?;
    let mut values = Vec::new();
    while let Some(value) = self.take_param(&aliases)? {
      values.push(value);
    }
    Ok(values)
  }

  /// Consume the first entry as a command. Fails if there is none, or if it is a switch
  pub fn get_command(&mut self) -> Result<String> {
    self.check_finished()?;
    match self.args.first() {
      None => Err(Error::parse(ErrorCode::MissingCommand, "Expected command")),
      Some(first) if is_switch(&first.key) => Err(Error::parse(
        ErrorCode::MissingCommand,
        format!("Expected command not \"{}\"", first.key),
      )),
      Some(_) => Ok(self.take_command()),
    }
  }

  /// Like `get_command`, but returns `None` instead of failing
  pub fn get_command_opt(&mut self) -> Result<Option<String>> {
    self.check_finished()?;
    match self.args.first() {
      Some(first) if !is_switch(&first.key) => Ok(Some(self.take_command())),
      _ => Ok(None),
    }
  }

  /// Fail if anything was left unconsumed. On success no further consumption is allowed
  pub fn finish(&mut self) -> Result<()> {
    if !self.args.is_empty() {
      debug!(leftover = self.args.len(), "unconsumed arguments");
      let leftovers: Vec<String> = self.args.iter().map(ToString::to_string).collect();
      return Err(Error::parse(
        ErrorCode::UnrecognisedParameters,
        format!("Unrecognised parameter(s): {}", leftovers.join(", ")),
      ));
    }
    self.finished = true;
    debug!("all arguments consumed");
    Ok(())
  }

  /// Stop consumption without failing. Returns true if nothing was left over
  pub fn finish_quietly(&mut self) -> bool {
    self.finished = true;
    debug!(leftover = self.args.len(), "finished without check");
    self.args.is_empty()
  }

  /// Run `body`, then the `finish` check, unless the body called `suppress_check`.
  ///
  /// The check runs however the body exits, including early returns through `?`.
  /// If both the body and the check fail, the body's error is returned.
  pub fn scoped<T, E, F>(&mut self, body: F) -> std::result::Result<T, E>
  where
    E: From<Error>,
    F: FnOnce(&mut Scope<'_>) -> std::result::Result<T, E>,
  {
    let mut scope = Scope {
      args: self,
      suppressed: false,
    };
    let outcome = body(&mut scope);
    if scope.suppressed {
      return outcome;
    }
    let check = scope.args.finish();
    let value = outcome?;
    check?;
    Ok(value)
  }

  pub fn unconsumed(&self) -> &[KeyValue] {
    &self.args
  }

  pub fn is_empty(&self) -> bool {
    self.args.is_empty()
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  fn check_finished(&self) -> Result<()> {
    if self.finished {
      return Err(Error::Finished);
    }
    Ok(())
  }

  fn find(&self, aliases: &[&str]) -> Option<usize> {
    self.args.iter().position(|arg| aliases.contains(&arg.key.as_str()))
  }

  fn take_param(&mut self, aliases: &[&str]) -> Result<Option<String>> {
    let Some(index) = self.find(aliases) else {
      return Ok(None);
    };

    // --key=value
    if self.args[index].value.is_some() {
      let param = self.args.remove(index);
      trace!(param = %param.key, "consumed inline parameter");
      return Ok(param.value);
    }

    if index + 1 == self.args.len() {
      return Err(Error::parse(
        ErrorCode::ExpectedValueAfterSwitch,
        format!("Expected value after \"{}\"", self.args[index]),
      ));
    }

    let value = self.args.remove(index + 1);
    let param = self.args.remove(index);
    trace!(param = %param.key, "consumed parameter");
    Ok(Some(value.to_string()))
  }

  // Any split value on a command is dropped
  fn take_command(&mut self) -> String {
    let command = self.args.remove(0);
    trace!(command = %command.key, "consumed command");
    command.key
  }
}

/// A bare `-` or `--` is an ordinary word, not a switch
fn is_switch(key: &str) -> bool {
  key.starts_with('-') && key != "-" && key != "--"
}

/// Handle given to a `PicoArgs::scoped` body
pub struct Scope<'p> {
  args: &'p mut PicoArgs,
  suppressed: bool,
}

impl Scope<'_> {
  /// Skip the completion check when the body returns
  pub fn suppress_check(&mut self) {
    self.suppressed = true;
  }
}

impl Deref for Scope<'_> {
  type Target = PicoArgs;

  fn deref(&self) -> &PicoArgs {
    &*self.args
  }
}

impl DerefMut for Scope<'_> {
  fn deref_mut(&mut self) -> &mut PicoArgs {
    &mut *self.args
  }
}
