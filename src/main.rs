use ansi_term::Colour;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use picoargs::{Config, PicoArgs};
use tracing_subscriber::{EnvFilter, fmt};

const DEMO_HELP: &str = "Usage: picoargs demo [options]

Options:
  -f, --file <filename>     File(s) to search (required)
  -e, --exclude <pattern>   Exclude pattern (default 'example-exclude')
  -r, --raw                 Raw output
  -h, --help, -?            Help information";

#[derive(Parser)]
#[command(name = "picoargs")]
#[command(version, about = "Split and inspect command lines", long_about = None)]
struct Cli {
  /// Disable coloured output
  #[arg(long, global = true)]
  no_color: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Split a command line into tokens, one per line
  Split {
    /// Argument string, without a program name
    line: String,
  },

  /// Show the key/value entries a command line starts with
  Inspect {
    /// Do not split --key=value or expand -abc
    #[arg(long)]
    no_equals: bool,

    /// Argument string, without a program name
    line: String,
  },

  /// Parse the given arguments with the demo option set
  Demo(DemoArgs),
}

#[derive(Parser)]
#[command(disable_help_flag = true)]
struct DemoArgs {
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  args: Vec<String>,
}

struct DemoOptions {
  raw: bool,
  files: Vec<String>,
  exclude: String,
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();
  let colors = !cli.no_color;

  match cli.command {
    Commands::Split { line } => {
      for (i, token) in picoargs::split_line(&line).iter().enumerate() {
        println!("{} {}", label(colors, &format!("[{}]", i)), token);
      }
    }
    Commands::Inspect { no_equals, line } => {
      let config = Config::new(!no_equals);
      let entries = picoargs::parse_line(&line, config).context("Failed to parse command line")?;
      for entry in entries {
        match entry.value {
          Some(value) => println!("{} = {}", label(colors, &entry.key), value),
          None => println!("{}", label(colors, &entry.key)),
        }
      }
    }
    Commands::Demo(demo) => run_demo(demo.args, colors)?,
  }

  Ok(())
}

fn run_demo(args: Vec<String>, colors: bool) -> Result<()> {
  let mut pico = PicoArgs::new(args).context("Failed to parse demo arguments")?;

  let options = pico.scoped(|pico| -> Result<Option<DemoOptions>> {
    // Help bails out before anything else is checked
    if pico.contains(["-h", "-?", "--help"])? {
      pico.suppress_check();
      return Ok(None);
    }

    let raw = pico.contains(["-r", "--raw"])?;
    let files = pico.get_multiple_params(["-f", "--file"])?;
    let exclude = pico
      .get_param_opt(["-e", "--exclude"])?
      .unwrap_or_else(|| "example-exclude".to_string());
    Ok(Some(DemoOptions { raw, files, exclude }))
  })?;

  let Some(options) = options else {
    println!("{}", DEMO_HELP);
    return Ok(());
  };

  if options.files.is_empty() {
    println!("{}", DEMO_HELP);
    println!("\nNo files specified");
    return Ok(());
  }

  println!("{} {}", label(colors, "raw:"), options.raw);
  println!("{} {}", label(colors, "files:"), options.files.join(", "));
  println!("{} {}", label(colors, "exclude:"), options.exclude);
  Ok(())
}

fn label(colors: bool, text: &str) -> String {
  if colors {
    Colour::White.bold().paint(text).to_string()
  } else {
    text.to_string()
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .init();
}
