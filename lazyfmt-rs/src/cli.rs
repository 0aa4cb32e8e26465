//! Command-line front end.
//!
//! Usage:
//!   lazyfmt [-f <spec>] [-s <sep>] [-n] [<value>...]
//!
//! Every value is coerced with [`Value::parse`] and written under the one
//! directive, separated by `<sep>`.

use std::io;

use clap::Parser;

use crate::lazy::formatted_with;
use crate::spec::FormatSpec;
use crate::value::Value;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lazyfmt", version, about = "Format values with a printf-style directive.", long_about = None)]
pub struct CliArgs {
    /// Directive applied to every value, e.g. `%08.3f`.
    #[arg(short = 'f', long = "format", env = "LAZYFMT_FORMAT", default_value = "%s")]
    pub format: FormatSpec,

    /// Text written between values.
    #[arg(short = 's', long = "separator", default_value = "")]
    pub separator: String,

    /// Do not write a trailing newline.
    #[arg(short = 'n', long = "no-newline")]
    pub no_newline: bool,

    /// Values to format.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse the process arguments.
pub fn parse_args() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}

/// Parse an explicit argument vector (`argv[0]` included).
pub fn parse_argv<I, T>(argv: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(argv)
}

// ── Running ───────────────────────────────────────────────────────────────────

pub fn run<W: io::Write + ?Sized>(args: &CliArgs, out: &mut W) -> io::Result<()> {
    for (i, raw) in args.values.iter().enumerate() {
        if i > 0 {
            out.write_all(args.separator.as_bytes())?;
        }
        formatted_with(args.format, (Value::parse(raw),)).write_io(out)?;
    }
    if !args.no_newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
