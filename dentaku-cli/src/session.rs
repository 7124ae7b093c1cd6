//! Line-oriented driving of a [`Calculator`] from a terminal.
//!
//! Each input line is either a run of keys, fed one character at a time,
//! or a `:`-prefixed command:
//!
//! | Line | Effect |
//! |------|--------|
//! | `12+3=` | Feed the keys and print the display |
//! | `:state` | Print the engine state as TOML |
//! | `:log <filter>` | Change the log filter |
//! | `q`, `:quit` | Leave the session |

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use dentaku_core::Calculator;
use tracing::info;

use crate::logging;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Keys(&'a str),
    State,
    LogLevel(&'a str),
    Quit,
    Blank,
    Unknown(&'a str),
}

impl<'a> Line<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Blank,
            "q" | ":quit" | ":q" => Self::Quit,
            ":state" => Self::State,
            _ => match line.strip_prefix(':') {
                Some(rest) => match rest.split_once(char::is_whitespace) {
                    Some(("log", level)) => Self::LogLevel(level.trim()),
                    _ => Self::Unknown(line),
                },
                None => Self::Keys(line),
            },
        }
    }
}

/// Feeds `keys` and writes the display after each key (`trace`) or only once at the end.
pub fn run_keys<W: Write>(
    calc: &mut Calculator,
    keys: &str,
    trace: bool,
    mut output: W,
) -> Result<()> {
    if trace {
        let mut buf = [0u8; 4];
        for ch in keys.chars().filter(|c| !c.is_whitespace()) {
            let key = ch.encode_utf8(&mut buf);
            let display = calc.accept(key);
            writeln!(output, "{key:>2}  {display}")?;
        }
    } else {
        writeln!(output, "{}", calc.press_keys(keys))?;
    }
    Ok(())
}

/// Reads lines from `input` until EOF or a quit command.
///
/// Returns the number of key lines fed to the calculator.
pub fn run_repl<R, W>(
    calc: &mut Calculator,
    input: R,
    mut output: W,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut fed = 0;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        match Line::parse(&line) {
            Line::Blank => continue,
            Line::Quit => break,
            Line::Keys(keys) => {
                writeln!(output, "{}", calc.press_keys(keys))?;
                fed += 1;
            }
            Line::State => {
                let state =
                    toml::to_string(calc.state()).context("Failed to serialize engine state")?;
                write!(output, "{state}")?;
            }
            Line::LogLevel(level) => match logging::set_log_level(level) {
                Ok(()) => writeln!(output, "log filter set to '{level}'")?,
                Err(e) => writeln!(output, "error: {e}")?,
            },
            Line::Unknown(command) => writeln!(output, "error: unknown command '{command}'")?,
        }
        output.flush()?;
    }

    info!(lines = fed, "session ended");
    Ok(fed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn repl(input: &str) -> (String, usize) {
        let mut calc = Calculator::new();
        let mut out = Vec::new();
        let fed = run_repl(&mut calc, input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), fed)
    }

    // =========================================================================
    // Line::parse tests
    // =========================================================================

    #[test]
    fn parse_keys_and_commands() {
        assert_eq!(Line::parse("5+3="), Line::Keys("5+3="));
        assert_eq!(Line::parse("  -2 "), Line::Keys("-2"));
        assert_eq!(Line::parse(""), Line::Blank);
        assert_eq!(Line::parse("q"), Line::Quit);
        assert_eq!(Line::parse(":quit"), Line::Quit);
        assert_eq!(Line::parse(":state"), Line::State);
        assert_eq!(Line::parse(":log  debug"), Line::LogLevel("debug"));
        assert_eq!(Line::parse(":frobnicate"), Line::Unknown(":frobnicate"));
    }

    // =========================================================================
    // run_keys tests
    // =========================================================================

    #[test]
    fn run_keys_prints_final_display() {
        let mut calc = Calculator::new();
        let mut out = Vec::new();

        run_keys(&mut calc, "4*2+1=", false, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "9\n");
    }

    #[test]
    fn run_keys_trace_prints_every_step() {
        let mut calc = Calculator::new();
        let mut out = Vec::new();

        run_keys(&mut calc, "-5=", true, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), " -  0\n 5  -5\n =  -5\n");
    }

    // =========================================================================
    // run_repl tests
    // =========================================================================

    #[test]
    fn repl_keeps_state_across_lines() {
        let (out, fed) = repl("5+\n3\n=\n");

        assert_eq!(out, "5\n3\n8\n");
        assert_eq!(fed, 3);
    }

    #[test]
    fn repl_stops_at_quit() {
        let (out, fed) = repl("1\nq\n2\n");

        assert_eq!(out, "1\n");
        assert_eq!(fed, 1);
    }

    #[test]
    fn repl_prints_state() {
        let (out, _) = repl("12+\n:state\n");

        assert!(out.contains("accumulator = \"12\""));
        assert!(out.contains("pending_operator = \"Add\""));
    }

    #[test]
    fn repl_reports_log_level_before_init() {
        let (out, _) = repl(":log debug\n");

        assert_eq!(out, "error: logging not yet initialized\n");
    }

    #[test]
    fn repl_reports_unknown_command() {
        let (out, fed) = repl(":bogus\n");

        assert_eq!(out, "error: unknown command ':bogus'\n");
        assert_eq!(fed, 0);
    }

    #[test]
    fn repl_shows_error_marker() {
        let (out, _) = repl("9/0=\n7\n");

        assert_eq!(out, "Err\n7\n");
    }
}
