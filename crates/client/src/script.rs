//! Line-oriented command scripts.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! focus piece_1
//! interact piece_1
//! wait 4
//! code safe 18082
//! close
//! ```
use std::str::FromStr;

use anyhow::{Context, bail};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Aim at an entity, or at nothing.
    Focus(Option<String>),
    Interact(String),
    /// Enter a code into a container.
    Code { container: String, value: String },
    /// Close the oldest awaited panel.
    Close,
    /// Report the oldest awaited beat as finished.
    Skip,
    /// Run frames for this many seconds.
    Wait(f32),
    NewGame,
    Quit,
    Unload,
    Status,
}

impl FromStr for ScriptCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let mut arg = |what: &str| {
            words
                .next()
                .map(str::to_string)
                .with_context(|| format!("'{verb}' needs {what}"))
        };

        let command = match verb {
            "focus" => Self::Focus(arg("an entity").ok()),
            "interact" | "e" => Self::Interact(arg("an entity")?),
            "code" => Self::Code {
                container: arg("a container")?,
                value: arg("a code")?,
            },
            "close" => Self::Close,
            "skip" => Self::Skip,
            "wait" => {
                let secs = arg("a duration")?;
                let value: f32 = secs
                    .parse()
                    .with_context(|| format!("invalid duration '{secs}'"))?;
                if !value.is_finite() || value < 0.0 {
                    bail!("duration must be a finite number of seconds, got '{secs}'");
                }
                Self::Wait(value)
            }
            "newgame" => Self::NewGame,
            "quit" => Self::Quit,
            "unload" => Self::Unload,
            "status" => Self::Status,
            other => bail!("unknown command '{other}'"),
        };
        Ok(command)
    }
}

/// Parses one script line; `None` for blanks and comments.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_line("code safe 18082").unwrap(),
            Some(ScriptCommand::Code {
                container: "safe".into(),
                value: "18082".into()
            })
        );
        assert_eq!(
            parse_line("  e piece_1 ").unwrap(),
            Some(ScriptCommand::Interact("piece_1".into()))
        );
        assert_eq!(parse_line("focus").unwrap(), Some(ScriptCommand::Focus(None)));
        assert_eq!(parse_line("wait 2.5").unwrap(), Some(ScriptCommand::Wait(2.5)));
    }

    #[test]
    fn skips_blanks_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("# collect the pieces").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_line("interact").is_err());
        assert!(parse_line("wait soon").is_err());
        assert!(parse_line("wait inf").is_err());
        assert!(parse_line("wait NaN").is_err());
        assert!(parse_line("wait -1").is_err());
        assert!(parse_line("dance").is_err());
    }
}
