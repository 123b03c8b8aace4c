//! Command-line arguments

use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;

use moo_core::{Action, ConfigOverrides, WrapOption};

/// Binary name that turns every balloon into a thought
pub const COWTHINK: &str = "cowthink";

/// Configurable speaking cow
#[derive(Parser, Debug)]
#[command(name = "cowsay")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Message to show (read from stdin when empty)
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,

    /// Cow template name
    #[arg(short = 'f', long, value_name = "NAME")]
    pub cow: Option<String>,

    /// Face preset by id or name (b, dead, paranoia, ...)
    #[arg(short = 'm', long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Eyes, two characters
    #[arg(short = 'e', long, value_name = "EYES")]
    pub eyes: Option<String>,

    /// Tongue, two characters
    #[arg(short = 'T', long, value_name = "TONGUE")]
    pub tongue: Option<String>,

    /// Wrap column
    #[arg(short = 'W', long, value_name = "COLUMN", allow_hyphen_values = true)]
    pub wrap: Option<String>,

    /// Keep lines as written
    #[arg(short = 'n', long, conflicts_with = "wrap")]
    pub no_wrap: bool,

    /// Draw a thought balloon
    #[arg(long)]
    pub think: bool,

    /// List cow templates and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// List face presets and exit
    #[arg(long)]
    pub modes: bool,

    /// Print share links after the cow
    #[arg(long)]
    pub share: bool,

    /// Directory of extra `*.cow` templates
    #[arg(long, value_name = "DIR")]
    pub cow_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "MOO_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MOO_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Overrides for the loaded configuration
    ///
    /// `think` is set when the binary runs as `cowthink`.
    #[must_use]
    pub fn overrides(&self, think: bool) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref cow) = self.cow {
            overrides = overrides.with_cow(cow.clone());
        }
        if let Some(ref mode) = self.mode {
            overrides = overrides.with_mode(mode.clone());
        }
        if let Some(ref eyes) = self.eyes {
            overrides = overrides.with_eyes(eyes.clone());
        }
        if let Some(ref tongue) = self.tongue {
            overrides = overrides.with_tongue(tongue.clone());
        }
        if self.no_wrap {
            overrides = overrides.with_wrap(WrapOption::Disabled);
        } else if let Some(ref wrap) = self.wrap {
            overrides = overrides.with_wrap(WrapOption::Text(wrap.clone()));
        }
        if think || self.think {
            overrides = overrides.with_action(Action::Think);
        }
        if let Some(ref path) = self.cow_path {
            overrides = overrides.with_cows_path(path.clone());
        }
        overrides
    }

    /// The message from the arguments, or all of `input` when there are none
    ///
    /// Trailing line breaks of piped input are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` cannot be read as UTF-8.
    pub fn message(&self, mut input: impl Read) -> std::io::Result<String> {
        if !self.message.is_empty() {
            return Ok(self.message.join(" "));
        }

        let mut message = String::new();
        input.read_to_string(&mut message)?;
        let trimmed = message.trim_end_matches(['\n', '\r']).len();
        message.truncate(trimmed);
        Ok(message)
    }
}

/// Whether the program was started under the `cowthink` name
pub fn invoked_as_cowthink(argv0: Option<&OsStr>) -> bool {
    argv0
        .and_then(|arg| Path::new(arg).file_stem())
        .and_then(OsStr::to_str)
        .is_some_and(|stem| stem.ends_with(COWTHINK))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cowsay").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_message_words_are_joined() {
        let args = parse(&["hello", "there"]);
        assert_eq!(args.message(std::io::empty()).unwrap(), "hello there");
    }

    #[test]
    fn test_message_from_input() {
        let args = parse(&[]);
        let message = args.message("moo\nmoo\r\n\n".as_bytes()).unwrap();
        assert_eq!(message, "moo\nmoo");
    }

    #[test]
    fn test_face_flags() {
        let overrides = parse(&["-m", "dead", "-e", "^^", "-T", "U", "-f", "tux"]).overrides(false);
        assert_eq!(overrides.mode.as_deref(), Some("dead"));
        assert_eq!(overrides.eyes.as_deref(), Some("^^"));
        assert_eq!(overrides.tongue.as_deref(), Some("U"));
        assert_eq!(overrides.cow.as_deref(), Some("tux"));
        assert_eq!(overrides.action, None);
    }

    #[test]
    fn test_wrap_flags() {
        let overrides = parse(&["-W", "-3"]).overrides(false);
        assert_eq!(overrides.wrap, Some(WrapOption::Text("-3".to_string())));

        let overrides = parse(&["-n"]).overrides(false);
        assert_eq!(overrides.wrap, Some(WrapOption::Disabled));

        assert!(parse(&[]).overrides(false).is_empty());
    }

    #[test]
    fn test_wrap_conflicts_with_no_wrap() {
        let result = Args::try_parse_from(["cowsay", "-n", "-W", "20"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_think_sources() {
        assert_eq!(parse(&["--think"]).overrides(false).action, Some(Action::Think));
        assert_eq!(parse(&[]).overrides(true).action, Some(Action::Think));
    }

    #[test]
    fn test_cowthink_detection() {
        assert!(invoked_as_cowthink(Some(OsStr::new("cowthink"))));
        assert!(invoked_as_cowthink(Some(OsStr::new("/usr/local/bin/cowthink"))));
        assert!(invoked_as_cowthink(Some(OsStr::new("cowthink.exe"))));
        assert!(!invoked_as_cowthink(Some(OsStr::new("cowsay"))));
        assert!(!invoked_as_cowthink(None));
    }
}
