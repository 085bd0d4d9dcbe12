use std::path::PathBuf;

use gbtext_core::DisplayConfig;

pub const USAGE: &str = "\
Usage: fbchat [--fb PATH] [--font DIR] [--from ENCODING] [--user TEXT] [--assistant TEXT] [--debug]

Shows a two-pane chat on a 16 bpp Linux framebuffer. Without --user or
--assistant, lines are read from stdin and shown alternately in the user and
assistant panes.

  --fb PATH          framebuffer device (default /dev/fb0)
  --font DIR         directory with ascii_8x16 and gb2312_16x16 (default ./font)
  --from ENCODING    encoding of the text (default UTF-8)
  --user TEXT        text for the user pane
  --assistant TEXT   text for the assistant pane
  --debug            verbose logging";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub display: DisplayConfig,
    pub from_code: String,
    pub user: Option<String>,
    pub assistant: Option<String>,
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            from_code: String::from("UTF-8"),
            user: None,
            assistant: None,
            debug: false,
        }
    }
}

impl Options {
    /// No text was passed on the command line.
    pub fn reads_stdin(&self) -> bool {
        self.user.is_none() && self.assistant.is_none()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
}

/// Parses arguments, program name excluded.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        let mut value =
            |flag: &str| args.next().ok_or_else(|| format!("{flag} requires a value"));

        match arg.as_str() {
            "--fb" => options.display.device = PathBuf::from(value("--fb")?),
            "--font" => options.display.font_dir = PathBuf::from(value("--font")?),
            "--from" => options.from_code = value("--from")?,
            "--user" => options.user = Some(value("--user")?),
            "--assistant" => options.assistant = Some(value("--assistant")?),
            "--debug" => options.debug = true,
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(format!("unexpected argument {other:?}")),
        }
    }

    if options.from_code.trim().is_empty() {
        return Err("--from must name an encoding".to_string());
    }

    Ok(Command::Run(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_read_stdin_from_fb0() {
        let Command::Run(options) = parse(&[]).unwrap() else {
            panic!("expected run");
        };

        assert_eq!(options, Options::default());
        assert!(options.reads_stdin());
        assert_eq!(options.display.device, PathBuf::from("/dev/fb0"));
    }

    #[test]
    fn all_flags_are_applied() {
        let command = parse(&[
            "--fb",
            "/dev/fb1",
            "--font",
            "/usr/share/fonts/hzk",
            "--from",
            "GB2312",
            "--user",
            "hello",
            "--assistant",
            "hi there",
            "--debug",
        ])
        .unwrap();

        let Command::Run(options) = command else {
            panic!("expected run");
        };
        assert_eq!(options.display.device, PathBuf::from("/dev/fb1"));
        assert_eq!(options.display.font_dir, PathBuf::from("/usr/share/fonts/hzk"));
        assert_eq!(options.from_code, "GB2312");
        assert_eq!(options.user.as_deref(), Some("hello"));
        assert_eq!(options.assistant.as_deref(), Some("hi there"));
        assert!(options.debug);
        assert!(!options.reads_stdin());
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(&["--debug", "-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert_eq!(parse(&["--fb"]).unwrap_err(), "--fb requires a value");
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse(&["--colour", "red"]).is_err());
        assert!(parse(&["--from", " "]).is_err());
    }
}
