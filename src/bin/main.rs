use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use fb565::FbDevice;
use gbtext_core::{ChatLayout, ChatScreen, Display, InitError, RenderError};
use log::{error, info, warn};
use thiserror::Error;

use args::{Command, Options, USAGE, parse_args};

#[path = "main/args.rs"]
mod args;

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("fbchat: {}\n\n{USAGE}", AppError::Usage(err));
            return ExitCode::from(2);
        }
    };

    let default_filter = if options.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("fbchat: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), AppError> {
    let mut display = Display::<FbDevice>::open(&options.display)?;
    let mut screen = ChatScreen::new(&display, &ChatLayout::default());
    info!(
        "assistant pane {:?}, user pane {:?}",
        screen.assistant.area(),
        screen.user.area()
    );

    if !options.reads_stdin() {
        if let Some(text) = &options.user {
            screen.show_user(&mut display, &options.from_code, text.as_bytes())?;
        }
        if let Some(text) = &options.assistant {
            screen.show_assistant(&mut display, &options.from_code, text.as_bytes())?;
        }
        return Ok(());
    }

    // Alternate user / assistant, one line each.
    let stdin = io::stdin().lock();
    for (index, line) in stdin.split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let shown = if index % 2 == 0 {
            screen.show_user(&mut display, &options.from_code, &line)
        } else {
            screen.show_assistant(&mut display, &options.from_code, &line)
        };

        match shown {
            Ok(stats) if stats.missing > 0 || stats.skipped > 0 => {
                warn!("line {}: {stats:?}", index + 1)
            }
            Ok(_) => {}
            // A line in the wrong encoding should not end the session.
            Err(RenderError::Encoding(err)) => warn!("line {}: {err}", index + 1),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
