//! Runs Corrosion scripts or an interactive session.
use clap::Parser;
use std::{fs, io, path::PathBuf, process::ExitCode};

mod cli;
mod session;

use session::Session;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not read script `{path}`: {source}")]
    ReadScript { path: PathBuf, source: io::Error },

    #[error("script contains {0} parse errors")]
    Parse(usize),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[cfg(feature = "tracing")]
    #[error("could not enable logging: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

fn main() -> ExitCode {
    let args = cli::Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Args) -> Result<(), Error> {
    #[cfg(feature = "tracing")]
    logging::enable(args.log_level.as_deref())?;

    let stdout = io::stdout().lock();
    let mut session = Session::new(stdout, args.print_ast);
    match args.file {
        Some(path) => {
            let src = fs::read_to_string(&path)
                .map_err(|source| Error::ReadScript { path, source })?;
            let errors = session.eval(&src)?;
            if errors > 0 {
                return Err(Error::Parse(errors));
            }
            Ok(())
        }
        None => {
            let stdin = io::stdin().lock();
            session.repl(stdin, &args.prompt)?;
            Ok(())
        }
    }
}

#[cfg(feature = "tracing")]
mod logging {
    use std::io;
    use tracing_subscriber::{
        EnvFilter, Registry,
        fmt::{self, time::UtcTime},
        prelude::*,
    };

    /// Enable logging to stderr.
    /// `level` takes precedence over `RUST_LOG`.
    pub fn enable(
        level: Option<&str>,
    ) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let filter = match level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::from_default_env(),
        };

        let console_logger = fmt::layer()
            .with_writer(io::stderr)
            .with_timer(UtcTime::rfc_3339());

        let subscriber = Registry::default().with(filter).with(console_logger);
        tracing::subscriber::set_global_default(subscriber)
    }
}
