//! Tracing setup for the binary.
//!
//! The form owns the terminal, so log output goes to a file or nowhere.
//! `STEPWISE_LOG` takes an `EnvFilter` directive and defaults to `info`.

use std::{
    fs::{self, File, OpenOptions},
    iter,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use stepwise_config::StepwiseConfig;

const FILTER_VAR: &str = "STEPWISE_LOG";
const FILE_NAME: &str = "stepwise.log";

/// An opened log file and where it lives.
#[derive(Debug)]
struct LogFile {
    path: PathBuf,
    file: File,
}

/// Result of looking for somewhere to write logs.
#[derive(Debug, Default)]
struct LogTarget {
    file: Option<LogFile>,
    /// One line per directory that could not be used.
    skipped: Vec<String>,
}

impl LogTarget {
    /// Use the first directory in which `stepwise.log` can be opened for
    /// appending, creating the directory when needed.
    fn first_writable(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut target = Self::default();
        for dir in dirs {
            let path = dir.join(FILE_NAME);
            match open_append(&dir, &path) {
                Ok(file) => {
                    target.file = Some(LogFile { path, file });
                    break;
                }
                Err(err) => target.skipped.push(format!("{}: {err}", path.display())),
            }
        }
        target
    }
}

fn open_append(dir: &Path, path: &Path) -> std::io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new().create(true).append(true).open(path)
}

/// `logs/` next to the config file, then `./.stepwise/logs`.
fn log_dirs() -> impl Iterator<Item = PathBuf> {
    StepwiseConfig::path()
        .and_then(|path| path.parent().map(|dir| dir.join("logs")))
        .into_iter()
        .chain(iter::once(PathBuf::from(".stepwise").join("logs")))
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub(crate) fn init() {
    let target = LogTarget::first_writable(log_dirs());
    let Some(LogFile { path, file }) = target.file else {
        tracing_subscriber::registry().with(filter()).init();
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter())
        .init();

    tracing::info!(path = %path.display(), "logging to file");
    for skipped in target.skipped {
        tracing::warn!("log location unusable: {skipped}");
    }
}
