//! Runtime options
//!
//! Everything has a sensible default; a JSON file named by the
//! `DONT_DO_CONFIG` environment variable may override any subset of fields.
//! Options are validated after loading and rejected as a whole if any field
//! is out of bounds.

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::constants;

/// Environment variable naming the options file
pub const CONFIG_ENV: &str = "DONT_DO_CONFIG";
/// Environment variable naming the log file, overriding `log_file`
pub const LOG_ENV: &str = "DONT_DO_LOG";

type ValidationResult = garde::Result;

/// Validates that a duration falls within specified bounds
fn validate_duration<const MIN_MILLIS: u64, const MAX_MILLIS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if (MIN_MILLIS..=MAX_MILLIS).contains(&(val.as_millis() as u64)) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_MILLIS}ms,{MAX_MILLIS}ms]",
        )))
    }
}

fn validate_activation_duration(val: &Duration) -> ValidationResult {
    validate_duration::<
        { constants::activation::MIN_DURATION_MS },
        { constants::activation::MAX_DURATION_MS },
    >("activation_duration", val)
}

fn validate_notice_duration(val: &Duration) -> ValidationResult {
    validate_duration::<
        { constants::notice::MIN_DURATION_MS },
        { constants::notice::MAX_DURATION_MS },
    >("notice_duration", val)
}

/// Errors that can occur while loading options
#[derive(Error, Debug)]
pub enum Error {
    /// The options file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was tried
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The options file is not valid JSON for [`Options`]
    #[error("failed to parse options: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field is out of bounds
    #[error("invalid options: {0}")]
    Invalid(#[from] garde::Report),
}

/// Tunable behaviour of the game display
#[serde_with::serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// How long a key press keeps a block lit
    #[garde(custom(|v, _| validate_activation_duration(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    activation_duration: Duration,
    /// How long a notice stays on screen
    #[garde(custom(|v, _| validate_notice_duration(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    notice_duration: Duration,
    /// Counts above this value get a layout warning
    #[garde(range(
        min = constants::entry::MIN_LARGE_COUNT_THRESHOLD,
        max = constants::entry::MAX_LARGE_COUNT_THRESHOLD
    ))]
    large_count_threshold: usize,
    /// Title shown on both screens
    #[garde(length(min = 1, max = constants::presentation::MAX_TITLE_LENGTH))]
    title: String,
    /// Where to write logs; nothing is logged when unset
    #[garde(skip)]
    log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            activation_duration: Duration::from_millis(constants::activation::DURATION_MS),
            notice_duration: Duration::from_millis(constants::notice::DURATION_MS),
            large_count_threshold: constants::entry::LARGE_COUNT_THRESHOLD,
            title: constants::presentation::DEFAULT_TITLE.to_owned(),
            log_file: None,
        }
    }
}

impl Options {
    /// Parses and validates options from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed JSON or unknown fields and
    /// [`Error::Invalid`] when a value is out of bounds.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read, otherwise the
    /// errors of [`Options::from_json`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Builds options from the process environment
    ///
    /// Reads the file named by [`CONFIG_ENV`] if set, then applies the
    /// [`LOG_ENV`] override.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Options::load`].
    pub fn from_env() -> Result<Self, Error> {
        let mut options = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(log_file) = env::var_os(LOG_ENV) {
            options.log_file = Some(PathBuf::from(log_file));
        }
        Ok(options)
    }

    /// How long a key press keeps a block lit
    pub fn activation_duration(&self) -> Duration {
        self.activation_duration
    }

    /// How long a notice stays on screen
    pub fn notice_duration(&self) -> Duration {
        self.notice_duration
    }

    /// Counts above this value get a layout warning
    pub fn large_count_threshold(&self) -> usize {
        self.large_count_threshold
    }

    /// Title shown on both screens
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Where to write logs
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}
