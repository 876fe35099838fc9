/*
 * Safecall: Recovers from panics and turns them into ordinary errors.
 * Copyright (C) 2022-2023  Hee Shin
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

pub(crate) mod key;

use crate::error::{
    config_format_error, illegal_state_error, type_error, unknown_key_error, ErrorType,
};
use crate::logger::{LocalLogger, LogLevel};
use crate::plist::{Indicator, KeywordPlist, Value};
use crate::result::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The default application identifier shown in log lines.
static DEFAULT_APP_ID: &str = "SAFECALL";

/// The name of the directory under the platform configuration
/// directory holding the configuration file.
static CONFIG_DIR_NAME: &str = "safecall";

/// The name of the configuration file.
static CONFIG_FILE_NAME: &str = "safecall.cfg";

/// The process-wide configuration, set at most once.
static SETTINGS: OnceLock<Config> = OnceLock::new();

/// Represents the options controlling how safe calls capture and
/// report panics.
///
/// A configuration file is a keyword plist in S-expression notation.
/// Every key is optional.
///
/// ```text
/// (:app-id "MY-APP"
///  :capture-backtrace t
///  :log-faults t
///  :quiet-hook t)
/// ```
///
/// # Example
///
/// ```rust
/// use safecall::Config;
///
/// let config = Config::parse("(:app-id \"MY-APP\" :log-faults t)").unwrap();
/// assert_eq!(config.app_id(), "MY-APP");
/// assert!(config.log_faults());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    app_id: String,
    capture_backtrace: bool,
    log_faults: bool,
    quiet_hook: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app_id: DEFAULT_APP_ID.to_owned(),
            capture_backtrace: true,
            log_faults: false,
            quiet_hook: true,
        }
    }
}

impl Config {
    /// Creates a configuration holding the default options.
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a configuration from its S-expression text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an S-expression, if it is
    /// not a keyword plist, if a key is unknown, or if a value has
    /// the wrong type.
    pub fn parse(text: &str) -> Result<Self> {
        let plist = KeywordPlist::from_sexp(sexp::parse(text.trim())?)?;
        Self::from_map(plist.into_hash_map())
    }

    /// Loads a configuration from the file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or any of the
    /// errors of [`parse`](Config::parse).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(ErrorType::from)?;
        Self::parse(&text)
    }

    /// Loads the configuration from the default location, which is
    /// `safecall/safecall.cfg` under the platform's configuration
    /// directory.  Returns the default configuration if the platform
    /// has no such directory or the file does not exist.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                LocalLogger::new(DEFAULT_APP_ID).log(
                    LogLevel::Info,
                    &format!("Load config from path: {}", path.to_string_lossy()),
                );
                Self::from_path(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Returns the default location of the configuration file, if
    /// the platform has a configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        Some(path)
    }

    /// Sets the application identifier shown in log lines.
    #[must_use]
    pub fn with_app_id(mut self, app_id: &str) -> Self {
        self.app_id = app_id.to_owned();
        self
    }

    /// Sets whether a stack trace is always captured for a recovered
    /// panic.  When false, capturing follows the `RUST_BACKTRACE`
    /// and `RUST_LIB_BACKTRACE` environment variables.
    #[must_use]
    pub fn with_capture_backtrace(mut self, capture: bool) -> Self {
        self.capture_backtrace = capture;
        self
    }

    /// Sets whether every recovered panic is logged.
    #[must_use]
    pub fn with_log_faults(mut self, log: bool) -> Self {
        self.log_faults = log;
        self
    }

    /// Sets whether the previously installed panic hook is silenced
    /// for panics that a safe call recovers.
    #[must_use]
    pub fn with_quiet_hook(mut self, quiet: bool) -> Self {
        self.quiet_hook = quiet;
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn capture_backtrace(&self) -> bool {
        self.capture_backtrace
    }

    pub fn log_faults(&self) -> bool {
        self.log_faults
    }

    pub fn quiet_hook(&self) -> bool {
        self.quiet_hook
    }

    fn from_map(map: HashMap<Indicator, Value>) -> Result<Self> {
        let mut config = Self::default();
        for (indicator, value) in &map {
            let name = indicator.name();
            if name == key::APP_ID {
                config.app_id = value
                    .string()
                    .map_err(|_| mismatch("string", indicator, value))?
                    .to_owned();
            } else if name == key::CAPTURE_BACKTRACE {
                config.capture_backtrace = boolean(indicator, value)?;
            } else if name == key::LOG_FAULTS {
                config.log_faults = boolean(indicator, value)?;
            } else if name == key::QUIET_HOOK {
                config.quiet_hook = boolean(indicator, value)?;
            } else {
                return Err(unknown_key_error(name));
            }
        }
        if config.app_id.is_empty() {
            return Err(config_format_error("empty app id"));
        }
        Ok(config)
    }
}

fn boolean(indicator: &Indicator, value: &Value) -> Result<bool> {
    value
        .boolean()
        .map_err(|_| mismatch("boolean", indicator, value))
}

fn mismatch(expected: &str, indicator: &Indicator, value: &Value) -> crate::Error {
    type_error(&format!("{} for {}, found {}", expected, indicator, value))
}

/// Installs the process-wide configuration.
///
/// Safe calls made before `init`, or without it, use
/// [`Config::default`].  The configuration can be installed once per
/// process, and only before the first safe call.
///
/// # Errors
///
/// Returns an illegal state error if a configuration is already in
/// effect.
pub fn init(config: Config) -> Result<()> {
    SETTINGS
        .set(config)
        .map_err(|_| illegal_state_error("configuration already in effect"))
}

/// Returns the configuration in effect, fixing it to the default if
/// none was installed.
pub(crate) fn settings() -> &'static Config {
    SETTINGS.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_plist_is_the_default() {
        assert_eq!(Config::parse("()").unwrap(), Config::default());
    }

    #[test]
    fn every_key_is_read() {
        let config = Config::parse(
            "(:app-id \"MY-APP\" :capture-backtrace nil :log-faults t :quiet-hook nil)",
        )
        .unwrap();
        assert_eq!(
            config,
            Config::new()
                .with_app_id("MY-APP")
                .with_capture_backtrace(false)
                .with_log_faults(true)
                .with_quiet_hook(false)
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = Config::parse("(:log-fault t)").unwrap_err();
        assert_eq!(
            error.to_string(),
            "the key [LOG-FAULT] is unknown to the config"
        );
    }

    #[test]
    fn mistyped_values_are_rejected() {
        let error = Config::parse("(:log-faults 1)").unwrap_err();
        assert_eq!(
            error.to_string(),
            "type error (expected: boolean for :LOG-FAULTS, found 1)"
        );
        assert!(Config::parse("(:app-id :x)").is_err());
        assert!(Config::parse("(:app-id \"\")").is_err());
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(Config::parse("(:app-id").is_err());
        assert!(Config::parse("t").is_err());
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(:app-id \"FROM-FILE\")").unwrap();
        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.app_id(), "FROM-FILE");
    }

    #[test]
    fn missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let error = Config::from_path(dir.path().join("absent.cfg")).unwrap_err();
        let error = error.downcast::<ErrorType>().unwrap();
        assert!(matches!(*error, ErrorType::Io(_)));
    }

    #[test]
    fn default_path_ends_with_the_file_name() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("safecall/safecall.cfg"));
        }
    }
}
