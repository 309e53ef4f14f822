/// Configuration management
use crate::error::{Result, SosError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".sos";
pub const CONTACTS_FILE_NAME: &str = "contacts.json";

/// Runtime configuration for the `sos` front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `contacts.json`
    pub data_dir: PathBuf,

    /// Whether the console dialer reports the outbound-call permission as granted
    pub call_permission: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            call_permission: true,
        }
    }
}

/// Global flags split off from the command words
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    pub config: Config,
    pub command: Vec<String>,
}

impl Config {
    /// Full path of the persisted contact document
    pub fn contacts_path(&self) -> PathBuf {
        self.data_dir.join(CONTACTS_FILE_NAME)
    }

    /// Parse global flags out of `args` (program name first).
    ///
    /// Anything that is not a global flag is kept, in order, as the command.
    pub fn from_args(args: &[String]) -> Result<ParsedArgs> {
        let mut data_dir: Option<PathBuf> = None;
        let mut call_permission = true;
        let mut command = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--data-dir" => {
                    let path = args.get(i + 1).ok_or_else(|| {
                        SosError::Config("--data-dir requires a path argument".to_string())
                    })?;
                    data_dir = Some(PathBuf::from(path));
                    i += 2;
                }
                "--no-call-permission" => {
                    call_permission = false;
                    i += 1;
                }
                other => {
                    command.push(other.to_string());
                    i += 1;
                }
            }
        }

        // Env overrides (nice for scripts)
        if data_dir.is_none() {
            if let Ok(dir) = std::env::var("SOS_DATA_DIR") {
                if !dir.trim().is_empty() {
                    data_dir = Some(PathBuf::from(dir));
                }
            }
        }
        if std::env::var("SOS_NO_CALL_PERMISSION").is_ok() {
            call_permission = false;
        }

        Ok(ParsedArgs {
            config: Config {
                data_dir: data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
                call_permission,
            },
            command,
        })
    }
}
