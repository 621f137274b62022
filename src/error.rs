use std::io;
use std::path::PathBuf;

/// Every way an extraction can fail.
///
/// The `Display` text is what the command line prints before exiting.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("File '{}' not found.", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An unexpected error occurred: {0}")]
    Io(#[from] io::Error),

    #[error(
        "Error decoding JSON from file, check if json format is good '{}': {source}",
        .path.display()
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Key error, Check if keys are correct: '{key}'")]
    MissingKey { key: String },

    #[error("Type error: expected {expected} at {location}")]
    TypeMismatch {
        expected: &'static str,
        location: String,
    },

    #[error(
        "Value error: Invalid IP address detected: {private_ip}{}",
        network_suffix(.network_ip)
    )]
    InvalidAddress {
        private_ip: String,
        network_ip: Option<String>,
    },
}

fn network_suffix(network_ip: &Option<String>) -> String {
    match network_ip {
        Some(ip) => format!(", {}", ip),
        None => String::new(),
    }
}

impl ExtractError {
    pub(crate) fn missing(key: &str) -> Self {
        ExtractError::MissingKey {
            key: key.to_owned(),
        }
    }

    pub(crate) fn mismatch(expected: &'static str, location: impl Into<String>) -> Self {
        ExtractError::TypeMismatch {
            expected,
            location: location.into(),
        }
    }

    /// Process exit status for this failure. Every category is fatal.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
