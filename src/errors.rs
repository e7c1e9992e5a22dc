/// Error types for the sweeper
///
/// One enum covers the whole session: the pre-flight failures that abort
/// before any network contact (secret decoding, endpoint resolution), the
/// fatal discovery failures, and the per-account submission failures the
/// workflow catches and records.
use std::fmt;

#[derive(Debug)]
pub enum SweepError {
    /// The encoded secret could not be decoded into a keypair (fatal, pre-flight)
    InvalidSecret(String),
    /// An endpoint preset is missing its credential or URL (fatal, pre-flight)
    EndpointConfig(String),
    /// A discovery-time account query failed or returned a non-token account (fatal)
    Lookup(String),
    /// A transaction was rejected by the ledger (local to one account)
    Submission(String),
    /// The burn-selection input contained a non-integer token (recovered to empty)
    SelectionParse(String),
    /// An instruction builder was asked for something the snapshot cannot support
    InvalidAmount(String),
    /// Interactive input could not be read
    Prompt(String),
    /// HTTP transport failure
    Network(reqwest::Error),
    /// Malformed JSON in an RPC response
    Parse(String),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::InvalidSecret(msg) => write!(f, "Invalid Secret: {}", msg),
            SweepError::EndpointConfig(msg) => write!(f, "Endpoint Config Error: {}", msg),
            SweepError::Lookup(msg) => write!(f, "Lookup Error: {}", msg),
            SweepError::Submission(msg) => write!(f, "Submission Error: {}", msg),
            SweepError::SelectionParse(msg) => write!(f, "Selection Parse Error: {}", msg),
            SweepError::InvalidAmount(msg) => write!(f, "Invalid Amount: {}", msg),
            SweepError::Prompt(msg) => write!(f, "Prompt Error: {}", msg),
            SweepError::Network(err) => write!(f, "Network Error: {}", err),
            SweepError::Parse(msg) => write!(f, "Parse Error: {}", msg),
        }
    }
}

impl std::error::Error for SweepError {}

impl From<reqwest::Error> for SweepError {
    fn from(err: reqwest::Error) -> Self {
        SweepError::Network(err)
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::Parse(format!("JSON parsing error: {}", err))
    }
}
