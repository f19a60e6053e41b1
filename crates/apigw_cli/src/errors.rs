use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the `apigw` command line tool.
///
/// Errors from the SDK are wrapped in [`Error::Client`]; everything else is
/// about local state such as the configuration file or the arguments given.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable credentials were found.
    ///
    /// Returned when neither the environment nor the configuration file
    /// provides both an access key and a secret key.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The configuration file could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A call to the API Gateway failed.
    #[error("API Gateway error: {0}")]
    Client(#[from] apigw_client::Error),

    /// Invalid command-line arguments were provided.
    ///
    /// Covers values clap cannot check by itself, such as an unknown
    /// output format.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to flush the standard output buffer.
    ///
    /// This error occurs when the CLI cannot write output to the terminal,
    /// typically due to broken pipes or terminal issues.
    #[error("Failed to flush the std out buffer.")]
    StdOutFlushFailed,
}
