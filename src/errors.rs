// Error types for pitwall

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum PitwallError {
    // Errors for the backend client
    #[snafu(display("Could not build HTTP client"))]
    HttpClientError { source: reqwest::Error },
    #[snafu(display("Request to {url} failed"))]
    RequestError { url: String, source: reqwest::Error },
    #[snafu(display("Request to {url} returned HTTP {status}"))]
    UnexpectedStatus { url: String, status: u16 },
    #[snafu(display("Could not decode response from {url}"))]
    DecodeError { url: String, source: reqwest::Error },

    // Errors while dispatching fetches
    #[snafu(display("Could not start background runtime"))]
    RuntimeError { source: io::Error },
    #[snafu(display("Fetch for {scope} ended without a result"))]
    FetchAborted { scope: String },

    // Errors from the desktop window
    #[snafu(display("Could not run the season browser window: {message}"))]
    GuiError { message: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
    #[snafu(display("No API settings configured for profile {profile}"))]
    MissingProfile { profile: String },
}
