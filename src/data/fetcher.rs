//! Spreadsheet Fetcher Module
//! One blocking HTTP GET of the CSV export. Fetch failure is fatal for the
//! run; there is no retry.

use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("Server returned an empty body")]
    EmptyBody,
}

/// Downloads the spreadsheet CSV export.
pub struct SheetFetcher {
    client: reqwest::blocking::Client,
}

impl Default for SheetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetFetcher {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Fetch the raw CSV bytes from `url`.
    pub fn fetch_csv(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.client.get(url).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = resp.bytes()?;
        if bytes.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(bytes.to_vec())
    }
}
