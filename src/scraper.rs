use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use url::Url;

use crate::error::ScrapeError;

const RECORD_URL: &str = "https://public.hcad.org/records/QuickRecord.asp";
const SEARCH_PAGE: &str = "https://public.hcad.org/records/QuickSearch.asp";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// One client for the whole run. Headers are attached once at
/// construction; every record lookup reuses the same session.
pub struct HcadClient {
    client: Client,
    record_url: Url,
}

impl HcadClient {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
        );
        headers.insert(REFERER, HeaderValue::from_static(SEARCH_PAGE));
        headers.insert(ORIGIN, HeaderValue::from_static("https://public.hcad.org"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        HcadClient {
            client,
            record_url: Url::parse(RECORD_URL).expect("Invalid record URL"),
        }
    }

    /// Looks up one account for one tax year and returns the raw page.
    /// Network errors, timeouts and non-success statuses all surface as
    /// `Err`; the caller decides whether the run continues.
    pub fn fetch_record(&self, account: &str, tax_year: i32) -> Result<String, ScrapeError> {
        let form = [
            ("TaxYear", tax_year.to_string()),
            ("searchtype", "strap".to_string()),
            ("searchval", account.to_string()),
        ];

        let response = self
            .client
            .post(self.record_url.clone())
            .form(&form)
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

impl Default for HcadClient {
    fn default() -> Self {
        Self::new()
    }
}
