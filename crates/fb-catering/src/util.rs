/// The HTTP client used when the caller does not bring its own.
pub fn default_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().gzip(true).brotli(true).build()
}
