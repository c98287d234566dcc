use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{TransportError, TransportErrorKind};

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub(crate) fn build_client(settings: &HttpSettings) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| TransportError::new(TransportErrorKind::Network, err.to_string()))
}

/// Resolves `method` against the service base URL.
pub(crate) fn endpoint(base_url: &str, method: &str) -> Result<reqwest::Url, TransportError> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), method);
    reqwest::Url::parse(&joined)
        .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))
}

/// POSTs an optional JSON body and decodes the JSON reply.
pub(crate) async fn post_json<B, T>(
    client: &reqwest::Client,
    url: reqwest::Url,
    body: Option<&B>,
) -> Result<T, TransportError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let mut request = client.post(url).header(ACCEPT, "application/json");
    if let Some(body) = body {
        let bytes = serde_json::to_vec(body)
            .map_err(|err| TransportError::new(TransportErrorKind::Encode, err.to_string()))?;
        request = request.header(CONTENT_TYPE, "application/json").body(bytes);
    }

    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::new(
            TransportErrorKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }

    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| TransportError::new(TransportErrorKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(TransportErrorKind::Decode, err.to_string());
    }
    TransportError::new(TransportErrorKind::Network, err.to_string())
}
