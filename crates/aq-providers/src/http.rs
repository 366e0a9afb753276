//! Shared request plumbing for provider adapters.

use aq_core::ProviderError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

const MAX_ERROR_BODY: usize = 512;

/// Send a request and return the status code with the raw body.
pub(crate) async fn fetch_text(request: RequestBuilder) -> Result<(u16, String), ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|err| ProviderError::Transport(err.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|err| ProviderError::Transport(err.to_string()))?;
    Ok((status, body))
}

/// Decode a successful JSON body, or turn a non-2xx status into an error.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ProviderError> {
    if !(200..300).contains(&status) {
        return Err(status_error(status, body));
    }
    serde_json::from_str(body).map_err(|err| ProviderError::Decode(err.to_string()))
}

pub(crate) fn status_error(status: u16, body: &str) -> ProviderError {
    let mut body = body.trim().to_string();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    ProviderError::Status { status, body }
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: f64,
    }

    #[test]
    fn decode_maps_status_and_body() {
        let err = decode::<Payload>(503, "  upstream busy ").unwrap_err();
        assert_eq!(
            err,
            ProviderError::Status {
                status: 503,
                body: "upstream busy".to_string()
            }
        );

        let ok: Payload = decode(200, r#"{"value": 1.5}"#).unwrap();
        assert_eq!(ok.value, 1.5);

        assert!(matches!(
            decode::<Payload>(200, "not json"),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "é".repeat(MAX_ERROR_BODY);
        match status_error(500, &body) {
            ProviderError::Status { body, .. } => assert!(body.len() <= MAX_ERROR_BODY),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("https://api.open-meteo.com/", "/v1/forecast"),
            "https://api.open-meteo.com/v1/forecast"
        );
    }
}
