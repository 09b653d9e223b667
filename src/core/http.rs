//! HTTP exchange used by every upstream accessor.
//!
//! One call here is one network round trip: no retries and no rate limiting,
//! both of which belong to [`RateLimitedClient`](super::rate_limit::RateLimitedClient).

use crate::{FflError, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER},
    Client, StatusCode,
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const USER_AGENT: &str = concat!("ffl-lineup/", env!("CARGO_PKG_VERSION"));

/// Build the shared reqwest client with a per-attempt deadline.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Issue one GET and parse the body as JSON.
///
/// A 429 maps to [`FflError::RateLimitExceeded`] carrying the `Retry-After`
/// hint; any other non-2xx maps to [`FflError::UpstreamHttp`]; an unparsable
/// body maps to [`FflError::Json`].
pub async fn get_json(
    client: &Client,
    url: &str,
    query: &[(String, String)],
    extra_headers: Option<HeaderMap>,
) -> Result<Value> {
    let mut headers = extra_headers.unwrap_or_default();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let res = client.get(url).headers(headers).query(query).send().await?;
    let status = res.status();
    debug!(%url, status = status.as_u16(), "upstream response");

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = res.headers().get(RETRY_AFTER).and_then(parse_retry_after);
        return Err(FflError::RateLimitExceeded { retry_after });
    }
    if !status.is_success() {
        return Err(FflError::UpstreamHttp {
            status: status.as_u16(),
            url: res.url().to_string(),
        });
    }

    let body = res.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Parse a `Retry-After` header given in delta-seconds.
///
/// The HTTP-date form is not used by the upstreams and yields `None`.
pub fn parse_retry_after(value: &HeaderValue) -> Option<Duration> {
    value
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Render `key=value` pairs the way they appear on the wire, for dedup keys.
pub fn request_key(url: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let qs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{url}?{}", qs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client() -> Client {
        build_http_client(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let value = HeaderValue::from_static("7");
        assert_eq!(parse_retry_after(&value), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_parse_retry_after_http_date_is_ignored() {
        let value = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(&value), None);
    }

    #[test]
    fn test_request_key_includes_query() {
        let query = vec![
            ("season_type".to_string(), "regular".to_string()),
            ("position[]".to_string(), "QB".to_string()),
        ];
        assert_eq!(
            request_key("https://x.test/v1/p", &query),
            "https://x.test/v1/p?season_type=regular&position[]=QB"
        );
        assert_eq!(request_key("https://x.test/v1/p", &[]), "https://x.test/v1/p");
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/state/nfl"))
            .and(query_param("a", "b"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"week": 5})))
            .mount(&server)
            .await;

        let url = format!("{}/v1/state/nfl", server.uri());
        let query = vec![("a".to_string(), "b".to_string())];
        let value = get_json(&client(), &url, &query, None).await.unwrap();
        assert_eq!(value["week"], 5);
    }

    #[tokio::test]
    async fn test_get_json_maps_429_with_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2"))
            .mount(&server)
            .await;

        let err = get_json(&client(), &server.uri(), &[], None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FflError::RateLimitExceeded {
                retry_after: Some(Duration::from_secs(2))
            }
        );
    }

    #[tokio::test]
    async fn test_get_json_maps_other_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        match get_json(&client(), &server.uri(), &[], None).await {
            Err(FflError::UpstreamHttp { status, .. }) => assert_eq!(status, 404),
            other => panic!("Expected UpstreamHttp, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
            .mount(&server)
            .await;

        match get_json(&client(), &server.uri(), &[], None).await {
            Err(FflError::Json(_)) => (),
            other => panic!("Expected Json error, got {other:?}"),
        }
    }
}
