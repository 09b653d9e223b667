//! Primary platform access: typed accessors in front of the TTL caches and the
//! rate-limited client.

pub mod endpoints;
pub mod league;
pub mod projections;
pub mod types;

pub use endpoints::{Request, SleeperEndpoints};
pub use league::LeagueData;
pub use projections::ProjectionData;

use crate::{
    core::{get_json, request_key, RateLimitedClient, TtlCache},
    Result,
};
use serde_json::Value;
use std::{fmt::Debug, hash::Hash, sync::Arc};
use tracing::info;

/// Return the cached value for `key`, or fetch `request`, parse it and store
/// the parsed value before returning it.
pub(crate) async fn cache_or_fetch<K, V, P>(
    api: &SleeperApi,
    cache: &TtlCache<K, V>,
    key: K,
    request: Request,
    parse: P,
) -> Result<V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    P: FnOnce(Value) -> Result<V>,
{
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }
    let value = parse(api.fetch(request).await?)?;
    cache.put(key, value.clone());
    Ok(value)
}

/// Everything an accessor needs to issue a request: the shared client,
/// the reqwest handle and the endpoint builder.
#[derive(Clone)]
pub struct SleeperApi {
    client: RateLimitedClient,
    http: reqwest::Client,
    endpoints: Arc<SleeperEndpoints>,
}

impl SleeperApi {
    pub fn new(client: RateLimitedClient, http: reqwest::Client, endpoints: SleeperEndpoints) -> Self {
        Self {
            client,
            http,
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn endpoints(&self) -> &SleeperEndpoints {
        &self.endpoints
    }

    pub fn client(&self) -> &RateLimitedClient {
        &self.client
    }

    /// Issue `request` through the rate-limited client.
    pub async fn fetch(&self, request: Request) -> Result<Value> {
        let key = request_key(&request.url, &request.query);
        info!(key = %key, "fetching");
        let http = self.http.clone();
        let Request { url, query } = request;
        self.client
            .call(key, move || {
                let http = http.clone();
                let url = url.clone();
                let query = query.clone();
                async move { get_json(&http, &url, &query, None).await }
            })
            .await
    }
}
