//! Core plumbing shared by every upstream accessor:
//! - `cache`: time-boxed in-memory caches, one per data class
//! - `http`: single GET-to-JSON exchange with typed status mapping
//! - `rate_limit`: admission control, request deduplication and retry

pub mod cache;
pub mod http;
pub mod rate_limit;

pub use cache::{CacheClassStatus, CacheDurations, TtlCache};
pub use http::{build_http_client, get_json, request_key};
pub use rate_limit::{RateLimitStatus, RateLimitedClient, RetryPolicy};
