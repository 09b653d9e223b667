//! Cache status command

use super::common::print_json;
use crate::{
    service::{CacheStatusReport, FantasyData},
    Result,
};

/// Handle the cache-status command
pub fn handle_cache_status(service: &FantasyData, as_json: bool) -> Result<()> {
    let report = service.cache_status();
    if as_json {
        return print_json(&report);
    }
    print!("{}", render_cache_status(&report));
    Ok(())
}

pub fn render_cache_status(report: &CacheStatusReport) -> String {
    let mut lines = vec!["Caches:".to_string()];
    for c in &report.caches {
        let age = match (c.newest_age_secs, c.remaining_secs) {
            (Some(age), Some(left)) => format!("newest {age}s old, {left}s left"),
            _ => "empty".to_string(),
        };
        lines.push(format!(
            "  {:<20} ttl {:>6}s  {}/{} valid  {}",
            c.name, c.ttl_secs, c.valid_entries, c.entries, age
        ));
    }
    lines.push("Rate limits:".to_string());
    for r in &report.rate_limits {
        lines.push(format!(
            "  {:<8} {}/{} used, {} left, resets in {}s, {} in flight",
            r.api,
            r.status.count,
            r.status.limit,
            r.status.remaining,
            r.status.reset_in_secs,
            r.status.in_flight
        ));
    }
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_fresh_service_reports_empty_caches() {
        let service = FantasyData::with_snapshot(&Settings::for_base_url("http://127.0.0.1:9"), None)
            .unwrap();
        let report = service.cache_status();
        assert!(report.caches.iter().all(|c| c.entries == 0));
        assert_eq!(report.rate_limits.len(), 2);

        let text = render_cache_status(&report);
        assert!(text.contains("players"));
        assert!(text.contains("empty"));
        assert!(text.contains("sleeper  0/1000 used"));
    }
}
