mod active_rate_limit;
mod compression;
mod cors;
mod field_casing;
mod header_exposure;
mod latency;
mod method_usage;
mod passive_rate_limit;
mod payload_size;
mod security_headers;
mod stacktrace;
mod status_code;
mod versioning;

pub use active_rate_limit::{ActiveRateLimitRule, ProbeParams};
pub use compression::CompressionRule;
pub use cors::CorsRule;
pub use field_casing::FieldCasingRule;
pub use header_exposure::HeaderExposureRule;
pub use latency::LatencyRule;
pub use method_usage::MethodUsageRule;
pub use passive_rate_limit::PassiveRateLimitRule;
pub use payload_size::PayloadSizeRule;
pub use security_headers::SecurityHeadersRule;
pub use stacktrace::StacktraceRule;
pub use status_code::StatusCodeRule;
pub use versioning::VersioningRule;

use crate::config::Config;

use super::Rule;

/// Build the rule list for one endpoint scan: every passive rule in fixed
/// registration order, the active probe appended only when opted in, and
/// config-disabled rules removed. Order affects finding order only.
pub fn build_rules(config: &Config, target_url: &str) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(SecurityHeadersRule),
        Box::new(HeaderExposureRule),
        Box::new(CorsRule),
        Box::new(PassiveRateLimitRule),
        Box::new(StatusCodeRule),
        Box::new(MethodUsageRule),
        Box::new(VersioningRule),
        Box::new(FieldCasingRule),
        Box::new(CompressionRule),
        Box::new(PayloadSizeRule::new(config.rules.payload.max_bytes)),
        Box::new(LatencyRule::new(config.rules.latency.threshold())),
        Box::new(StacktraceRule),
    ];

    if config.probe.enabled {
        rules.push(Box::new(ActiveRateLimitRule::new(
            target_url,
            config.probe.params(),
        )));
    }

    rules.retain(|rule| !config.rules.disabled.contains(rule.name()));
    rules
}

/// Every rule the scanner knows, with default parameters, for `list-rules`.
/// Built through `build_rules` (probe forced on, nothing disabled) so the
/// listing cannot drift from what a scan registers.
pub fn catalog() -> Vec<Box<dyn Rule>> {
    let mut config = Config::default();
    config.probe.enabled = true;
    build_rules(&config, "")
}
