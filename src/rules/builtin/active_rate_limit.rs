use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

const DEFAULT_REQUEST_COUNT: usize = 10;
const DEFAULT_PER_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Probe burst parameters. Zero values fall back to the defaults
/// (10 requests, 3s per-request timeout, no inter-dispatch delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeParams {
    pub request_count: usize,
    pub per_request_timeout: Duration,
    pub inter_dispatch_delay: Duration,
}

impl Default for ProbeParams {
    fn default() -> Self {
        Self {
            request_count: DEFAULT_REQUEST_COUNT,
            per_request_timeout: DEFAULT_PER_REQUEST_TIMEOUT,
            inter_dispatch_delay: Duration::ZERO,
        }
    }
}

impl ProbeParams {
    pub fn normalized(self) -> Self {
        Self {
            request_count: if self.request_count == 0 {
                DEFAULT_REQUEST_COUNT
            } else {
                self.request_count
            },
            per_request_timeout: if self.per_request_timeout.is_zero() {
                DEFAULT_PER_REQUEST_TIMEOUT
            } else {
                self.per_request_timeout
            },
            inter_dispatch_delay: self.inter_dispatch_delay,
        }
    }
}

/// Empirically tests whether the target enforces rate limiting by sending
/// a burst of real GET requests against it.
///
/// This is the only rule with a side effect beyond reading its input: it
/// generates live traffic against the target, and is therefore opt-in
/// (`[probe] enabled = true` or `--active`).
///
/// Each request runs on its own thread bounded by its own timeout;
/// successful status codes land in a mutex-guarded tally, transport
/// failures contribute nothing. The rule joins every thread before
/// evaluating, so wall-clock cost is bounded by the per-request timeout,
/// not by `request_count` times it.
pub struct ActiveRateLimitRule {
    url: String,
    params: ProbeParams,
}

impl ActiveRateLimitRule {
    pub fn new(url: impl Into<String>, params: ProbeParams) -> Self {
        Self {
            url: url.into(),
            params: params.normalized(),
        }
    }

    pub fn params(&self) -> ProbeParams {
        self.params
    }
}

impl Rule for ActiveRateLimitRule {
    fn name(&self) -> &'static str {
        "active-rate-limit"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[FindingCode::SecurityActiveRateLimitNotDetected]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let client = match reqwest::blocking::Client::builder()
            .timeout(self.params.per_request_timeout)
            .build()
        {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(%error, "probe client construction failed, skipping probe");
                return Vec::new();
            }
        };

        let tally: Mutex<HashMap<u16, u32>> = Mutex::new(HashMap::new());

        tracing::debug!(
            url = %self.url,
            requests = self.params.request_count,
            "dispatching rate-limit probe burst"
        );

        // Scope end is the unconditional join barrier: every dispatched
        // request completes or times out before evaluation.
        thread::scope(|scope| {
            for i in 0..self.params.request_count {
                let client = &client;
                let tally = &tally;
                let url = self.url.as_str();
                scope.spawn(move || match client.get(url).send() {
                    Ok(response) => {
                        if let Ok(mut tally) = tally.lock() {
                            *tally.entry(response.status().as_u16()).or_insert(0) += 1;
                        }
                    }
                    // Transport failures (timeout, DNS, reset) are dropped
                    // silently and never abort the barrier wait.
                    Err(_) => {}
                });
                if !self.params.inter_dispatch_delay.is_zero()
                    && i + 1 < self.params.request_count
                {
                    thread::sleep(self.params.inter_dispatch_delay);
                }
            }
        });

        let rate_limited = tally
            .lock()
            .map(|tally| tally.contains_key(&429))
            .unwrap_or(false);

        if rate_limited {
            Vec::new()
        } else {
            vec![Finding::new(
                FindingCode::SecurityActiveRateLimitNotDetected,
                snapshot.path(),
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned status per accepted connection, then exit.
    /// Joining the returned handle proves exactly `statuses.len()`
    /// requests were made.
    fn serve_canned(statuses: Vec<u16>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let handle = thread::spawn(move || {
            for status in statuses {
                let (mut stream, _) = listener.accept().expect("accept");
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let reason = if status == 429 { "Too Many Requests" } else { "OK" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (format!("http://{addr}/"), handle)
    }

    fn probe_snapshot() -> ResponseSnapshot {
        ResponseSnapshot::builder().path("/").build()
    }

    #[test]
    fn no_429_in_burst_emits_exactly_one_finding() {
        let (url, server) = serve_canned(vec![200; 10]);
        let rule = ActiveRateLimitRule::new(&url, ProbeParams::default());

        let findings = rule.run(&probe_snapshot());

        server.join().expect("server served all ten requests");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].code,
            FindingCode::SecurityActiveRateLimitNotDetected
        );
    }

    #[test]
    fn single_429_among_ten_means_rate_limiting_present() {
        let mut statuses = vec![200; 9];
        statuses.push(429);
        let (url, server) = serve_canned(statuses);
        let rule = ActiveRateLimitRule::new(&url, ProbeParams::default());

        let findings = rule.run(&probe_snapshot());

        server.join().expect("server served all ten requests");
        assert!(findings.is_empty());
    }

    #[test]
    fn zero_request_count_falls_back_to_ten() {
        let params = ProbeParams {
            request_count: 0,
            per_request_timeout: Duration::ZERO,
            inter_dispatch_delay: Duration::ZERO,
        }
        .normalized();
        assert_eq!(params.request_count, 10);
        assert_eq!(params.per_request_timeout, Duration::from_secs(3));

        // End to end: the rule issues ten requests, which is exactly what
        // the server below will serve before exiting.
        let (url, server) = serve_canned(vec![200; 10]);
        let rule = ActiveRateLimitRule::new(
            &url,
            ProbeParams {
                request_count: 0,
                per_request_timeout: Duration::ZERO,
                inter_dispatch_delay: Duration::ZERO,
            },
        );
        let findings = rule.run(&probe_snapshot());
        server.join().expect("server served all ten requests");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn transport_failures_are_dropped_silently() {
        // Nothing listens here; every probe fails, the tally stays empty,
        // and the rule still reaches its conclusion without erroring.
        let rule = ActiveRateLimitRule::new(
            "http://127.0.0.1:1/",
            ProbeParams {
                request_count: 3,
                per_request_timeout: Duration::from_millis(200),
                inter_dispatch_delay: Duration::ZERO,
            },
        );
        let findings = rule.run(&probe_snapshot());
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn inter_dispatch_delay_does_not_change_conclusion() {
        let mut statuses = vec![200; 2];
        statuses.push(429);
        let (url, server) = serve_canned(statuses);
        let rule = ActiveRateLimitRule::new(
            &url,
            ProbeParams {
                request_count: 3,
                per_request_timeout: Duration::from_secs(3),
                inter_dispatch_delay: Duration::from_millis(10),
            },
        );
        let findings = rule.run(&probe_snapshot());
        server.join().expect("server served all requests");
        assert!(findings.is_empty());
    }
}
