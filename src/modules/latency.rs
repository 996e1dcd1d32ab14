use axum::extract::State;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::info;

pub const PROCESS_TIME_HEADER: &str = "X-Process-Time-ms";

/// Process-wide request counters. Bumped on every request, authenticated or
/// not, successful or not; never reset while the process lives.
#[derive(Default)]
pub struct LatencyStats {
    inner: Mutex<Counters>,
}

#[derive(Default, Clone, Copy)]
struct Counters {
    count: u64,
    total_ms: f64,
}

impl LatencyStats {
    pub fn record(&self, elapsed_ms: f64) {
        let mut counters = self.inner.lock().expect("latency stats lock poisoned");
        counters.count += 1;
        counters.total_ms += elapsed_ms;
    }

    /// Mean processing time rounded to 2 decimals, 0 before any request.
    pub fn average_ms(&self) -> f64 {
        let counters = *self.inner.lock().expect("latency stats lock poisoned");
        if counters.count == 0 {
            return 0.0;
        }
        round2(counters.total_ms / counters.count as f64)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Wraps every route: times the inner handler on a monotonic clock, stamps
/// the elapsed milliseconds into the response, and feeds the running stats.
pub async fn track<B>(
    State(stats): State<Arc<LatencyStats>>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if let Ok(value) = HeaderValue::try_from(format!("{elapsed_ms:.2}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    stats.record(elapsed_ms);
    info!("Request {path} took {elapsed_ms:.2} ms");

    response
}
