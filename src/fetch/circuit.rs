//! Circuit breaker around a [`Transport`]
//!
//! Stops sending requests once most of the recent ones have failed at the
//! transport level, then lets a few trial requests through after a cool-down.
//! - Closed: requests pass through and outcomes are counted per interval
//! - Open: requests are rejected immediately
//! - Half-Open: a limited number of trial requests decide whether to close

use crate::fetch::{Transport, TransportError, TransportResponse};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use url::Url;

/// Breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half-open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default number of trial requests allowed while half-open
pub const DEFAULT_HALF_OPEN_REQUESTS: u32 = 3;

/// Default interval after which closed-state counts are cleared
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Default time the breaker stays open before allowing trial requests
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default minimum number of requests before the breaker may trip
pub const DEFAULT_MIN_REQUESTS: u32 = 3;

/// Default failure ratio at or above which the breaker trips
pub const DEFAULT_FAILURE_RATIO: f64 = 0.6;

/// Breaker tuning
#[derive(Debug, Clone)]
pub struct CircuitBreakerSettings {
    /// Name used in log events
    pub name: String,
    /// Trial requests allowed while half-open; that many successes close it
    pub half_open_requests: u32,
    /// Closed-state counts are cleared after this long; zero keeps them
    pub interval: Duration,
    /// How long the breaker stays open
    pub open_timeout: Duration,
    /// Requests needed in the current interval before the ratio is consulted
    pub min_requests: u32,
    /// Failure ratio that trips the breaker
    pub failure_ratio: f64,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            name: "http-client".to_string(),
            half_open_requests: DEFAULT_HALF_OPEN_REQUESTS,
            interval: DEFAULT_INTERVAL,
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            min_requests: DEFAULT_MIN_REQUESTS,
            failure_ratio: DEFAULT_FAILURE_RATIO,
        }
    }
}

impl CircuitBreakerSettings {
    /// Sets how long the breaker stays open
    pub fn with_open_timeout(mut self, open_timeout: Duration) -> Self {
        self.open_timeout = open_timeout;
        self
    }

    fn ready_to_trip(&self, counts: &Counts) -> bool {
        counts.requests >= self.min_requests
            && f64::from(counts.total_failures) / f64::from(counts.requests) >= self.failure_ratio
    }
}

/// Request outcomes counted since the last state change or interval reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub requests: u32,
    pub total_successes: u32,
    pub total_failures: u32,
    pub consecutive_successes: u32,
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    counts: Counts,
    /// Bumped on every state change or count reset; outcomes from an older
    /// generation are ignored
    generation: u64,
    since: Instant,
}

impl BreakerState {
    fn new_generation(&mut self, now: Instant) {
        self.generation += 1;
        self.counts = Counts::default();
        self.since = now;
    }
}

/// Wraps a transport with a circuit breaker
///
/// Only transport errors count as failures; any HTTP status is a success,
/// since the server answered. Rejected requests fail with a
/// [`TransportError`] and never reach the inner transport.
#[derive(Debug)]
pub struct CircuitBreakerTransport<T: Transport> {
    inner: T,
    settings: CircuitBreakerSettings,
    state: Mutex<BreakerState>,
}

impl<T: Transport> CircuitBreakerTransport<T> {
    pub fn new(inner: T, settings: CircuitBreakerSettings) -> Self {
        Self {
            inner,
            settings,
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                counts: Counts::default(),
                generation: 0,
                since: Instant::now(),
            }),
        }
    }

    /// Current state, after applying any elapsed timeout or interval
    pub fn state(&self) -> CircuitState {
        let mut breaker = self.lock();
        self.refresh(&mut breaker, Instant::now());
        breaker.state
    }

    /// Counts of the current generation
    pub fn counts(&self) -> Counts {
        let mut breaker = self.lock();
        self.refresh(&mut breaker, Instant::now());
        breaker.counts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh(&self, breaker: &mut BreakerState, now: Instant) {
        let elapsed = now.duration_since(breaker.since);
        match breaker.state {
            CircuitState::Closed => {
                if !self.settings.interval.is_zero() && elapsed >= self.settings.interval {
                    breaker.new_generation(now);
                }
            }
            CircuitState::Open => {
                if elapsed >= self.settings.open_timeout {
                    self.set_state(breaker, CircuitState::HalfOpen, now);
                }
            }
            CircuitState::HalfOpen => {}
        }
    }

    fn set_state(&self, breaker: &mut BreakerState, to: CircuitState, now: Instant) {
        let from = breaker.state;
        if from == to {
            return;
        }
        breaker.state = to;
        breaker.new_generation(now);
        tracing::info!(
            name = %self.settings.name,
            from = %from,
            to = %to,
            "circuit breaker state changed"
        );
    }

    /// Admits a request, returning the generation it belongs to
    fn before_request(&self) -> Result<u64, TransportError> {
        let mut breaker = self.lock();
        self.refresh(&mut breaker, Instant::now());

        match breaker.state {
            CircuitState::Open => {
                return Err(TransportError::new(format!(
                    "circuit breaker '{}' is open",
                    self.settings.name
                )))
            }
            CircuitState::HalfOpen if breaker.counts.requests >= self.settings.half_open_requests => {
                return Err(TransportError::new(format!(
                    "circuit breaker '{}' is half-open and has no trial requests left",
                    self.settings.name
                )))
            }
            _ => {}
        }

        breaker.counts.requests += 1;
        Ok(breaker.generation)
    }

    fn after_request(&self, generation: u64, success: bool) {
        let now = Instant::now();
        let mut breaker = self.lock();
        self.refresh(&mut breaker, now);
        if breaker.generation != generation {
            return;
        }

        if success {
            breaker.counts.total_successes += 1;
            breaker.counts.consecutive_successes += 1;
            if breaker.state == CircuitState::HalfOpen
                && breaker.counts.consecutive_successes >= self.settings.half_open_requests
            {
                self.set_state(&mut breaker, CircuitState::Closed, now);
            }
        } else {
            breaker.counts.total_failures += 1;
            breaker.counts.consecutive_successes = 0;
            let trip = match breaker.state {
                CircuitState::Closed => self.settings.ready_to_trip(&breaker.counts),
                CircuitState::HalfOpen => true,
                CircuitState::Open => false,
            };
            if trip {
                self.set_state(&mut breaker, CircuitState::Open, now);
            }
        }
    }

    /// Releases the slot of a request that was dropped before it finished
    fn abandon(&self, generation: u64) {
        let mut breaker = self.lock();
        if breaker.generation == generation {
            breaker.counts.requests = breaker.counts.requests.saturating_sub(1);
        }
    }
}

/// An admitted request; releases its slot if dropped unsettled
struct Admission<'a, T: Transport> {
    breaker: &'a CircuitBreakerTransport<T>,
    generation: u64,
    settled: bool,
}

impl<T: Transport> Admission<'_, T> {
    fn settle(mut self, success: bool) {
        self.settled = true;
        self.breaker.after_request(self.generation, success);
    }
}

impl<T: Transport> Drop for Admission<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.abandon(self.generation);
        }
    }
}

impl<T: Transport> Transport for CircuitBreakerTransport<T> {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse, TransportError> {
        let generation = self.before_request().map_err(|error| {
            tracing::debug!(url = %url, "{}", error);
            error
        })?;
        let admission = Admission {
            breaker: self,
            generation,
            settled: false,
        };

        let result = self.inner.get(url, timeout).await;
        admission.settle(result.is_ok());

        if let Err(error) = &result {
            tracing::warn!(url = %url, error = %error, "request through circuit breaker failed");
        }
        result
    }
}
