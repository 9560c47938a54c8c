//! Per-client admission gate for the proxy service
//!
//! Fixed-window request counting keyed by client identity. State is held
//! in process memory only; losing it on restart is acceptable. The gate is
//! constructed once at service start and injected into the router, with the
//! clock behind a trait so tests can drive time deterministically.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default requests allowed per identity per window
pub const DEFAULT_CAP: u32 = 10;

/// Default counting window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Advisory message returned on rejection
pub const DENIAL_MESSAGE: &str =
    "Too many requests from this address. The limit resets every 24 hours, please try again later.";

/// Time source for the gate
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used in production
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outcome of one admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Granted,
    Denied { message: String },
}

struct WindowSlot {
    started: Instant,
    count: u32,
}

/// Process-wide request-rate gate
pub struct AdmissionGate {
    cap: u32,
    window: Duration,
    clock: Box<dyn Clock>,
    slots: Mutex<HashMap<String, WindowSlot>>,
}

impl AdmissionGate {
    /// Create a gate using the system clock
    pub fn new(cap: u32, window: Duration) -> Self {
        Self::with_clock(cap, window, Box::new(SystemClock))
    }

    /// Create a gate with an injected clock
    pub fn with_clock(cap: u32, window: Duration, clock: Box<dyn Clock>) -> Self {
        Self {
            cap,
            window,
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Check and count one request for the given client identity.
    ///
    /// The check and the increment happen under a single lock, so concurrent
    /// bursts from the same identity cannot undercount.
    pub fn admit(&self, key: &str) -> Admission {
        let now = self.clock.now();
        let mut slots = self.slots.lock();

        let slot = slots.entry(key.to_string()).or_insert(WindowSlot {
            started: now,
            count: 0,
        });

        if now.duration_since(slot.started) >= self.window {
            slot.started = now;
            slot.count = 0;
        }

        if slot.count >= self.cap {
            tracing::debug!(client = %key, count = slot.count, cap = self.cap, "admission denied");
            return Admission::Denied {
                message: DENIAL_MESSAGE.to_string(),
            };
        }

        slot.count += 1;
        Admission::Granted
    }

    /// Configured per-window cap
    pub fn cap(&self) -> u32 {
        self.cap
    }
}
