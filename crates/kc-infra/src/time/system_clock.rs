use chrono::Utc;
use kc_core::ports::ClockPort;

/// Wall clock used to date signed requests.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
