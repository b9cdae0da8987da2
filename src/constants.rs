use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Process start time; `/health` reports uptime relative to this.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
