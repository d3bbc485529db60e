//! Platform services the handlers read from.

use chrono::{DateTime, Local};

/// Abstraction over the wall clock.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Render a timestamp the way the Italian locale prints date and time.
pub fn format_local(time: &DateTime<Local>) -> String {
    time.format("%d/%m/%Y, %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_formats_day_first() {
        let t = Local.with_ymd_and_hms(2024, 12, 10, 14, 30, 5).unwrap();
        assert_eq!(format_local(&FixedClock(t).now()), "10/12/2024, 14:30:05");
    }

    #[test]
    fn system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
