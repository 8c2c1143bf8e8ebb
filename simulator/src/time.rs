//! Units of simulated time.

pub const MINUTE: f64 = 60.0;
pub const HOUR: f64 = MINUTE * 60.0;
pub const DAY: f64 = HOUR * 24.0;
pub const WEEK: f64 = DAY * 7.0;

/// Elapsed seconds as `Day N hh:mm:ss`. Fractions of a second are dropped.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let day = DAY as u64;
    let hour = HOUR as u64;
    let minute = MINUTE as u64;
    format!(
        "Day {} {:02}:{:02}:{:02}",
        total / day,
        total % day / hour,
        total % hour / minute,
        total % minute
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(format_elapsed(0.0), "Day 0 00:00:00");
        assert_eq!(format_elapsed(3.0 * DAY + 4.0 * HOUR + 5.0 * MINUTE + 6.5), "Day 3 04:05:06");
        assert_eq!(format_elapsed(4.0 * WEEK), "Day 28 00:00:00");
    }
}
