//! Timestamp formatting in the system time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Renders a timestamp as `DD/MM/YYYY HH:MM:SS TZ` in local time.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%d/%m/%Y %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_shape() {
        let ts = Timestamp::from_second(1_700_000_000).expect("timestamp");
        let text = LocalDateTime(&ts).to_string();
        let date = text.split(' ').next().expect("date part");
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('/').count(), 2);
    }
}
