use std::fmt;
use std::ops;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

static TIMESTAMP: OnceLock<Regex> = OnceLock::new();

fn timestamp_regex() -> &'static Regex {
    TIMESTAMP.get_or_init(|| {
        Regex::new(r"^(?:(\d+):)?(\d+):(\d{1,2})(?:\.(\d{1,3}))?$").unwrap()
    })
}

/// A position in the source recording, as written in a tracklist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub Duration);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_millis(&self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidTimestamp(pub String);

impl fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid timestamp '{}'", self.0)
    }
}

impl std::error::Error for InvalidTimestamp {}

impl FromStr for Timestamp {
    type Err = InvalidTimestamp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimestamp(s.to_owned());
        let captures = timestamp_regex().captures(s).ok_or_else(invalid)?;
        let number = |index: usize| -> Result<u64, InvalidTimestamp> {
            captures
                .get(index)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
                .unwrap_or(Ok(0))
        };
        let has_hours = captures.get(1).is_some();
        let hours = number(1)?;
        let minutes = number(2)?;
        let seconds = number(3)?;
        if seconds >= 60 || (has_hours && minutes >= 60) {
            return Err(invalid());
        }
        // ".5" means half a second, not five milliseconds
        let millis = match captures.get(4) {
            Some(fraction) => {
                let digits = fraction.as_str();
                let value: u64 = digits.parse().map_err(|_| invalid())?;
                value * 10u64.pow(3 - digits.len() as u32)
            }
            None => 0,
        };
        let total_secs = hours
            .checked_mul(60)
            .and_then(|mins| mins.checked_add(minutes))
            .and_then(|mins| mins.checked_mul(60))
            .and_then(|secs| secs.checked_add(seconds))
            .ok_or_else(invalid)?;
        Duration::from_secs(total_secs)
            .checked_add(Duration::from_millis(millis))
            .map(Timestamp)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_millis = self.as_millis();
        let millis = total_millis % 1000;
        let total_secs = total_millis / 1000;
        let (hours, minutes, seconds) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
        if hours > 0 {
            write!(f, "{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        } else {
            write!(f, "{}:{:02}.{:03}", minutes, seconds, millis)
        }
    }
}

impl ops::Sub<Timestamp> for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(ts("0:00"), Timestamp::from_millis(0));
        assert_eq!(ts("03:12"), Timestamp::from_millis(192_000));
        assert_eq!(ts("75:10"), Timestamp::from_millis(4_510_000));
    }

    #[test]
    fn parses_hours_and_fractions() {
        assert_eq!(ts("1:33:20"), Timestamp::from_millis(5_600_000));
        assert_eq!(ts("0:01.5"), Timestamp::from_millis(1_500));
        assert_eq!(ts("0:01.05"), Timestamp::from_millis(1_050));
        assert_eq!(ts("0:01.005"), Timestamp::from_millis(1_005));
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for bad in ["", "12", "1:60", "1:61:00", "a:10", "1:2:3:4", "1:00.1234", "-1:00"] {
            assert!(bad.parse::<Timestamp>().is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn rejects_overflowing_timestamps() {
        let max_secs = u64::MAX.to_string();
        assert!(format!("{}:59", max_secs).parse::<Timestamp>().is_err());
        assert!(format!("{}:00:00", max_secs).parse::<Timestamp>().is_err());
        assert!(ts("4803839602528529:14") > ts("99:59:59"));
    }

    #[test]
    fn displays_short_and_long_form() {
        assert_eq!(Timestamp::from_millis(192_000).to_string(), "3:12.000");
        assert_eq!(Timestamp::from_millis(1_935_000).to_string(), "32:15.000");
        assert_eq!(Timestamp::from_millis(5_600_250).to_string(), "1:33:20.250");
    }

    #[test]
    fn subtraction_saturates() {
        assert_eq!(ts("1:00") - ts("2:00"), Timestamp::default());
        assert_eq!(ts("7:45") - ts("3:12"), ts("4:33"));
    }
}
