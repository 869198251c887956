use std::ops;
use std::time::Duration;

use crate::timestamp::Timestamp;

/// A position in an audio buffer, counted in samples per channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioTime {
    pub sample_num: u64,
    pub sample_rate: u32,
}

impl AudioTime {
    pub fn from_samples(sample_num: u64, sample_rate: u32) -> AudioTime {
        AudioTime {
            sample_num,
            sample_rate,
        }
    }

    /// Rounds up, so that a timestamp never maps to a sample before it.
    /// Positions beyond `u64::MAX` samples saturate and stay past any buffer's end.
    pub fn from_timestamp(time: Timestamp, sample_rate: u32) -> AudioTime {
        let nanos = time.as_duration().as_nanos();
        let samples = (nanos * sample_rate as u128 + 999_999_999) / 1_000_000_000;
        AudioTime::from_samples(u64::try_from(samples).unwrap_or(u64::MAX), sample_rate)
    }

    pub fn as_duration(&self) -> Duration {
        let nanos = self.sample_num as u128 * 1_000_000_000 / self.sample_rate as u128;
        let secs = nanos / 1_000_000_000;
        let subsec_nanos = (nanos % 1_000_000_000) as u32;
        Duration::new(u64::try_from(secs).unwrap_or(u64::MAX), subsec_nanos)
    }

    pub fn as_timestamp(&self) -> Timestamp {
        Timestamp(self.as_duration())
    }
}

impl ops::Sub<AudioTime> for AudioTime {
    type Output = AudioTime;

    fn sub(self, rhs: AudioTime) -> AudioTime {
        assert_eq!(self.sample_rate, rhs.sample_rate);
        AudioTime::from_samples(self.sample_num - rhs.sample_num, self.sample_rate)
    }
}

impl PartialOrd for AudioTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.sample_rate != other.sample_rate {
            return None;
        }
        self.sample_num.partial_cmp(&other.sample_num)
    }
}
