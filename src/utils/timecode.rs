//! Conversions between sample positions and wall-clock time.

use std::time::Duration;

/// Sample index reached after `elapsed` of playback at `sample_rate`
pub fn sample_at(elapsed: Duration, sample_rate: u32) -> usize {
    (elapsed.as_secs_f64() * f64::from(sample_rate)).floor() as usize
}

/// Playing time of `samples` at `sample_rate`
pub fn duration_of(samples: usize, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(samples as f64 / f64::from(sample_rate))
}

/// `hh:mm:ss.zzz` position of `sample`
pub fn format_timecode(sample: usize, sample_rate: u32) -> String {
    let millis = duration_of(sample, sample_rate).as_millis();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        millis / 3_600_000,
        (millis / 60_000) % 60,
        (millis / 1_000) % 60,
        millis % 1_000
    )
}
