use log::warn;

pub struct TimeHelper {}

impl TimeHelper {
    /// # format seconds as `MM:SS.mmm`
    /// the time is rounded to whole milliseconds before it is split, so 59.9996 becomes
    /// `01:00.000` and never `00:59.1000`.
    pub fn format_time(seconds: f64) -> String {
        let (minutes, secs, millis) = TimeHelper::split_time(seconds);
        format!("{:02}:{:02}.{:03}", minutes, secs, millis)
    }

    /// # split seconds into minutes, seconds and milliseconds
    /// negative and non finite times are treated as 0
    pub fn split_time(seconds: f64) -> (u64, u64, u64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return (0, 0, 0);
        }

        let total_millis = (seconds * 1000.0).round() as u64;
        (
            total_millis / 60_000,
            (total_millis / 1000) % 60,
            total_millis % 1000,
        )
    }

    /// # combine the three time fields of a form into seconds
    pub fn time_from_parts(minutes: f64, seconds: f64, millis: f64) -> f64 {
        let time = minutes * 60.0 + seconds + millis / 1000.0;
        if time.is_finite() && time > 0.0 {
            time
        } else {
            0.0
        }
    }

    /// # read a number typed into a form
    /// anything that is not a finite, non negative number becomes 0
    pub fn coerce_f64(field: &str, value: &str) -> f64 {
        let value = value.trim();
        if value.is_empty() {
            return 0.0;
        }

        match value.parse::<f64>() {
            Ok(number) if number.is_finite() && number >= 0.0 => number,
            _ => {
                warn!(target: "helpers/time:coerce_f64", "invalid number for {}: {:?}, using 0", field, value);
                0.0
            }
        }
    }

    /// # read a penalty count
    /// a fraction is cut off, so `2.5` and `2.0` are both 2 penalties. Empty, negative and non
    /// numeric values are `None`.
    pub fn parse_penalty(value: &str) -> Option<u32> {
        let value = value.trim();
        value.parse::<u32>().ok().or_else(|| match value.parse::<f64>() {
            Ok(penalty) if penalty.is_finite() && penalty >= 0.0 && penalty <= u32::MAX as f64 => {
                Some(penalty.trunc() as u32)
            }
            _ => None,
        })
    }

    /// # read a penalty count typed into a form
    pub fn coerce_penalty(field: &str, value: &str) -> u32 {
        if value.trim().is_empty() {
            return 0;
        }

        TimeHelper::parse_penalty(value).unwrap_or_else(|| {
            warn!(target: "helpers/time:coerce_penalty", "invalid penalty for {}: {:?}, using 0", field, value);
            0
        })
    }
}
