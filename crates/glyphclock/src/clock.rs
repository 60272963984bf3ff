//! Reading the wall clock into display values.

use chrono::Timelike;
use glyphclock_core::TimeFormat;
use glyphclock_fonts::ClockDigits;

/// One reading of the clock, ready for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// Values for the block-letter display.
    pub digits: ClockDigits,
    /// Plain `HH:MM:SS` or `HH:MM:SS:mmm` text handed to the effects.
    pub text: String,
    /// Second of the minute.
    pub second: u32,
}

impl ClockReading {
    pub fn new<T: Timelike>(time: &T, format: TimeFormat, show_millis: bool) -> Self {
        let (hours, is_pm) = match format {
            TimeFormat::TwentyFourHour => (time.hour(), false),
            TimeFormat::TwelveHour => {
                let (pm, h) = time.hour12();
                (h, pm)
            }
        };
        let minutes = time.minute();
        let seconds = time.second();
        // leap seconds report more than 1e9 nanoseconds
        let millis = show_millis.then(|| (time.nanosecond() / 1_000_000).min(999));

        let mut text = format!("{hours:02}:{minutes:02}:{seconds:02}");
        if let Some(ms) = millis {
            text.push_str(&format!(":{ms:03}"));
        }

        Self {
            digits: ClockDigits {
                hours,
                minutes,
                seconds,
                millis,
                is_pm,
            },
            text,
            second: seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32, s: u32, ms: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap()
    }

    #[test]
    fn test_twenty_four_hour_text() {
        let reading = ClockReading::new(&time(21, 5, 9, 250), TimeFormat::TwentyFourHour, false);
        assert_eq!(reading.text, "21:05:09");
        assert_eq!(reading.second, 9);
        assert_eq!(reading.digits.millis, None);
        assert!(!reading.digits.is_pm);
    }

    #[test]
    fn test_millis_appended() {
        let reading = ClockReading::new(&time(0, 0, 59, 7), TimeFormat::TwentyFourHour, true);
        assert_eq!(reading.text, "00:00:59:007");
        assert_eq!(reading.digits.millis, Some(7));
    }

    #[test]
    fn test_twelve_hour_uses_pm_flag() {
        let reading = ClockReading::new(&time(13, 30, 0, 0), TimeFormat::TwelveHour, false);
        assert_eq!(reading.digits.hours, 1);
        assert!(reading.digits.is_pm);
        assert_eq!(reading.text, "01:30:00");

        let midnight = ClockReading::new(&time(0, 15, 0, 0), TimeFormat::TwelveHour, false);
        assert_eq!(midnight.digits.hours, 12);
        assert!(!midnight.digits.is_pm);
    }

    #[test]
    fn test_leap_second_millis_capped() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let reading = ClockReading::new(&leap, TimeFormat::TwentyFourHour, true);
        assert_eq!(reading.digits.millis, Some(999));
    }
}
