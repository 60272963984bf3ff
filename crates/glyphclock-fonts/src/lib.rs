//! Block-letter font for the glyphclock time display.
//!
//! Every glyph is [`FONT_HEIGHT`] rows tall. Digits and letters are five
//! columns wide, the colon is one column wide.

use glyphclock_core::TimeFormat;

/// Number of rows in every glyph.
pub const FONT_HEIGHT: usize = 5;

/// Digit glyphs, indexed by value.
const DIGITS: [[&str; FONT_HEIGHT]; 10] = [
    [" ███ ", "█   █", "█   █", "█   █", " ███ "],
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    [" ███ ", "█   █", "  ██ ", " █   ", "█████"],
    ["████ ", "    █", " ███ ", "    █", "████ "],
    ["█   █", "█   █", "█████", "    █", "    █"],
    ["█████", "█    ", "████ ", "    █", "████ "],
    [" ███ ", "█    ", "████ ", "█   █", " ███ "],
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    [" ███ ", "█   █", " ███ ", "█   █", " ███ "],
    [" ███ ", "█   █", " ████", "    █", " ███ "],
];

const COLON: [&str; FONT_HEIGHT] = [" ", "█", " ", "█", " "];

const LETTER_A: [&str; FONT_HEIGHT] = [" ███ ", "█   █", "█████", "█   █", "█   █"];
const LETTER_P: [&str; FONT_HEIGHT] = ["████ ", "█   █", "████ ", "█    ", "█    "];
const LETTER_M: [&str; FONT_HEIGHT] = ["█   █", "██ ██", "█ █ █", "█   █", "█   █"];

/// Clock values to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockDigits {
    /// Hour value (0-23 for 24h, 1-12 for 12h).
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Milliseconds, drawn as a fourth group when present.
    pub millis: Option<u32>,
    /// Whether it's PM (only used for 12-hour format).
    pub is_pm: bool,
}

/// Append a zero-padded group of digits separated by single spaces.
fn push_group(rows: &mut [String], value: u32, width: usize) {
    let text = format!("{:0width$}", value % 10u32.pow(width as u32), width = width);
    for (i, ch) in text.chars().enumerate() {
        let digit = ch.to_digit(10).unwrap_or(0) as usize;
        let gap = if i > 0 { " " } else { "" };
        push_glyph(rows, &DIGITS[digit], gap);
    }
}

fn push_glyph(rows: &mut [String], glyph: &[&str; FONT_HEIGHT], gap: &str) {
    for (line, part) in rows.iter_mut().zip(glyph) {
        line.push_str(gap);
        line.push_str(part);
    }
}

/// Build the block-letter time display.
///
/// Returns [`FONT_HEIGHT`] strings of equal width.
pub fn build_time_art(time_format: TimeFormat, digits: ClockDigits) -> Vec<String> {
    let mut rows = vec![String::new(); FONT_HEIGHT];

    push_group(&mut rows, digits.hours, 2);
    for (value, width) in [(digits.minutes, 2), (digits.seconds, 2)]
        .into_iter()
        .chain(digits.millis.map(|ms| (ms, 3)))
    {
        push_glyph(&mut rows, &COLON, " ");
        push_glyph(&mut rows, &[""; FONT_HEIGHT], " ");
        push_group(&mut rows, value, width);
    }

    if time_format == TimeFormat::TwelveHour {
        let letter = if digits.is_pm { &LETTER_P } else { &LETTER_A };
        push_glyph(&mut rows, letter, "  ");
        push_glyph(&mut rows, &LETTER_M, " ");
    }

    rows
}
