// Durations with a day unit.
//
// Literal defaults are validated with `parse_duration` at generation time and
// the same code is spliced into every generated unit for runtime parsing.

use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;

use super::flags::FlagValue;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

// One past i64::MAX; the largest magnitude a negative duration may reach.
const MAGNITUDE_LIMIT: u64 = 1 << 63;

/// Error returned for text that is not a valid duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDuration {
    input: String,
    reason: &'static str,
}

impl InvalidDuration {
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for InvalidDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid duration {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidDuration {}

/// Signed span of time with nanosecond precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_nanos(nanos: i64) -> Self {
        Duration(nanos)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Duration(millis * MILLISECOND as i64)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Duration(secs * SECOND as i64)
    }

    pub const fn from_mins(mins: i64) -> Self {
        Duration(mins * MINUTE as i64)
    }

    pub const fn from_hours(hours: i64) -> Self {
        Duration(hours * HOUR as i64)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Whole milliseconds, truncated toward zero.
    pub const fn as_millis(self) -> i64 {
        self.0 / MILLISECOND as i64
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Unsigned std duration; `None` for negative spans.
    pub fn to_std(self) -> Option<std::time::Duration> {
        u64::try_from(self.0).ok().map(std::time::Duration::from_nanos)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration(-self.0)
    }
}

/// Parse a duration such as `1h30m`, `-1.5s` or `5d6h`.
///
/// `d` means exactly 24 hours. Each day term is rewritten to hours and the
/// result is handed to the standard grammar: repeated number+unit terms in any
/// order, one optional leading sign applied to the sum.
pub fn parse_duration(text: &str) -> Result<Duration, InvalidDuration> {
    parse_standard(&expand_days(text)).map_err(|reason| InvalidDuration {
        input: text.to_string(),
        reason,
    })
}

impl FromStr for Duration {
    type Err = InvalidDuration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}

impl FlagValue for Duration {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        *self = parse_duration(raw).map_err(|err| err.to_string())?;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "duration"
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let text = if magnitude == 0 {
            "0s".to_string()
        } else if magnitude < SECOND {
            let (unit, precision) = if magnitude < MICROSECOND {
                ("ns", 0)
            } else if magnitude < MILLISECOND {
                ("µs", 3)
            } else {
                ("ms", 6)
            };
            let (whole, fraction) = split_fraction(magnitude, precision);
            format!("{whole}{fraction}{unit}")
        } else {
            let (whole_secs, fraction) = split_fraction(magnitude, 9);
            let secs = whole_secs % 60;
            let mins = whole_secs / 60;
            if mins == 0 {
                format!("{secs}{fraction}s")
            } else if mins < 60 {
                format!("{mins}m{secs}{fraction}s")
            } else {
                format!("{}h{}m{secs}{fraction}s", mins / 60, mins % 60)
            }
        };
        if self.0 < 0 {
            write!(f, "-{text}")
        } else {
            f.write_str(&text)
        }
    }
}

// Integer part and `.ddd` fraction (trailing zeros dropped) of value / 10^precision.
fn split_fraction(value: u64, precision: u32) -> (u64, String) {
    let scale = 10u64.pow(precision);
    let fraction = value % scale;
    if fraction == 0 {
        return (value / scale, String::new());
    }
    let digits = format!("{:0width$}", fraction, width = precision as usize);
    (value / scale, format!(".{}", digits.trim_end_matches('0')))
}

// Rewrite every `<number>d` term as `<number*24>h`, leaving the rest untouched.
fn expand_days(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;
    while i < bytes.len() {
        if let Some(end) = day_term_end(bytes, i) {
            let number = &text[i..end - 1];
            match number.parse::<f64>() {
                Ok(days) => out.push_str(&format!("{:.6}h", days * 24.0)),
                Err(_) => out.push_str(&text[i..end]),
            }
            i = end;
        } else {
            let width = text[i..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&text[i..i + width]);
            i += width;
        }
    }
    out
}

// End offset (exclusive, including the `d`) of a day term starting at `start`.
// A number is digits with an optional fraction, or a fraction alone.
fn day_term_end(bytes: &[u8], start: usize) -> Option<usize> {
    let skip_digits = |mut i: usize| -> usize {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = skip_digits(start);
    if end > start {
        if bytes.get(end) == Some(&b'.') {
            end = skip_digits(end + 1);
        }
    } else if bytes.get(start) == Some(&b'.') {
        end = skip_digits(start + 1);
        if end == start + 1 {
            return None;
        }
    } else {
        return None;
    }

    (bytes.get(end) == Some(&b'd')).then_some(end + 1)
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn parse_standard(text: &str) -> Result<Duration, &'static str> {
    let mut s = text;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err("empty duration");
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err("expected a number");
        }

        let (whole, rest) = leading_int(s)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (digits, digits_scale, after) = leading_fraction(rest);
            has_fraction = after.len() != rest.len();
            fraction = digits;
            scale = digits_scale;
            s = after;
        }
        if !has_whole && !has_fraction {
            return Err("expected a number");
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err("missing unit");
        }
        let unit = unit_nanos(&s[..unit_len]).ok_or("unknown unit")?;
        s = &s[unit_len..];

        if whole > MAGNITUDE_LIMIT / unit {
            return Err("out of range");
        }
        let mut value = whole * unit;
        if fraction > 0 {
            value += (fraction as f64 * (unit as f64 / scale)) as u64;
            if value > MAGNITUDE_LIMIT {
                return Err("out of range");
            }
        }
        total = total.checked_add(value).ok_or("out of range")?;
        if total > MAGNITUDE_LIMIT {
            return Err("out of range");
        }
    }

    if negative {
        return Ok(Duration((total as i64).wrapping_neg()));
    }
    if total > i64::MAX as u64 {
        return Err("out of range");
    }
    Ok(Duration(total as i64))
}

fn leading_int(s: &str) -> Result<(u64, &str), &'static str> {
    let bytes = s.as_bytes();
    let mut value: u64 = 0;
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        if value > MAGNITUDE_LIMIT / 10 {
            return Err("out of range");
        }
        value = value * 10 + u64::from(bytes[i] - b'0');
        if value > MAGNITUDE_LIMIT {
            return Err("out of range");
        }
        i += 1;
    }
    Ok((value, &s[i..]))
}

// Digits after the decimal point; precision beyond what fits is ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let bytes = s.as_bytes();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        if !overflow {
            if value > (i64::MAX as u64) / 10 {
                overflow = true;
            } else {
                let next = value * 10 + u64::from(bytes[i] - b'0');
                if next > MAGNITUDE_LIMIT {
                    overflow = true;
                } else {
                    value = next;
                    scale *= 10.0;
                }
            }
        }
        i += 1;
    }
    (value, scale, &s[i..])
}
