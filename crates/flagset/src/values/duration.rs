use std::any::Any;
use std::time::Duration;

use crate::value::{Value, ValueError};

/// Duration flag value using compound unit notation (`300ms`, `1h2m3s`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationValue(Duration);

impl DurationValue {
    pub fn new(default: Duration) -> Self {
        Self(default)
    }

    pub fn get(&self) -> Duration {
        self.0
    }
}

impl Value for DurationValue {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        self.0 = parse_duration(text.trim())?;
        Ok(())
    }

    fn text(&self) -> String {
        format_duration(self.0)
    }

    fn type_name(&self) -> &'static str {
        "duration"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parse a possibly-compound duration: one or more `<number><unit>`
/// terms where the unit is ns, us, µs, ms, s, m, or h and the number may
/// carry a fraction. The bare string `0` is allowed.
fn parse_duration(text: &str) -> Result<Duration, ValueError> {
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.starts_with('-') {
        return Err(format!("negative duration {text:?}").into());
    }
    let mut rest = text.strip_prefix('+').unwrap_or(text);
    if rest.is_empty() {
        return Err(invalid(text));
    }
    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let split = rest
            .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(split);
        if number.is_empty() {
            return Err(invalid(text));
        }
        let quantity: f64 = number.parse().map_err(|_| invalid(text))?;
        let (unit_secs, unit_len) = if tail.starts_with("ns") {
            (1e-9, 2)
        } else if tail.starts_with("us") {
            (1e-6, 2)
        } else if tail.starts_with("µs") {
            (1e-6, "µs".len())
        } else if tail.starts_with("ms") {
            (1e-3, 2)
        } else if tail.starts_with('s') {
            (1.0, 1)
        } else if tail.starts_with('m') {
            (60.0, 1)
        } else if tail.starts_with('h') {
            (3600.0, 1)
        } else {
            return Err(invalid(text));
        };
        let term = Duration::try_from_secs_f64(quantity * unit_secs).map_err(|_| invalid(text))?;
        total = total.checked_add(term).ok_or_else(|| invalid(text))?;
        rest = &tail[unit_len..];
    }
    Ok(total)
}

fn invalid(text: &str) -> ValueError {
    format!("invalid duration {text:?}").into()
}

/// Render a duration back into compound notation: sub-second values pick
/// the largest fitting unit (`1.5ms`), longer values spell out hours,
/// minutes, and fractional seconds (`2h45m0s`, `1m30s`).
fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }
    let nanos = d.as_nanos();
    if nanos < 1_000_000_000 {
        let (div, unit) = if nanos < 1_000 {
            (1, "ns")
        } else if nanos < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        return format!("{}{unit}", format_scaled(nanos, div));
    }
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let sec_nanos = (total_secs % 60) as u128 * 1_000_000_000 + d.subsec_nanos() as u128;
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{}s", format_scaled(sec_nanos, 1_000_000_000)));
    out
}

/// `value / div` with the remainder rendered as a trimmed fraction.
/// `div` is a power of ten.
fn format_scaled(value: u128, div: u128) -> String {
    let whole = value / div;
    let frac = value % div;
    if frac == 0 {
        return whole.to_string();
    }
    let mut frac_digits = format!("{frac:0width$}", width = div.ilog10() as usize);
    while frac_digits.ends_with('0') {
        frac_digits.pop();
    }
    format!("{whole}.{frac_digits}")
}
