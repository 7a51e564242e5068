//! Text ranging line parser
//!
//! Anchors running AT-style firmware print human-readable lines such as
//! `DIST: 123.4 cm`, `d=1.23m`, bare `120`, or hex dumps like
//! `mc 0f 00000a3c`. The parser extracts one distance from a line:
//!
//! 1. The last decimal token (optional sign, digits, at most one decimal
//!    point). When positive, a unit directly after it (past whitespace)
//!    converts it: `mm` ×0.1, `cm` ×1, `m` ×100 (case-insensitive). Without a
//!    unit the configured default scale applies.
//! 2. Otherwise the last hexadecimal token (optional `0x` prefix), multiplied
//!    by the hex scale.
//!
//! A result of zero or no token at all yields `None`.

/// Scale factors for unit-less and hex distances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScales {
    /// Multiplier for decimal values without a unit suffix
    pub default_scale: f32,
    /// Multiplier for hexadecimal values
    pub hex_scale: f32,
}

impl Default for TextScales {
    fn default() -> Self {
        Self {
            default_scale: 1.0,
            hex_scale: 0.1,
        }
    }
}

/// Parse a distance (base unit: centimetres) from one text line
pub fn parse_distance(line: &[u8], scales: &TextScales) -> Option<f32> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }

    if let Some((value, end)) = last_decimal_token(line) {
        if value > 0.0 {
            let scale = unit_scale(&line[end..]).unwrap_or(scales.default_scale);
            return Some(value * scale);
        }
    }

    match last_hex_token(line) {
        Some(0) | None => None,
        Some(raw) => Some(raw as f32 * scales.hex_scale),
    }
}

/// Find the last decimal token; returns its value and end offset
fn last_decimal_token(line: &[u8]) -> Option<(f32, usize)> {
    let mut found = None;
    let mut i = 0;

    while i < line.len() {
        let c = line[i];
        if !(c.is_ascii_digit() || c == b'.' || c == b'-' || c == b'+') {
            i += 1;
            continue;
        }

        let mut j = i;
        let negative = c == b'-';
        if c == b'-' || c == b'+' {
            j += 1;
        }

        let mut int_part: f32 = 0.0;
        let mut frac_part: f32 = 0.0;
        let mut frac_div: f32 = 1.0;
        let mut seen_point = false;
        let mut has_digit = false;

        while j < line.len() {
            let cj = line[j];
            if cj.is_ascii_digit() {
                let d = (cj - b'0') as f32;
                if seen_point {
                    frac_div *= 10.0;
                    frac_part += d / frac_div;
                } else {
                    int_part = int_part * 10.0 + d;
                }
                has_digit = true;
            } else if cj == b'.' && !seen_point {
                seen_point = true;
            } else {
                break;
            }
            j += 1;
        }

        if has_digit {
            let magnitude = int_part + frac_part;
            found = Some((if negative { -magnitude } else { magnitude }, j));
        }

        // A lone sign or point still advances past itself
        i = j.max(i + 1);
    }

    found
}

/// Unit suffix after optional whitespace
fn unit_scale(rest: &[u8]) -> Option<f32> {
    let rest = rest.trim_ascii_start();
    let c0 = rest.first()?.to_ascii_lowercase();
    let c1 = rest.get(1).map(|c| c.to_ascii_lowercase());

    match (c0, c1) {
        (b'm', Some(b'm')) => Some(0.1),
        (b'c', Some(b'm')) => Some(1.0),
        (b'm', _) => Some(100.0),
        _ => None,
    }
}

/// Find the last hexadecimal token
fn last_hex_token(line: &[u8]) -> Option<u32> {
    let mut found = None;
    let mut i = 0;

    while i < line.len() {
        let mut j = i;
        if line[j] == b'0' && matches!(line.get(j + 1), Some(b'x') | Some(b'X')) {
            j += 2;
        }

        let mut value: u32 = 0;
        let mut has_hex = false;
        while let Some(digit) = line.get(j).and_then(|&c| (c as char).to_digit(16)) {
            value = value.wrapping_shl(4).wrapping_add(digit);
            has_hex = true;
            j += 1;
        }

        if has_hex {
            found = Some(value);
            i = j;
        } else {
            i += 1;
        }
    }

    found
}
