//! Human-readable size literals: `10K`, `1.5G`, `7e2M`.
//!
//! Kept as hand-rolled free functions rather than reaching for `humansize`:
//! the rounding (round-toward-zero) and the unit-selection rule (largest unit
//! with `n / 1024^k >= 1`, one decimal unless the value is integral) are
//! contractual behavior here, not a cosmetic formatting choice, and
//! `humansize` doesn't reproduce either rule exactly.

use crate::error::Error;

const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Parse a size literal: `<number>[unit]`, where `unit` is one of `B|K|M|G|T`
/// (case-insensitive) and `number` may be integer, decimal, or scientific.
///
/// The result is `number * 2^(10 * ord(unit))`, rounded toward zero. A bare
/// number with no unit suffix is treated as bytes.
///
/// # Errors
///
/// Returns [`Error::MalformedSize`] if the numeric part doesn't parse as an
/// `f64`.
pub fn parse_size(s: &str) -> Result<i64, Error> {
	let trimmed = s.trim();
	let malformed = || Error::MalformedSize(s.to_string());
	if trimmed.is_empty() {
		return Err(malformed());
	}

	let last = trimmed.as_bytes()[trimmed.len() - 1] as char;
	let (digits, unit) = if last.is_ascii_alphabetic() {
		(&trimmed[..trimmed.len() - 1], last.to_ascii_uppercase())
	} else {
		(trimmed, 'B')
	};

	let multiplier: i64 = match unit {
		'B' => 1,
		'K' => 1 << 10,
		'M' => 1 << 20,
		'G' => 1 << 30,
		'T' => 1 << 40,
		_ => return Err(malformed()),
	};

	let value: f64 = digits.parse().map_err(|_| malformed())?;
	Ok((value * multiplier as f64) as i64)
}

/// Format a byte count as a human-readable size, picking the largest unit in
/// `{"", K, M, G, T, P}` such that `n / 1024^k >= 1`.
///
/// Emits an integral count (`"512K"`) when the scaled value has no fractional
/// part, and one decimal place (`"1.5G"`) otherwise. Falls back to the plain
/// decimal representation of `n` for `n <= 0` (there's no meaningful unit to
/// pick for zero or negative sizes).
#[must_use]
pub fn format_size(n: i64) -> String {
	if n <= 0 {
		return n.to_string();
	}

	let unit_index = ((n as f64).ln() / 1024_f64.ln()).floor() as i32;
	if unit_index < 0 || unit_index as usize >= UNITS.len() {
		return n.to_string();
	}

	let unit_index = unit_index as usize;
	let value = n as f64 / 1024_f64.powi(unit_index as i32);
	let unit = UNITS[unit_index];

	if value.fract() == 0.0 {
		format!("{}{unit}", value as i64)
	} else {
		format!("{value:.1}{unit}")
	}
}
