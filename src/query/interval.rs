use std::fmt;
use std::str::FromStr;

use super::QueryError;

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Fixed resample width in nanoseconds, always positive.
///
/// Parsed from expressions such as `1h`, `30T`, `10s`, `1.5h`, `1h30min`
/// or `1 HOUR 15 MINUTES`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketWidth {
    nanos: i64,
}

impl BucketWidth {
    pub fn from_nanos(nanos: i64) -> Result<Self, QueryError> {
        if nanos <= 0 {
            return Err(QueryError::InvalidInterval {
                input: nanos.to_string(),
                reason: "bucket width must be positive".into(),
            });
        }
        Ok(Self { nanos })
    }

    pub fn as_nanos(&self) -> i64 {
        self.nanos
    }
}

impl fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.nanos)
    }
}

impl FromStr for BucketWidth {
    type Err = QueryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| QueryError::InvalidInterval {
            input: input.to_string(),
            reason,
        };

        let chars: Vec<char> = input.chars().collect();
        let mut pos = 0;
        let mut total: i128 = 0;
        let mut terms = 0;

        while pos < chars.len() {
            if chars[pos].is_whitespace() {
                pos += 1;
                continue;
            }

            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                pos += 1;
            }
            let number: String = chars[start..pos].iter().collect();

            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
            let unit_start = pos;
            while pos < chars.len() && chars[pos].is_alphabetic() {
                pos += 1;
            }
            let unit: String = chars[unit_start..pos].iter().collect();

            if unit.is_empty() {
                return Err(invalid(match chars.get(pos) {
                    Some(c) if number.is_empty() => format!("unexpected character {:?}", c),
                    _ => format!("missing unit after {:?}", number),
                }));
            }

            let unit_nanos = unit_to_nanos(&unit)
                .ok_or_else(|| invalid(format!("unsupported time unit {:?}", unit)))?;
            let term = scale(&number, unit_nanos).map_err(&invalid)?;
            total = total
                .checked_add(term)
                .ok_or_else(|| invalid("time interval overflowed i64 nanoseconds".into()))?;
            terms += 1;
        }

        if terms == 0 {
            return Err(invalid("empty interval".into()));
        }
        let nanos = i64::try_from(total)
            .map_err(|_| invalid("time interval overflowed i64 nanoseconds".into()))?;
        if nanos <= 0 {
            return Err(invalid("bucket width must be positive".into()));
        }

        Ok(Self { nanos })
    }
}

/// Calendar units (`M` month, `Y` year) have no fixed width and are refused.
fn unit_to_nanos(unit: &str) -> Option<i64> {
    if unit == "M" || unit == "Y" {
        return None;
    }
    let nanos = match unit.to_lowercase().as_str() {
        "n" | "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => 1,
        "u" | "us" | "µs" | "micro" | "micros" | "microsecond" | "microseconds" => NANOS_PER_MICRO,
        "l" | "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => NANOS_PER_MILLI,
        "s" | "sec" | "secs" | "second" | "seconds" => NANOS_PER_SECOND,
        "t" | "m" | "min" | "mins" | "minute" | "minutes" => NANOS_PER_MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => NANOS_PER_HOUR,
        "d" | "day" | "days" => NANOS_PER_DAY,
        "w" | "week" | "weeks" => 7 * NANOS_PER_DAY,
        _ => return None,
    };
    Some(nanos)
}

/// `number * unit_nanos`, exact; a bare unit counts as one.
fn scale(number: &str, unit_nanos: i64) -> Result<i128, String> {
    if number.is_empty() {
        return Ok(unit_nanos as i128);
    }

    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    if (int_part.is_empty() && frac_part.is_empty()) || frac_part.contains('.') {
        return Err(format!("invalid number {:?}", number));
    }

    let parse = |digits: &str| -> Result<i128, String> {
        if digits.is_empty() {
            Ok(0)
        } else {
            digits
                .parse::<i128>()
                .map_err(|e| format!("invalid number in time interval: {}", e))
        }
    };

    let whole = parse(int_part)?
        .checked_mul(unit_nanos as i128)
        .ok_or_else(|| "time interval overflowed i64 nanoseconds".to_string())?;

    if frac_part.is_empty() {
        return Ok(whole);
    }
    if frac_part.len() > 18 {
        return Err(format!("too many decimal places in {:?}", number));
    }
    let denominator = 10i128.pow(frac_part.len() as u32);
    let numerator = parse(frac_part)? * unit_nanos as i128;
    if numerator % denominator != 0 {
        return Err(format!("{:?} is not a whole number of nanoseconds", number));
    }

    Ok(whole + numerator / denominator)
}
