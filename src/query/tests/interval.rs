use super::{HOUR, MINUTE};
use crate::query::{BucketWidth, QueryError};

fn nanos(s: &str) -> i64 {
    s.parse::<BucketWidth>().unwrap().as_nanos()
}

#[test]
fn test_short_aliases() {
    assert_eq!(nanos("1h"), HOUR);
    assert_eq!(nanos("1H"), HOUR);
    assert_eq!(nanos("30T"), 30 * MINUTE);
    assert_eq!(nanos("30min"), 30 * MINUTE);
    assert_eq!(nanos("10s"), 10_000_000_000);
    assert_eq!(nanos("1d"), 24 * HOUR);
    assert_eq!(nanos("1w"), 7 * 24 * HOUR);
    assert_eq!(nanos("250ms"), 250_000_000);
    assert_eq!(nanos("5us"), 5_000);
    assert_eq!(nanos("100N"), 100);
    assert_eq!(nanos("h"), HOUR);
}

#[test]
fn test_compound_and_fractional() {
    assert_eq!(nanos("1h30min"), HOUR + 30 * MINUTE);
    assert_eq!(nanos("1 HOUR 15 MINUTES"), HOUR + 15 * MINUTE);
    assert_eq!(nanos("1.5h"), HOUR + 30 * MINUTE);
    assert_eq!(nanos("0.5s"), 500_000_000);
}

#[test]
fn test_invalid_intervals() {
    for bad in ["", "   ", "0h", "0s0ms", "-1h", "10", "5 fortnights", "1.2.3h", "1M", "1.5ns", "h1"] {
        let result = bad.parse::<BucketWidth>();
        assert!(
            matches!(result, Err(QueryError::InvalidInterval { .. })),
            "{:?} should be rejected, got {:?}",
            bad,
            result
        );
    }
}

#[test]
fn test_overflow_is_rejected() {
    let result = "999999999999d".parse::<BucketWidth>();
    assert!(matches!(result, Err(QueryError::InvalidInterval { .. })));
}
