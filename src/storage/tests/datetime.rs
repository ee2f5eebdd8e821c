use super::*;
use crate::storage::datetime::{epoch_to_nanos, parse_generic, parse_with_format};

#[test]
fn test_generic_layouts() {
    let expected = ts("2024-03-05 14:07:09");
    for raw in [
        "2024-03-05 14:07:09",
        "2024-03-05T14:07:09",
        "2024-03-05T14:07:09Z",
        "2024-03-05T16:07:09+02:00",
        "2024/03/05 14:07:09",
        "03/05/2024 14:07:09",
        "05.03.2024 14:07:09",
        "Tue, 5 Mar 2024 14:07:09 +0000",
    ] {
        assert_eq!(parse_generic(raw), Some(expected), "layout {:?}", raw);
    }
}

#[test]
fn test_generic_fractions_and_dates() {
    assert_eq!(
        parse_generic("2024-03-05 14:07:09.250"),
        Some(ts("2024-03-05 14:07:09") + 250_000_000)
    );
    assert_eq!(parse_generic("2024-03-05"), Some(ts("2024-03-05 00:00:00")));
    assert_eq!(parse_generic("20240305"), Some(ts("2024-03-05 00:00:00")));
    assert_eq!(parse_generic("yesterday"), None);
    assert_eq!(parse_generic("2024-13-45"), None);
}

#[test]
fn test_epoch_magnitudes() {
    assert_eq!(epoch_to_nanos(1_700_000_000), Some(1_700_000_000_000_000_000));
    assert_eq!(epoch_to_nanos(1_700_000_000_000), Some(1_700_000_000_000_000_000));
    assert_eq!(epoch_to_nanos(1_700_000_000_000_000), Some(1_700_000_000_000_000_000));
    assert_eq!(epoch_to_nanos(1_700_000_000_000_000_000), Some(1_700_000_000_000_000_000));
    assert_eq!(parse_generic("1700000000000"), Some(1_700_000_000_000_000_000));
}

#[test]
fn test_explicit_format_variants() {
    assert_eq!(
        parse_with_format("05-03-2024 14:07", "%d-%m-%Y %H:%M"),
        Some(ts("2024-03-05 14:07:00"))
    );
    assert_eq!(parse_with_format("05-03-2024", "%d-%m-%Y"), Some(ts("2024-03-05 00:00:00")));
    assert_eq!(
        parse_with_format("2024-03-05 16:07 +0200", "%Y-%m-%d %H:%M %z"),
        Some(ts("2024-03-05 14:07:00"))
    );
    assert_eq!(parse_with_format("2024-03-05", "%d-%m-%Y"), None);
}
