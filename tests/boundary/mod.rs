use std::cmp::Ordering;

use fourth::{
    jiff::{civil::date, tz::TimeZone, Timestamp},
    Datetime, Equality, LocalDatetime, UtcDatetime,
};

use crate::Result;

/// Local and UTC datetimes with the same fields are still never equal, in
/// either direction.
#[test]
fn local_and_utc_are_never_equal() -> Result {
    crate::init_logging();

    let local = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;
    let utc = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;

    assert!(!(local == utc));
    assert!(!(utc == local));
    assert!(local != utc);
    assert!(utc != local);

    assert_eq!(local.equals(&utc), Equality::NotComparable);
    assert_eq!(utc.equals(&local), Equality::NotComparable);
    assert_eq!(local.equals(&utc).to_option(), None);
    assert!(!utc.equals(&local).is_equal());

    Ok(())
}

/// Ordering across the boundary is undefined, so every comparison operator
/// returns false.
#[test]
fn local_and_utc_are_unordered() -> Result {
    let local = LocalDatetime::at(2000, 1, 1, 0, 0, 0, 0)?;
    let utc = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;

    assert_eq!(local.partial_cmp(&utc), None);
    assert_eq!(utc.partial_cmp(&local), None);
    assert!(!(local < utc));
    assert!(!(local > utc));
    assert!(!(utc <= local));
    assert!(!(utc >= local));
    assert_eq!(local.compare(&utc), None);
    assert_eq!(utc.compare(&local), None);

    Ok(())
}

/// Each type compares with the Jiff types whose offset information matches
/// its own, and with nothing else.
#[test]
fn jiff_values_compare_by_kind() -> Result {
    let local = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;
    let utc = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;

    let civil = date(2024, 6, 19).at(15, 22, 45, 0);
    let ts: Timestamp = "2024-06-19T15:22:45Z".parse()?;
    let zdt = ts.to_zoned(TimeZone::fixed(fourth::jiff::tz::offset(-4)));

    assert_eq!(local.equals(&civil), Equality::Equal);
    assert_eq!(local.equals(&ts), Equality::NotComparable);
    assert_eq!(local.equals(&zdt), Equality::NotComparable);

    assert_eq!(utc.equals(&ts), Equality::Equal);
    assert_eq!(utc.equals(&zdt), Equality::Equal);
    assert_eq!(utc.equals(&civil), Equality::NotComparable);

    assert_eq!(local, civil);
    assert_eq!(utc, ts);
    assert_eq!(utc, zdt);

    Ok(())
}

/// Unrelated types are reported as not comparable rather than unequal.
#[test]
fn unrelated_types_are_not_comparable() -> Result {
    let local = LocalDatetime::at_midnight(2024, 6, 19)?;
    let utc = UtcDatetime::at_midnight(2024, 6, 19)?;

    let text = "2024-06-19T00:00:00";
    let owned = String::from("2024-06-19");
    let second = 1_718_755_200i64;
    let float = 1_718_755_200.0f64;
    let others: [&dyn std::any::Any; 5] =
        [&text, &owned, &second, &float, &()];
    for other in others {
        assert_eq!(local.equals(other), Equality::NotComparable);
        assert_eq!(utc.equals(other), Equality::NotComparable);
        assert_eq!(local.compare(other), None);
        assert_eq!(utc.compare(other), None);
    }

    Ok(())
}

/// Values are matched by their concrete type, so a reference to a reference
/// is not comparable.
#[test]
fn nested_references_are_not_comparable() {
    static START: UtcDatetime = UtcDatetime::MIN;
    static LOCAL_START: LocalDatetime = LocalDatetime::MIN;

    let utc: &'static UtcDatetime = &START;
    let local: &'static LocalDatetime = &LOCAL_START;
    assert_eq!(UtcDatetime::MIN.equals(utc), Equality::Equal);
    assert_eq!(UtcDatetime::MIN.equals(&utc), Equality::NotComparable);
    assert_eq!(LocalDatetime::MIN.equals(local), Equality::Equal);
    assert_eq!(LocalDatetime::MIN.compare(&local), None);
}

/// Within a type, `compare` agrees with `Ord`.
#[test]
fn same_type_ordering() -> Result {
    let a = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;
    let b = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 1)?;
    assert!(a < b);
    assert_eq!(a.compare(&b), Some(Ordering::Less));
    assert_eq!(b.compare(&a), Some(Ordering::Greater));
    assert_eq!(a.compare(&a), Some(Ordering::Equal));
    assert_eq!(a.equals(&b), Equality::NotEqual);

    let mut all = vec![b, UtcDatetime::MAX, a, UtcDatetime::MIN];
    all.sort();
    assert_eq!(all, vec![UtcDatetime::MIN, a, b, UtcDatetime::MAX]);

    Ok(())
}

/// Offset information is checked on every construction path.
#[test]
fn construction_checks_offsets() -> Result {
    let err = LocalDatetime::from_iso_format("2024-06-19T00:00:00+00:00")
        .unwrap_err();
    assert!(err.is_tz_info());
    let err = "2024-06-19T00:00:00Z".parse::<LocalDatetime>().unwrap_err();
    assert!(err.is_tz_info());
    let err = LocalDatetime::strptime("2024-06-19 +0000", "%Y-%m-%d %z")
        .unwrap_err();
    assert!(err.is_tz_info());

    let err = UtcDatetime::from_iso_format("2024-06-19T00:00:00").unwrap_err();
    assert!(err.is_tz_info());
    let err = "2024-06-19".parse::<UtcDatetime>().unwrap_err();
    assert!(err.is_tz_info());
    let err = UtcDatetime::strptime("2024-06-19", "%Y-%m-%d").unwrap_err();
    assert!(err.is_tz_info());

    Ok(())
}
