use fourth::{
    fmt::{IsoFormat, Timespec},
    jiff::SignedDuration,
    Datetime, LocalDatetime, UtcDatetime,
};

use crate::Result;

#[test]
fn utc_arithmetic_crosses_midnight() -> Result {
    let dt = UtcDatetime::at_midnight(2020, 9, 5)?;
    let got = dt + SignedDuration::from_hours(-18);
    assert_eq!(got, UtcDatetime::at(2020, 9, 4, 6, 0, 0, 0)?);
    assert_eq!(SignedDuration::from_hours(-18) + dt, got);
    assert_eq!(dt - got, SignedDuration::from_hours(18));

    Ok(())
}

#[test]
fn utc_from_timestamp() -> Result {
    assert_eq!(
        UtcDatetime::from_timestamp(1_200_300_400)?,
        UtcDatetime::at(2008, 1, 14, 8, 46, 40, 0)?,
    );
    assert_eq!(
        UtcDatetime::from_timestamp_f64(1_200_300_400.000_001)?,
        UtcDatetime::at(2008, 1, 14, 8, 46, 40, 1)?,
    );

    Ok(())
}

#[test]
fn local_rejects_aware_input() -> Result {
    let err =
        LocalDatetime::from_iso_format("2030-04-05T00:00:00+05:00").unwrap_err();
    assert!(err.is_tz_info());
    assert_eq!(err.to_string(), "from_iso_format: input contained tz info");

    Ok(())
}

#[test]
fn local_strftime_time_zone_directives() -> Result {
    let dt = LocalDatetime::at_midnight(2030, 4, 5)?;

    let err = dt.strftime("%Y-%m-%d %z").unwrap_err();
    assert!(err.is_directive());
    assert_eq!(dt.strftime("%Y-%m-%d %%z")?, "2030-04-05 %z");

    // An odd run of `%` ends in a live directive, an even run is literal.
    assert!(dt.strftime("%%%Z").unwrap_err().is_directive());
    assert_eq!(dt.strftime("%%%%Z")?, "%%Z");
    assert!(dt.strftime("%%%%%Z").unwrap_err().is_directive());
    assert!(dt.strftime("%Y %-:z").unwrap_err().is_directive());

    Ok(())
}

#[test]
fn utc_reaches_end_of_year_9999() -> Result {
    let dt =
        UtcDatetime::from_iso_format("9999-12-31T23:59:59.999999+00:00")?;
    assert_eq!(dt, UtcDatetime::MAX);
    assert_eq!(
        UtcDatetime::from_timestamp(253_402_300_799)?,
        UtcDatetime::at(9999, 12, 31, 23, 59, 59, 0)?,
    );
    // Jiff's timestamps end about a day earlier.
    assert!(dt.to_timestamp().unwrap_err().is_range());

    Ok(())
}

#[test]
fn strptime_time_zone_names() -> Result {
    let input = "2024-06-19 12:00 America/New_York";
    let format = "%Y-%m-%d %H:%M %Q";
    let err = LocalDatetime::strptime(input, format).unwrap_err();
    assert!(err.is_tz_info());
    assert_eq!(
        UtcDatetime::strptime(input, format)?,
        UtcDatetime::at(2024, 6, 19, 16, 0, 0, 0)?,
    );

    Ok(())
}

#[test]
fn offset_normalization_is_exact() -> Result {
    let a = UtcDatetime::from_iso_format("2024-12-31T23:59:59+00:00")?;
    let b = UtcDatetime::from_iso_format("2024-12-31T19:29:59-04:30")?;
    let c = UtcDatetime::from_iso_format("2025-01-01T05:29:59.000000+05:30")?;
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a.to_timestamp()?, b.to_timestamp()?);
    assert_eq!(c.to_string(), "2024-12-31T23:59:59.000000+00:00");

    Ok(())
}

#[test]
fn iso_text_roundtrips() -> Result {
    for text in [
        "2024-02-29T12:00:00.000000",
        "1999-12-31T23:59:59.999999",
        "0001-01-01T00:00:00.000000",
    ] {
        assert_eq!(LocalDatetime::from_iso_format(text)?.iso_format(), text);
    }
    for text in [
        "2024-02-29T12:00:00.000000+00:00",
        "1999-12-31T23:59:59.999999+00:00",
    ] {
        assert_eq!(UtcDatetime::from_iso_format(text)?.iso_format(), text);
    }

    Ok(())
}

#[test]
fn iso_format_options() -> Result {
    let dt = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 120_000)?;
    let space = IsoFormat::new().separator(' ');
    assert_eq!(dt.iso_format_with(space), "2024-06-19 15:22:45.120000");
    assert_eq!(
        dt.iso_format_with(space.timespec(Timespec::Milliseconds)),
        "2024-06-19 15:22:45.120",
    );
    assert_eq!(
        dt.iso_format_with(IsoFormat::new().timespec("hours".parse()?)),
        "2024-06-19T15",
    );

    let utc = UtcDatetime::at_midnight(2024, 6, 19)?;
    assert_eq!(
        utc.iso_format_with(IsoFormat::new().timespec(Timespec::Auto)),
        "2024-06-19T00:00:00+00:00",
    );

    Ok(())
}

#[test]
fn repr_reconstructs() -> Result {
    let local = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 99)?;
    let utc = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 99)?;

    let repr = format!("{local:?}");
    assert_eq!(repr, "LocalDatetime::at(2024, 6, 19, 15, 22, 45, 99)");
    assert_eq!(LocalDatetime::from_repr(&repr)?, local);

    let repr = format!("{utc:?}");
    assert_eq!(repr, "UtcDatetime::at(2024, 6, 19, 15, 22, 45, 99)");
    assert_eq!(UtcDatetime::from_repr(&repr)?, utc);

    // A representation of one type doesn't reconstruct the other.
    assert!(LocalDatetime::from_repr(&repr).unwrap_err().is_parse());

    Ok(())
}

#[test]
fn now_is_between_bounds() -> Result {
    let local = LocalDatetime::now();
    let utc = UtcDatetime::now();
    assert!(LocalDatetime::MIN < local && local < LocalDatetime::MAX);
    assert!(UtcDatetime::MIN < utc && utc < UtcDatetime::MAX);

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn serde_roundtrip_in_struct() -> Result {
    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct Event {
        scheduled: LocalDatetime,
        recorded: UtcDatetime,
    }

    let event = Event {
        scheduled: LocalDatetime::at(2024, 6, 19, 9, 0, 0, 0)?,
        recorded: UtcDatetime::at(2024, 6, 18, 22, 15, 0, 5)?,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert_eq!(
        json,
        r#"{"scheduled":"2024-06-19T09:00:00.000000","recorded":"2024-06-18T22:15:00.000005+00:00"}"#,
    );
    let got: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(got, event);

    // Swapping the fields violates both types' offset rules.
    let swapped = r#"{"scheduled":"2024-06-18T22:15:00.000005+00:00","recorded":"2024-06-19T09:00:00.000000"}"#;
    assert!(serde_json::from_str::<Event>(swapped).is_err());

    Ok(())
}
