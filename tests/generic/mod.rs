use fourth::{Datetime, Equality, LocalDatetime, UtcDatetime};

use crate::Result;

/// Returns the first instant of the month containing `dt`.
fn start_of_month<D: Datetime>(dt: D) -> std::result::Result<D, fourth::Error> {
    D::at(dt.year(), dt.month(), 1, 0, 0, 0, 0)
}

/// Checks the laws every datetime type upholds, via the trait alone.
fn check_laws<D: Datetime>(dt: D) {
    assert_eq!(D::from_iso_format(&dt.iso_format()).unwrap(), dt);
    assert_eq!(D::from_repr(&format!("{dt:?}")).unwrap(), dt);
    assert_eq!(dt.to_string().parse::<D>().unwrap(), dt);
    assert_eq!(dt.equals(&dt), Equality::Equal);
    assert!(D::MIN <= dt && dt <= D::MAX);
    assert_eq!(dt.microsecond(), dt.to_civil().subsec_nanosecond() / 1_000);
}

#[test]
fn generic_code_works_for_both_types() -> Result {
    let local = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 123_456)?;
    let utc = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 123_456)?;

    assert_eq!(start_of_month(local)?, LocalDatetime::at_midnight(2024, 6, 1)?);
    assert_eq!(start_of_month(utc)?, UtcDatetime::at_midnight(2024, 6, 1)?);

    check_laws(local);
    check_laws(utc);
    check_laws(LocalDatetime::MIN);
    check_laws(LocalDatetime::MAX);
    check_laws(UtcDatetime::MIN);
    check_laws(UtcDatetime::MAX);

    Ok(())
}

#[test]
fn generic_strftime() -> Result {
    fn render<D: Datetime>(dt: &D) -> String {
        dt.strftime("%Y/%m/%d %H:%M").unwrap()
    }

    let local = LocalDatetime::at(2024, 6, 19, 15, 22, 0, 0)?;
    let utc = UtcDatetime::at(2024, 6, 19, 15, 22, 0, 0)?;
    assert_eq!(render(&local), "2024/06/19 15:22");
    assert_eq!(render(&utc), "2024/06/19 15:22");

    Ok(())
}

#[test]
fn generic_now() {
    fn now<D: Datetime>() -> D {
        D::now()
    }

    let local: LocalDatetime = now();
    let utc: UtcDatetime = now();
    assert_eq!(local.to_civil().subsec_nanosecond() % 1_000, 0);
    assert_eq!(utc.to_civil().subsec_nanosecond() % 1_000, 0);
}
