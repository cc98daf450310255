/*!
Two datetime types that cannot be confused with one another.

Mixing up a naive datetime (one with no time zone) with an aware datetime
(one that identifies an instant) is an easy mistake to make, and an annoying
one to track down. This crate makes the distinction part of the type system
with two types, both built on top of [Jiff](jiff):

* [`LocalDatetime`] is a naive calendar date and wall clock time. It wraps a
[`jiff::civil::DateTime`].
* [`UtcDatetime`] is an instant in time, always viewed in UTC. It wraps the
[`jiff::civil::DateTime`] of that instant at offset `+00:00`, and converts
to and from [`jiff::Timestamp`].

Both types have microsecond precision and support years `1` through `9999`.

Every construction path checks for offset information. A `LocalDatetime`
refuses input that has an offset, and a `UtcDatetime` refuses input that
doesn't. Input with an offset other than UTC is converted to UTC exactly.

# Example

```
use fourth::{jiff::SignedDuration, LocalDatetime, UtcDatetime};

let local = LocalDatetime::from_iso_format("2024-06-19T15:22:45")?;
let utc = UtcDatetime::from_iso_format("2024-06-19T15:22:45-04:00")?;
assert_eq!(utc.to_string(), "2024-06-19T19:22:45.000000+00:00");

// The two types are never equal, and cannot be ordered.
assert!(local != utc);
assert_eq!(local.partial_cmp(&utc), None);

// Arithmetic works with Jiff's signed durations.
let later = utc + SignedDuration::from_mins(90);
assert_eq!(later - utc, SignedDuration::from_mins(90));

// Input with an offset is never silently turned into a local datetime.
let err = LocalDatetime::from_iso_format("2024-06-19T15:22:45Z").unwrap_err();
assert!(err.is_tz_info());

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Comparisons

Values of the same type are totally ordered. A `LocalDatetime` also compares
with a `jiff::civil::DateTime`, and a `UtcDatetime` with a `jiff::Timestamp`
or a `jiff::Zoned` (by instant). Comparing a `LocalDatetime` with a
`UtcDatetime` via `==` is always `false`, and via `partial_cmp` is always
`None`.

For code that needs to tell "not equal" apart from "not comparable", the
[`Datetime::equals`] and [`Datetime::compare`] methods accept a value of any
type and report [`Equality::NotComparable`] (or `None`) when the comparison
makes no sense.

# Immutability

Values never change after construction. Fields are private and there are no
setters:

```compile_fail
use fourth::LocalDatetime;

let mut dt = LocalDatetime::at_midnight(2024, 6, 19)?;
dt.year = 2025;

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **logging** - Emits log messages via the [`log`](https://docs.rs/log)
crate. Reading the clock is logged at `trace` level, while converting an
offset to UTC and rejecting a `strftime` directive are logged at `debug`
level.
* **serde** - Implements `Serialize` and `Deserialize` for both types, using
their ISO 8601 representation at microsecond precision.
*/

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
// This adds Cargo feature annotations to items in the rustdoc output.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

extern crate alloc;

pub use jiff;

pub use crate::{
    datetime::{Datetime, Equality},
    error::Error,
    local::LocalDatetime,
    utc::UtcDatetime,
};

#[macro_use]
mod logging;

mod datetime;
mod error;
pub mod fmt;
mod local;
mod utc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_sync_copy() {
        fn assert_traits<T: Send + Sync + Copy + 'static>() {}

        assert_traits::<LocalDatetime>();
        assert_traits::<UtcDatetime>();
        assert_traits::<Equality>();
    }

    #[test]
    fn logging_does_not_change_behavior() {
        let _ = env_logger::try_init();

        let dt = UtcDatetime::from_iso_format("2024-06-19T15:22:45+05:30")
            .unwrap();
        assert_eq!(dt, UtcDatetime::at(2024, 6, 19, 9, 52, 45, 0).unwrap());
        let local = LocalDatetime::now();
        assert!(local.strftime("%H %z").unwrap_err().is_directive());
    }
}
