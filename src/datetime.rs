use core::{any::Any, cmp::Ordering};

use alloc::string::String;

use jiff::civil::DateTime;

use crate::{
    error::{err, Error},
    fmt::{iso::IsoDisplay, IsoFormat},
};

/// The year of the earliest datetime supported by this crate.
pub(crate) const MIN_YEAR: i16 = 1;
/// The year of the latest datetime supported by this crate.
pub(crate) const MAX_YEAR: i16 = 9999;

/// The behavior shared by [`LocalDatetime`](crate::LocalDatetime) and
/// [`UtcDatetime`](crate::UtcDatetime).
///
/// This trait is sealed. It cannot be implemented outside of this crate, and
/// since it is a trait, there is no way to create a value of "just" a
/// `Datetime`. Every value is always one of the two concrete types.
///
/// Both concrete types also provide most of these operations as inherent
/// methods. Importing this trait is only necessary for code that is generic
/// over both types, and for [`Datetime::equals`], [`Datetime::compare`] and
/// [`Datetime::from_repr`].
///
/// # Example
///
/// ```
/// use fourth::{Datetime, LocalDatetime, UtcDatetime};
///
/// fn first_of_month<D: Datetime>(dt: D) -> Result<D, fourth::Error> {
///     D::at(dt.year(), dt.month(), 1, 0, 0, 0, 0)
/// }
///
/// let dt = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;
/// assert_eq!(first_of_month(dt)?.to_string(), "2024-06-01T00:00:00.000000");
///
/// let dt = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;
/// assert_eq!(
///     first_of_month(dt)?.to_string(),
///     "2024-06-01T00:00:00.000000+00:00",
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Datetime:
    sealed::Sealed
    + Copy
    + Eq
    + Ord
    + core::hash::Hash
    + core::fmt::Debug
    + core::fmt::Display
    + core::str::FromStr<Err = Error>
    + 'static
{
    /// The earliest datetime supported by this type.
    const MIN: Self;
    /// The latest datetime supported by this type.
    const MAX: Self;

    /// Creates a new datetime from its fields.
    ///
    /// This returns an error if any field is out of range, or if the
    /// fields don't describe a real calendar date.
    fn at(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        microsecond: i32,
    ) -> Result<Self, Error>;

    /// Returns the current datetime, truncated to microsecond precision.
    fn now() -> Self;

    /// Parses an ISO 8601 datetime.
    fn from_iso_format(input: &str) -> Result<Self, Error>;

    /// Parses `input` according to the `strptime` style `format` string.
    fn strptime(input: &str, format: &str) -> Result<Self, Error>;

    /// Formats this datetime according to the `strftime` style `format`
    /// string.
    fn strftime(&self, format: &str) -> Result<String, Error>;

    /// Prints this datetime in ISO 8601 format with the given options.
    fn iso_format_with(&self, format: IsoFormat) -> String;

    /// Returns the civil datetime describing this value's fields. For
    /// UTC datetimes, this is the civil datetime in UTC.
    fn to_civil(&self) -> DateTime;

    /// Returns the year.
    fn year(&self) -> i16 {
        self.to_civil().year()
    }

    /// Returns the month, in the range `1..=12`.
    fn month(&self) -> i8 {
        self.to_civil().month()
    }

    /// Returns the day of the month, in the range `1..=31`.
    fn day(&self) -> i8 {
        self.to_civil().day()
    }

    /// Returns the hour, in the range `0..=23`.
    fn hour(&self) -> i8 {
        self.to_civil().hour()
    }

    /// Returns the minute, in the range `0..=59`.
    fn minute(&self) -> i8 {
        self.to_civil().minute()
    }

    /// Returns the second, in the range `0..=59`.
    fn second(&self) -> i8 {
        self.to_civil().second()
    }

    /// Returns the sub-second microsecond, in the range `0..=999_999`.
    fn microsecond(&self) -> i32 {
        self.to_civil().subsec_nanosecond() / 1_000
    }

    /// Prints this datetime in ISO 8601 format with a `T` separator and
    /// microsecond precision.
    fn iso_format(&self) -> String {
        self.iso_format_with(IsoFormat::new())
    }

    /// Compares this datetime with a value of any type for equality.
    ///
    /// The result is [`Equality::NotComparable`] when `other` is not a
    /// datetime of a compatible kind. For example, comparing a
    /// [`LocalDatetime`](crate::LocalDatetime) with a
    /// [`UtcDatetime`](crate::UtcDatetime), or with a `String`.
    ///
    /// `other` is matched by its concrete type, so pass a reference to the
    /// value itself. A reference to a reference, such as a
    /// `&&'static UtcDatetime`, is never comparable.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::{Datetime, Equality, LocalDatetime, UtcDatetime};
    ///
    /// let local = LocalDatetime::at(2024, 6, 19, 0, 0, 0, 0)?;
    /// let utc = UtcDatetime::at(2024, 6, 19, 0, 0, 0, 0)?;
    ///
    /// assert_eq!(local.equals(&local), Equality::Equal);
    /// assert_eq!(local.equals(&local.to_jiff()), Equality::Equal);
    /// assert_eq!(local.equals(&utc), Equality::NotComparable);
    /// assert_eq!(utc.equals(&local), Equality::NotComparable);
    /// assert_eq!(utc.equals(&"2024-06-19"), Equality::NotComparable);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn equals(&self, other: &dyn Any) -> Equality {
        match Self::comparable(other) {
            None => Equality::NotComparable,
            Some(dt) if dt == self.to_civil() => Equality::Equal,
            Some(_) => Equality::NotEqual,
        }
    }

    /// Orders this datetime relative to a value of any type.
    ///
    /// This returns `None` when `other` is not comparable. See
    /// [`Datetime::equals`] for which values are comparable, and for why
    /// `other` must not be a reference to a reference.
    fn compare(&self, other: &dyn Any) -> Option<Ordering> {
        Self::comparable(other).map(|dt| self.to_civil().cmp(&dt))
    }

    /// Parses the `Debug` representation of a datetime of this type.
    ///
    /// The representation has the form
    /// `TypeName::at(year, month, day, hour, minute, second, microsecond)`,
    /// which is exactly the call that reconstructs the value.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::{Datetime, UtcDatetime};
    ///
    /// let dt = UtcDatetime::at(2008, 1, 14, 8, 46, 40, 5)?;
    /// let repr = format!("{dt:?}");
    /// assert_eq!(repr, "UtcDatetime::at(2008, 1, 14, 8, 46, 40, 5)");
    /// assert_eq!(UtcDatetime::from_repr(&repr)?, dt);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_repr(repr: &str) -> Result<Self, Error> {
        let args = repr
            .strip_prefix(Self::NAME)
            .and_then(|rest| rest.strip_prefix("::at("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                err!(
                    "expected representation of the form \
                     `{name}::at(...)`, but found {repr:?}",
                    name = Self::NAME,
                )
            })?;
        let mut fields = args.split(',').map(str::trim);
        let mut next = |what: &'static str| {
            fields.next().ok_or_else(|| {
                err!("missing {what} argument in representation {repr:?}")
            })
        };
        let year = parse_repr_field(next("year")?, "year")?;
        let month = parse_repr_field(next("month")?, "month")?;
        let day = parse_repr_field(next("day")?, "day")?;
        let hour = parse_repr_field(next("hour")?, "hour")?;
        let minute = parse_repr_field(next("minute")?, "minute")?;
        let second = parse_repr_field(next("second")?, "second")?;
        let microsecond =
            parse_repr_field(next("microsecond")?, "microsecond")?;
        if fields.next().is_some() {
            return Err(err!(
                "too many arguments in representation {repr:?}",
            ));
        }
        Self::at(year, month, day, hour, minute, second, microsecond)
    }
}

/// The outcome of comparing two values for equality when they might not be
/// comparable at all.
///
/// This is returned by [`Datetime::equals`]. The `PartialEq` impls in this
/// crate fold `NotComparable` into `false`, which is what
/// [`Equality::is_equal`] does too. Use [`Equality::to_option`] to keep the
/// distinction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Equality {
    /// Both values are comparable and represent the same datetime.
    Equal,
    /// Both values are comparable but represent different datetimes.
    NotEqual,
    /// The values cannot be compared. For example, because one of them has
    /// an offset and the other doesn't.
    NotComparable,
}

impl Equality {
    /// Returns true only when this is `Equality::Equal`.
    pub fn is_equal(self) -> bool {
        self == Equality::Equal
    }

    /// Returns `None` when the values weren't comparable, and whether they
    /// were equal otherwise.
    pub fn to_option(self) -> Option<bool> {
        match self {
            Equality::Equal => Some(true),
            Equality::NotEqual => Some(false),
            Equality::NotComparable => None,
        }
    }
}

pub(crate) mod sealed {
    use core::any::Any;

    use jiff::civil::DateTime;

    pub trait Sealed {
        /// The type name used in the `Debug` representation.
        const NAME: &'static str;

        /// Returns the civil datetime to compare against when `other` is
        /// comparable with this type. For aware values, this is the civil
        /// datetime in UTC.
        fn comparable(other: &dyn Any) -> Option<DateTime>;
    }
}

/// Checks that `dt` is within the range and precision supported by this
/// crate.
pub(crate) fn check_civil(dt: DateTime) -> Result<DateTime, Error> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&dt.year()) {
        return Err(Error::range("year", dt.year(), MIN_YEAR, MAX_YEAR));
    }
    let nanosecond = dt.subsec_nanosecond() % 1_000;
    if nanosecond != 0 {
        return Err(Error::range("sub-microsecond nanosecond", nanosecond, 0, 0));
    }
    Ok(dt)
}

/// Builds a civil datetime from fields, validating them against Jiff's
/// calendar and this crate's range.
pub(crate) fn civil_at(
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    microsecond: i32,
) -> Result<DateTime, Error> {
    if !(0..=999_999).contains(&microsecond) {
        return Err(Error::range("microsecond", microsecond, 0, 999_999));
    }
    let dt = DateTime::new(
        year,
        month,
        day,
        hour,
        minute,
        second,
        microsecond * 1_000,
    )
    .map_err(Error::calendar)?;
    check_civil(dt)
}

/// Drops any sub-microsecond precision from `dt`.
pub(crate) fn truncate_to_microsecond(dt: DateTime) -> DateTime {
    let nanosecond = dt.subsec_nanosecond();
    dt.with()
        .subsec_nanosecond(nanosecond - (nanosecond % 1_000))
        .build()
        .expect("truncating the sub-second nanosecond is always valid")
}

/// Prints `dt` as ISO 8601, with a `+00:00` suffix when `utc` is true.
pub(crate) fn iso_display(
    dt: DateTime,
    format: IsoFormat,
    utc: bool,
) -> IsoDisplay {
    IsoDisplay { format, datetime: dt, utc }
}

/// Writes the `Debug` representation of `dt` for the type named `name`.
pub(crate) fn fmt_repr(
    name: &str,
    dt: DateTime,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    write!(
        f,
        "{name}::at({}, {}, {}, {}, {}, {}, {})",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.subsec_nanosecond() / 1_000,
    )
}

/// Parses a single integer argument of a `Debug` representation.
fn parse_repr_field<T: core::str::FromStr>(
    arg: &str,
    what: &'static str,
) -> Result<T, Error> {
    arg.parse().map_err(|_| {
        err!("invalid {what} {arg:?} in datetime representation")
    })
}
