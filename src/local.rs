use core::{
    any::Any,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use alloc::string::String;

use jiff::{civil::DateTime, SignedDuration, Zoned};

use crate::{
    datetime::{self, sealed, Datetime},
    error::Error,
    fmt::{directive::find_time_zone_directive, iso, IsoFormat},
    utc::UtcDatetime,
};

/// A datetime without a time zone or offset.
///
/// A `LocalDatetime` is a calendar date and a wall clock time with
/// microsecond precision. It is a thin wrapper around a Jiff
/// [`civil::DateTime`](DateTime) with one extra guarantee: no construction
/// path ever silently drops offset information. Parsing an ISO 8601 string
/// or a `strptime` input that contains an offset is an error, and so is
/// formatting with a `strftime` directive that needs a time zone.
///
/// A `LocalDatetime` never compares equal to a [`UtcDatetime`]. It does
/// compare with a `civil::DateTime`, since both are naive.
///
/// # Example
///
/// ```
/// use fourth::{jiff::SignedDuration, LocalDatetime};
///
/// let dt = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 0)?;
/// assert_eq!(dt.to_string(), "2024-06-19T15:22:45.000000");
///
/// let later = dt + SignedDuration::from_hours(10);
/// assert_eq!(later, LocalDatetime::at(2024, 6, 20, 1, 22, 45, 0)?);
/// assert_eq!(later - dt, SignedDuration::from_hours(10));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalDatetime {
    dt: DateTime,
}

impl LocalDatetime {
    /// The earliest local datetime: `0001-01-01T00:00:00`.
    pub const MIN: LocalDatetime =
        LocalDatetime { dt: DateTime::constant(1, 1, 1, 0, 0, 0, 0) };

    /// The latest local datetime: `9999-12-31T23:59:59.999999`.
    pub const MAX: LocalDatetime = LocalDatetime {
        dt: DateTime::constant(9999, 12, 31, 23, 59, 59, 999_999_000),
    };

    /// Creates a new local datetime from its fields.
    ///
    /// # Errors
    ///
    /// This returns a range error when any field is out of bounds or when
    /// the fields don't form a real date. The year must be in `1..=9999`
    /// and the microsecond in `0..=999_999`.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// let dt = LocalDatetime::at(2024, 2, 29, 12, 0, 0, 500)?;
    /// assert_eq!(dt.microsecond(), 500);
    ///
    /// assert!(LocalDatetime::at(2023, 2, 29, 12, 0, 0, 0).is_err());
    /// assert!(LocalDatetime::at(2024, 1, 1, 0, 0, 0, 1_000_000).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn at(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        microsecond: i32,
    ) -> Result<LocalDatetime, Error> {
        let dt = datetime::civil_at(
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        )?;
        Ok(LocalDatetime { dt })
    }

    /// Creates a new local datetime at midnight on the given date.
    pub fn at_midnight(
        year: i16,
        month: i8,
        day: i8,
    ) -> Result<LocalDatetime, Error> {
        LocalDatetime::at(year, month, day, 0, 0, 0, 0)
    }

    /// Returns the current wall clock datetime in the system time zone.
    ///
    /// The time zone is used only to read the clock. The result carries no
    /// offset and is truncated to microsecond precision.
    pub fn now() -> LocalDatetime {
        let dt = datetime::truncate_to_microsecond(Zoned::now().datetime());
        trace!("read local wall clock as {dt}");
        LocalDatetime { dt }
    }

    /// Parses an ISO 8601 datetime without an offset.
    ///
    /// The time may be omitted, in which case it is midnight. Fractional
    /// seconds beyond microseconds are truncated.
    ///
    /// # Errors
    ///
    /// Besides the usual parse and range errors, this returns an error for
    /// which [`Error::is_tz_info`] is true if the input has an offset,
    /// including `Z`.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// let dt = LocalDatetime::from_iso_format("2024-06-19 15:22:45.123")?;
    /// assert_eq!(dt, LocalDatetime::at(2024, 6, 19, 15, 22, 45, 123_000)?);
    ///
    /// let err = LocalDatetime::from_iso_format("2024-06-19T15:22Z").unwrap_err();
    /// assert!(err.is_tz_info());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_iso_format(input: &str) -> Result<LocalDatetime, Error> {
        let parsed = iso::parse(input)?;
        if parsed.offset.is_some() {
            return Err(Error::contained_tz_info("from_iso_format"));
        }
        LocalDatetime::try_from(parsed.datetime)
    }

    /// Parses `input` according to the `strptime` style `format` string.
    ///
    /// Directives are interpreted by [`jiff::fmt::strtime`].
    ///
    /// # Errors
    ///
    /// This returns an error for which [`Error::is_tz_info`] is true when
    /// the parsed input includes an offset or a time zone name. When the
    /// input doesn't match `format`, the error reports
    /// [`Error::is_parse`].
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// let dt = LocalDatetime::strptime("19/06/2024 15:22", "%d/%m/%Y %H:%M")?;
    /// assert_eq!(dt, LocalDatetime::at(2024, 6, 19, 15, 22, 0, 0)?);
    ///
    /// let err = LocalDatetime::strptime(
    ///     "19/06/2024 15:22 +0200",
    ///     "%d/%m/%Y %H:%M %z",
    /// ).unwrap_err();
    /// assert!(err.is_tz_info());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strptime(input: &str, format: &str) -> Result<LocalDatetime, Error> {
        let tm = jiff::fmt::strtime::parse(format, input)
            .map_err(Error::strptime)?;
        // `%Q` can parse a time zone name without any offset.
        if tm.offset().is_some() || tm.iana_time_zone().is_some() {
            return Err(Error::contained_tz_info("strptime"));
        }
        let dt = datetime::truncate_to_microsecond(tm.to_datetime()?);
        LocalDatetime::try_from(dt)
    }

    /// Formats this datetime according to the `strftime` style `format`
    /// string.
    ///
    /// Directives are interpreted by [`jiff::fmt::strtime`]. `%%` is a
    /// literal `%`.
    ///
    /// # Errors
    ///
    /// A local datetime has no time zone, so a format string with a time
    /// zone directive (`%z`, `%Z` or `%Q`, with any flags) returns an error
    /// for which [`Error::is_directive`] is true. An escaped directive like
    /// `%%z` is fine.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// let dt = LocalDatetime::at_midnight(2030, 4, 5)?;
    /// assert_eq!(dt.strftime("%Y-%m-%d %%z")?, "2030-04-05 %z");
    /// assert!(dt.strftime("%Y-%m-%d %z").unwrap_err().is_directive());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(&self, format: &str) -> Result<String, Error> {
        if let Some(directive) = find_time_zone_directive(format) {
            debug!(
                "refusing to format local datetime {} with time zone \
                 directive {directive}",
                self.dt,
            );
            return Err(Error::directive("LocalDatetime", directive));
        }
        Ok(jiff::fmt::strtime::format(format, self.dt)?)
    }

    /// Prints this datetime in ISO 8601 format with a `T` separator and
    /// microsecond precision. This is the same as its `Display` output.
    pub fn iso_format(&self) -> String {
        self.iso_format_with(IsoFormat::new())
    }

    /// Prints this datetime in ISO 8601 format with the given options.
    pub fn iso_format_with(&self, format: IsoFormat) -> String {
        use alloc::string::ToString;

        datetime::iso_display(self.dt, format, false).to_string()
    }

    /// Returns the year, in the range `1..=9999`.
    #[inline]
    pub fn year(&self) -> i16 {
        self.dt.year()
    }

    /// Returns the month, in the range `1..=12`.
    #[inline]
    pub fn month(&self) -> i8 {
        self.dt.month()
    }

    /// Returns the day of the month.
    #[inline]
    pub fn day(&self) -> i8 {
        self.dt.day()
    }

    /// Returns the hour, in the range `0..=23`.
    #[inline]
    pub fn hour(&self) -> i8 {
        self.dt.hour()
    }

    /// Returns the minute.
    #[inline]
    pub fn minute(&self) -> i8 {
        self.dt.minute()
    }

    /// Returns the second. Leap seconds are not supported.
    #[inline]
    pub fn second(&self) -> i8 {
        self.dt.second()
    }

    /// Returns the fractional second as a number of microseconds.
    #[inline]
    pub fn microsecond(&self) -> i32 {
        self.dt.subsec_nanosecond() / 1_000
    }

    /// Returns the wrapped Jiff datetime.
    #[inline]
    pub fn to_jiff(&self) -> DateTime {
        self.dt
    }

    /// Adds a signed duration to this datetime.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is outside of
    /// [`LocalDatetime::MIN`] and [`LocalDatetime::MAX`], or when `duration`
    /// has sub-microsecond precision.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::{jiff::SignedDuration, LocalDatetime};
    ///
    /// let dt = LocalDatetime::at(2024, 12, 31, 23, 0, 0, 0)?;
    /// assert_eq!(
    ///     dt.checked_add(SignedDuration::from_mins(90))?,
    ///     LocalDatetime::at(2025, 1, 1, 0, 30, 0, 0)?,
    /// );
    /// assert!(LocalDatetime::MAX.checked_add(SignedDuration::from_micros(1)).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add(
        self,
        duration: SignedDuration,
    ) -> Result<LocalDatetime, Error> {
        let dt = self.dt.checked_add(duration).map_err(Error::calendar)?;
        LocalDatetime::try_from(dt)
    }

    /// Subtracts a signed duration from this datetime.
    ///
    /// This fails in the same cases as [`LocalDatetime::checked_add`].
    pub fn checked_sub(
        self,
        duration: SignedDuration,
    ) -> Result<LocalDatetime, Error> {
        let dt = self.dt.checked_sub(duration).map_err(Error::calendar)?;
        LocalDatetime::try_from(dt)
    }

    /// Returns the duration from `earlier` to this datetime. The result is
    /// negative when `earlier` is actually later.
    pub fn duration_since(self, earlier: LocalDatetime) -> SignedDuration {
        self.dt.duration_since(earlier.dt)
    }

    /// Returns the duration from this datetime to `later`. The result is
    /// negative when `later` is actually earlier.
    pub fn duration_until(self, later: LocalDatetime) -> SignedDuration {
        self.dt.duration_until(later.dt)
    }
}

impl sealed::Sealed for LocalDatetime {
    const NAME: &'static str = "LocalDatetime";

    fn comparable(other: &dyn Any) -> Option<DateTime> {
        if let Some(other) = other.downcast_ref::<LocalDatetime>() {
            return Some(other.dt);
        }
        other.downcast_ref::<DateTime>().copied()
    }
}

impl Datetime for LocalDatetime {
    const MIN: LocalDatetime = LocalDatetime::MIN;
    const MAX: LocalDatetime = LocalDatetime::MAX;

    fn at(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        microsecond: i32,
    ) -> Result<LocalDatetime, Error> {
        LocalDatetime::at(year, month, day, hour, minute, second, microsecond)
    }

    fn now() -> LocalDatetime {
        LocalDatetime::now()
    }

    fn from_iso_format(input: &str) -> Result<LocalDatetime, Error> {
        LocalDatetime::from_iso_format(input)
    }

    fn strptime(input: &str, format: &str) -> Result<LocalDatetime, Error> {
        LocalDatetime::strptime(input, format)
    }

    fn strftime(&self, format: &str) -> Result<String, Error> {
        LocalDatetime::strftime(self, format)
    }

    fn iso_format_with(&self, format: IsoFormat) -> String {
        LocalDatetime::iso_format_with(self, format)
    }

    fn to_civil(&self) -> DateTime {
        self.dt
    }
}

impl core::fmt::Display for LocalDatetime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let display = datetime::iso_display(self.dt, IsoFormat::new(), false);
        core::fmt::Display::fmt(&display, f)
    }
}

impl core::fmt::Debug for LocalDatetime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        datetime::fmt_repr("LocalDatetime", self.dt, f)
    }
}

impl core::str::FromStr for LocalDatetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<LocalDatetime, Error> {
        LocalDatetime::from_iso_format(s)
    }
}

/// Converts a Jiff datetime into a local datetime.
///
/// This fails with a range error when the year is outside of `1..=9999` or
/// when the datetime has sub-microsecond precision.
impl TryFrom<DateTime> for LocalDatetime {
    type Error = Error;

    fn try_from(dt: DateTime) -> Result<LocalDatetime, Error> {
        let dt = datetime::check_civil(dt)?;
        Ok(LocalDatetime { dt })
    }
}

impl From<LocalDatetime> for DateTime {
    fn from(dt: LocalDatetime) -> DateTime {
        dt.dt
    }
}

impl PartialEq<DateTime> for LocalDatetime {
    fn eq(&self, other: &DateTime) -> bool {
        self.dt == *other
    }
}

impl PartialEq<LocalDatetime> for DateTime {
    fn eq(&self, other: &LocalDatetime) -> bool {
        *self == other.dt
    }
}

impl PartialOrd<DateTime> for LocalDatetime {
    fn partial_cmp(&self, other: &DateTime) -> Option<core::cmp::Ordering> {
        Some(self.dt.cmp(other))
    }
}

impl PartialOrd<LocalDatetime> for DateTime {
    fn partial_cmp(
        &self,
        other: &LocalDatetime,
    ) -> Option<core::cmp::Ordering> {
        Some(self.cmp(&other.dt))
    }
}

/// A local datetime is never equal to a UTC datetime.
impl PartialEq<UtcDatetime> for LocalDatetime {
    fn eq(&self, _: &UtcDatetime) -> bool {
        false
    }
}

/// A local datetime cannot be ordered relative to a UTC datetime.
impl PartialOrd<UtcDatetime> for LocalDatetime {
    fn partial_cmp(&self, _: &UtcDatetime) -> Option<core::cmp::Ordering> {
        None
    }
}

/// Adds a signed duration to a local datetime.
///
/// This panics on overflow. To handle overflow without panics, use
/// [`LocalDatetime::checked_add`].
impl Add<SignedDuration> for LocalDatetime {
    type Output = LocalDatetime;

    #[inline]
    fn add(self, rhs: SignedDuration) -> LocalDatetime {
        self.checked_add(rhs)
            .expect("adding signed duration to local datetime overflowed")
    }
}

impl Add<LocalDatetime> for SignedDuration {
    type Output = LocalDatetime;

    #[inline]
    fn add(self, rhs: LocalDatetime) -> LocalDatetime {
        rhs + self
    }
}

impl AddAssign<SignedDuration> for LocalDatetime {
    #[inline]
    fn add_assign(&mut self, rhs: SignedDuration) {
        *self = *self + rhs;
    }
}

/// Subtracts a signed duration from a local datetime.
///
/// This panics on overflow. To handle overflow without panics, use
/// [`LocalDatetime::checked_sub`].
impl Sub<SignedDuration> for LocalDatetime {
    type Output = LocalDatetime;

    #[inline]
    fn sub(self, rhs: SignedDuration) -> LocalDatetime {
        self.checked_sub(rhs)
            .expect("subtracting signed duration from local datetime overflowed")
    }
}

impl SubAssign<SignedDuration> for LocalDatetime {
    #[inline]
    fn sub_assign(&mut self, rhs: SignedDuration) {
        *self = *self - rhs;
    }
}

/// Computes the duration between two local datetimes.
///
/// The duration is negative when `rhs` is later than `self`.
impl Sub for LocalDatetime {
    type Output = SignedDuration;

    #[inline]
    fn sub(self, rhs: LocalDatetime) -> SignedDuration {
        self.duration_since(rhs)
    }
}

impl Sub<DateTime> for LocalDatetime {
    type Output = SignedDuration;

    #[inline]
    fn sub(self, rhs: DateTime) -> SignedDuration {
        self.dt.duration_since(rhs)
    }
}

impl Sub<LocalDatetime> for DateTime {
    type Output = SignedDuration;

    #[inline]
    fn sub(self, rhs: LocalDatetime) -> SignedDuration {
        self.duration_since(rhs.dt)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocalDatetime {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocalDatetime {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LocalDatetime, D::Error> {
        use crate::fmt::serde::IsoVisitor;

        let visitor = IsoVisitor::new("an ISO 8601 datetime without offset");
        deserializer.deserialize_str(visitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalDatetime {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalDatetime {
        let year = i16::arbitrary(g).rem_euclid(9999) + 1;
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        let day = i8::arbitrary(g).rem_euclid(31) + 1;
        let hour = i8::arbitrary(g).rem_euclid(24);
        let minute = i8::arbitrary(g).rem_euclid(60);
        let second = i8::arbitrary(g).rem_euclid(60);
        let microsecond = i32::arbitrary(g).rem_euclid(1_000_000);
        // Clamp to the length of the month.
        let day = day.min(jiff::civil::date(year, month, 1).days_in_month());
        LocalDatetime::at(year, month, day, hour, minute, second, microsecond)
            .unwrap()
    }
}
