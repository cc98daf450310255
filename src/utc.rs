use core::{
    any::Any,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use alloc::string::String;

use jiff::{
    civil::DateTime,
    fmt::strtime::BrokenDownTime,
    tz::{Offset, TimeZone},
    SignedDuration, Timestamp, Zoned,
};

use crate::{
    datetime::{self, sealed, Datetime},
    error::Error,
    fmt::{directive, iso, IsoFormat},
    local::LocalDatetime,
};

/// The Unix timestamp, in seconds, of `0001-01-01T00:00:00Z`.
const MIN_SECOND: i64 = -62_135_596_800;
/// The Unix timestamp, in seconds, of `9999-12-31T23:59:59Z`.
const MAX_SECOND: i64 = 253_402_300_799;
/// The Unix epoch as a civil datetime in UTC.
const UNIX_EPOCH: DateTime = DateTime::constant(1970, 1, 1, 0, 0, 0, 0);

/// A datetime in UTC.
///
/// A `UtcDatetime` is an instant in time with microsecond precision, always
/// viewed in UTC. It stores the civil datetime at offset `+00:00`, which
/// lets it reach the last microsecond of year 9999. (A Jiff [`Timestamp`]
/// stops about a day earlier.) Conversions to `Timestamp` and [`Zoned`]
/// are fallible for that reason.
///
/// Every construction path requires offset information. Parsing an ISO 8601
/// string or a `strptime` input without an offset is an error. When the
/// input has an offset other than UTC, the datetime is converted to UTC
/// exactly. The original offset is not kept.
///
/// A `UtcDatetime` never compares equal to a
/// [`LocalDatetime`]. It does compare with a Jiff `Timestamp` and with a
/// Jiff `Zoned` in any time zone, since all of them identify an instant.
///
/// # Example
///
/// ```
/// use fourth::UtcDatetime;
///
/// let a = UtcDatetime::from_iso_format("2024-06-19T23:59:59+00:00")?;
/// let b = UtcDatetime::from_iso_format("2024-06-19T19:29:59-04:30")?;
/// assert_eq!(a, b);
/// assert_eq!(b.to_string(), "2024-06-19T23:59:59.000000+00:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct UtcDatetime {
    dt: DateTime,
}

impl UtcDatetime {
    /// The earliest UTC datetime: `0001-01-01T00:00:00+00:00`.
    pub const MIN: UtcDatetime =
        UtcDatetime { dt: DateTime::constant(1, 1, 1, 0, 0, 0, 0) };

    /// The latest UTC datetime: `9999-12-31T23:59:59.999999+00:00`.
    pub const MAX: UtcDatetime = UtcDatetime {
        dt: DateTime::constant(9999, 12, 31, 23, 59, 59, 999_999_000),
    };

    /// Creates a new UTC datetime from its fields.
    ///
    /// The fields are always interpreted in UTC.
    ///
    /// # Errors
    ///
    /// This fails in the same cases as
    /// [`LocalDatetime::at`](crate::LocalDatetime::at).
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::{jiff::SignedDuration, UtcDatetime};
    ///
    /// let dt = UtcDatetime::at_midnight(2020, 9, 5)?;
    /// assert_eq!(
    ///     dt + SignedDuration::from_hours(-18),
    ///     UtcDatetime::at(2020, 9, 4, 6, 0, 0, 0)?,
    /// );
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
    ) -> Result<UtcDatetime, Error> {
        let dt = datetime::civil_at(
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        )?;
        Ok(UtcDatetime { dt })
    }

    /// Creates a new UTC datetime at midnight on the given date.
    pub fn at_midnight(
        year: i16,
        month: i8,
        day: i8,
    ) -> Result<UtcDatetime, Error> {
        UtcDatetime::at(year, month, day, 0, 0, 0, 0)
    }

    /// Returns the current time, truncated to microsecond precision.
    pub fn now() -> UtcDatetime {
        let ts = Timestamp::now();
        trace!("read system clock as {ts}");
        let dt = datetime::truncate_to_microsecond(utc_civil(ts));
        UtcDatetime { dt }
    }

    /// Creates a UTC datetime from a whole number of seconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result would be outside of
    /// [`UtcDatetime::MIN`] and [`UtcDatetime::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// assert_eq!(
    ///     UtcDatetime::from_timestamp(1_200_300_400)?,
    ///     UtcDatetime::at(2008, 1, 14, 8, 46, 40, 0)?,
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_timestamp(second: i64) -> Result<UtcDatetime, Error> {
        if !(MIN_SECOND..=MAX_SECOND).contains(&second) {
            return Err(Error::range(
                "timestamp",
                second,
                MIN_SECOND,
                MAX_SECOND,
            ));
        }
        let dt = UNIX_EPOCH
            .checked_add(SignedDuration::from_secs(second))
            .map_err(Error::calendar)?;
        Ok(UtcDatetime { dt })
    }

    /// Creates a UTC datetime from a fractional number of seconds since the
    /// Unix epoch.
    ///
    /// The fractional part is rounded to the nearest microsecond, with ties
    /// rounding to even.
    ///
    /// # Errors
    ///
    /// This returns a range error when `second` isn't finite or when the
    /// result would be outside of [`UtcDatetime::MIN`] and
    /// [`UtcDatetime::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// assert_eq!(
    ///     UtcDatetime::from_timestamp_f64(1_200_300_400.25)?,
    ///     UtcDatetime::at(2008, 1, 14, 8, 46, 40, 250_000)?,
    /// );
    /// assert!(UtcDatetime::from_timestamp_f64(f64::NAN).unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_timestamp_f64(second: f64) -> Result<UtcDatetime, Error> {
        // Rounding the fraction can still step past the upper bound. That
        // case is caught by the final range check.
        if !second.is_finite()
            || second < MIN_SECOND as f64
            || second >= (MAX_SECOND + 1) as f64
        {
            return Err(Error::range_float(
                "timestamp",
                second,
                MIN_SECOND,
                MAX_SECOND,
            ));
        }
        let whole = second.trunc();
        let microsecond = ((second - whole) * 1_000_000.0).round_ties_even();
        // OK because `whole` is in range and `microsecond` is in the range
        // `-1_000_000..=1_000_000`.
        let total = (whole as i64) * 1_000_000 + microsecond as i64;
        let dt = UNIX_EPOCH
            .checked_add(SignedDuration::from_micros(total))
            .map_err(Error::calendar)?;
        UtcDatetime::from_civil(dt)
    }

    /// Parses an ISO 8601 datetime with an offset.
    ///
    /// The offset may be `Z` or a numeric offset like `-04:30`. Any offset
    /// other than UTC is used to convert the datetime to UTC.
    ///
    /// # Errors
    ///
    /// Besides the usual parse and range errors, this returns an error for
    /// which [`Error::is_tz_info`] is true if the input has no offset.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// let dt = UtcDatetime::from_iso_format("2024-06-19T15:22:45+02:00")?;
    /// assert_eq!(dt.iso_format(), "2024-06-19T13:22:45.000000+00:00");
    ///
    /// let err = UtcDatetime::from_iso_format("2024-06-19T15:22:45").unwrap_err();
    /// assert_eq!(err.to_string(), "from_iso_format: input didn't contain tz info");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_iso_format(input: &str) -> Result<UtcDatetime, Error> {
        let parsed = iso::parse(input)?;
        let Some(offset) = parsed.offset else {
            return Err(Error::missing_tz_info("from_iso_format"));
        };
        UtcDatetime::from_offset_datetime(parsed.datetime, offset)
    }

    /// Parses `input` according to the `strptime` style `format` string.
    ///
    /// Directives are interpreted by [`jiff::fmt::strtime`]. The input must
    /// contain an offset, usually via `%z`, or a time zone name via `%Q`.
    /// A time zone name is resolved with Jiff's time zone database, and the
    /// datetime is converted to UTC from whatever offset that zone had at
    /// the time.
    ///
    /// # Errors
    ///
    /// This returns an error for which [`Error::is_tz_info`] is true when
    /// the parsed input has neither an offset nor a time zone name. When
    /// the input doesn't match `format`, the error reports
    /// [`Error::is_parse`]. An unknown time zone name is also an error.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// let dt = UtcDatetime::strptime(
    ///     "19/06/2024 15:22 +0200",
    ///     "%d/%m/%Y %H:%M %z",
    /// )?;
    /// assert_eq!(dt, UtcDatetime::at(2024, 6, 19, 13, 22, 0, 0)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strptime(input: &str, format: &str) -> Result<UtcDatetime, Error> {
        let tm = jiff::fmt::strtime::parse(format, input)
            .map_err(Error::strptime)?;
        if tm.iana_time_zone().is_some() {
            let zdt = tm.to_zoned()?;
            debug!("normalized {zdt} to UTC");
            let dt = utc_civil(zdt.timestamp());
            return UtcDatetime::from_civil(
                datetime::truncate_to_microsecond(dt),
            );
        }
        let Some(offset) = tm.offset() else {
            return Err(Error::missing_tz_info("strptime"));
        };
        let dt = datetime::truncate_to_microsecond(tm.to_datetime()?);
        UtcDatetime::from_offset_datetime(dt, offset)
    }

    /// Formats this datetime according to the `strftime` style `format`
    /// string.
    ///
    /// Directives are interpreted by [`jiff::fmt::strtime`]. Every
    /// directive is available, and the time zone directives always render
    /// UTC: `%z` is `+0000`, while `%Z` and `%Q` are `UTC`.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// let dt = UtcDatetime::at_midnight(2030, 4, 5)?;
    /// assert_eq!(dt.strftime("%Y-%m-%d %z")?, "2030-04-05 +0000");
    /// assert_eq!(dt.strftime("%H:%M %Z")?, "00:00 UTC");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(&self, format: &str) -> Result<String, Error> {
        // Time zone names are written directly, since Jiff only looks them
        // up for values it can convert to a `Timestamp`.
        let format = directive::replace_time_zone_names(format, "UTC");
        let mut tm = BrokenDownTime::from(self.dt);
        tm.set_offset(Some(Offset::UTC));
        let mut buf = String::new();
        tm.format(&*format, &mut buf)?;
        Ok(buf)
    }

    /// Prints this datetime in ISO 8601 format with a `T` separator,
    /// microsecond precision and a `+00:00` offset. This is the same as its
    /// `Display` output.
    pub fn iso_format(&self) -> String {
        self.iso_format_with(IsoFormat::new())
    }

    /// Prints this datetime in ISO 8601 format with the given options. The
    /// `+00:00` offset is always included.
    pub fn iso_format_with(&self, format: IsoFormat) -> String {
        use alloc::string::ToString;

        datetime::iso_display(self.dt, format, true).to_string()
    }

    /// Returns the year in UTC.
    #[inline]
    pub fn year(&self) -> i16 {
        self.dt.year()
    }

    /// Returns the month in UTC.
    #[inline]
    pub fn month(&self) -> i8 {
        self.dt.month()
    }

    /// Returns the day of the month in UTC.
    #[inline]
    pub fn day(&self) -> i8 {
        self.dt.day()
    }

    /// Returns the hour in UTC.
    #[inline]
    pub fn hour(&self) -> i8 {
        self.dt.hour()
    }

    /// Returns the minute in UTC.
    #[inline]
    pub fn minute(&self) -> i8 {
        self.dt.minute()
    }

    /// Returns the second in UTC.
    #[inline]
    pub fn second(&self) -> i8 {
        self.dt.second()
    }

    /// Returns the fractional second as a number of microseconds.
    #[inline]
    pub fn microsecond(&self) -> i32 {
        self.dt.subsec_nanosecond() / 1_000
    }

    /// Returns the civil datetime in UTC.
    #[inline]
    pub fn to_civil(&self) -> DateTime {
        self.dt
    }

    /// Returns this datetime as a Jiff timestamp.
    ///
    /// # Errors
    ///
    /// This returns a range error for datetimes later than
    /// `9999-12-30T22:00:00+00:00`, which is the latest instant a
    /// `Timestamp` can represent.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// let dt = UtcDatetime::from_timestamp(1_200_300_400)?;
    /// assert_eq!(dt.to_timestamp()?.as_second(), 1_200_300_400);
    /// assert!(UtcDatetime::MAX.to_timestamp().unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_timestamp(&self) -> Result<Timestamp, Error> {
        Offset::UTC.to_timestamp(self.dt).map_err(Error::calendar)
    }

    /// Returns this datetime as a Jiff zoned datetime in the UTC time zone.
    ///
    /// This fails in the same cases as [`UtcDatetime::to_timestamp`].
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// let zdt = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 0)?.to_zoned()?;
    /// assert_eq!(zdt.to_string(), "2024-06-19T15:22:45+00:00[UTC]");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_zoned(&self) -> Result<Zoned, Error> {
        Ok(self.to_timestamp()?.to_zoned(TimeZone::UTC))
    }

    /// Adds a signed duration to this datetime.
    ///
    /// # Errors
    ///
    /// This returns a range error when the result is outside of
    /// [`UtcDatetime::MIN`] and [`UtcDatetime::MAX`], or when `duration` has
    /// sub-microsecond precision.
    pub fn checked_add(
        self,
        duration: SignedDuration,
    ) -> Result<UtcDatetime, Error> {
        let dt = self.dt.checked_add(duration).map_err(Error::calendar)?;
        UtcDatetime::from_civil(dt)
    }

    /// Subtracts a signed duration from this datetime.
    ///
    /// This fails in the same cases as [`UtcDatetime::checked_add`].
    pub fn checked_sub(
        self,
        duration: SignedDuration,
    ) -> Result<UtcDatetime, Error> {
        let dt = self.dt.checked_sub(duration).map_err(Error::calendar)?;
        UtcDatetime::from_civil(dt)
    }

    /// Returns the duration from `earlier` to this datetime. The result is
    /// negative when `earlier` is actually later.
    pub fn duration_since(self, earlier: UtcDatetime) -> SignedDuration {
        self.dt.duration_since(earlier.dt)
    }

    /// Returns the duration from this datetime to `later`. The result is
    /// negative when `later` is actually earlier.
    pub fn duration_until(self, later: UtcDatetime) -> SignedDuration {
        self.dt.duration_until(later.dt)
    }

    /// Wraps a civil datetime that is already in UTC, after checking its
    /// range and precision.
    fn from_civil(dt: DateTime) -> Result<UtcDatetime, Error> {
        Ok(UtcDatetime { dt: datetime::check_civil(dt)? })
    }

    /// Converts a civil datetime at the given offset into a UTC datetime.
    ///
    /// This is civil arithmetic, so it works right up to the end of year
    /// 9999 where a `Timestamp` can't go.
    fn from_offset_datetime(
        dt: DateTime,
        offset: Offset,
    ) -> Result<UtcDatetime, Error> {
        if offset == Offset::UTC {
            return UtcDatetime::from_civil(dt);
        }
        let shift = SignedDuration::from_secs(i64::from(offset.seconds()));
        let utc = dt.checked_sub(shift).map_err(Error::calendar)?;
        debug!("normalized {dt} at offset {offset} to {utc} in UTC");
        UtcDatetime::from_civil(utc)
    }
}

impl sealed::Sealed for UtcDatetime {
    const NAME: &'static str = "UtcDatetime";

    fn comparable(other: &dyn Any) -> Option<DateTime> {
        if let Some(other) = other.downcast_ref::<UtcDatetime>() {
            Some(other.dt)
        } else if let Some(&ts) = other.downcast_ref::<Timestamp>() {
            Some(utc_civil(ts))
        } else if let Some(zdt) = other.downcast_ref::<Zoned>() {
            Some(utc_civil(zdt.timestamp()))
        } else {
            None
        }
    }
}

impl Datetime for UtcDatetime {
    const MIN: UtcDatetime = UtcDatetime::MIN;
    const MAX: UtcDatetime = UtcDatetime::MAX;

    fn at(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        microsecond: i32,
    ) -> Result<UtcDatetime, Error> {
        UtcDatetime::at(year, month, day, hour, minute, second, microsecond)
    }

    fn now() -> UtcDatetime {
        UtcDatetime::now()
    }

    fn from_iso_format(input: &str) -> Result<UtcDatetime, Error> {
        UtcDatetime::from_iso_format(input)
    }

    fn strptime(input: &str, format: &str) -> Result<UtcDatetime, Error> {
        UtcDatetime::strptime(input, format)
    }

    fn strftime(&self, format: &str) -> Result<String, Error> {
        UtcDatetime::strftime(self, format)
    }

    fn iso_format_with(&self, format: IsoFormat) -> String {
        UtcDatetime::iso_format_with(self, format)
    }

    fn to_civil(&self) -> DateTime {
        self.dt
    }
}

impl core::fmt::Display for UtcDatetime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let display =
            datetime::iso_display(self.dt, IsoFormat::new(), true);
        core::fmt::Display::fmt(&display, f)
    }
}

impl core::fmt::Debug for UtcDatetime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        datetime::fmt_repr("UtcDatetime", self.dt, f)
    }
}

impl core::str::FromStr for UtcDatetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<UtcDatetime, Error> {
        UtcDatetime::from_iso_format(s)
    }
}

/// Hashes the same as the equal Jiff `Timestamp`, for every value that has
/// one.
impl core::hash::Hash for UtcDatetime {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        match Offset::UTC.to_timestamp(self.dt) {
            Ok(ts) => ts.hash(state),
            Err(_) => self.dt.hash(state),
        }
    }
}

/// Converts a Jiff timestamp into a UTC datetime.
///
/// This fails with a range error when the timestamp is outside of
/// [`UtcDatetime::MIN`] and [`UtcDatetime::MAX`] or when it has
/// sub-microsecond precision.
impl TryFrom<Timestamp> for UtcDatetime {
    type Error = Error;

    fn try_from(ts: Timestamp) -> Result<UtcDatetime, Error> {
        UtcDatetime::from_civil(utc_civil(ts))
    }
}

/// Converts a Jiff zoned datetime into a UTC datetime, discarding its time
/// zone.
impl<'a> TryFrom<&'a Zoned> for UtcDatetime {
    type Error = Error;

    fn try_from(zdt: &'a Zoned) -> Result<UtcDatetime, Error> {
        if zdt.offset() != Offset::UTC {
            debug!("normalized {zdt} to UTC");
        }
        UtcDatetime::try_from(zdt.timestamp())
    }
}

impl TryFrom<Zoned> for UtcDatetime {
    type Error = Error;

    fn try_from(zdt: Zoned) -> Result<UtcDatetime, Error> {
        UtcDatetime::try_from(&zdt)
    }
}

/// Converts a UTC datetime into a Jiff timestamp.
///
/// This fails in the same cases as [`UtcDatetime::to_timestamp`].
impl TryFrom<UtcDatetime> for Timestamp {
    type Error = Error;

    fn try_from(dt: UtcDatetime) -> Result<Timestamp, Error> {
        dt.to_timestamp()
    }
}

impl PartialEq<Timestamp> for UtcDatetime {
    fn eq(&self, other: &Timestamp) -> bool {
        self.dt == utc_civil(*other)
    }
}

impl PartialEq<UtcDatetime> for Timestamp {
    fn eq(&self, other: &UtcDatetime) -> bool {
        utc_civil(*self) == other.dt
    }
}

impl PartialOrd<Timestamp> for UtcDatetime {
    fn partial_cmp(&self, other: &Timestamp) -> Option<core::cmp::Ordering> {
        Some(self.dt.cmp(&utc_civil(*other)))
    }
}

impl PartialOrd<UtcDatetime> for Timestamp {
    fn partial_cmp(
        &self,
        other: &UtcDatetime,
    ) -> Option<core::cmp::Ordering> {
        Some(utc_civil(*self).cmp(&other.dt))
    }
}

/// Compares the instant of a zoned datetime, in any time zone.
impl PartialEq<Zoned> for UtcDatetime {
    fn eq(&self, other: &Zoned) -> bool {
        self.dt == utc_civil(other.timestamp())
    }
}

impl PartialEq<UtcDatetime> for Zoned {
    fn eq(&self, other: &UtcDatetime) -> bool {
        utc_civil(self.timestamp()) == other.dt
    }
}

impl PartialOrd<Zoned> for UtcDatetime {
    fn partial_cmp(&self, other: &Zoned) -> Option<core::cmp::Ordering> {
        Some(self.dt.cmp(&utc_civil(other.timestamp())))
    }
}

impl PartialOrd<UtcDatetime> for Zoned {
    fn partial_cmp(
        &self,
        other: &UtcDatetime,
    ) -> Option<core::cmp::Ordering> {
        Some(utc_civil(self.timestamp()).cmp(&other.dt))
    }
}

/// A UTC datetime is never equal to a local datetime.
impl PartialEq<LocalDatetime> for UtcDatetime {
    fn eq(&self, _: &LocalDatetime) -> bool {
        false
    }
}

/// A UTC datetime cannot be ordered relative to a local datetime.
impl PartialOrd<LocalDatetime> for UtcDatetime {
    fn partial_cmp(&self, _: &LocalDatetime) -> Option<core::cmp::Ordering> {
        None
    }
}

/// Adds a signed duration to a UTC datetime.
///
/// This panics on overflow. To handle overflow without panics, use
/// [`UtcDatetime::checked_add`].
impl Add<SignedDuration> for UtcDatetime {
    type Output = UtcDatetime;

    #[inline]
    fn add(self, rhs: SignedDuration) -> UtcDatetime {
        self.checked_add(rhs)
            .expect("adding signed duration to UTC datetime overflowed")
    }
}

impl Add<UtcDatetime> for SignedDuration {
    type Output = UtcDatetime;

    #[inline]
    fn add(self, rhs: UtcDatetime) -> UtcDatetime {
        rhs + self
    }
}

impl AddAssign<SignedDuration> for UtcDatetime {
    #[inline]
    fn add_assign(&mut self, rhs: SignedDuration) {
        *self = *self + rhs;
    }
}

/// Subtracts a signed duration from a UTC datetime.
///
/// This panics on overflow. To handle overflow without panics, use
/// [`UtcDatetime::checked_sub`].
impl Sub<SignedDuration> for UtcDatetime {
    type Output = UtcDatetime;

    #[inline]
    fn sub(self, rhs: SignedDuration) -> UtcDatetime {
        self.checked_sub(rhs)
            .expect("subtracting signed duration from UTC datetime overflowed")
    }
}

impl SubAssign<SignedDuration> for UtcDatetime {
    #[inline]
    fn sub_assign(&mut self, rhs: SignedDuration) {
        *self = *self - rhs;
    }
}

/// Computes the duration between two UTC datetimes.
///
/// The duration is negative when `rhs` is later than `self`.
impl Sub for UtcDatetime {
    type Output = SignedDuration;

    #[inline]
    fn sub(self, rhs: UtcDatetime) -> SignedDuration {
        self.duration_since(rhs)
    }
}

impl Sub<Timestamp> for UtcDatetime {
    type Output = SignedDuration;

    #[inline]
    fn sub(self, rhs: Timestamp) -> SignedDuration {
        self.dt.duration_since(utc_civil(rhs))
    }
}

impl Sub<UtcDatetime> for Timestamp {
    type Output = SignedDuration;

    #[inline]
    fn sub(self, rhs: UtcDatetime) -> SignedDuration {
        utc_civil(self).duration_since(rhs.dt)
    }
}

/// Returns the civil datetime of `ts` in UTC.
///
/// Every `Timestamp` has one, even those outside of this crate's range.
fn utc_civil(ts: Timestamp) -> DateTime {
    Offset::UTC.to_datetime(ts)
}

#[cfg(feature = "serde")]
impl serde::Serialize for UtcDatetime {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UtcDatetime {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<UtcDatetime, D::Error> {
        use crate::fmt::serde::IsoVisitor;

        let visitor = IsoVisitor::new("an ISO 8601 datetime with offset");
        deserializer.deserialize_str(visitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for UtcDatetime {
    fn arbitrary(g: &mut quickcheck::Gen) -> UtcDatetime {
        let micros_in_range = (MAX_SECOND - MIN_SECOND + 1) * 1_000_000;
        let offset = i64::arbitrary(g).rem_euclid(micros_in_range);
        UtcDatetime::MIN
            .checked_add(SignedDuration::from_micros(offset))
            .unwrap()
    }
}
