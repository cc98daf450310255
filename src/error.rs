use alloc::boxed::Box;

/// Creates a new ad hoc error via `format_args!`.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::adhoc_from_args(format_args!($($tt)*))
    }}
}

pub(crate) use err;

/// An error that can occur in this crate.
///
/// Like Jiff, this crate uses a single error type for all of its fallible
/// operations. Since callers sometimes need to react differently to
/// different failures, a few predicates are provided:
///
/// * [`Error::is_tz_info`] reports that the offset information of the input
/// contradicts the datetime type being constructed. For example, parsing
/// `2025-01-01T00:00+05:00` into a [`LocalDatetime`](crate::LocalDatetime),
/// or parsing `2025-01-01T00:00` into a [`UtcDatetime`](crate::UtcDatetime).
/// * [`Error::is_range`] reports that a value is outside of the supported
/// range. This includes calendar validation failures reported by Jiff, like
/// a month of `13` or the 30th of February.
/// * [`Error::is_directive`] reports that a `strftime` format string asked
/// for a time zone on a datetime that doesn't have one.
/// * [`Error::is_parse`] reports that ISO 8601 (or representation) text was
/// malformed, or that `strptime` input didn't match its format.
///
/// Errors from Jiff that don't fall into any of the above (for example, an
/// unknown time zone name) are passed through. Every error that wraps one
/// from Jiff makes it available via [`std::error::Error::source`].
///
/// # Example
///
/// ```
/// use fourth::LocalDatetime;
///
/// let err = LocalDatetime::from_iso_format("2025-01-01T00:00+05:00").unwrap_err();
/// assert!(err.is_tz_info());
/// assert_eq!(err.to_string(), "from_iso_format: input contained tz info");
///
/// let err = LocalDatetime::at(2025, 13, 1, 0, 0, 0, 0).unwrap_err();
/// assert!(err.is_range());
/// ```
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Clone, Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Range(RangeError),
    FloatRange(FloatRangeError),
    TzInfo(TzInfoError),
    Directive(DirectiveError),
    Calendar(jiff::Error),
    Strptime(jiff::Error),
    Jiff(jiff::Error),
}

impl Error {
    /// Returns true when this error occurred because the presence (or
    /// absence) of an offset in the input contradicts the type being
    /// constructed.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::UtcDatetime;
    ///
    /// let err = UtcDatetime::from_iso_format("2025-01-01T00:00").unwrap_err();
    /// assert!(err.is_tz_info());
    /// ```
    pub fn is_tz_info(&self) -> bool {
        matches!(self.kind, ErrorKind::TzInfo(_))
    }

    /// Returns true when this error occurred because a value was out of
    /// range, including calendar validation failures.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// assert!(LocalDatetime::at(2025, 2, 29, 0, 0, 0, 0).unwrap_err().is_range());
    /// assert!(LocalDatetime::at(0, 1, 1, 0, 0, 0, 0).unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Range(_)
                | ErrorKind::FloatRange(_)
                | ErrorKind::Calendar(_)
        )
    }

    /// Returns true when this error occurred because a format string
    /// contained a time zone directive that cannot be satisfied.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// let dt = LocalDatetime::at_midnight(2030, 4, 5)?;
    /// assert!(dt.strftime("%Y-%m-%d %z").unwrap_err().is_directive());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_directive(&self) -> bool {
        matches!(self.kind, ErrorKind::Directive(_))
    }

    /// Returns true when this error occurred because ISO 8601 text (or the
    /// text of a `Debug` representation) could not be parsed, or because
    /// `strptime` failed to parse its input with the given format.
    ///
    /// # Example
    ///
    /// ```
    /// use fourth::LocalDatetime;
    ///
    /// assert!(LocalDatetime::from_iso_format("2024-06").unwrap_err().is_parse());
    /// let err = LocalDatetime::strptime("19/06/2024", "%Y-%m-%d").unwrap_err();
    /// assert!(err.is_parse());
    /// ```
    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Adhoc(_) | ErrorKind::Strptime(_))
    }
}

impl Error {
    /// Creates an error from an arbitrary `core::fmt::Arguments`.
    ///
    /// Ad hoc errors are only created by the parsers in this crate, which is
    /// why they are reported by `Error::is_parse`.
    #[cold]
    #[inline(never)]
    pub(crate) fn adhoc_from_args<'a>(
        message: core::fmt::Arguments<'a>,
    ) -> Error {
        let kind = ErrorKind::Adhoc(AdhocError::from_args(message));
        Error { kind }
    }

    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "year")
    #[cold]
    #[inline(never)]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        let err = RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        };
        Error { kind: ErrorKind::Range(err) }
    }

    /// Like `Error::range`, but for a floating point value. This is also
    /// used for values that aren't finite.
    #[cold]
    #[inline(never)]
    pub(crate) fn range_float(
        what: &'static str,
        given: f64,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        let err =
            FloatRangeError { what, given, min: min.into(), max: max.into() };
        Error { kind: ErrorKind::FloatRange(err) }
    }

    /// Creates a new error for an operation that received an offset when
    /// it required that there be none.
    #[cold]
    #[inline(never)]
    pub(crate) fn contained_tz_info(operation: &'static str) -> Error {
        let err = TzInfoError { operation, contained: true };
        Error { kind: ErrorKind::TzInfo(err) }
    }

    /// Creates a new error for an operation that required an offset but
    /// didn't get one.
    #[cold]
    #[inline(never)]
    pub(crate) fn missing_tz_info(operation: &'static str) -> Error {
        let err = TzInfoError { operation, contained: false };
        Error { kind: ErrorKind::TzInfo(err) }
    }

    /// Creates a new error for a `strftime` format string on a datetime of
    /// type `type_name` that contains the time zone `directive`.
    #[cold]
    #[inline(never)]
    pub(crate) fn directive(type_name: &'static str, directive: &str) -> Error {
        let err = DirectiveError { type_name, directive: directive.into() };
        Error { kind: ErrorKind::Directive(err) }
    }

    /// Wraps an error from Jiff's calendar validation. These are reported
    /// as range errors.
    pub(crate) fn calendar(err: jiff::Error) -> Error {
        Error { kind: ErrorKind::Calendar(err) }
    }

    /// Wraps an error from Jiff's `strptime` parser. These are reported as
    /// parse errors.
    pub(crate) fn strptime(err: jiff::Error) -> Error {
        Error { kind: ErrorKind::Strptime(err) }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind {
            ErrorKind::Adhoc(ref err) => {
                core::fmt::Display::fmt(&err.message, f)
            }
            ErrorKind::Range(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::FloatRange(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::TzInfo(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Directive(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Calendar(ref err)
            | ErrorKind::Strptime(ref err)
            | ErrorKind::Jiff(ref err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            ErrorKind::Calendar(ref err)
            | ErrorKind::Strptime(ref err)
            | ErrorKind::Jiff(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<jiff::Error> for Error {
    fn from(e: jiff::Error) -> Error {
        Error { kind: ErrorKind::Jiff(e) }
    }
}

/// A generic error message.
#[derive(Clone, Debug)]
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

#[derive(Clone, Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

#[derive(Clone, Debug)]
struct FloatRangeError {
    what: &'static str,
    given: f64,
    min: i128,
    max: i128,
}

impl core::fmt::Display for FloatRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let FloatRangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

#[derive(Clone, Debug)]
struct TzInfoError {
    operation: &'static str,
    contained: bool,
}

impl core::fmt::Display for TzInfoError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.contained {
            write!(f, "{}: input contained tz info", self.operation)
        } else {
            write!(f, "{}: input didn't contain tz info", self.operation)
        }
    }
}

#[derive(Clone, Debug)]
struct DirectiveError {
    type_name: &'static str,
    directive: Box<str>,
}

impl core::fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "strftime: format string contains time zone directive `{}`, \
             but {} has no tz info",
            self.directive, self.type_name,
        )
    }
}
