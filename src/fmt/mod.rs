/*!
Configuration and support routines for printing and parsing datetimes.

The ISO 8601 printer is configured with an [`IsoFormat`], which bundles a
separator between the date and the time with a [`Timespec`] controlling how
much of the time is printed. The default is `T` and
[`Timespec::Microseconds`], which never loses information and is therefore
what [`Display`](core::fmt::Display) and serialization use.

The `strftime` and `strptime` style routines on
[`LocalDatetime`](crate::LocalDatetime) and
[`UtcDatetime`](crate::UtcDatetime) use Jiff's
[`strtime`](jiff::fmt::strtime) module for the directives themselves. The
only thing this crate adds is a check that a local datetime is never asked to
print a time zone it doesn't have.

# Example

```
use fourth::{fmt::{IsoFormat, Timespec}, UtcDatetime};

let dt = UtcDatetime::at(2024, 6, 19, 15, 22, 45, 123_456)?;
assert_eq!(dt.iso_format(), "2024-06-19T15:22:45.123456+00:00");

let format = IsoFormat::new().separator(' ').timespec(Timespec::Minutes);
assert_eq!(dt.iso_format_with(format), "2024-06-19 15:22+00:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::error::{err, Error};

pub(crate) mod directive;
pub(crate) mod iso;
#[cfg(feature = "serde")]
pub(crate) mod serde;

/// The result of parsing a value out of a string.
///
/// The remaining `input` is whatever follows the parsed `value`.
#[derive(Debug)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i str,
}

/// How much of the time component to include when printing an ISO 8601
/// datetime.
///
/// Each variant has a lowercase name like `milliseconds`. This type parses
/// from, and displays as, those names.
///
/// # Example
///
/// ```
/// use fourth::{fmt::{IsoFormat, Timespec}, LocalDatetime};
///
/// let dt = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 123_456)?;
/// let timespec: Timespec = "milliseconds".parse()?;
/// assert_eq!(
///     dt.iso_format_with(IsoFormat::new().timespec(timespec)),
///     "2024-06-19T15:22:45.123",
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Timespec {
    /// Print seconds when the microsecond is zero, and microseconds
    /// otherwise.
    Auto,
    /// Print only the hour.
    Hours,
    /// Print the hour and minute.
    Minutes,
    /// Print the hour, minute and second.
    Seconds,
    /// Print the hour, minute, second and millisecond. Microseconds are
    /// truncated.
    Milliseconds,
    /// Print the hour, minute, second and microsecond.
    #[default]
    Microseconds,
}

impl Timespec {
    /// Returns the name of this timespec, as accepted by its `FromStr`
    /// implementation.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Timespec::Auto => "auto",
            Timespec::Hours => "hours",
            Timespec::Minutes => "minutes",
            Timespec::Seconds => "seconds",
            Timespec::Milliseconds => "milliseconds",
            Timespec::Microseconds => "microseconds",
        }
    }

    /// Resolves `Auto` into a concrete timespec for the given sub-second
    /// microsecond value.
    fn resolve(self, microsecond: i32) -> Timespec {
        match self {
            Timespec::Auto if microsecond == 0 => Timespec::Seconds,
            Timespec::Auto => Timespec::Microseconds,
            timespec => timespec,
        }
    }
}

impl core::fmt::Display for Timespec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Timespec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Timespec, Error> {
        let timespec = match s {
            "auto" => Timespec::Auto,
            "hours" => Timespec::Hours,
            "minutes" => Timespec::Minutes,
            "seconds" => Timespec::Seconds,
            "milliseconds" => Timespec::Milliseconds,
            "microseconds" => Timespec::Microseconds,
            unknown => {
                return Err(err!(
                    "unknown timespec {unknown:?}, expected one of \
                     auto, hours, minutes, seconds, milliseconds \
                     or microseconds",
                ))
            }
        };
        Ok(timespec)
    }
}

/// Options for printing a datetime in ISO 8601 format.
///
/// This is a small builder. Every method takes and returns the options by
/// value, so a configuration can be stored in a `const`:
///
/// ```
/// use fourth::{fmt::{IsoFormat, Timespec}, LocalDatetime};
///
/// const LOG_FORMAT: IsoFormat =
///     IsoFormat::new().separator(' ').timespec(Timespec::Seconds);
///
/// let dt = LocalDatetime::at(2024, 6, 19, 15, 22, 45, 999_999)?;
/// assert_eq!(dt.iso_format_with(LOG_FORMAT), "2024-06-19 15:22:45");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IsoFormat {
    separator: char,
    timespec: Timespec,
}

impl IsoFormat {
    /// Creates the default options: a `T` separator and microsecond
    /// precision.
    pub const fn new() -> IsoFormat {
        IsoFormat { separator: 'T', timespec: Timespec::Microseconds }
    }

    /// Sets the character written between the date and the time.
    pub const fn separator(self, separator: char) -> IsoFormat {
        IsoFormat { separator, ..self }
    }

    /// Sets how much of the time is written.
    pub const fn timespec(self, timespec: Timespec) -> IsoFormat {
        IsoFormat { timespec, ..self }
    }

    /// Returns the configured separator.
    pub fn get_separator(&self) -> char {
        self.separator
    }

    /// Returns the configured timespec.
    pub fn get_timespec(&self) -> Timespec {
        self.timespec
    }
}

impl Default for IsoFormat {
    fn default() -> IsoFormat {
        IsoFormat::new()
    }
}
