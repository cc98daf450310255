/*!
A printer and parser for the ISO 8601 datetime format used by this crate.

The printer writes `YYYY-MM-DD`, a separator and as much of
`HH:MM:SS.ffffff` as the [`Timespec`] asks for, followed by `+00:00` for
UTC datetimes.

The parser is more lenient than the printer. Its grammar is:

```text
datetime := date ( separator time )? offset?
date     := YYYY '-' MM '-' DD
time     := HH ( ':' MM ( ':' SS fraction? )? )?
fraction := ( '.' | ',' ) digit{1,9}
offset   := 'Z' | 'z' | sign HH ( ':'? MM ( ':' SS )? )?
```

where `separator` is any single character. Fractional seconds beyond
microsecond precision are truncated. The parser only reports whether an
offset was present. Deciding what to do with it is up to the caller.
*/

use jiff::{civil::DateTime, tz::Offset};

use crate::{
    error::{err, Error},
    fmt::{IsoFormat, Parsed, Timespec},
};

/// The pieces of a successfully parsed ISO 8601 datetime.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParsedIso {
    /// The civil datetime, truncated to microsecond precision.
    pub(crate) datetime: DateTime,
    /// The offset, if one was present in the input.
    pub(crate) offset: Option<Offset>,
}

/// Parses the entirety of `input` as an ISO 8601 datetime.
pub(crate) fn parse(input: &str) -> Result<ParsedIso, Error> {
    let Parsed { value: (year, month, day), input: rest } =
        parse_date(input)?;
    let mut time = (0, 0, 0, 0);
    let mut rest = rest;
    let mut separator = rest.chars();
    if separator.next().is_some() && !rest.starts_with(['+', '-', 'Z', 'z'])
    {
        let parsed = parse_time(separator.as_str())?;
        time = parsed.value;
        rest = parsed.input;
    }
    let Parsed { value: offset, input: rest } = parse_offset(rest)?;
    if !rest.is_empty() {
        return Err(err!(
            "parsed ISO 8601 datetime from {input:?}, but unparsed \
             input {rest:?} remains (expected no unparsed input)",
        ));
    }
    let (hour, minute, second, nanosecond) = time;
    let datetime =
        DateTime::new(year, month, day, hour, minute, second, nanosecond)
            .map_err(Error::calendar)?;
    Ok(ParsedIso { datetime, offset })
}

fn parse_date(input: &str) -> Result<Parsed<'_, (i16, i8, i8)>, Error> {
    let Parsed { value: year, input } = parse_digits(input, 4, "year")?;
    let input = parse_literal(input, '-', "year")?;
    let Parsed { value: month, input } = parse_digits(input, 2, "month")?;
    let input = parse_literal(input, '-', "month")?;
    let Parsed { value: day, input } = parse_digits(input, 2, "day")?;
    // OK because four digits always fit in an `i16` and two in an `i8`.
    let value = (year as i16, month as i8, day as i8);
    Ok(Parsed { value, input })
}

fn parse_time(input: &str) -> Result<Parsed<'_, (i8, i8, i8, i32)>, Error> {
    let Parsed { value: hour, input } = parse_digits(input, 2, "hour")?;
    let Some(input) = input.strip_prefix(':') else {
        return Ok(Parsed { value: (hour as i8, 0, 0, 0), input });
    };
    let Parsed { value: minute, input } = parse_digits(input, 2, "minute")?;
    let Some(input) = input.strip_prefix(':') else {
        return Ok(Parsed { value: (hour as i8, minute as i8, 0, 0), input });
    };
    let Parsed { value: second, input } = parse_digits(input, 2, "second")?;
    let Parsed { value: nanosecond, input } = parse_fraction(input)?;
    let value = (hour as i8, minute as i8, second as i8, nanosecond);
    Ok(Parsed { value, input })
}

/// Parses an optional fractional second and returns it as a number of
/// nanoseconds, truncated to microsecond precision.
fn parse_fraction(input: &str) -> Result<Parsed<'_, i32>, Error> {
    let Some(digits) = input.strip_prefix(['.', ',']) else {
        return Ok(Parsed { value: 0, input });
    };
    let len = digits.bytes().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 || len > 9 {
        return Err(err!(
            "expected between 1 and 9 digits for fractional second, \
             but found {len} in {input:?}",
        ));
    }
    let (fraction, rest) = digits.split_at(len);
    let mut nanosecond = 0i32;
    for b in fraction.bytes().chain(core::iter::repeat(b'0')).take(9) {
        nanosecond = nanosecond * 10 + i32::from(b - b'0');
    }
    Ok(Parsed { value: nanosecond - (nanosecond % 1_000), input: rest })
}

fn parse_offset(input: &str) -> Result<Parsed<'_, Option<Offset>>, Error> {
    if let Some(rest) = input.strip_prefix(['Z', 'z']) {
        return Ok(Parsed { value: Some(Offset::UTC), input: rest });
    }
    let sign = match input.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Ok(Parsed { value: None, input }),
    };
    let input = &input[1..];
    let Parsed { value: hours, input } =
        parse_digits(input, 2, "offset hours")?;
    let (extended, input) = match input.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let mut minutes = 0;
    let mut seconds = 0;
    let mut input = input;
    if extended || input.starts_with(|c: char| c.is_ascii_digit()) {
        let parsed = parse_digits(input, 2, "offset minutes")?;
        minutes = parsed.value;
        input = parsed.input;
        if extended {
            if let Some(rest) = input.strip_prefix(':') {
                let parsed = parse_digits(rest, 2, "offset seconds")?;
                seconds = parsed.value;
                input = parsed.input;
            }
        }
    }
    if hours > 23 {
        return Err(Error::range("offset hours", hours, 0, 23));
    }
    if minutes > 59 {
        return Err(Error::range("offset minutes", minutes, 0, 59));
    }
    if seconds > 59 {
        return Err(Error::range("offset seconds", seconds, 0, 59));
    }
    // OK because the components were range checked above, so the total
    // magnitude is less than 24 hours.
    let total = sign * (hours * 3_600 + minutes * 60 + seconds) as i32;
    let offset = Offset::from_seconds(total).map_err(Error::calendar)?;
    Ok(Parsed { value: Some(offset), input })
}

/// Parses exactly `count` ASCII digits from the beginning of `input`.
///
/// `what` is used in error messages to describe the field being parsed.
fn parse_digits<'i>(
    input: &'i str,
    count: usize,
    what: &'static str,
) -> Result<Parsed<'i, i64>, Error> {
    let bytes = input.as_bytes();
    if bytes.len() < count || !bytes[..count].iter().all(u8::is_ascii_digit)
    {
        return Err(err!(
            "expected {count} digit {what}, but found {input:?}",
        ));
    }
    let value = bytes[..count]
        .iter()
        .fold(0i64, |acc, &b| acc * 10 + i64::from(b - b'0'));
    Ok(Parsed { value, input: &input[count..] })
}

fn parse_literal<'i>(
    input: &'i str,
    expected: char,
    after: &'static str,
) -> Result<&'i str, Error> {
    input.strip_prefix(expected).ok_or_else(|| {
        err!("expected {expected:?} after {after}, but found {input:?}")
    })
}

/// A `Display` adapter that prints a civil datetime in ISO 8601 format.
///
/// When `utc` is true, a `+00:00` offset is appended.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IsoDisplay {
    pub(crate) format: IsoFormat,
    pub(crate) datetime: DateTime,
    pub(crate) utc: bool,
}

impl core::fmt::Display for IsoDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let dt = self.datetime;
        let microsecond = dt.subsec_nanosecond() / 1_000;
        write!(
            f,
            "{:04}-{:02}-{:02}{}{:02}",
            dt.year(),
            dt.month(),
            dt.day(),
            self.format.separator,
            dt.hour(),
        )?;
        match self.format.timespec.resolve(microsecond) {
            Timespec::Hours => {}
            Timespec::Minutes => write!(f, ":{:02}", dt.minute())?,
            Timespec::Seconds => {
                write!(f, ":{:02}:{:02}", dt.minute(), dt.second())?
            }
            Timespec::Milliseconds => write!(
                f,
                ":{:02}:{:02}.{:03}",
                dt.minute(),
                dt.second(),
                microsecond / 1_000,
            )?,
            Timespec::Microseconds | Timespec::Auto => write!(
                f,
                ":{:02}:{:02}.{:06}",
                dt.minute(),
                dt.second(),
                microsecond,
            )?,
        }
        if self.utc {
            f.write_str("+00:00")?;
        }
        Ok(())
    }
}
