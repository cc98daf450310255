/*!
Finds and rewrites time zone directives in `strftime` format strings.

A directive is introduced by a `%`, but `%%` is an escaped literal `%`. So
whether `%z` is a directive depends on how many `%` immediately precede the
`z`. This module scans runs of consecutive `%` one byte at a time: a run of
even length is entirely literal, while a run of odd length ends with a `%`
that starts a directive. That directive may carry flags, a width and colons
(as in `%-5:z`) before its conversion specifier.

The time zone specifiers are `z` (offset), `Z` (abbreviation) and `Q` (IANA
time zone identifier or offset).
*/

use alloc::{borrow::Cow, string::String};

/// Returns the first time zone directive in `format`, including its
/// leading `%`, flags, width and colons.
///
/// If `format` contains no live time zone directive, then this returns
/// `None`.
pub(crate) fn find_time_zone_directive(format: &str) -> Option<&str> {
    TimeZoneDirectives::new(format).next().map(|range| &format[range])
}

/// Replaces every live `%Z` and `%Q` directive in `format` with `name`.
///
/// Flags and widths on the replaced directives are dropped. Offset
/// directives (`%z`) are left alone. `name` must not contain a `%`.
pub(crate) fn replace_time_zone_names<'f>(
    format: &'f str,
    name: &str,
) -> Cow<'f, str> {
    let mut replaced = String::new();
    let mut last = 0;
    for range in TimeZoneDirectives::new(format) {
        if format.as_bytes()[range.end - 1] == b'z' {
            continue;
        }
        replaced.push_str(&format[last..range.start]);
        replaced.push_str(name);
        last = range.end;
    }
    if last == 0 {
        return Cow::Borrowed(format);
    }
    replaced.push_str(&format[last..]);
    Cow::Owned(replaced)
}

/// An iterator over the byte ranges of live time zone directives.
struct TimeZoneDirectives<'f> {
    bytes: &'f [u8],
    pos: usize,
}

impl<'f> TimeZoneDirectives<'f> {
    fn new(format: &'f str) -> TimeZoneDirectives<'f> {
        TimeZoneDirectives { bytes: format.as_bytes(), pos: 0 }
    }
}

impl<'f> Iterator for TimeZoneDirectives<'f> {
    type Item = core::ops::Range<usize>;

    fn next(&mut self) -> Option<core::ops::Range<usize>> {
        let bytes = self.bytes;
        let mut i = self.pos;
        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            let run_start = i;
            while i < bytes.len() && bytes[i] == b'%' {
                i += 1;
            }
            if (i - run_start) % 2 == 0 {
                continue;
            }
            // The last `%` in the run starts a directive.
            let start = i - 1;
            while i < bytes.len() && is_directive_modifier(bytes[i]) {
                i += 1;
            }
            match bytes.get(i) {
                Some(b'z' | b'Z' | b'Q') => {
                    self.pos = i + 1;
                    return Some(start..i + 1);
                }
                // A `%` here starts a new run, so leave it for the next
                // iteration.
                Some(b'%') => {}
                Some(_) => i += 1,
                None => {}
            }
        }
        self.pos = i;
        None
    }
}

/// Returns true for bytes that may appear between a `%` and its conversion
/// specifier: padding flags, case flags, a width and colons.
fn is_directive_modifier(byte: u8) -> bool {
    matches!(byte, b'-' | b'_' | b'0'..=b'9' | b'^' | b'#' | b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_directive() {
        assert_eq!(find_time_zone_directive(""), None);
        assert_eq!(find_time_zone_directive("%Y-%m-%d %H:%M:%S"), None);
        assert_eq!(find_time_zone_directive("zZQ"), None);
        assert_eq!(find_time_zone_directive("%"), None);
        assert_eq!(find_time_zone_directive("%%"), None);
        assert_eq!(find_time_zone_directive("%-"), None);
    }

    #[test]
    fn live_directives() {
        assert_eq!(find_time_zone_directive("%z"), Some("%z"));
        assert_eq!(find_time_zone_directive("%Z"), Some("%Z"));
        assert_eq!(find_time_zone_directive("%Q"), Some("%Q"));
        assert_eq!(find_time_zone_directive("%Y-%m-%d %z"), Some("%z"));
        assert_eq!(find_time_zone_directive("%H:%M %:z"), Some("%:z"));
        assert_eq!(find_time_zone_directive("%::z"), Some("%::z"));
        assert_eq!(find_time_zone_directive("%:Q"), Some("%:Q"));
        assert_eq!(find_time_zone_directive("%^Z"), Some("%^Z"));
        assert_eq!(find_time_zone_directive("%-10z"), Some("%-10z"));
    }

    #[test]
    fn escape_parity() {
        // Even runs are all literal.
        assert_eq!(find_time_zone_directive("%%z"), None);
        assert_eq!(find_time_zone_directive("%%Z"), None);
        assert_eq!(find_time_zone_directive("%%%%Z"), None);
        assert_eq!(find_time_zone_directive("%%%%%%z"), None);
        assert_eq!(find_time_zone_directive("%Y %%z %%Z"), None);

        // Odd runs end in a directive.
        assert_eq!(find_time_zone_directive("%%%Z"), Some("%Z"));
        assert_eq!(find_time_zone_directive("%%%%%Z"), Some("%Z"));
        assert_eq!(find_time_zone_directive("%%%%%%%z"), Some("%z"));
        assert_eq!(find_time_zone_directive("%%z %%%:z"), Some("%:z"));
    }

    #[test]
    fn directive_specifier_is_consumed() {
        // The `%` following `%-` starts its own run. Here it is escaped.
        assert_eq!(find_time_zone_directive("%-%%z"), None);
        assert_eq!(find_time_zone_directive("%-%z"), Some("%z"));
        // `%m` consumes the `m`, and the `z` after it is literal text.
        assert_eq!(find_time_zone_directive("%mz"), None);
        assert_eq!(find_time_zone_directive("%%mz"), None);
    }

    #[test]
    fn replace_names() {
        let replace = |format| replace_time_zone_names(format, "UTC");
        assert!(matches!(replace("%Y-%m-%d %z"), Cow::Borrowed(_)));
        assert_eq!(replace("%H:%M %Z"), "%H:%M UTC");
        assert_eq!(replace("%Q %:Q %z"), "UTC UTC %z");
        assert_eq!(replace("%^Z|%-5Z"), "UTC|UTC");
        // Escaped directives stay literal.
        assert_eq!(replace("%%Z %%%Z"), "%%Z %%UTC");
        assert_eq!(replace("%%%%Q"), "%%%%Q");
    }
}
