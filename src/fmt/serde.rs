/*!
Serde support shared by both datetime types.

Both types serialize as their ISO 8601 string at microsecond precision, which
is exactly what their `Display` impls print. Deserialization goes through
`from_iso_format`, so the offset rules of each type apply: a local datetime
refuses a string with an offset and a UTC datetime refuses one without.
*/

use core::marker::PhantomData;

use serde::de;

use crate::datetime::Datetime;

/// A visitor that parses any [`Datetime`] from an ISO 8601 string.
pub(crate) struct IsoVisitor<D> {
    expecting: &'static str,
    _datetime: PhantomData<D>,
}

impl<D> IsoVisitor<D> {
    pub(crate) fn new(expecting: &'static str) -> IsoVisitor<D> {
        IsoVisitor { expecting, _datetime: PhantomData }
    }
}

impl<'de, D: Datetime> de::Visitor<'de> for IsoVisitor<D> {
    type Value = D;

    fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.expecting)
    }

    #[inline]
    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<D, E> {
        let value = core::str::from_utf8(value).map_err(de::Error::custom)?;
        self.visit_str(value)
    }

    #[inline]
    fn visit_str<E: de::Error>(self, value: &str) -> Result<D, E> {
        D::from_iso_format(value).map_err(de::Error::custom)
    }
}
