//! # Locale-Set Codec
//!
//! `LocaleSet := count:int32 languageTag:string*count`
//!
//! Tags are always written ascending by canonical tag. The input type is a
//! `BTreeSet<LocaleId>`, whose iteration order *is* that order, so two runs
//! over the same logical set produce the same bytes without a sort step.

use std::collections::BTreeSet;

use crate::codec::{DataReader, DataWriter};
use crate::error::TableError;
use crate::identity::LocaleId;

/// Write a locale set as a count followed by its tags in canonical order.
///
/// # Errors
///
/// Returns `TableError::EncodingOverflow` if the count or a tag length does
/// not fit an `int32`.
pub fn write_locale_set(
    out: &mut DataWriter,
    locales: &BTreeSet<LocaleId>,
) -> Result<(), TableError> {
    out.write_len("locale count", locales.len())?;
    for locale in locales {
        out.write_string(locale.as_str())?;
    }
    Ok(())
}

/// Read a locale set written by [`write_locale_set`].
///
/// # Errors
///
/// Returns `TableError::UnexpectedEndOfData` on truncation and
/// `TableError::MalformedRecord` for an unparseable or repeated tag.
pub fn read_locale_set(input: &mut DataReader<'_>) -> Result<BTreeSet<LocaleId>, TableError> {
    let count = input.read_len("locale count")?;
    let mut locales = BTreeSet::new();
    for _ in 0..count {
        let offset = input.position();
        let tag = input.read_string()?;
        let locale = LocaleId::parse(&tag).map_err(|e| TableError::MalformedRecord {
            offset,
            reason: e.to_string(),
        })?;
        if !locales.insert(locale) {
            return Err(TableError::MalformedRecord {
                offset,
                reason: format!("locale {tag:?} repeated within one locale set"),
            });
        }
    }
    Ok(locales)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> BTreeSet<LocaleId> {
        tags.iter().map(|t| LocaleId::parse(t).unwrap()).collect()
    }

    #[test]
    fn test_written_in_canonical_order() {
        let mut w = DataWriter::new();
        write_locale_set(&mut w, &set(&["fr-FR", "en-NZ", "en-AU"])).unwrap();

        let mut expected = DataWriter::new();
        expected.write_i32(3);
        expected.write_string("en-AU").unwrap();
        expected.write_string("en-NZ").unwrap();
        expected.write_string("fr-FR").unwrap();
        assert_eq!(w.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let mut a = DataWriter::new();
        write_locale_set(&mut a, &set(&["de", "en-AU", "fr"])).unwrap();
        let mut b = DataWriter::new();
        write_locale_set(&mut b, &set(&["fr", "de", "en-AU"])).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_read_back() {
        let locales = set(&["en-AU", "fr-FR"]);
        let mut w = DataWriter::new();
        write_locale_set(&mut w, &locales).unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        assert_eq!(read_locale_set(&mut r).unwrap(), locales);
        r.finish().unwrap();
    }

    #[test]
    fn test_empty_set() {
        let mut w = DataWriter::new();
        write_locale_set(&mut w, &BTreeSet::new()).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_repeated_tag_rejected() {
        let mut w = DataWriter::new();
        w.write_i32(2);
        w.write_string("en-AU").unwrap();
        w.write_string("EN_au").unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        assert!(matches!(
            read_locale_set(&mut r),
            Err(TableError::MalformedRecord { offset: 13, .. })
        ));
    }

    #[test]
    fn test_count_larger_than_data() {
        let mut w = DataWriter::new();
        w.write_i32(2);
        w.write_string("en-AU").unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        assert!(matches!(
            read_locale_set(&mut r),
            Err(TableError::UnexpectedEndOfData { .. })
        ));
    }
}
