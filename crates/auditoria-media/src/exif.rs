use std::collections::BTreeMap;
use std::io::Cursor;

use ::exif::{Exif, Field, In, Reader, Tag, Value};
use tracing::debug;

use auditoria_core::models::media::ExifData;

use crate::metadata::{MetadataValue, sanitize};

/// Tags that only locate other data inside the file.
const STRUCTURAL_TAGS: [Tag; 5] = [
    Tag::ExifIFDPointer,
    Tag::GPSInfoIFDPointer,
    Tag::InteropIFDPointer,
    Tag::JPEGInterchangeFormat,
    Tag::JPEGInterchangeFormatLength,
];

/// Date tags and the offset tag that qualifies each of them.
const DATE_TAGS: [(Tag, Tag); 3] = [
    (Tag::DateTime, Tag::OffsetTime),
    (Tag::DateTimeOriginal, Tag::OffsetTimeOriginal),
    (Tag::DateTimeDigitized, Tag::OffsetTimeDigitized),
];

/// Extract EXIF metadata from a photo as a JSON-safe document.
///
/// Metadata is optional for a photo, so this never fails: unreadable or
/// missing EXIF, or EXIF with nothing storable in it, yields `None`.
pub fn extract(buffer: &[u8]) -> Option<ExifData> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(buffer)) {
        Ok(exif) => exif,
        Err(e) => {
            debug!(error = %e, bytes = buffer.len(), "no readable EXIF metadata");
            return None;
        }
    };

    let data = sanitize(metadata_tree(&exif));
    debug!(
        fields = exif.fields().count(),
        keys = data.as_ref().map_or(0, |d| d.len()),
        "EXIF metadata extracted"
    );
    data
}

/// Build the metadata tree for a parsed EXIF block.
///
/// Primary, Exif, GPS and Interop tags share one flat namespace keyed by tag
/// name. Thumbnail IFD tags reuse those names, so they go under `thumbnail`.
pub fn metadata_tree(exif: &Exif) -> BTreeMap<String, MetadataValue> {
    let mut root = BTreeMap::new();
    let mut thumbnail = BTreeMap::new();

    for field in exif.fields() {
        if STRUCTURAL_TAGS.contains(&field.tag) {
            continue;
        }

        let value = date_value(exif, field).unwrap_or_else(|| convert(&field.value));
        let target = if field.ifd_num == In::THUMBNAIL {
            &mut thumbnail
        } else {
            &mut root
        };
        target.entry(field.tag.to_string()).or_insert(value);
    }

    if let Some(latitude) = gps_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S') {
        root.insert("latitude".to_string(), MetadataValue::Number(latitude));
    }
    if let Some(longitude) = gps_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W') {
        root.insert("longitude".to_string(), MetadataValue::Number(longitude));
    }

    if !thumbnail.is_empty() {
        root.insert("thumbnail".to_string(), MetadataValue::Object(thumbnail));
    }

    root
}

fn convert(value: &Value) -> MetadataValue {
    match value {
        Value::Byte(bytes) | Value::Undefined(bytes, _) => MetadataValue::Binary(bytes.clone()),
        // The reader splits ASCII values on NUL, which splits embedded NULs
        // and camera padding alike. Rejoining keeps one string per tag.
        Value::Ascii(parts) if parts.is_empty() => MetadataValue::Null,
        Value::Ascii(parts) => {
            MetadataValue::Text(String::from_utf8_lossy(&parts.concat()).into_owned())
        }
        Value::Short(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Long(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Rational(v) => collapse(v.iter().map(|r| MetadataValue::Number(r.to_f64()))),
        Value::SByte(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::SShort(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::SLong(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::SRational(v) => collapse(v.iter().map(|r| MetadataValue::Number(r.to_f64()))),
        Value::Float(v) => collapse(v.iter().map(|n| MetadataValue::Number(f64::from(*n)))),
        Value::Double(v) => collapse(v.iter().map(|n| MetadataValue::Number(*n))),
        // Value::Unknown: type the reader could not decode.
        _ => MetadataValue::Null,
    }
}

/// Single values are stored as scalars, multiple as arrays.
fn collapse(values: impl Iterator<Item = MetadataValue>) -> MetadataValue {
    let mut values: Vec<_> = values.collect();
    match values.len() {
        0 => MetadataValue::Null,
        1 => values.swap_remove(0),
        _ => MetadataValue::Array(values),
    }
}

/// Parse an EXIF date tag, qualified by its offset tag when present. Dates
/// without an offset are taken as UTC. `None` leaves the raw text in place.
fn date_value(exif: &Exif, field: &Field) -> Option<MetadataValue> {
    let (_, offset_tag) = DATE_TAGS.iter().find(|(tag, _)| *tag == field.tag)?;
    let Value::Ascii(parts) = &field.value else {
        return None;
    };

    let mut date = ::exif::DateTime::from_ascii(parts.first()?).ok()?;
    if let Some(Field {
        value: Value::Ascii(offset),
        ..
    }) = exif.get_field(*offset_tag, field.ifd_num)
        && let Some(raw) = offset.first()
    {
        // A malformed offset leaves the date in UTC.
        let _ = date.parse_offset(raw);
    }

    let civil = jiff::civil::DateTime::new(
        i16::try_from(date.year).ok()?,
        i8::try_from(date.month).ok()?,
        i8::try_from(date.day).ok()?,
        i8::try_from(date.hour).ok()?,
        i8::try_from(date.minute).ok()?,
        i8::try_from(date.second).ok()?,
        i32::try_from(date.nanosecond.unwrap_or(0)).ok()?,
    )
    .ok()?;
    let offset = jiff::tz::Offset::from_seconds(i32::from(date.offset.unwrap_or(0)) * 60).ok()?;
    let zoned = civil.to_zoned(jiff::tz::TimeZone::fixed(offset)).ok()?;

    Some(MetadataValue::Date(zoned.timestamp()))
}

/// Decimal degrees from a GPS degrees/minutes/seconds triple. Southern and
/// western references are negative.
fn gps_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let Value::Rational(parts) = &field.value else {
        return None;
    };

    let degrees = parts
        .iter()
        .take(3)
        .zip([1.0, 60.0, 3600.0])
        .map(|(r, divisor)| r.to_f64() / divisor)
        .sum::<f64>();
    if parts.is_empty() || !degrees.is_finite() {
        return None;
    }

    let negative = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Ascii(refs) => refs.first().and_then(|r| r.first()).copied(),
            _ => None,
        })
        .is_some_and(|r| r.eq_ignore_ascii_case(&negative_ref));

    Some(if negative { -degrees } else { degrees })
}
