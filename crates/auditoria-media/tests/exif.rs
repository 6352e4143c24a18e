use std::io::Cursor;

use auditoria_media::exif::extract;
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;

fn ascii(tag: Tag, text: &[u8]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.to_vec()]),
    }
}

fn dms(degrees: u32, minutes: u32, seconds: u32) -> Value {
    Value::Rational(vec![
        Rational { num: degrees, denom: 1 },
        Rational { num: minutes, denom: 1 },
        Rational { num: seconds, denom: 1 },
    ])
}

fn tiff_with(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

#[test]
fn photo_without_exif_returns_none() {
    let mut jpeg = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])))
        .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .unwrap();
    assert!(extract(&jpeg).is_none());
}

#[test]
fn garbage_returns_none() {
    assert!(extract(b"").is_none());
    assert!(extract(b"not an image at all").is_none());
}

#[test]
fn text_tags_are_kept_and_cleaned() {
    let tiff = tiff_with(&[
        ascii(Tag::Make, b"Canon\x01"),
        ascii(Tag::Model, b"EOS R6"),
        ascii(Tag::ImageDescription, b"Line one\nLine two"),
    ]);

    let data = extract(&tiff).unwrap();
    assert_eq!(data["Make"], json!("Canon"));
    assert_eq!(data["Model"], json!("EOS R6"));
    assert_eq!(data["ImageDescription"], json!("Line one\nLine two"));
    assert!(!data.contains_key("ExifIFDPointer"));
}

#[test]
fn numeric_tags_become_numbers() {
    let tiff = tiff_with(&[
        Field {
            tag: Tag::Orientation,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![6]),
        },
        Field {
            tag: Tag::FNumber,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational { num: 28, denom: 10 }]),
        },
    ]);

    let data = extract(&tiff).unwrap();
    assert_eq!(data["Orientation"], json!(6.0));
    assert_eq!(data["FNumber"], json!(2.8));
}

#[test]
fn binary_only_metadata_returns_none() {
    let tiff = tiff_with(&[Field {
        tag: Tag::MakerNote,
        ifd_num: In::PRIMARY,
        value: Value::Undefined(vec![0, 1, 2, 3, 0xff], 0),
    }]);
    assert!(extract(&tiff).is_none());
}

#[test]
fn dates_are_normalized_to_utc() {
    let tiff = tiff_with(&[
        ascii(Tag::DateTimeOriginal, b"2024:03:01 10:20:30"),
        ascii(Tag::OffsetTimeOriginal, b"+02:00"),
        ascii(Tag::DateTime, b"2024:03:02 08:00:00"),
    ]);

    let data = extract(&tiff).unwrap();
    assert_eq!(data["DateTimeOriginal"], json!("2024-03-01T08:20:30Z"));
    assert_eq!(data["DateTime"], json!("2024-03-02T08:00:00Z"));
}

#[test]
fn unparseable_date_is_kept_as_text() {
    let tiff = tiff_with(&[ascii(Tag::DateTime, b"    :  :     :  :  ")]);
    let data = extract(&tiff).unwrap();
    assert_eq!(data["DateTime"], json!("    :  :     :  :  "));
}

#[test]
fn gps_position_is_added_in_decimal_degrees() {
    let tiff = tiff_with(&[
        ascii(Tag::GPSLatitudeRef, b"S"),
        Field {
            tag: Tag::GPSLatitude,
            ifd_num: In::PRIMARY,
            value: dms(23, 33, 0),
        },
        ascii(Tag::GPSLongitudeRef, b"W"),
        Field {
            tag: Tag::GPSLongitude,
            ifd_num: In::PRIMARY,
            value: dms(46, 38, 0),
        },
    ]);

    let data = extract(&tiff).unwrap();
    let latitude = data["latitude"].as_f64().unwrap();
    let longitude = data["longitude"].as_f64().unwrap();
    assert!((latitude + 23.55).abs() < 1e-9);
    assert!((longitude + 46.633_333_333).abs() < 1e-6);
    assert_eq!(data["GPSLatitudeRef"], json!("S"));
    assert_eq!(data["GPSLatitude"], json!([23.0, 33.0, 0.0]));
}

#[test]
fn embedded_nul_is_removed_from_ascii_tags() {
    let tiff = tiff_with(&[ascii(Tag::Make, b"Can\0on EOS")]);
    let data = extract(&tiff).unwrap();
    assert_eq!(data["Make"], json!("Canon EOS"));
}

#[test]
fn nul_padding_does_not_turn_text_into_arrays() {
    let tiff = tiff_with(&[
        ascii(Tag::Model, b"NIKON D750\0\0\0"),
        ascii(Tag::Software, b"Ver.1.10\0"),
    ]);
    let data = extract(&tiff).unwrap();
    assert_eq!(data["Model"], json!("NIKON D750"));
    assert_eq!(data["Software"], json!("Ver.1.10"));
}

#[test]
fn thumbnail_tags_are_nested_and_keep_primary_values() {
    let tiff = tiff_with(&[
        Field {
            tag: Tag::ImageWidth,
            ifd_num: In::PRIMARY,
            value: Value::Long(vec![4000]),
        },
        Field {
            tag: Tag::ImageWidth,
            ifd_num: In::THUMBNAIL,
            value: Value::Long(vec![160]),
        },
        Field {
            tag: Tag::Compression,
            ifd_num: In::THUMBNAIL,
            value: Value::Short(vec![6]),
        },
    ]);

    let data = extract(&tiff).unwrap();
    assert_eq!(data["ImageWidth"], json!(4000.0));
    assert!(!data.contains_key("Compression"));
    assert_eq!(
        data["thumbnail"],
        json!({"ImageWidth": 160.0, "Compression": 6.0})
    );
}
