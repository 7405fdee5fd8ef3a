//! End-to-end checks of the utility crates through the umbrella re-exports.

mod common;

use toolbelt::imaging::{self, ImageFormat, ImagingError, ResizeOptions};
use toolbelt::pdfkit::{self, PdfError};
use toolbelt::text::{decode, encode, hash_text, Encoding, HashAlgorithm, TextError};

#[test]
fn hashes_match_reference_digests() {
    let cases = [
        (HashAlgorithm::Md5, "9e107d9d372bb6826bd81d3542a419d6"),
        (HashAlgorithm::Sha1, "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"),
        (
            HashAlgorithm::Sha256,
            "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
        ),
    ];
    let text = "The quick brown fox jumps over the lazy dog";
    for (algorithm, expected) in cases {
        assert_eq!(hash_text(text, algorithm), expected, "{algorithm}");
        // Deterministic across calls.
        assert_eq!(hash_text(text, algorithm), hash_text(text, algorithm));
    }
}

#[test]
fn every_encoding_round_trips() {
    let samples = ["Hello, World!", "a", "ünïcödé ✓ 文字", "line\nbreak\ttab"];
    for encoding in Encoding::ALL {
        for sample in samples {
            let encoded = encode(sample, encoding);
            assert_eq!(decode(&encoded, encoding).unwrap(), sample, "{encoding}");
        }
    }
}

#[test]
fn malformed_base64_is_a_decode_error() {
    let err = decode("not-valid-base64!!", Encoding::Base64).unwrap_err();
    assert!(matches!(err, TextError::Decode { .. }));
}

#[test]
fn encrypted_pdf_unlocks_with_the_right_password() {
    let locked = common::encrypted_pdf("secret", "owner-secret");
    assert!(!common::contains(&locked, common::PAGE_TEXT.as_bytes()));

    let unlocked = pdfkit::unlock(&locked, "secret").expect("correct password unlocks");
    assert!(unlocked.was_encrypted);
    assert_eq!(unlocked.page_count, 1);

    let reopened = lopdf::Document::load_mem(&unlocked.bytes).expect("opens without a password");
    assert!(!reopened.is_encrypted());
    assert_eq!(reopened.get_pages().len(), 1);
    assert!(common::page_text(&unlocked.bytes).contains(common::PAGE_TEXT));

    let info = pdfkit::info(&unlocked.bytes, false).unwrap();
    assert!(!info.is_encrypted);
    assert_eq!(info.page_count, Some(1));
}

#[test]
fn encrypted_pdf_rejects_a_wrong_password() {
    let locked = common::encrypted_pdf("secret", "owner-secret");
    let err = pdfkit::unlock(&locked, "wrong").unwrap_err();
    assert!(matches!(err, PdfError::WrongPassword), "{err:?}");
}

#[test]
fn locked_pdf_info_reports_no_page_count() {
    let locked = common::encrypted_pdf("secret", "owner-secret");
    let info = pdfkit::info(&locked, true).unwrap();
    assert!(info.is_encrypted);
    assert_eq!(info.page_count, None);
    assert_eq!(info.file_size, locked.len());
}

#[test]
fn plain_pdf_is_resaved_regardless_of_password() {
    let plain = common::plain_pdf();
    let unlocked = pdfkit::unlock(&plain, "anything").unwrap();
    assert!(!unlocked.was_encrypted);
    assert_eq!(unlocked.page_count, 2);
    assert_eq!(
        common::page_text(&unlocked.bytes).matches(common::PAGE_TEXT).count(),
        2
    );
}

#[test]
fn resize_png_to_exact_box() {
    let source = common::png(200, 200);
    let options = ResizeOptions::exact(100, 100).with_format(ImageFormat::Png);
    let resized = imaging::resize(&source, &options).unwrap();

    let decoded = image::load_from_memory(&resized.bytes).unwrap();
    assert_eq!(image::guess_format(&resized.bytes).unwrap(), image::ImageFormat::Png);
    assert_eq!((decoded.width(), decoded.height()), (100, 100));
}

#[test]
fn info_reports_png_header() {
    let info = imaging::info(&common::png(200, 200)).unwrap();
    assert_eq!(info.format, ImageFormat::Png);
    assert_eq!((info.width, info.height), (200, 200));
    assert_eq!(info.dimensions(), "200x200");
}

#[test]
fn convert_png_to_jpeg_keeps_dimensions() {
    let converted = imaging::convert(&common::png(64, 48), ImageFormat::Jpeg).unwrap();
    assert_eq!(image::guess_format(&converted.bytes).unwrap(), image::ImageFormat::Jpeg);

    let decoded = image::load_from_memory(&converted.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn jpeg_source_format_is_kept_by_default() {
    let resized = imaging::resize(&common::jpeg(80, 40), &ResizeOptions::fit(40, 40)).unwrap();
    assert_eq!(resized.format, ImageFormat::Jpeg);
    assert_eq!((resized.width, resized.height), (40, 20));
}

#[test]
fn non_image_bytes_are_invalid() {
    let err = imaging::info(b"%PDF-1.4 definitely not an image").unwrap_err();
    assert!(matches!(err, ImagingError::InvalidImage(_)));
}
