mod common;

use chrono::{DateTime, Utc};
use hlm::service::gatepass::{EncodingError, encode, render_png, suggested_filename};

fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, nanos).unwrap()
}

#[test]
fn test_payload_format() {
    let record = common::candidate().into_pending(3);
    let payload = encode(&record, at(1_704_875_400, 123_456_000));

    assert_eq!(
        payload,
        "LEAVE_GRANTED_ID:S1 NAME:Jane Doe FROM:2024-01-01 TO:2024-01-03 TS:1704875400.123456"
    );
}

#[test]
fn test_payloads_differ_by_approval_time() {
    let record = common::candidate().into_pending(3);
    let first = encode(&record, at(1_704_875_400, 0));
    let second = encode(&record, at(1_704_875_401, 0));

    assert_ne!(first, second);
    assert!(first.contains("LEAVE_GRANTED_ID:S1"));
    assert!(second.contains("LEAVE_GRANTED_ID:S1"));
}

#[test]
fn test_render_png_produces_png_bytes() {
    let record = common::candidate().into_pending(3);
    let payload = encode(&record, at(1_704_875_400, 0));
    let png = render_png(&payload).unwrap();

    // PNG signature
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    assert!(png.len() > 8);
}

#[test]
fn test_render_rejects_oversized_payload() {
    // beyond the byte capacity of any QR symbol at error-correction level H
    let oversized = "x".repeat(3000);
    assert!(matches!(
        render_png(&oversized),
        Err(EncodingError::Symbol(_))
    ));
}

#[test]
fn test_suggested_filename() {
    let record = common::candidate().into_pending(3);
    assert_eq!(suggested_filename(&record), "gatepass_S1_2024-01-01.png");
}
