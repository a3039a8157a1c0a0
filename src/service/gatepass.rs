use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

use crate::model::leave_request::LeaveRequest;

/// The artifact handed to a caller after approval: the canonical payload,
/// its QR rendering, and the filename offered for download.
#[derive(Debug, Clone)]
pub struct GatePass {
    pub payload: String,
    pub png: Vec<u8>,
    pub filename: String,
}

#[derive(Debug, Display, Error)]
pub enum EncodingError {
    #[display(fmt = "payload does not fit a QR symbol: {}", _0)]
    Symbol(#[error(source)] qrcode::types::QrError),
    #[display(fmt = "PNG encoding failed: {}", _0)]
    Png(#[error(source)] image::ImageError),
}

/// Canonical gate-pass payload. The timestamp is taken at approval time with
/// fractional seconds, so the same request approved twice (in different
/// histories) never yields the same payload.
pub fn encode(record: &LeaveRequest, now: DateTime<Utc>) -> String {
    format!(
        "LEAVE_GRANTED_ID:{} NAME:{} FROM:{} TO:{} TS:{}.{:06}",
        record.student_id,
        record.student_name,
        record.start_date,
        record.end_date,
        now.timestamp(),
        now.timestamp_subsec_micros(),
    )
}

/// Renders the payload as a black-on-white QR PNG: error-correction level H,
/// 10x10-pixel modules, the standard 4-module quiet zone.
pub fn render_png(payload: &str) -> Result<Vec<u8>, EncodingError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(EncodingError::Symbol)?;
    let modules = code
        .render::<Luma<u8>>()
        .module_dimensions(10, 10)
        .quiet_zone(true)
        .build();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(modules)
        .write_to(&mut png, ImageFormat::Png)
        .map_err(EncodingError::Png)?;
    Ok(png.into_inner())
}

pub fn suggested_filename(record: &LeaveRequest) -> String {
    format!("gatepass_{}_{}.png", record.student_id, record.start_date)
}
