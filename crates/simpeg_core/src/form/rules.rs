//! Field validation rules.
//!
//! Each check takes the raw input and returns the parsed value or the
//! message for the first rule it breaks. Messages are the exact strings
//! shown next to the field, so callers must not rephrase them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::employee::{Education, EducationLevel, MaritalStatus};

static NIK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{16}$").expect("valid NIK regex"));
static NAMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid nama regex"));
static TELEPON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid telepon regex"));

/// Select value that opens the free-text education input.
pub const PENDIDIKAN_LAINNYA: &str = "Lainnya";

pub fn check_nik(raw: &str) -> Result<String, &'static str> {
    let nik = raw.trim();
    if nik.is_empty() {
        return Err("NIK harus diisi");
    }
    if !NIK_RE.is_match(nik) {
        return Err("NIK harus 16 digit angka");
    }
    Ok(nik.to_string())
}

pub fn check_nama(raw: &str) -> Result<String, &'static str> {
    let nama = raw.trim();
    if nama.is_empty() {
        return Err("Nama lengkap harus diisi");
    }
    if !NAMA_RE.is_match(nama) {
        return Err("Nama hanya boleh mengandung huruf dan spasi");
    }
    if nama.chars().count() < 5 {
        return Err("Nama minimal 5 karakter");
    }
    if nama.chars().count() > 50 {
        return Err("Nama maksimal 50 karakter");
    }
    Ok(nama.to_string())
}

pub fn check_telepon(raw: &str) -> Result<String, &'static str> {
    let telepon = raw.trim();
    if telepon.is_empty() {
        return Err("Nomor telepon harus diisi");
    }
    if !TELEPON_RE.is_match(telepon) {
        return Err("Nomor telepon hanya boleh angka");
    }
    Ok(telepon.to_string())
}

/// Validates the coordinate pair as one unit, mirroring the single
/// location field of the form. Presence is checked for both halves first;
/// a half that is present but unparseable reports its range message.
pub fn check_koordinat(lat_raw: &str, lon_raw: &str) -> Result<(f64, f64), &'static str> {
    let lat_text = lat_raw.trim();
    let lon_text = lon_raw.trim();
    if lat_text.is_empty() || lon_text.is_empty() {
        return Err("Koordinat harus diisi");
    }

    let lat = match parse_coordinate(lat_text) {
        Some(value) if (-90.0..=90.0).contains(&value) => value,
        _ => return Err("Latitude harus antara -90 dan 90"),
    };
    let lon = match parse_coordinate(lon_text) {
        Some(value) if (-180.0..=180.0).contains(&value) => value,
        _ => return Err("Longitude harus antara -180 dan 180"),
    };
    Ok((lat, lon))
}

pub fn check_status_keluarga(raw: &str) -> Result<MaritalStatus, &'static str> {
    MaritalStatus::from_label(raw.trim()).ok_or("Pilih status keluarga")
}

/// Validates the education select plus its free-text companion.
///
/// A ladder label maps directly; `Lainnya` requires the companion text;
/// anything else counts as no selection.
pub fn check_pendidikan(select_raw: &str, lainnya_raw: &str) -> Result<Education, &'static str> {
    let select = select_raw.trim();
    if select == PENDIDIKAN_LAINNYA {
        let text = lainnya_raw.trim();
        if text.is_empty() {
            return Err("Masukkan pendidikan lainnya");
        }
        return Ok(Education::Lainnya(text.to_string()));
    }
    match EducationLevel::from_label(select) {
        Some(level) => Ok(Education::Level(level)),
        None => Err("Pilih tingkat pendidikan"),
    }
}

fn parse_coordinate(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
