//! Raw employee form state.

use serde::{Deserialize, Serialize};

use crate::form::rules;
use crate::model::employee::{Education, Employee, NewEmployee};

/// Form fields in submit-validation order. Errors attach to these so the
/// UI layer can highlight the matching input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Nik,
    Nama,
    Telepon,
    Koordinat,
    StatusKeluarga,
    Pendidikan,
}

impl FormField {
    /// Human-facing field name used when errors are rendered as text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nik => "nik",
            Self::Nama => "nama",
            Self::Telepon => "telepon",
            Self::Koordinat => "koordinat",
            Self::StatusKeluarga => "statusKeluarga",
            Self::Pendidikan => "pendidikan",
        }
    }
}

/// One failed field with its first failing rule's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Raw form input, exactly as typed. Also the draft payload: the same
/// shape is persisted for recovery, so restoring a draft reproduces the
/// form verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeForm {
    pub nik: String,
    pub nama: String,
    pub telepon: String,
    pub latitude: String,
    pub longitude: String,
    pub status_keluarga: String,
    pub pendidikan: String,
    pub pendidikan_lainnya: String,
}

impl EmployeeForm {
    /// Prefills the form from an existing record for editing.
    pub fn from_employee(employee: &Employee) -> Self {
        let (pendidikan, pendidikan_lainnya) = match &employee.pendidikan {
            Education::Level(level) => (level.label().to_string(), String::new()),
            Education::Lainnya(text) => {
                (rules::PENDIDIKAN_LAINNYA.to_string(), text.clone())
            }
        };
        Self {
            nik: employee.nik.clone(),
            nama: employee.nama.clone(),
            telepon: employee.telepon.clone(),
            latitude: employee.latitude.to_string(),
            longitude: employee.longitude.to_string(),
            status_keluarga: employee.status_keluarga.label().to_string(),
            pendidikan,
            pendidikan_lainnya,
        }
    }

    /// Whether the form holds anything worth keeping as a draft. Select
    /// fields alone do not count; only typed input does. Input is taken
    /// as typed: whitespace counts, matching the autosave trigger.
    pub fn has_content(&self) -> bool {
        [
            &self.nik,
            &self.nama,
            &self.telepon,
            &self.latitude,
            &self.longitude,
        ]
        .iter()
        .any(|value| !value.is_empty())
    }

    /// Runs every field check in submit order. Returns the store-ready
    /// record, or one error per failing field.
    pub fn validate(&self) -> Result<NewEmployee, Vec<FieldError>> {
        let mut errors = Vec::new();

        let nik = collect(FormField::Nik, rules::check_nik(&self.nik), &mut errors);
        let nama = collect(FormField::Nama, rules::check_nama(&self.nama), &mut errors);
        let telepon = collect(
            FormField::Telepon,
            rules::check_telepon(&self.telepon),
            &mut errors,
        );
        let koordinat = collect(
            FormField::Koordinat,
            rules::check_koordinat(&self.latitude, &self.longitude),
            &mut errors,
        );
        let status_keluarga = collect(
            FormField::StatusKeluarga,
            rules::check_status_keluarga(&self.status_keluarga),
            &mut errors,
        );
        let pendidikan = collect(
            FormField::Pendidikan,
            rules::check_pendidikan(&self.pendidikan, &self.pendidikan_lainnya),
            &mut errors,
        );

        match (nik, nama, telepon, koordinat, status_keluarga, pendidikan) {
            (
                Some(nik),
                Some(nama),
                Some(telepon),
                Some((latitude, longitude)),
                Some(status_keluarga),
                Some(pendidikan),
            ) => Ok(NewEmployee {
                nik,
                nama,
                telepon,
                latitude,
                longitude,
                status_keluarga,
                pendidikan,
            }),
            _ => Err(errors),
        }
    }
}

fn collect<T>(
    field: FormField,
    checked: Result<T, &'static str>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match checked {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError { field, message });
            None
        }
    }
}
