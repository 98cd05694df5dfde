//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical persisted employee record and its wire shape.
//! - Map the marital-status and education labels used by the registry form.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another employee.
//! - `nik` is unique across all employees (enforced by the store index).
//! - `created_at` is fixed at creation time and survives edits.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Store-assigned identifier for an employee record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Marital status selection offered by the registry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "Menikah")]
    Menikah,
    #[serde(rename = "Belum Menikah")]
    BelumMenikah,
}

impl MaritalStatus {
    /// Stable label used on the wire and in the form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Menikah => "Menikah",
            Self::BelumMenikah => "Belum Menikah",
        }
    }

    /// Parses a form/wire label. Returns `None` for unknown values.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Menikah" => Some(Self::Menikah),
            "Belum Menikah" => Some(Self::BelumMenikah),
            _ => None,
        }
    }

    /// Whether this status counts into the married bucket of statistics.
    pub fn is_married(self) -> bool {
        matches!(self, Self::Menikah)
    }
}

/// Ranked education ladder used by the form select and the statistics
/// average. Ranks are 1-based and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EducationLevel {
    Sd,
    Smp,
    SmaSmk,
    Diploma,
    S1,
    S2,
    S3,
}

impl EducationLevel {
    /// All levels in ascending rank order.
    pub const ALL: [EducationLevel; 7] = [
        Self::Sd,
        Self::Smp,
        Self::SmaSmk,
        Self::Diploma,
        Self::S1,
        Self::S2,
        Self::S3,
    ];

    /// Stable label used on the wire and in the form select.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sd => "SD",
            Self::Smp => "SMP",
            Self::SmaSmk => "SMA/SMK",
            Self::Diploma => "Diploma",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
        }
    }

    /// Parses a known ladder label. Returns `None` for anything else.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "SD" => Some(Self::Sd),
            "SMP" => Some(Self::Smp),
            "SMA/SMK" => Some(Self::SmaSmk),
            "Diploma" => Some(Self::Diploma),
            "S1" => Some(Self::S1),
            "S2" => Some(Self::S2),
            "S3" => Some(Self::S3),
            _ => None,
        }
    }

    /// 1-based rank used by the statistics average (SD=1 .. S3=7).
    pub fn rank(self) -> u8 {
        match self {
            Self::Sd => 1,
            Self::Smp => 2,
            Self::SmaSmk => 3,
            Self::Diploma => 4,
            Self::S1 => 5,
            Self::S2 => 6,
            Self::S3 => 7,
        }
    }
}

/// Education field: either a ranked ladder level or free text entered via
/// the form's "Lainnya" option.
///
/// The store and the wire hold a bare string. A known ladder label decodes
/// to [`Education::Level`]; any other text decodes to [`Education::Lainnya`]
/// (the original form stores the free text itself, never the word
/// "Lainnya").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Education {
    Level(EducationLevel),
    Lainnya(String),
}

impl Education {
    /// Label persisted to the store and shown in list views.
    pub fn label(&self) -> &str {
        match self {
            Self::Level(level) => level.label(),
            Self::Lainnya(text) => text.as_str(),
        }
    }

    /// Decodes a persisted label back into the enum.
    pub fn from_label(value: &str) -> Self {
        match EducationLevel::from_label(value) {
            Some(level) => Self::Level(level),
            None => Self::Lainnya(value.to_string()),
        }
    }

    /// Statistics rank. Free-text entries carry no rank and are excluded
    /// from the education average.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Level(level) => Some(level.rank()),
            Self::Lainnya(_) => None,
        }
    }
}

impl Serialize for Education {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Education {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label.is_empty() {
            return Err(D::Error::custom("pendidikan label cannot be empty"));
        }
        Ok(Self::from_label(&label))
    }
}

/// Canonical persisted employee record.
///
/// Serializes to the registry's wire shape:
/// `{id, nik, nama, telepon, latitude, longitude, statusKeluarga,
/// pendidikan, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier.
    pub id: EmployeeId,
    /// National identity number, 16 numeric digits, unique.
    pub nik: String,
    /// Full name, letters and spaces.
    pub nama: String,
    /// Phone number, digits only.
    pub telepon: String,
    /// Location latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Location longitude in degrees, [-180, 180].
    pub longitude: f64,
    /// Marital status selection.
    pub status_keluarga: MaritalStatus,
    /// Education level or free text.
    pub pendidikan: Education,
    /// Creation timestamp, UTC. Never changed by edits.
    pub created_at: DateTime<Utc>,
}

/// Validated, store-ready employee data. The store assigns `id` and
/// `created_at` on create; on update they are preserved from the existing
/// record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub nik: String,
    pub nama: String,
    pub telepon: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status_keluarga: MaritalStatus,
    pub pendidikan: Education,
}
