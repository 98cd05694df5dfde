//! Registry statistics projection.
//!
//! # Responsibility
//! - Derive headline counts and the average education level from the
//!   full employee list.
//!
//! # Invariants
//! - `married + single == total`.
//! - Free-text education entries never move the average; only ranked
//!   ladder levels do.

use crate::model::employee::{EducationLevel, Employee};

/// Derived registry statistics shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub total: u64,
    pub married: u64,
    pub single: u64,
    /// Smallest ladder level at or above the mean rank of all ranked
    /// employees. `None` when nobody has a ranked education.
    pub average_education: Option<EducationLevel>,
}

/// Computes dashboard statistics over the full employee list.
///
/// The average works on the 1-based ladder ranks: the mean rank of all
/// ranked employees is rounded up to the nearest ladder level. An
/// employee whose education is free text contributes to the counts but
/// not to the average.
pub fn compute_statistics(employees: &[Employee]) -> Statistics {
    let total = employees.len() as u64;
    let married = employees
        .iter()
        .filter(|employee| employee.status_keluarga.is_married())
        .count() as u64;

    Statistics {
        total,
        married,
        single: total - married,
        average_education: average_education(employees),
    }
}

fn average_education(employees: &[Employee]) -> Option<EducationLevel> {
    let ranks: Vec<u8> = employees
        .iter()
        .filter_map(|employee| employee.pendidikan.rank())
        .collect();
    if ranks.is_empty() {
        return None;
    }

    let sum: u32 = ranks.iter().map(|rank| u32::from(*rank)).sum();
    let mean = f64::from(sum) / ranks.len() as f64;

    EducationLevel::ALL
        .into_iter()
        .find(|level| f64::from(level.rank()) >= mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::{Education, MaritalStatus};
    use chrono::Utc;

    fn employee(status: MaritalStatus, pendidikan: Education) -> Employee {
        Employee {
            id: 1,
            nik: "1234567890123456".to_string(),
            nama: "Budi Santoso".to_string(),
            telepon: "081234567890".to_string(),
            latitude: -6.2,
            longitude: 106.8,
            status_keluarga: status,
            pendidikan,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_registry_has_zeroed_statistics() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.married, 0);
        assert_eq!(stats.single, 0);
        assert_eq!(stats.average_education, None);
    }

    #[test]
    fn marital_counts_partition_the_total() {
        let employees = vec![
            employee(MaritalStatus::Menikah, Education::Level(EducationLevel::S1)),
            employee(
                MaritalStatus::BelumMenikah,
                Education::Level(EducationLevel::Smp),
            ),
            employee(MaritalStatus::Menikah, Education::Level(EducationLevel::S2)),
        ];
        let stats = compute_statistics(&employees);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.married, 2);
        assert_eq!(stats.single, 1);
    }

    #[test]
    fn average_rounds_up_to_the_next_ladder_level() {
        // Ranks 2 and 5 give mean 3.5, which lands on Diploma (rank 4).
        let employees = vec![
            employee(MaritalStatus::Menikah, Education::Level(EducationLevel::Smp)),
            employee(
                MaritalStatus::BelumMenikah,
                Education::Level(EducationLevel::S1),
            ),
        ];
        let stats = compute_statistics(&employees);
        assert_eq!(stats.average_education, Some(EducationLevel::Diploma));
    }

    #[test]
    fn exact_mean_stays_on_its_level() {
        let employees = vec![
            employee(MaritalStatus::Menikah, Education::Level(EducationLevel::Sd)),
            employee(
                MaritalStatus::BelumMenikah,
                Education::Level(EducationLevel::SmaSmk),
            ),
        ];
        let stats = compute_statistics(&employees);
        assert_eq!(stats.average_education, Some(EducationLevel::Smp));
    }

    #[test]
    fn free_text_education_is_excluded_from_the_average() {
        let employees = vec![
            employee(
                MaritalStatus::Menikah,
                Education::Lainnya("Pesantren".to_string()),
            ),
            employee(
                MaritalStatus::BelumMenikah,
                Education::Level(EducationLevel::S3),
            ),
        ];
        let stats = compute_statistics(&employees);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_education, Some(EducationLevel::S3));
    }

    #[test]
    fn all_free_text_education_yields_no_average() {
        let employees = vec![employee(
            MaritalStatus::Menikah,
            Education::Lainnya("Kursus".to_string()),
        )];
        let stats = compute_statistics(&employees);
        assert_eq!(stats.average_education, None);
    }
}
