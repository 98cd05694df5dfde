use simpeg_core::db::open_db_in_memory;
use simpeg_core::{
    Education, EducationLevel, EmployeeForm, EmployeeListQuery, EmployeeService,
    EmployeeServiceError, FormField, MaritalStatus, SqliteEmployeeRepository,
};

#[test]
fn submit_persists_and_returns_the_stored_record() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let stored = service.submit(&filled_form("3204012345678901")).unwrap();
    assert!(stored.id > 0);
    assert_eq!(stored.nik, "3204012345678901");
    assert_eq!(stored.nama, "Budi Santoso");
    assert_eq!(stored.status_keluarga, MaritalStatus::Menikah);
    assert_eq!(stored.pendidikan, Education::Level(EducationLevel::S1));

    let listed = service.list(&EmployeeListQuery::default()).unwrap();
    assert_eq!(listed, vec![stored]);
}

#[test]
fn submit_rejects_an_invalid_form_before_touching_the_store() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let mut form = filled_form("3204012345678901");
    form.nik = "12".to_string();

    let err = service.submit(&form).unwrap_err();
    match err {
        EmployeeServiceError::Form(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, FormField::Nik);
            assert_eq!(errors[0].message, "NIK harus 16 digit angka");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn submit_reports_a_taken_nik() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    service.submit(&filled_form("3204012345678901")).unwrap();

    let mut duplicate = filled_form("3204012345678901");
    duplicate.nama = "Siti Aminah".to_string();

    let err = service.submit(&duplicate).unwrap_err();
    assert!(matches!(
        err,
        EmployeeServiceError::NikTaken(nik) if nik == "3204012345678901"
    ));
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn submit_update_edits_fields_and_keeps_the_creation_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let stored = service.submit(&filled_form("3204012345678901")).unwrap();

    let mut edited = EmployeeForm::from_employee(&stored);
    edited.nama = "Budi Hartono".to_string();
    edited.status_keluarga = "Belum Menikah".to_string();

    let updated = service.submit_update(stored.id, &edited).unwrap();
    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.nama, "Budi Hartono");
    assert_eq!(updated.status_keluarga, MaritalStatus::BelumMenikah);
    assert_eq!(updated.created_at, stored.created_at);
    assert_eq!(updated.latitude, stored.latitude);
    assert_eq!(updated.longitude, stored.longitude);
}

#[test]
fn submit_update_of_a_missing_employee_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let err = service
        .submit_update(42, &filled_form("3204012345678901"))
        .unwrap_err();
    assert!(matches!(err, EmployeeServiceError::EmployeeNotFound(42)));
}

#[test]
fn delete_returns_the_removed_record() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let stored = service.submit(&filled_form("3204012345678901")).unwrap();

    let removed = service.delete(stored.id).unwrap();
    assert_eq!(removed, stored);
    assert!(service.get(stored.id).unwrap().is_none());

    let err = service.delete(stored.id).unwrap_err();
    assert!(matches!(
        err,
        EmployeeServiceError::EmployeeNotFound(id) if id == stored.id
    ));
}

#[test]
fn statistics_reflect_the_whole_registry() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    service.submit(&filled_form("3204012345678901")).unwrap();

    let mut second = filled_form("3204012345678902");
    second.nama = "Siti Aminah".to_string();
    second.status_keluarga = "Belum Menikah".to_string();
    second.pendidikan = "SMP".to_string();
    service.submit(&second).unwrap();

    let stats = service.statistics().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.married, 1);
    assert_eq!(stats.single, 1);
    // Ranks S1 (5) and SMP (2) average to 3.5; the ladder rounds up.
    assert_eq!(stats.average_education, Some(EducationLevel::Diploma));
}

#[test]
fn full_entry_session_from_submit_to_export_shape() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    for (nik, nama) in [
        ("3204012345678901", "Budi Santoso"),
        ("3204012345678902", "Siti Aminah"),
        ("3204012345678903", "Agus Wibowo"),
    ] {
        let mut form = filled_form(nik);
        form.nama = nama.to_string();
        service.submit(&form).unwrap();
    }
    assert_eq!(service.count().unwrap(), 3);

    let all = service.list(&EmployeeListQuery::default()).unwrap();
    let document = simpeg_core::export::export_to_string(&all).unwrap();
    let value: serde_json::Value = serde_json::from_str(&document).unwrap();
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["nama"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Budi Santoso", "Siti Aminah", "Agus Wibowo"]);
}

fn filled_form(nik: &str) -> EmployeeForm {
    EmployeeForm {
        nik: nik.to_string(),
        nama: "Budi Santoso".to_string(),
        telepon: "081234567890".to_string(),
        latitude: "-6.914744".to_string(),
        longitude: "107.60981".to_string(),
        status_keluarga: "Menikah".to_string(),
        pendidikan: "S1".to_string(),
        pendidikan_lainnya: String::new(),
    }
}
