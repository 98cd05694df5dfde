use rusqlite::Connection;
use simpeg_core::db::migrations::latest_version;
use simpeg_core::db::open_db_in_memory;
use simpeg_core::{
    Education, EducationLevel, EmployeeListQuery, EmployeeRepository, MaritalStatus, NewEmployee,
    RepoError, SqliteEmployeeRepository,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.nik, "3204012345678901");
    assert_eq!(loaded.nama, "Budi Santoso");
    assert_eq!(loaded.telepon, "081234567890");
    assert_eq!(loaded.status_keluarga, MaritalStatus::Menikah);
    assert_eq!(loaded.pendidikan, Education::Level(EducationLevel::S1));
}

#[test]
fn get_by_nik_finds_the_matching_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    repo.create_employee(&sample_employee("3204012345678902", "Siti Aminah"))
        .unwrap();

    let found = repo
        .get_employee_by_nik("3204012345678902")
        .unwrap()
        .unwrap();
    assert_eq!(found.nama, "Siti Aminah");

    assert!(repo
        .get_employee_by_nik("9999999999999999")
        .unwrap()
        .is_none());
}

#[test]
fn free_text_education_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let mut employee = sample_employee("3204012345678901", "Budi Santoso");
    employee.pendidikan = Education::Lainnya("Pesantren Modern".to_string());
    let id = repo.create_employee(&employee).unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(
        loaded.pendidikan,
        Education::Lainnya("Pesantren Modern".to_string())
    );
}

#[test]
fn duplicate_nik_on_create_reports_nik_taken() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();

    let err = repo
        .create_employee(&sample_employee("3204012345678901", "Siti Aminah"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NikTaken(nik) if nik == "3204012345678901"));

    assert_eq!(repo.count_employees().unwrap(), 1);
}

#[test]
fn update_changes_fields_but_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    let before = repo.get_employee(id).unwrap().unwrap();

    let mut updated = sample_employee("3204012345678901", "Budi Hartono");
    updated.telepon = "089876543210".to_string();
    updated.status_keluarga = MaritalStatus::BelumMenikah;
    repo.update_employee(id, &updated).unwrap();

    let after = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(after.nama, "Budi Hartono");
    assert_eq!(after.telepon, "089876543210");
    assert_eq!(after.status_keluarga, MaritalStatus::BelumMenikah);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn update_to_a_taken_nik_reports_nik_taken() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    let second = repo
        .create_employee(&sample_employee("3204012345678902", "Siti Aminah"))
        .unwrap();

    let stolen = sample_employee("3204012345678901", "Siti Aminah");
    let err = repo.update_employee(second, &stolen).unwrap_err();
    assert!(matches!(err, RepoError::NikTaken(nik) if nik == "3204012345678901"));
}

#[test]
fn update_keeping_own_nik_is_not_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();

    let same_nik = sample_employee("3204012345678901", "Budi Hartono");
    repo.update_employee(id, &same_nik).unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.nama, "Budi Hartono");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo
        .update_employee(42, &sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn delete_removes_the_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    repo.delete_employee(id).unwrap();

    assert!(repo.get_employee(id).unwrap().is_none());
    assert_eq!(repo.count_employees().unwrap(), 0);

    let err = repo.delete_employee(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(deleted) if deleted == id));
}

#[test]
fn deleted_ids_are_never_reassigned() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    repo.delete_employee(first).unwrap();

    let second = repo
        .create_employee(&sample_employee("3204012345678902", "Siti Aminah"))
        .unwrap();
    assert!(second > first);
}

#[test]
fn list_matches_name_and_nik_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    repo.create_employee(&sample_employee("3204012345678902", "Siti Aminah"))
        .unwrap();

    let by_name = repo
        .list_employees(&EmployeeListQuery {
            search: Some("budi".to_string()),
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].nama, "Budi Santoso");

    let by_nik = repo
        .list_employees(&EmployeeListQuery {
            search: Some("678902".to_string()),
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert_eq!(by_nik.len(), 1);
    assert_eq!(by_nik[0].nama, "Siti Aminah");

    let none = repo
        .list_employees(&EmployeeListQuery {
            search: Some("tidak ada".to_string()),
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn list_search_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();

    let percent = repo
        .list_employees(&EmployeeListQuery {
            search: Some("%".to_string()),
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert!(percent.is_empty());

    let underscore = repo
        .list_employees(&EmployeeListQuery {
            search: Some("_".to_string()),
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert!(underscore.is_empty());
}

#[test]
fn list_orders_newest_first_with_stable_pagination() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    let second = repo
        .create_employee(&sample_employee("3204012345678902", "Siti Aminah"))
        .unwrap();
    let third = repo
        .create_employee(&sample_employee("3204012345678903", "Agus Wibowo"))
        .unwrap();

    // Pin identical timestamps so ordering falls to the id tie-breaker.
    conn.execute(
        "UPDATE employees SET created_at = '2024-01-01T00:00:00.000Z';",
        [],
    )
    .unwrap();

    let all = repo.list_employees(&EmployeeListQuery::default()).unwrap();
    let ids: Vec<_> = all.iter().map(|employee| employee.id).collect();
    assert_eq!(ids, vec![third, second, first]);

    let page = repo
        .list_employees(&EmployeeListQuery {
            limit: Some(2),
            offset: 1,
            ..EmployeeListQuery::default()
        })
        .unwrap();
    let page_ids: Vec<_> = page.iter().map(|employee| employee.id).collect();
    assert_eq!(page_ids, vec![second, first]);

    let offset_only = repo
        .list_employees(&EmployeeListQuery {
            offset: 2,
            ..EmployeeListQuery::default()
        })
        .unwrap();
    assert_eq!(offset_only.len(), 1);
    assert_eq!(offset_only[0].id, first);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_employees_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("employees"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_employees_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nik TEXT NOT NULL,
            nama TEXT NOT NULL,
            telepon TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            status_keluarga TEXT NOT NULL,
            pendidikan TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "employees",
            column: "created_at"
        })
    ));
}

#[test]
fn invalid_persisted_status_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&sample_employee("3204012345678901", "Budi Santoso"))
        .unwrap();
    // Bypass the CHECK constraint to plant a value the app never writes.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "UPDATE employees SET status_keluarga = 'Cerai' WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let err = repo.get_employee(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

fn sample_employee(nik: &str, nama: &str) -> NewEmployee {
    NewEmployee {
        nik: nik.to_string(),
        nama: nama.to_string(),
        telepon: "081234567890".to_string(),
        latitude: -6.2,
        longitude: 106.816666,
        status_keluarga: MaritalStatus::Menikah,
        pendidikan: Education::Level(EducationLevel::S1),
    }
}
