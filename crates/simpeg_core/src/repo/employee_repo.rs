//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `employees` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `nik` uniqueness violations surface as `RepoError::NikTaken`, never
//!   as a raw constraint error.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `created_at` is written once on create and never touched by updates.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::{Education, Employee, EmployeeId, MaritalStatus, NewEmployee};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    nik,
    nama,
    telepon,
    latitude,
    longitude,
    status_keluarga,
    pendidikan,
    created_at
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target employee does not exist.
    NotFound(EmployeeId),
    /// Another employee already holds this NIK.
    NikTaken(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::NikTaken(nik) => write!(f, "NIK sudah terdaftar: {nik}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "employee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "employee repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::NikTaken(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeListQuery {
    /// Case-insensitive substring match against `nama` and `nik`.
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<EmployeeId>;
    fn update_employee(&self, id: EmployeeId, employee: &NewEmployee) -> RepoResult<()>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn get_employee_by_nik(&self, nik: &str) -> RepoResult<Option<Employee>>;
    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>>;
    fn count_employees(&self) -> RepoResult<u64>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates the repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        let created_at = Utc::now();
        let inserted = self.conn.execute(
            "INSERT INTO employees (
                nik,
                nama,
                telepon,
                latitude,
                longitude,
                status_keluarga,
                pendidikan,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                employee.nik.as_str(),
                employee.nama.as_str(),
                employee.telepon.as_str(),
                employee.latitude,
                employee.longitude,
                marital_status_to_db(employee.status_keluarga),
                employee.pendidikan.label(),
                timestamp_to_db(created_at),
            ],
        );

        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_nik_unique_violation(&err) => {
                Err(RepoError::NikTaken(employee.nik.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_employee(&self, id: EmployeeId, employee: &NewEmployee) -> RepoResult<()> {
        let updated = self.conn.execute(
            "UPDATE employees
             SET
                nik = ?1,
                nama = ?2,
                telepon = ?3,
                latitude = ?4,
                longitude = ?5,
                status_keluarga = ?6,
                pendidikan = ?7
             WHERE id = ?8;",
            params![
                employee.nik.as_str(),
                employee.nama.as_str(),
                employee.telepon.as_str(),
                employee.latitude,
                employee.longitude,
                marital_status_to_db(employee.status_keluarga),
                employee.pendidikan.label(),
                id,
            ],
        );

        let changed = match updated {
            Ok(changed) => changed,
            Err(err) if is_nik_unique_violation(&err) => {
                return Err(RepoError::NikTaken(employee.nik.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn get_employee_by_nik(&self, nik: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE nik = ?1;"))?;

        let mut rows = stmt.query(params![nik])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn list_employees(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        let mut sql = format!("{EMPLOYEE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(search) = query.search.as_deref().filter(|text| !text.is_empty()) {
            sql.push_str(" AND (nama LIKE ? ESCAPE '\\' OR nik LIKE ? ESCAPE '\\')");
            let pattern = format!("%{}%", escape_like(search));
            bind_values.push(Value::Text(pattern.clone()));
            bind_values.push(Value::Text(pattern));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn count_employees(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let status_text: String = row.get("status_keluarga")?;
    let status_keluarga = parse_marital_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid marital status `{status_text}` in employees.status_keluarga"
        ))
    })?;

    let pendidikan_text: String = row.get("pendidikan")?;
    if pendidikan_text.is_empty() {
        return Err(RepoError::InvalidData(
            "empty label in employees.pendidikan".to_string(),
        ));
    }

    let created_at_text: String = row.get("created_at")?;
    let created_at = parse_timestamp(&created_at_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{created_at_text}` in employees.created_at"
        ))
    })?;

    Ok(Employee {
        id: row.get("id")?,
        nik: row.get("nik")?,
        nama: row.get("nama")?,
        telepon: row.get("telepon")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        status_keluarga,
        pendidikan: Education::from_label(&pendidikan_text),
        created_at,
    })
}

fn marital_status_to_db(status: MaritalStatus) -> &'static str {
    status.label()
}

fn parse_marital_status(value: &str) -> Option<MaritalStatus> {
    MaritalStatus::from_label(value)
}

fn timestamp_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// SQLite reports a violated unique index as a constraint failure naming
/// the indexed column. Sniffing the message is the only way to tell the
/// NIK index apart from any other constraint.
fn is_nik_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => {
            failure.code == rusqlite::ErrorCode::ConstraintViolation
                && message
                    .as_deref()
                    .map_or(false, |text| text.contains("employees.nik"))
        }
        _ => false,
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn ensure_employee_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "employees")? {
        return Err(RepoError::MissingRequiredTable("employees"));
    }

    for column in [
        "id",
        "nik",
        "nama",
        "telepon",
        "latitude",
        "longitude",
        "status_keluarga",
        "pendidikan",
        "created_at",
    ] {
        if !table_has_column(conn, "employees", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "employees",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
