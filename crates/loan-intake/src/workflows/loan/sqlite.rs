use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use rust_decimal::Decimal;

use super::domain::{ApplicationId, JobStatus, LoanApplication, LoanApplicationRecord};
use super::repository::{ApplicationStore, StoreError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS loan_applications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT NOT NULL UNIQUE,
        job_status TEXT NOT NULL,
        salary TEXT NOT NULL,
        other_loans TEXT NOT NULL
    )
";

/// SQLite-backed application store. The UNIQUE constraints on `email` and
/// `phone` are what actually keeps duplicates out.
pub struct SqliteApplicationStore {
    conn: Mutex<Connection>,
}

impl SqliteApplicationStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref()).map_err(unavailable)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection mutex poisoned".to_string()))
    }
}

impl ApplicationStore for SqliteApplicationStore {
    fn exists(&self, email: &str, phone: &str) -> Result<bool, StoreError> {
        let conn = self.connection()?;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM loan_applications WHERE email = ?1 OR phone = ?2)",
            params![email, phone],
            |row| row.get::<_, bool>(0),
        )
        .map_err(unavailable)
    }

    fn insert(&self, application: &LoanApplication) -> Result<ApplicationId, StoreError> {
        let conn = self.connection()?;
        let result = conn.execute(
            "INSERT INTO loan_applications
                (name, birth_date, email, phone, job_status, salary, other_loans)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                application.name,
                application.birth_date.format("%Y-%m-%d").to_string(),
                application.email,
                application.phone,
                application.job_status.label(),
                application.salary.to_string(),
                application.other_loans.to_string(),
            ],
        );

        match result {
            Ok(_) => Ok(ApplicationId(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate)
            }
            Err(err) => Err(unavailable(err)),
        }
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<LoanApplicationRecord>, StoreError> {
        let conn = self.connection()?;
        let row = conn
            .query_row(
                "SELECT id, name, birth_date, email, phone, job_status, salary, other_loans
                 FROM loan_applications WHERE id = ?1",
                params![id.0],
                RawRow::read,
            )
            .optional()
            .map_err(unavailable)?;

        row.map(RawRow::into_record).transpose()
    }
}

/// Column values as stored, before parsing back into domain types.
struct RawRow {
    id: i64,
    name: String,
    birth_date: String,
    email: String,
    phone: String,
    job_status: String,
    salary: String,
    other_loans: String,
}

impl RawRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            birth_date: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            job_status: row.get(5)?,
            salary: row.get(6)?,
            other_loans: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<LoanApplicationRecord, StoreError> {
        let birth_date = NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d")
            .map_err(|err| StoreError::Corrupt(format!("birth_date '{}': {err}", self.birth_date)))?;
        let job_status = JobStatus::from_label(&self.job_status)
            .ok_or_else(|| StoreError::Corrupt(format!("job_status '{}'", self.job_status)))?;

        Ok(LoanApplicationRecord {
            id: ApplicationId(self.id),
            application: LoanApplication {
                name: self.name,
                birth_date,
                email: self.email,
                phone: self.phone,
                job_status,
                salary: decimal_column("salary", &self.salary)?,
                other_loans: decimal_column("other_loans", &self.other_loans)?,
            },
        })
    }
}

fn decimal_column(column: &str, raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw).map_err(|err| StoreError::Corrupt(format!("{column} '{raw}': {err}")))
}

fn unavailable(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
