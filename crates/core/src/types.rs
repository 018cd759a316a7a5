/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day (`YYYY-MM-DD`) interpreted in the owning user's timezone.
pub type Day = chrono::NaiveDate;
