#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("insert unique violation")]
    InsertUniqueViolation,

    #[error("quota for vatin exceeded")]
    QuotaExceeded,

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
