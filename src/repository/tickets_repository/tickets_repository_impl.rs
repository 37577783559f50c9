use super::{entity::TicketFindEntity, InsertedTicket, Ticket, TicketsRepository};
use crate::repository::Error;
use axum::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct TicketsRepositoryImpl {
    pool: PgPool,
}

impl TicketsRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketsRepository for TicketsRepositoryImpl {
    async fn count_by_vatin(&self, vatin: &str) -> Result<i64, Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE vatin = $1")
            .bind(vatin)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_all(&self) -> Result<i64, Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert(
        &self,
        id: Uuid,
        vatin: &str,
        first_name: &str,
        last_name: &str,
        max_per_vatin: i64,
    ) -> Result<InsertedTicket, Error> {
        let mut transaction = self.pool.begin().await?;

        // Lock is released on commit or rollback.
        // Inserts for the same vatin wait here so count below can't go stale.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(vatin)
            .execute(&mut *transaction)
            .await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE vatin = $1")
            .bind(vatin)
            .fetch_one(&mut *transaction)
            .await?;
        if count >= max_per_vatin {
            transaction.rollback().await?;
            return Err(Error::QuotaExceeded);
        }

        let created_at = sqlx::query_scalar::<_, OffsetDateTime>(
            "INSERT INTO tickets (id, vatin, first_name, last_name, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING created_at",
        )
        .bind(id)
        .bind(vatin)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref database_error) if database_error.is_unique_violation() => {
                Error::InsertUniqueViolation
            }
            err => Error::Sqlx(err),
        })?;

        transaction.commit().await?;

        Ok(InsertedTicket { id, created_at })
    }

    async fn find(&self, id: Uuid) -> Result<Option<Ticket>, Error> {
        let ticket = sqlx::query_as::<_, TicketFindEntity>(
            "SELECT id, vatin, first_name, last_name, created_at FROM tickets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Ticket::from);

        Ok(ticket)
    }
}
