//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use commerce_types::{
    CommerceRepository, DomainError, Member, MemberId, Order, OrderId, OrderStatus, Payment,
    PaymentId, RepoError,
};

use crate::types::{DbMember, DbOrder, DbPayment, map_unique_violation};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CommerceRepository for PostgresRepo {
    async fn insert_member(&self, member: &Member) -> Result<(), RepoError> {
        sqlx::query(r#"INSERT INTO members (id, name, email, created_at) VALUES ($1, $2, $3, $4)"#)
            .bind(member.id.into_uuid())
            .bind(&member.name)
            .bind(&member.email)
            .bind(member.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, || DomainError::DuplicateEmail(member.email.clone()))
            })?;

        Ok(())
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, RepoError> {
        let row: Option<DbMember> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM members WHERE id = $1"#)
                .bind(id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbMember::into_domain).transpose()
    }

    async fn find_member_by_email(&self, email: &str) -> Result<Option<Member>, RepoError> {
        let row: Option<DbMember> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM members WHERE email = $1"#)
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbMember::into_domain).transpose()
    }

    async fn insert_order(&self, order: &Order) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO orders (id, member_id, amount, status, created_at) VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(order.id.into_uuid())
        .bind(order.member_id.into_uuid())
        .bind(order.amount.minor())
        .bind(order.status.to_string())
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            r#"SELECT id, member_id, amount, status, created_at FROM orders WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbOrder::into_domain).transpose()
    }

    async fn list_orders_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> = sqlx::query_as(
            r#"SELECT id, member_id, amount, status, created_at FROM orders
               WHERE member_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(member_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbOrder::into_domain).collect()
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO payments (id, order_id, amount, method, status, approved_at, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(payment.id.into_uuid())
        .bind(payment.order_id.into_uuid())
        .bind(payment.amount.minor())
        .bind(payment.method.to_string())
        .bind(payment.status.to_string())
        .bind(payment.approved_at)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::DuplicatePayment(payment.order_id))
        })?;

        Ok(())
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, order_id, amount, method, status, approved_at, created_at
               FROM payments WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn find_payment_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, order_id, amount, method, status, approved_at, created_at
               FROM payments WHERE order_id = $1"#,
        )
        .bind(order_id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn approve_payment(
        &self,
        id: PaymentId,
        approved_at: DateTime<Utc>,
    ) -> Result<Payment, RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, order_id, amount, method, status, approved_at, created_at
               FROM payments WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut payment = row.ok_or(RepoError::NotFound)?.into_domain()?;
        payment.approve(approved_at).map_err(RepoError::Domain)?;

        sqlx::query(r#"UPDATE payments SET status = $1, approved_at = $2 WHERE id = $3"#)
            .bind(payment.status.to_string())
            .bind(approved_at)
            .bind(payment.id.into_uuid())
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        // Completing the order is idempotent; the status update is saved
        // explicitly, in the same transaction as the payment.
        sqlx::query(r#"UPDATE orders SET status = $1 WHERE id = $2"#)
            .bind(OrderStatus::Paid.to_string())
            .bind(payment.order_id.into_uuid())
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(payment)
    }
}
