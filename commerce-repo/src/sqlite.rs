//! SQLite repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use commerce_types::{
    CommerceRepository, DomainError, Member, MemberId, Order, OrderId, OrderStatus, Payment,
    PaymentId, RepoError,
};

use crate::types::{DbMember, DbOrder, DbPayment, map_unique_violation};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CommerceRepository for SqliteRepo {
    async fn insert_member(&self, member: &Member) -> Result<(), RepoError> {
        sqlx::query(r#"INSERT INTO members (id, name, email, created_at) VALUES (?, ?, ?, ?)"#)
            .bind(member.id.to_string())
            .bind(&member.name)
            .bind(&member.email)
            .bind(member.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, || DomainError::DuplicateEmail(member.email.clone()))
            })?;

        Ok(())
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, RepoError> {
        let row: Option<DbMember> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM members WHERE id = ?"#)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbMember::into_domain).transpose()
    }

    async fn find_member_by_email(&self, email: &str) -> Result<Option<Member>, RepoError> {
        let row: Option<DbMember> =
            sqlx::query_as(r#"SELECT id, name, email, created_at FROM members WHERE email = ?"#)
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbMember::into_domain).transpose()
    }

    async fn insert_order(&self, order: &Order) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO orders (id, member_id, amount, status, created_at) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(order.id.to_string())
        .bind(order.member_id.to_string())
        .bind(order.amount.minor())
        .bind(order.status.to_string())
        .bind(order.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            r#"SELECT id, member_id, amount, status, created_at FROM orders WHERE id = ?"#,
        )
        .bind(id.to_string())
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
               WHERE member_id = ? ORDER BY created_at DESC"#,
        )
        .bind(member_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbOrder::into_domain).collect()
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO payments (id, order_id, amount, method, status, approved_at, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payment.id.to_string())
        .bind(payment.order_id.to_string())
        .bind(payment.amount.minor())
        .bind(payment.method.to_string())
        .bind(payment.status.to_string())
        .bind(payment.approved_at.map(|dt| dt.to_rfc3339()))
        .bind(payment.created_at.to_rfc3339())
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
               FROM payments WHERE id = ?"#,
        )
        .bind(id.to_string())
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
               FROM payments WHERE order_id = ?"#,
        )
        .bind(order_id.to_string())
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
               FROM payments WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut payment = row.ok_or(RepoError::NotFound)?.into_domain()?;
        payment.approve(approved_at).map_err(RepoError::Domain)?;

        sqlx::query(r#"UPDATE payments SET status = ?, approved_at = ? WHERE id = ?"#)
            .bind(payment.status.to_string())
            .bind(approved_at.to_rfc3339())
            .bind(payment.id.to_string())
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        // Completing the order is idempotent; the status update is saved
        // explicitly, in the same transaction as the payment.
        sqlx::query(r#"UPDATE orders SET status = ? WHERE id = ?"#)
            .bind(OrderStatus::Paid.to_string())
            .bind(payment.order_id.to_string())
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
