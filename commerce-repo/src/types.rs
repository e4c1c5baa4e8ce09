//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use commerce_types::{
    Amount, Member, MemberId, Order, OrderId, OrderStatus, Payment, PaymentId, PaymentMethod,
    PaymentStatus, RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Member row from database.
#[derive(FromRow)]
pub struct DbMember {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub name: String,
    pub email: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

/// Order row from database.
#[derive(FromRow)]
pub struct DbOrder {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    #[cfg(not(feature = "sqlite"))]
    pub member_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub member_id: String,

    pub amount: i64,
    pub status: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    #[cfg(not(feature = "sqlite"))]
    pub order_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub order_id: String,

    pub amount: i64,
    pub method: String,
    pub status: String,

    #[cfg(not(feature = "sqlite"))]
    pub approved_at: Option<DateTime<Utc>>,
    #[cfg(feature = "sqlite")]
    pub approved_at: Option<String>,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_order_status(s: &str) -> Result<OrderStatus, RepoError> {
    match s {
        "CREATED" => Ok(OrderStatus::Created),
        "PAID" => Ok(OrderStatus::Paid),
        _ => Err(RepoError::Database(format!("Unknown order status: {}", s))),
    }
}

pub fn parse_payment_status(s: &str) -> Result<PaymentStatus, RepoError> {
    match s {
        "REQUESTED" => Ok(PaymentStatus::Requested),
        "APPROVED" => Ok(PaymentStatus::Approved),
        _ => Err(RepoError::Database(format!(
            "Unknown payment status: {}",
            s
        ))),
    }
}

pub fn parse_payment_method(s: &str) -> Result<PaymentMethod, RepoError> {
    match s {
        "CARD" => Ok(PaymentMethod::Card),
        "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
        "VIRTUAL_ACCOUNT" => Ok(PaymentMethod::VirtualAccount),
        _ => Err(RepoError::Database(format!(
            "Unknown payment method: {}",
            s
        ))),
    }
}

/// Maps a unique-constraint violation to the given domain conflict; any other
/// database error is passed through as `RepoError::Database`.
pub fn map_unique_violation(
    e: sqlx::Error,
    conflict: impl FnOnce() -> commerce_types::DomainError,
) -> RepoError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        RepoError::Domain(conflict())
    } else {
        RepoError::Database(e.to_string())
    }
}

#[cfg(feature = "sqlite")]
fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| RepoError::Database(e.to_string()))
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbMember {
    /// Convert database row to domain Member.
    pub fn into_domain(self) -> Result<Member, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let (id, created_at) = (MemberId::from_uuid(self.id), self.created_at);

        #[cfg(feature = "sqlite")]
        let (id, created_at) = {
            let uuid =
                uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;
            (MemberId::from_uuid(uuid), parse_datetime(&self.created_at)?)
        };

        Ok(Member::from_parts(id, self.name, self.email, created_at))
    }
}

impl DbOrder {
    /// Convert database row to domain Order.
    pub fn into_domain(self) -> Result<Order, RepoError> {
        let status = parse_order_status(&self.status)?;
        let amount = Amount::from_minor(self.amount).map_err(RepoError::Domain)?;

        #[cfg(not(feature = "sqlite"))]
        let (id, member_id, created_at) = (
            OrderId::from_uuid(self.id),
            MemberId::from_uuid(self.member_id),
            self.created_at,
        );

        #[cfg(feature = "sqlite")]
        let (id, member_id, created_at) = {
            let uuid =
                uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;
            let member_uuid = uuid::Uuid::parse_str(&self.member_id)
                .map_err(|e| RepoError::Database(e.to_string()))?;
            (
                OrderId::from_uuid(uuid),
                MemberId::from_uuid(member_uuid),
                parse_datetime(&self.created_at)?,
            )
        };

        Ok(Order::from_parts(id, member_id, amount, status, created_at))
    }
}

impl DbPayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let status = parse_payment_status(&self.status)?;
        let method = parse_payment_method(&self.method)?;
        let amount = Amount::from_minor(self.amount).map_err(RepoError::Domain)?;

        #[cfg(not(feature = "sqlite"))]
        let (id, order_id, approved_at, created_at) = (
            PaymentId::from_uuid(self.id),
            OrderId::from_uuid(self.order_id),
            self.approved_at,
            self.created_at,
        );

        #[cfg(feature = "sqlite")]
        let (id, order_id, approved_at, created_at) = {
            let uuid =
                uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;
            let order_uuid = uuid::Uuid::parse_str(&self.order_id)
                .map_err(|e| RepoError::Database(e.to_string()))?;
            let approved_at = self.approved_at.as_deref().map(parse_datetime).transpose()?;
            (
                PaymentId::from_uuid(uuid),
                OrderId::from_uuid(order_uuid),
                approved_at,
                parse_datetime(&self.created_at)?,
            )
        };

        Ok(Payment::from_parts(
            id, order_id, amount, method, status, approved_at, created_at,
        ))
    }
}
