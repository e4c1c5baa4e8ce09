//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory test doubles) implement this trait.

use chrono::{DateTime, Utc};

use crate::domain::{Member, MemberId, Order, OrderId, Payment, PaymentId};
use crate::error::RepoError;

/// The main repository port for commerce operations.
///
/// Every write operation MUST be atomic. Implementations use database
/// transactions; `members.email` and `payments.order_id` are enforced unique
/// at the storage layer, and unique-constraint violations are reported as
/// `DomainError::DuplicateEmail` / `DomainError::DuplicatePayment` so that
/// concurrent writers observe the same error kinds as the application-level
/// checks.
#[async_trait::async_trait]
pub trait CommerceRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Member Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists a new member. Fails with `DuplicateEmail` if the email is
    /// already registered.
    async fn insert_member(&self, member: &Member) -> Result<(), RepoError>;

    /// Gets a member by ID.
    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, RepoError>;

    /// Finds a member by exact email.
    async fn find_member_by_email(&self, email: &str) -> Result<Option<Member>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Order Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists a new order.
    async fn insert_order(&self, order: &Order) -> Result<(), RepoError>;

    /// Gets an order by ID.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepoError>;

    /// Lists orders owned by a member, newest first.
    async fn list_orders_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Order>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists a new payment. Fails with `DuplicatePayment` if the order
    /// already has one.
    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepoError>;

    /// Gets a payment by ID.
    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Finds the payment for an order, if any.
    async fn find_payment_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Payment>, RepoError>;

    /// Approves a payment and completes its order in one transaction (MUST be
    /// atomic).
    ///
    /// Fails with `NotFound` if the payment is absent and `AlreadyProcessed`
    /// if it is not in REQUESTED status. The linked order's transition to
    /// PAID is saved explicitly within the same transaction.
    async fn approve_payment(
        &self,
        id: PaymentId,
        approved_at: DateTime<Utc>,
    ) -> Result<Payment, RepoError>;
}
