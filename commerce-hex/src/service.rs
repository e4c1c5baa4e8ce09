//! Commerce Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use commerce_types::{
    Amount, AppError, Clock, CommerceRepository, CreateOrderRequest, CreatePaymentRequest,
    DomainError, Member, MemberId, Order, OrderId, Payment, PaymentId, RegisterMemberRequest,
    RepoError, SystemClock,
};

/// Application service for member, order, and payment operations.
///
/// Generic over `R: CommerceRepository` - the adapter is injected at compile
/// time. The clock is injected as well, so creation and approval timestamps
/// are deterministic under test. Every operation takes at most one clock
/// reading.
pub struct CommerceService<R: CommerceRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: CommerceRepository> CommerceService<R> {
    /// Creates a new service backed by the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    /// Creates a new service with an explicit clock.
    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Member Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new member.
    ///
    /// The email check here produces a clean early error; the storage-level
    /// unique constraint remains the authoritative enforcement under
    /// concurrent registration, and both paths surface as the same conflict.
    pub async fn register_member(&self, req: RegisterMemberRequest) -> Result<Member, AppError> {
        let member = Member::new(req.name, req.email, self.clock.now()).map_err(AppError::from)?;

        let existing = self
            .repo
            .find_member_by_email(&member.email)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(DomainError::DuplicateEmail(member.email).into());
        }

        self.repo.insert_member(&member).await?;
        Ok(member)
    }

    /// Gets a member by ID.
    pub async fn get_member(&self, id: MemberId) -> Result<Member, AppError> {
        self.repo
            .get_member(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Member {}", id))))
    }

    /// Lists orders owned by a member, newest first.
    pub async fn list_member_orders(&self, id: MemberId) -> Result<Vec<Order>, AppError> {
        // Verify member exists first
        let _ = self.get_member(id).await?;

        self.repo
            .list_orders_for_member(id)
            .await
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Order Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Places a new order for a member.
    ///
    /// The amount is normalized to 2 fractional digits; negative or
    /// non-finite amounts are rejected. The creation timestamp comes from a
    /// single clock reading.
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, AppError> {
        let member = self.get_member(req.member_id).await?;
        let amount = Amount::from_major(req.amount).map_err(AppError::from)?;

        let order = Order::new(member.id, amount, self.clock.now());
        self.repo.insert_order(&order).await?;
        Ok(order)
    }

    /// Gets an order by ID.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, AppError> {
        self.repo
            .get_order(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Order {}", id))))
    }

    /// Gets the payment attached to an order, if one exists.
    pub async fn get_order_payment(&self, id: OrderId) -> Result<Payment, AppError> {
        let order = self.get_order(id).await?;

        self.repo
            .find_payment_for_order(order.id)
            .await
            .map_err(Into::into)
            .and_then(|opt| {
                opt.ok_or_else(|| AppError::NotFound(format!("Payment for order {}", id)))
            })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Requests a payment against an order.
    ///
    /// The normalized amount must equal the order's total amount exactly.
    /// An order can carry at most one payment; a second request is rejected
    /// as a conflict.
    pub async fn request_payment(&self, req: CreatePaymentRequest) -> Result<Payment, AppError> {
        let order = self.get_order(req.order_id).await?;
        let amount = Amount::from_major(req.amount).map_err(AppError::from)?;

        let payment = Payment::request(&order, amount, req.method, self.clock.now())
            .map_err(AppError::from)?;
        self.repo.insert_payment(&payment).await?;
        Ok(payment)
    }

    /// Approves a payment and completes its order atomically.
    ///
    /// Approval is legal only from REQUESTED; a second approval is an error,
    /// while the order-side completion stays idempotent.
    pub async fn approve_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.repo
            .approve_payment(id, self.clock.now())
            .await
            .map_err(|e| match e {
                RepoError::NotFound => AppError::NotFound(format!("Payment {}", id)),
                other => other.into(),
            })
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.repo
            .get_payment(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Payment {}", id))))
    }
}
