//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::amount::Amount;
use super::order::{Order, OrderId};
use crate::error::DomainError;

/// Unique identifier for a Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Supported payment methods. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    VirtualAccount,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "CARD"),
            PaymentMethod::BankTransfer => write!(f, "BANK_TRANSFER"),
            PaymentMethod::VirtualAccount => write!(f, "VIRTUAL_ACCOUNT"),
        }
    }
}

/// Lifecycle status of a payment.
///
/// Status only advances REQUESTED -> APPROVED. Unlike an order's completion,
/// approval is not idempotent: approving twice is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Requested, awaiting approval
    Requested,
    /// Approved (terminal)
    Approved,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Requested => write!(f, "REQUESTED"),
            PaymentStatus::Approved => write!(f, "APPROVED"),
        }
    }
}

/// A payment attempt against exactly one order.
///
/// At most one payment exists per order; the storage layer enforces this with
/// a uniqueness constraint on `order_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// The order this payment pays for
    pub order_id: OrderId,
    /// Amount, must equal the order's amount at creation time
    pub amount: Amount,
    /// How the payment is made
    pub method: PaymentMethod,
    /// Lifecycle status
    pub status: PaymentStatus,
    /// Set exactly once, on approval
    pub approved_at: Option<DateTime<Utc>>,
    /// When the payment was requested
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a payment request against an order.
    ///
    /// Fails with `AmountMismatch` unless the normalized amount equals the
    /// order's total amount exactly.
    pub fn request(
        order: &Order,
        amount: Amount,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if amount != order.amount {
            return Err(DomainError::AmountMismatch {
                expected: order.amount,
                got: amount,
            });
        }

        Ok(Self {
            id: PaymentId::new(),
            order_id: order.id,
            amount,
            method,
            status: PaymentStatus::Requested,
            approved_at: None,
            created_at: now,
        })
    }

    /// Creates a payment with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: PaymentId,
        order_id: OrderId,
        amount: Amount,
        method: PaymentMethod,
        status: PaymentStatus,
        approved_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            amount,
            method,
            status,
            approved_at,
            created_at,
        }
    }

    /// Approves the payment, stamping the approval time.
    ///
    /// Only legal from REQUESTED; fails with `AlreadyProcessed` otherwise.
    /// The caller is responsible for completing the linked order in the same
    /// transaction.
    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != PaymentStatus::Requested {
            return Err(DomainError::AlreadyProcessed);
        }
        self.status = PaymentStatus::Approved;
        self.approved_at = Some(now);
        Ok(())
    }
}
