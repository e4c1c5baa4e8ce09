//! Order domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::amount::Amount;
use super::member::MemberId;

/// Unique identifier for an Order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random OrderId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an OrderId from an existing UUID.
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

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle status of an order.
///
/// Status only advances CREATED -> PAID; there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, awaiting payment
    Created,
    /// Completed by an approved payment
    Paid,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "CREATED"),
            OrderStatus::Paid => write!(f, "PAID"),
        }
    }
}

/// A purchase record owned by a member.
///
/// The owning member and the total amount are fixed at creation. The payment
/// for an order is not referenced here; it is fetched by querying payments on
/// `order_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// Owning member
    pub member_id: MemberId,
    /// Total amount, fixed at 2 fractional digits
    pub amount: Amount,
    /// Lifecycle status
    pub status: OrderStatus,
    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order in CREATED status.
    ///
    /// Amount validity (non-negative, 2-digit scale) is guaranteed by the
    /// `Amount` type at construction.
    pub fn new(member_id: MemberId, amount: Amount, now: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::new(),
            member_id,
            amount,
            status: OrderStatus::Created,
            created_at: now,
        }
    }

    /// Creates an order with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: OrderId,
        member_id: MemberId,
        amount: Amount,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            member_id,
            amount,
            status,
            created_at,
        }
    }

    /// Transitions the order to PAID. No-op if already PAID.
    ///
    /// Only invoked as part of a successful payment approval, within the
    /// same transaction.
    pub fn mark_paid(&mut self) {
        if self.status == OrderStatus::Paid {
            return;
        }
        self.status = OrderStatus::Paid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_creation() {
        let member_id = MemberId::new();
        let amount = Amount::from_major(50000.0).unwrap();
        let order = Order::new(member_id, amount, Utc::now());

        assert_eq!(order.member_id, member_id);
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.amount.minor(), 5_000_000);
    }

    #[test]
    fn test_mark_paid() {
        let mut order = Order::new(MemberId::new(), Amount::ZERO, Utc::now());
        order.mark_paid();
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn test_mark_paid_is_idempotent() {
        let mut order = Order::new(MemberId::new(), Amount::ZERO, Utc::now());
        order.mark_paid();
        order.mark_paid();
        assert_eq!(order.status, OrderStatus::Paid);
    }
}
