//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Member, MemberId, Order, OrderId, OrderStatus, Payment, PaymentId, PaymentMethod,
    PaymentStatus,
};

// ─────────────────────────────────────────────────────────────────────────────
// Member DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterMemberRequest {
    /// Display name
    #[schema(example = "Alice")]
    pub name: String,
    /// Email address, globally unique
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Response describing a member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    /// Unique member identifier
    pub id: MemberId,
    /// Display name
    #[schema(example = "Alice")]
    pub name: String,
    /// Email address
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// When the member registered (RFC 3339)
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            created_at: m.created_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Order DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to place a new order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Owning member ID
    pub member_id: MemberId,
    /// Total amount as a decimal value; normalized to 2 fractional digits
    #[schema(example = 50000.0)]
    pub amount: f64,
}

/// Response describing an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// Unique order identifier
    pub id: OrderId,
    /// Owning member ID
    pub member_id: MemberId,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Total amount at 2 fractional digits
    #[schema(example = 50000.0)]
    pub amount: f64,
    /// When the order was placed (RFC 3339)
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            member_id: o.member_id,
            status: o.status,
            amount: o.amount.to_major(),
            created_at: o.created_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment against an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// The order being paid for
    pub order_id: OrderId,
    /// Payment amount; must equal the order's total amount
    #[schema(example = 50000.0)]
    pub amount: f64,
    /// Payment method
    pub method: PaymentMethod,
}

/// Response describing a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    /// Unique payment identifier
    pub id: PaymentId,
    /// The order being paid for
    pub order_id: OrderId,
    /// Lifecycle status
    pub status: PaymentStatus,
    /// Payment method
    pub method: PaymentMethod,
    /// Payment amount at 2 fractional digits
    #[schema(example = 50000.0)]
    pub amount: f64,
    /// Set once the payment is approved (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// When the payment was requested (RFC 3339)
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            status: p.status,
            method: p.method,
            amount: p.amount.to_major(),
            approved_at: p.approved_at,
            created_at: p.created_at,
        }
    }
}
