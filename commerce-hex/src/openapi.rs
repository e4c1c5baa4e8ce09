//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use commerce_types::domain::{MemberId, OrderId, OrderStatus, PaymentId, PaymentMethod, PaymentStatus};
use commerce_types::dto::{
    CreateOrderRequest, CreatePaymentRequest, MemberResponse, OrderResponse, PaymentResponse,
    RegisterMemberRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Register a new member
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "members",
    request_body = RegisterMemberRequest,
    responses(
        (status = 201, description = "Member registered", body = MemberResponse),
        (status = 400, description = "Empty name or email"),
        (status = 409, description = "Email already registered")
    )
)]
async fn register_member() {}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "members",
    params(("id" = MemberId, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = MemberResponse),
        (status = 404, description = "Member not found")
    )
)]
async fn get_member() {}

/// List orders owned by a member
#[utoipa::path(
    get,
    path = "/api/members/{id}/orders",
    tag = "members",
    params(("id" = MemberId, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Orders, newest first", body = Vec<OrderResponse>),
        (status = 404, description = "Member not found")
    )
)]
async fn list_member_orders() {}

/// Place a new order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Member not found")
    )
)]
async fn create_order() {}

/// Get order by ID
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = OrderId, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
async fn get_order() {}

/// Get the payment attached to an order
#[utoipa::path(
    get,
    path = "/api/orders/{id}/payment",
    tag = "orders",
    params(("id" = OrderId, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 404, description = "Order or payment not found")
    )
)]
async fn get_order_payment() {}

/// Request a payment against an order
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment requested", body = PaymentResponse),
        (status = 400, description = "Payment amount does not equal order amount"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already has a payment")
    )
)]
async fn request_payment() {}

/// Approve a payment and complete the linked order
#[utoipa::path(
    post,
    path = "/api/payments/{id}/approve",
    tag = "payments",
    params(("id" = PaymentId, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment approved, order completed", body = PaymentResponse),
        (status = 404, description = "Payment not found"),
        (status = 409, description = "Payment already processed")
    )
)]
async fn approve_payment() {}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(("id" = PaymentId, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
async fn get_payment() {}

/// OpenAPI documentation for the Commerce API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Commerce Service API",
        version = "1.0.0",
        description = "An order-commerce backend with members, orders, and payment request/approval.",
        license(name = "MIT"),
    ),
    paths(
        health,
        register_member,
        get_member,
        list_member_orders,
        create_order,
        get_order,
        get_order_payment,
        request_payment,
        approve_payment,
        get_payment,
    ),
    components(
        schemas(
            RegisterMemberRequest,
            MemberResponse,
            CreateOrderRequest,
            OrderResponse,
            CreatePaymentRequest,
            PaymentResponse,
            OrderStatus,
            PaymentStatus,
            PaymentMethod,
            MemberId,
            OrderId,
            PaymentId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "members", description = "Member registration and lookup"),
        (name = "orders", description = "Order placement and lookup"),
        (name = "payments", description = "Payment request, approval, and lookup"),
    )
)]
pub struct ApiDoc;
