//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use commerce_types::{
    AppError, CommerceRepository, CreateOrderRequest, CreatePaymentRequest, MemberId,
    MemberResponse, OrderId, OrderResponse, PaymentId, PaymentResponse, RegisterMemberRequest,
};

use crate::CommerceService;

/// Application state shared across handlers.
pub struct AppState<R: CommerceRepository> {
    pub service: CommerceService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Members
// ─────────────────────────────────────────────────────────────────────────────

/// Register a new member.
#[tracing::instrument(skip(state), fields(email = %req.email))]
pub async fn register_member<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state.service.register_member(req).await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// Get member by ID.
#[tracing::instrument(skip(state), fields(member_id = %id))]
pub async fn get_member<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: MemberId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid member ID".into()))?;

    let member = state.service.get_member(member_id).await?;
    Ok(Json(MemberResponse::from(member)))
}

/// List orders owned by a member.
#[tracing::instrument(skip(state), fields(member_id = %id))]
pub async fn list_member_orders<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: MemberId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid member ID".into()))?;

    let orders = state.service.list_member_orders(member_id).await?;
    let response: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(Json(response))
}

// ─────────────────────────────────────────────────────────────────────────────
// Orders
// ─────────────────────────────────────────────────────────────────────────────

/// Place a new order.
#[tracing::instrument(skip(state), fields(member_id = %req.member_id, amount = req.amount))]
pub async fn create_order<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.service.create_order(req).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// Get order by ID.
#[tracing::instrument(skip(state), fields(order_id = %id))]
pub async fn get_order<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid order ID".into()))?;

    let order = state.service.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(order)))
}

/// Get the payment attached to an order.
#[tracing::instrument(skip(state), fields(order_id = %id))]
pub async fn get_order_payment<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid order ID".into()))?;

    let payment = state.service.get_order_payment(order_id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Request a payment against an order.
#[tracing::instrument(skip(state), fields(order_id = %req.order_id, amount = req.amount))]
pub async fn request_payment<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.request_payment(req).await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// Approve a payment; completes the linked order.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn approve_payment<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid payment ID".into()))?;

    let payment = state.service.approve_payment(payment_id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// Get payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R: CommerceRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid payment ID".into()))?;

    let payment = state.service.get_payment(payment_id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}
