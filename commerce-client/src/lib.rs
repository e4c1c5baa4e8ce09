//! # Commerce Client SDK
//!
//! A typed Rust client for the Commerce API.

use commerce_types::{
    CreateOrderRequest, CreatePaymentRequest, MemberId, MemberResponse, OrderId, OrderResponse,
    PaymentId, PaymentMethod, PaymentResponse, RegisterMemberRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Commerce API client.
pub struct CommerceClient {
    base_url: String,
    http: Client,
}

impl CommerceClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Members
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new member.
    pub async fn register_member(
        &self,
        name: &str,
        email: &str,
    ) -> Result<MemberResponse, ClientError> {
        let req = RegisterMemberRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        self.post("/api/members", &req).await
    }

    /// Gets a member by ID.
    pub async fn get_member(&self, id: MemberId) -> Result<MemberResponse, ClientError> {
        self.get(&format!("/api/members/{}", id)).await
    }

    /// Lists orders owned by a member, newest first.
    pub async fn list_member_orders(
        &self,
        id: MemberId,
    ) -> Result<Vec<OrderResponse>, ClientError> {
        self.get(&format!("/api/members/{}/orders", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────────────

    /// Places a new order.
    pub async fn create_order(
        &self,
        member_id: MemberId,
        amount: f64,
    ) -> Result<OrderResponse, ClientError> {
        let req = CreateOrderRequest { member_id, amount };
        self.post("/api/orders", &req).await
    }

    /// Gets an order by ID.
    pub async fn get_order(&self, id: OrderId) -> Result<OrderResponse, ClientError> {
        self.get(&format!("/api/orders/{}", id)).await
    }

    /// Gets the payment attached to an order.
    pub async fn get_order_payment(&self, id: OrderId) -> Result<PaymentResponse, ClientError> {
        self.get(&format!("/api/orders/{}/payment", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────────

    /// Requests a payment against an order.
    pub async fn request_payment(
        &self,
        order_id: OrderId,
        amount: f64,
        method: PaymentMethod,
    ) -> Result<PaymentResponse, ClientError> {
        let req = CreatePaymentRequest {
            order_id,
            amount,
            method,
        };
        self.post("/api/payments", &req).await
    }

    /// Approves a payment; the linked order is completed with it.
    pub async fn approve_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/payments/{}/approve", self.base_url, id))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        self.get(&format!("/api/payments/{}", id)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CommerceClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = CommerceClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
