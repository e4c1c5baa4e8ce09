//! Client example demonstrating the full order-to-payment flow against a
//! running server.
//!
//! Run with: cargo run -p commerce-app --example client_example

use std::net::SocketAddr;

use commerce_client::CommerceClient;
use commerce_hex::{CommerceService, inbound::HttpServer};
use commerce_repo::build_repo;
use commerce_types::PaymentMethod;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("commerce.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let service = CommerceService::new(repo);
    let server = HttpServer::new(service);
    let router = server.router();

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        axum::serve(
            TcpListener::bind(&server_addr).await.unwrap(),
            router.into_make_service(),
        )
        .await
        .unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let client = CommerceClient::new(format!("http://127.0.0.1:{port}"));

    println!("\n1. Checking health...");
    let healthy = client.health().await?;
    println!("   healthy: {healthy}");

    println!("\n2. Registering member...");
    let member = client.register_member("Alice", "alice@example.com").await?;
    println!("   member {} <{}>", member.id, member.email);

    println!("\n3. Placing order for 50000.00...");
    let order = client.create_order(member.id, 50000.0).await?;
    println!("   order {} status {:?} amount {}", order.id, order.status, order.amount);

    println!("\n4. Requesting CARD payment...");
    let payment = client
        .request_payment(order.id, 50000.0, PaymentMethod::Card)
        .await?;
    println!("   payment {} status {:?}", payment.id, payment.status);

    println!("\n5. Approving payment...");
    let approved = client.approve_payment(payment.id).await?;
    println!(
        "   payment {} status {:?} approved at {:?}",
        approved.id, approved.status, approved.approved_at
    );

    println!("\n6. Fetching final order state...");
    let order = client.get_order(order.id).await?;
    println!("   order {} status {:?} amount {}", order.id, order.status, order.amount);

    println!("\n✓ Done");
    Ok(())
}
