//! Commerce CLI
//!
//! Command-line interface for the Commerce API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use commerce_client::CommerceClient;
use commerce_types::{MemberId, OrderId, PaymentId, PaymentMethod};

#[derive(Parser)]
#[command(name = "commerce")]
#[command(author, version, about = "Commerce API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Commerce API
    #[arg(
        long,
        env = "COMMERCE_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Member operations
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Order operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Register a new member
    Register {
        /// Display name
        name: String,
        /// Email address (globally unique)
        email: String,
    },
    /// Get member details
    Get {
        /// Member ID (UUID)
        id: String,
    },
    /// List a member's orders, newest first
    Orders {
        /// Member ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Place a new order
    Create {
        /// Owning member ID (UUID)
        #[arg(long)]
        member: String,
        /// Total amount as a decimal value
        #[arg(long)]
        amount: f64,
    },
    /// Get order details
    Get {
        /// Order ID (UUID)
        id: String,
    },
    /// Get the payment attached to an order
    Payment {
        /// Order ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Request a payment against an order
    Request {
        /// Order ID (UUID)
        #[arg(long)]
        order: String,
        /// Payment amount; must equal the order amount
        #[arg(long)]
        amount: f64,
        /// Payment method (CARD, BANK_TRANSFER, VIRTUAL_ACCOUNT)
        #[arg(long, default_value = "CARD")]
        method: String,
    },
    /// Approve a requested payment
    Approve {
        /// Payment ID (UUID)
        id: String,
    },
    /// Get payment details
    Get {
        /// Payment ID (UUID)
        id: String,
    },
}

fn parse_method(s: &str) -> Result<PaymentMethod> {
    match s.to_uppercase().as_str() {
        "CARD" => Ok(PaymentMethod::Card),
        "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
        "VIRTUAL_ACCOUNT" => Ok(PaymentMethod::VirtualAccount),
        _ => anyhow::bail!(
            "Unknown payment method: {}. Supported: CARD, BANK_TRANSFER, VIRTUAL_ACCOUNT",
            s
        ),
    }
}

fn parse_member_id(s: &str) -> Result<MemberId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid member ID: {}", s))
}

fn parse_order_id(s: &str) -> Result<OrderId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid order ID: {}", s))
}

fn parse_payment_id(s: &str) -> Result<PaymentId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid payment ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = CommerceClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Member { action } => match action {
            MemberCommands::Register { name, email } => {
                let member = client.register_member(&name, &email).await?;
                println!("{}", serde_json::to_string_pretty(&member)?);
            }
            MemberCommands::Get { id } => {
                let member_id = parse_member_id(&id)?;
                let member = client.get_member(member_id).await?;
                println!("{}", serde_json::to_string_pretty(&member)?);
            }
            MemberCommands::Orders { id } => {
                let member_id = parse_member_id(&id)?;
                let orders = client.list_member_orders(member_id).await?;
                println!("{}", serde_json::to_string_pretty(&orders)?);
            }
        },

        Commands::Order { action } => match action {
            OrderCommands::Create { member, amount } => {
                let member_id = parse_member_id(&member)?;
                let order = client.create_order(member_id, amount).await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
            }
            OrderCommands::Get { id } => {
                let order_id = parse_order_id(&id)?;
                let order = client.get_order(order_id).await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
            }
            OrderCommands::Payment { id } => {
                let order_id = parse_order_id(&id)?;
                let payment = client.get_order_payment(order_id).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Request {
                order,
                amount,
                method,
            } => {
                let order_id = parse_order_id(&order)?;
                let method = parse_method(&method)?;
                let payment = client.request_payment(order_id, amount, method).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Approve { id } => {
                let payment_id = parse_payment_id(&id)?;
                let payment = client.approve_payment(payment_id).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Get { id } => {
                let payment_id = parse_payment_id(&id)?;
                let payment = client.get_payment(payment_id).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
        },
    }

    Ok(())
}
