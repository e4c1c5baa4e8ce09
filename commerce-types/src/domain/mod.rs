//! Domain models for the commerce service.

pub mod amount;
pub mod member;
pub mod order;
pub mod payment;

pub use amount::Amount;
pub use member::{Member, MemberId};
pub use order::{Order, OrderId, OrderStatus};
pub use payment::{Payment, PaymentId, PaymentMethod, PaymentStatus};
