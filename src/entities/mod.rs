pub mod categories;
pub mod orders;
pub mod payment_checks;
pub mod products;
pub mod users;

pub use categories as category_entity;
pub use orders as order_entity;
pub use orders::{OrderItem, OrderItems, OrderStatus, PaymentReceipt};
pub use payment_checks as payment_check_entity;
pub use products as product_entity;
pub use users as user_entity;
pub use users::{ReferralPurchase, ReferralPurchases, ReferredBy};
