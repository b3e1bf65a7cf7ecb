pub mod category;
pub mod common;
pub mod dashboard;
pub mod form;
pub mod order;
pub mod pagination;
pub mod payment_check;
pub mod product;
pub mod user;

pub use category::*;
pub use common::*;
pub use dashboard::*;
pub use form::*;
pub use order::*;
pub use pagination::*;
pub use payment_check::*;
pub use product::*;
pub use user::*;
