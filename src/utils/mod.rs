pub mod ids;
pub mod jwt;
pub mod pagination;
pub mod search;

pub use ids::*;
pub use jwt::*;
pub use pagination::fetch_page;
pub use search::{contains_any, match_nothing};
