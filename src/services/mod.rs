pub mod category_service;
pub mod order_service;
pub mod payout_service;
pub mod product_service;
pub mod user_service;
pub mod view_cache;

pub use category_service::*;
pub use order_service::*;
pub use payout_service::*;
pub use product_service::*;
pub use user_service::*;
pub use view_cache::*;

use actix_web::web;

use crate::database::LazyConnection;

/// Every service the handlers extract, sharing one lazy connection
#[derive(Clone)]
pub struct AppServices {
    pub users: UserService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub orders: OrderService,
    pub payouts: PayoutService,
    pub cache: ViewCache,
}

impl AppServices {
    pub fn new(db: LazyConnection, cache: ViewCache) -> Self {
        Self {
            users: UserService::new(db.clone()),
            categories: CategoryService::new(db.clone()),
            products: ProductService::new(db.clone()),
            orders: OrderService::new(db.clone()),
            payouts: PayoutService::new(db),
            cache,
        }
    }

    pub fn app_data(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.categories.clone()))
            .app_data(web::Data::new(self.products.clone()))
            .app_data(web::Data::new(self.orders.clone()))
            .app_data(web::Data::new(self.payouts.clone()))
            .app_data(web::Data::new(self.cache.clone()));
    }
}
