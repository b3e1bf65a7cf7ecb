#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use perfume_admin::config::DatabaseConfig;
use perfume_admin::database::LazyConnection;
use perfume_admin::entities::*;
use perfume_admin::services::{AppServices, ViewCache};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema, Set,
};

pub async fn setup_db() -> DatabaseConnection {
    // one connection: every pooled connection would get its own memory db
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("open in-memory sqlite");
    let schema = Schema::new(DbBackend::Sqlite);
    let statements = [
        schema.create_table_from_entity(user_entity::Entity),
        schema.create_table_from_entity(category_entity::Entity),
        schema.create_table_from_entity(product_entity::Entity),
        schema.create_table_from_entity(order_entity::Entity),
        schema.create_table_from_entity(payment_check_entity::Entity),
    ];
    for stmt in statements {
        db.execute(db.get_database_backend().build(&stmt))
            .await
            .expect("create table");
    }
    db
}

pub fn lazy(db: DatabaseConnection) -> LazyConnection {
    LazyConnection::from_connection(
        db,
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
    )
}

pub async fn services() -> (AppServices, DatabaseConnection) {
    services_with_cache(ViewCache::disabled()).await
}

pub async fn services_with_cache(cache: ViewCache) -> (AppServices, DatabaseConnection) {
    let db = setup_db().await;
    (AppServices::new(lazy(db.clone()), cache), db)
}

pub async fn seed_category(db: &DatabaseConnection, name: &str) -> category_entity::Model {
    category_entity::ActiveModel {
        name: Set(name.to_string()),
        description: Set(Some(format!("{name} fragrances"))),
        image_url: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
}

pub async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: Option<i32>,
) -> product_entity::Model {
    seed_product_at(db, name, category_id, Utc::now()).await
}

pub async fn seed_product_at(
    db: &DatabaseConnection,
    name: &str,
    category_id: Option<i32>,
    created_at: DateTime<Utc>,
) -> product_entity::Model {
    product_entity::ActiveModel {
        name: Set(name.to_string()),
        description: Set("Eau de parfum".to_string()),
        price: Set(250_000),
        image_url: Set(format!("https://cdn.example.com/{}.jpg", name.replace(' ', "-"))),
        brand: Set("Maison".to_string()),
        volume: Set("50ml".to_string()),
        category_id: Set(category_id),
        in_stock: Set(true),
        featured: Set(false),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert product")
}

pub async fn seed_order(
    db: &DatabaseConnection,
    user_name: &str,
    status: OrderStatus,
    items: Vec<OrderItem>,
    total_amount: i64,
) -> order_entity::Model {
    order_entity::ActiveModel {
        telegram_user_id: Set(format!("tg-{}", user_name.to_lowercase())),
        user_name: Set(user_name.to_string()),
        contact_phone: Set("+998901112233".to_string()),
        delivery_address: Set("Tashkent, Chilonzor 9".to_string()),
        items: Set(OrderItems(items)),
        total_amount: Set(total_amount),
        status: Set(status),
        payment_receipt: Set(None),
        is_read: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert order")
}

pub fn item(product_id: i32, quantity: i64, price: i64) -> OrderItem {
    OrderItem {
        product_id,
        quantity,
        price,
    }
}

pub async fn seed_user(
    db: &DatabaseConnection,
    telegram_id: &str,
    username: &str,
    card_number: Option<&str>,
    referral_bonus: i64,
) -> user_entity::Model {
    let now = Utc::now();
    user_entity::ActiveModel {
        telegram_id: Set(telegram_id.to_string()),
        username: Set(Some(username.to_string())),
        first_name: Set(Some(username.to_string())),
        last_name: Set(None),
        phone_number: Set(None),
        referred_by: Set(ReferredBy::default()),
        referral_count: Set(0),
        referral_bonus: Set(referral_bonus),
        referral_purchases: Set(ReferralPurchases::default()),
        card_number: Set(card_number.map(str::to_string)),
        created_at: Set(now - Duration::days(3)),
        last_active: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}
