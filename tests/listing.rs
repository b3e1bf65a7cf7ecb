mod common;

use chrono::{Duration, Utc};
use common::*;
use perfume_admin::entities::OrderStatus;
use perfume_admin::models::*;

fn params(page: u64, limit: u64, search: Option<&str>) -> ListParams {
    ListParams::new(page, limit, search)
}

#[tokio::test]
async fn test_product_page_math_with_filter_and_search() {
    let (services, db) = services().await;
    let florals = seed_category(&db, "Floral").await;
    let woods = seed_category(&db, "Woody").await;

    // 12 matching products, newest last so id order equals age order
    let base = Utc::now() - Duration::hours(1);
    let mut matching = Vec::new();
    for i in 0..12 {
        let created = base + Duration::seconds(i);
        matching.push(seed_product_at(&db, &format!("Rose {i}"), Some(florals.id), created).await);
    }
    seed_product(&db, "Rose in wrong category", Some(woods.id)).await;
    seed_product(&db, "Jasmine", Some(florals.id)).await;

    let filter = ProductFilter {
        category: Some(florals.id.to_string()),
    };
    let page = services
        .products
        .list_products(&params(2, 5, Some("rose")), &filter)
        .await
        .unwrap();

    assert_eq!(page.pagination.total, 12);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.items.len(), 5);

    // newest first: positions 6..=10 are Rose 6 down to Rose 2
    let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Rose 6", "Rose 5", "Rose 4", "Rose 3", "Rose 2"]);
    for product in &page.items {
        assert_eq!(
            product.category,
            Some(CategoryRef {
                id: florals.id,
                name: "Floral".into()
            })
        );
    }
}

#[tokio::test]
async fn test_page_past_end_keeps_total() {
    let (services, db) = services().await;
    for i in 0..3 {
        seed_category(&db, &format!("Category {i}")).await;
    }

    let page = services
        .categories
        .list_categories(&params(5, 2, None))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_exclusive() {
    let (services, db) = services().await;
    seed_order(&db, "Aziza", OrderStatus::Pending, vec![], 0).await;
    seed_order(&db, "AZAMAT", OrderStatus::Paid, vec![], 0).await;
    seed_order(&db, "Bekzod", OrderStatus::Paid, vec![], 0).await;

    let page = services
        .orders
        .list_orders(&params(1, 10, Some("aza")), &OrderFilter::default())
        .await
        .unwrap();

    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].user_name, "AZAMAT");

    let page = services
        .orders
        .list_orders(&params(1, 10, Some("AZ")), &OrderFilter::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 2);
    for order in &page.items {
        assert!(order.user_name.to_lowercase().contains("az"));
    }
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let (services, db) = services().await;
    seed_category(&db, "100% Oud").await;
    seed_category(&db, "Amber").await;

    let page = services
        .categories
        .list_categories(&params(1, 10, Some("%")))
        .await
        .unwrap();

    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].name, "100% Oud");
}

#[tokio::test]
async fn test_search_non_ascii_terms() {
    let (services, db) = services().await;
    seed_category(&db, "Роза").await;
    seed_category(&db, "Rose").await;

    let exact = services
        .categories
        .list_categories(&params(1, 10, Some("Роза")))
        .await
        .unwrap();
    assert_eq!(exact.pagination.total, 1);
    assert_eq!(exact.items[0].name, "Роза");

    // SQLite folds ASCII only
    let lower = services
        .categories
        .list_categories(&params(1, 10, Some("роза")))
        .await
        .unwrap();
    assert_eq!(lower.pagination.total, 0);

    let mixed = services
        .categories
        .list_categories(&params(1, 10, Some("ROSE")))
        .await
        .unwrap();
    assert_eq!(mixed.pagination.total, 1);
    assert_eq!(mixed.items[0].name, "Rose");
}

#[tokio::test]
async fn test_status_filter_and_unknown_status() {
    let (services, db) = services().await;
    seed_order(&db, "Aziza", OrderStatus::Pending, vec![], 0).await;
    seed_order(&db, "Bekzod", OrderStatus::Shipped, vec![], 0).await;

    let shipped = services
        .orders
        .list_orders(
            &params(1, 10, None),
            &OrderFilter {
                status: Some("shipped".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(shipped.pagination.total, 1);
    assert_eq!(shipped.items[0].status, OrderStatus::Shipped);

    let unknown = services
        .orders
        .list_orders(
            &params(1, 10, None),
            &OrderFilter {
                status: Some("lost".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(unknown.pagination.total, 0);
    assert!(unknown.items.is_empty());
}

#[tokio::test]
async fn test_non_numeric_category_filter_matches_nothing() {
    let (services, db) = services().await;
    let c = seed_category(&db, "Floral").await;
    seed_product(&db, "Rose", Some(c.id)).await;

    let page = services
        .products
        .list_products(
            &params(1, 10, None),
            &ProductFilter {
                category: Some("floral".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 0);
}

#[tokio::test]
async fn test_category_listing_counts_products() {
    let (services, db) = services().await;
    let floral = seed_category(&db, "Floral").await;
    let citrus = seed_category(&db, "Citrus").await;
    seed_product(&db, "Rose", Some(floral.id)).await;
    seed_product(&db, "Peony", Some(floral.id)).await;

    let page = services
        .categories
        .list_categories(&params(1, 10, None))
        .await
        .unwrap();

    // name ascending
    assert_eq!(page.items[0].name, "Citrus");
    assert_eq!(page.items[0].product_count, Some(0));
    assert_eq!(page.items[1].id, floral.id);
    assert_eq!(page.items[1].product_count, Some(2));
    assert_eq!(page.items[0].id, citrus.id);
}

#[tokio::test]
async fn test_order_listing_resolves_products() {
    let (services, db) = services().await;
    let rose = seed_product(&db, "Rose", None).await;
    seed_order(
        &db,
        "Aziza",
        OrderStatus::Pending,
        vec![item(rose.id, 2, 100_000), item(999, 1, 50_000)],
        250_000,
    )
    .await;

    let page = services
        .orders
        .list_orders(&params(1, 10, None), &OrderFilter::default())
        .await
        .unwrap();
    let order = &page.items[0];

    let resolved = order.items[0].product.as_ref().unwrap();
    assert_eq!(resolved.name, "Rose");
    assert_eq!(resolved.brand, None);
    assert!(order.items[1].product.is_none());
    assert_eq!(order.computed_total, 250_000);
    assert!(!order.total_mismatch);
}

#[tokio::test]
async fn test_order_detail_resolves_brand_and_flags_mismatch() {
    let (services, db) = services().await;
    let rose = seed_product(&db, "Rose", None).await;
    let order = seed_order(
        &db,
        "Aziza",
        OrderStatus::Paid,
        vec![item(rose.id, 3, 100_000)],
        200_000,
    )
    .await;

    let detail = services
        .orders
        .get_order(&order.id.to_string())
        .await
        .unwrap();

    let product = detail.items[0].product.as_ref().unwrap();
    assert_eq!(product.brand.as_deref(), Some("Maison"));
    assert_eq!(product.volume.as_deref(), Some("50ml"));
    assert_eq!(detail.total_amount, 200_000);
    assert_eq!(detail.computed_total, 300_000);
    assert!(detail.total_mismatch);
}

#[tokio::test]
async fn test_payout_candidates_need_card() {
    let (services, db) = services().await;
    seed_user(&db, "100", "with_card", Some("8600 1234 5678 9012"), 50_000).await;
    seed_user(&db, "200", "empty_card", Some(""), 10_000).await;
    seed_user(&db, "300", "no_card", None, 10_000).await;

    let page = services
        .payouts
        .list_payout_candidates(&params(1, 10, None))
        .await
        .unwrap();

    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].telegram_id, "100");
}

#[tokio::test]
async fn test_user_lookup_by_telegram_id() {
    let (services, db) = services().await;
    seed_user(&db, "555", "dilnoza", None, 0).await;

    let user = services.users.get_user("555").await.unwrap();
    assert_eq!(user.username.as_deref(), Some("dilnoza"));

    let err = services.users.get_user("556").await.unwrap_err();
    assert!(matches!(err, perfume_admin::AppError::NotFound(_)));
}

#[tokio::test]
async fn test_user_search_covers_telegram_id() {
    let (services, db) = services().await;
    seed_user(&db, "998877", "alpha", None, 0).await;
    seed_user(&db, "112233", "beta", None, 0).await;

    let page = services
        .users
        .list_users(&params(1, 10, Some("8877")))
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].telegram_id, "998877");
}

#[tokio::test]
async fn test_malformed_id_is_not_a_not_found() {
    let (services, _db) = services().await;
    let err = services.products.get_product("abc").await.unwrap_err();
    assert!(matches!(err, perfume_admin::AppError::InvalidId(_)));
}
