use std::collections::HashMap;

use crate::database::LazyConnection;
use crate::entities::{category_entity as categories, product_entity as products};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_any, fetch_page, match_nothing, parse_id};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct ProductService {
    db: LazyConnection,
}

impl ProductService {
    pub fn new(db: LazyConnection) -> Self {
        Self { db }
    }

    pub async fn list_products(
        &self,
        params: &ListParams,
        filter: &ProductFilter,
    ) -> AppResult<Paginated<ProductResponse>> {
        let db = self.db.conn().await?;

        let mut select = products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .order_by_desc(products::Column::Id);
        if let Some(raw) = filter.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            select = match raw.parse::<i32>() {
                Ok(category_id) => select.filter(products::Column::CategoryId.eq(category_id)),
                Err(_) => select.filter(match_nothing()),
            };
        }
        if let Some(term) = &params.search {
            select = select.filter(contains_any(
                &[products::Column::Name, products::Column::Description],
                term,
            ));
        }

        let page = fetch_page(db, select, params).await?;
        let ids: Vec<i32> = page.items.iter().filter_map(|p| p.category_id).collect();
        let refs = category_refs(db, ids).await?;

        Ok(page.map(|product| {
            let category = product.category_id.and_then(|id| refs.get(&id).cloned());
            ProductResponse::with_category(product, category)
        }))
    }

    pub async fn get_product(&self, id: &str) -> AppResult<ProductResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let product = products::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
        let refs = category_refs(db, product.category_id.into_iter().collect()).await?;
        let category = product.category_id.and_then(|id| refs.get(&id).cloned());

        Ok(ProductResponse::with_category(product, category))
    }

    pub async fn product_stats(&self) -> AppResult<ProductStats> {
        let db = self.db.conn().await?;

        let total_products = products::Entity::find().count(db).await?;
        let in_stock_products = products::Entity::find()
            .filter(products::Column::InStock.eq(true))
            .count(db)
            .await?;
        let featured_products = products::Entity::find()
            .filter(products::Column::Featured.eq(true))
            .count(db)
            .await?;

        Ok(ProductStats {
            total_products,
            in_stock_products,
            out_of_stock_products: total_products.saturating_sub(in_stock_products),
            featured_products,
        })
    }

    pub async fn create_product(&self, input: ProductInput) -> AppResult<ProductResponse> {
        let db = self.db.conn().await?;
        let category = require_category(db, input.category_id).await?;

        let now = Utc::now();
        let created = products::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            image_url: Set(input.image_url),
            brand: Set(input.brand),
            volume: Set(input.volume),
            category_id: Set(Some(input.category_id)),
            in_stock: Set(input.in_stock),
            featured: Set(input.featured),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        log::info!("Product {} created", created.id);
        Ok(ProductResponse::with_category(created, Some(category)))
    }

    pub async fn update_product(&self, id: &str, input: ProductInput) -> AppResult<ProductResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let existing = products::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
        let category = require_category(db, input.category_id).await?;

        let mut am = existing.into_active_model();
        am.name = Set(input.name);
        am.description = Set(input.description);
        am.price = Set(input.price);
        am.image_url = Set(input.image_url);
        am.brand = Set(input.brand);
        am.volume = Set(input.volume);
        am.category_id = Set(Some(input.category_id));
        am.in_stock = Set(input.in_stock);
        am.featured = Set(input.featured);
        am.updated_at = Set(Utc::now());
        let updated = am.update(db).await?;

        Ok(ProductResponse::with_category(updated, Some(category)))
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let existing = products::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
        existing.delete(db).await?;

        log::info!("Product {id} deleted");
        Ok(())
    }
}

/// 写入前确认分类存在
async fn require_category<C: ConnectionTrait>(db: &C, category_id: i32) -> AppResult<CategoryRef> {
    categories::Entity::find_by_id(category_id)
        .one(db)
        .await?
        .map(|c| CategoryRef {
            id: c.id,
            name: c.name,
        })
        .ok_or_else(|| {
            AppError::ValidationError(FieldErrors::single("category", "Category does not exist"))
        })
}

async fn category_refs<C: ConnectionTrait>(
    db: &C,
    mut ids: Vec<i32>,
) -> AppResult<HashMap<i32, CategoryRef>> {
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = categories::Entity::find()
        .filter(categories::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|c| {
            (
                c.id,
                CategoryRef {
                    id: c.id,
                    name: c.name,
                },
            )
        })
        .collect())
}
