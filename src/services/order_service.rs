use std::collections::HashMap;

use crate::database::LazyConnection;
use crate::entities::{order_entity as orders, product_entity as products, OrderStatus};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_any, fetch_page, match_nothing, parse_id, start_of_today};
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

const ORDER_SEARCH_COLUMNS: [orders::Column; 4] = [
    orders::Column::TelegramUserId,
    orders::Column::UserName,
    orders::Column::ContactPhone,
    orders::Column::DeliveryAddress,
];

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: OrderStatus,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct Revenue {
    total: Option<i64>,
}

#[derive(Clone)]
pub struct OrderService {
    db: LazyConnection,
}

impl OrderService {
    pub fn new(db: LazyConnection) -> Self {
        Self { db }
    }

    pub async fn list_orders(
        &self,
        params: &ListParams,
        filter: &OrderFilter,
    ) -> AppResult<Paginated<OrderResponse>> {
        let db = self.db.conn().await?;

        let mut select = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id);
        if let Some(raw) = filter.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = match raw.parse::<OrderStatus>() {
                Ok(status) => select.filter(orders::Column::Status.eq(status)),
                Err(_) => select.filter(match_nothing()),
            };
        }
        if let Some(term) = &params.search {
            select = select.filter(contains_any(&ORDER_SEARCH_COLUMNS, term));
        }

        let page = fetch_page(db, select, params).await?;
        let product_ids = page
            .items
            .iter()
            .flat_map(|order| order.items.0.iter().map(|item| item.product_id))
            .collect();
        let lookup = product_lookup(db, product_ids).await?;

        Ok(page.map(|order| {
            OrderResponse::build(order, |item| {
                lookup.get(&item.product_id).map(|p| ProductSummary {
                    name: p.name.clone(),
                    image_url: p.image_url.clone(),
                    brand: None,
                    volume: None,
                })
            })
        }))
    }

    /// 详情额外解析品牌与容量
    pub async fn get_order(&self, id: &str) -> AppResult<OrderResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let order = find_order(db, id).await?;
        let product_ids = order.items.0.iter().map(|item| item.product_id).collect();
        let lookup = product_lookup(db, product_ids).await?;

        Ok(OrderResponse::build(order, |item| {
            lookup.get(&item.product_id).map(|p| ProductSummary {
                name: p.name.clone(),
                image_url: p.image_url.clone(),
                brand: Some(p.brand.clone()),
                volume: Some(p.volume.clone()),
            })
        }))
    }

    pub async fn order_stats(&self) -> AppResult<OrderStats> {
        let db = self.db.conn().await?;
        let mut stats = OrderStats {
            total_orders: orders::Entity::find().count(db).await?,
            ..Default::default()
        };

        let by_status = orders::Entity::find()
            .select_only()
            .column(orders::Column::Status)
            .column_as(orders::Column::Id.count(), "count")
            .group_by(orders::Column::Status)
            .into_model::<StatusCount>()
            .all(db)
            .await?;
        for row in by_status {
            stats.set_status_count(row.status, row.count.max(0) as u64);
        }

        stats.unread_orders = orders::Entity::find()
            .filter(orders::Column::IsRead.eq(false))
            .count(db)
            .await?;

        // SUM(bigint) is NUMERIC on Postgres
        let revenue = orders::Entity::find()
            .select_only()
            .column_as(
                Expr::expr(Expr::col(orders::Column::TotalAmount).sum())
                    .cast_as(Alias::new("BIGINT")),
                "total",
            )
            .filter(orders::Column::Status.is_in(OrderStatus::REVENUE))
            .into_model::<Revenue>()
            .one(db)
            .await?;
        stats.total_revenue = revenue.and_then(|r| r.total).unwrap_or(0);

        stats.new_orders_today = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(start_of_today()))
            .count(db)
            .await?;

        Ok(stats)
    }

    /// 任意状态之间可直接切换
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> AppResult<OrderResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let order = find_order(db, id).await?;
        let previous = order.status;
        let mut am = order.into_active_model();
        am.status = Set(status);
        let updated = am.update(db).await?;

        log::info!("Order {id} status {previous} -> {status}");
        Ok(OrderResponse::from(updated))
    }

    pub async fn mark_order_as_read(&self, id: &str) -> AppResult<OrderResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let order = find_order(db, id).await?;
        if order.is_read {
            return Ok(OrderResponse::from(order));
        }
        let mut am = order.into_active_model();
        am.is_read = Set(true);
        let updated = am.update(db).await?;

        Ok(OrderResponse::from(updated))
    }

    /// Not routed; orders are never deleted from the admin UI.
    pub async fn delete_order(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        find_order(db, id).await?.delete(db).await?;
        log::info!("Order {id} deleted");
        Ok(())
    }
}

async fn find_order<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<orders::Model> {
    orders::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))
}

/// 一次查询解析一页订单中引用的全部商品
async fn product_lookup<C: ConnectionTrait>(
    db: &C,
    mut ids: Vec<i32>,
) -> AppResult<HashMap<i32, products::Model>> {
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = products::Entity::find()
        .filter(products::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|p| (p.id, p)).collect())
}
