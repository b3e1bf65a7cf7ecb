use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{order_entity, OrderItem, OrderStatus, PaymentReceipt};

/// Filters accepted by the order list on top of [`super::ListQuery`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<String>,
}

/// 订单行中解析出的商品信息；brand/volume 仅详情接口返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: i32,
    /// 商品已删除时为空
    pub product: Option<ProductSummary>,
    pub quantity: i64,
    /// 下单时单价 (so'm)
    pub price: i64,
}

impl OrderItemResponse {
    pub fn new(item: &OrderItem, product: Option<ProductSummary>) -> Self {
        Self {
            product_id: item.product_id,
            product,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub telegram_user_id: String,
    pub user_name: String,
    pub contact_phone: String,
    pub delivery_address: String,
    pub items: Vec<OrderItemResponse>,
    /// 存储的总额，原样返回
    pub total_amount: i64,
    /// Σ(price × quantity)
    pub computed_total: i64,
    pub total_mismatch: bool,
    pub status: OrderStatus,
    pub payment_receipt: Option<PaymentReceipt>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl OrderResponse {
    /// Builds the response with `resolve` supplying each line's product.
    ///
    /// A stored total that disagrees with the line items is flagged and
    /// logged but returned unchanged.
    pub fn build(
        m: order_entity::Model,
        mut resolve: impl FnMut(&OrderItem) -> Option<ProductSummary>,
    ) -> Self {
        let computed_total = m.items.computed_total();
        let total_mismatch = computed_total != m.total_amount;
        if total_mismatch {
            log::warn!(
                "Order {} total mismatch: stored {} computed {}",
                m.id,
                m.total_amount,
                computed_total
            );
        }
        let items = m
            .items
            .0
            .iter()
            .map(|item| OrderItemResponse::new(item, resolve(item)))
            .collect();

        Self {
            id: m.id,
            telegram_user_id: m.telegram_user_id,
            user_name: m.user_name,
            contact_phone: m.contact_phone,
            delivery_address: m.delivery_address,
            items,
            total_amount: m.total_amount,
            computed_total,
            total_mismatch,
            status: m.status,
            payment_receipt: m.payment_receipt,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self::build(m, |_| None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub paid_orders: u64,
    pub confirmed_orders: u64,
    pub shipped_orders: u64,
    pub delivered_orders: u64,
    pub cancelled_orders: u64,
    pub unread_orders: u64,
    /// so'm
    pub total_revenue: i64,
    pub new_orders_today: u64,
}

impl OrderStats {
    pub fn set_status_count(&mut self, status: OrderStatus, count: u64) {
        let slot = match status {
            OrderStatus::Pending => &mut self.pending_orders,
            OrderStatus::Paid => &mut self.paid_orders,
            OrderStatus::Confirmed => &mut self.confirmed_orders,
            OrderStatus::Shipped => &mut self.shipped_orders,
            OrderStatus::Delivered => &mut self.delivered_orders,
            OrderStatus::Cancelled => &mut self.cancelled_orders,
        };
        *slot = count;
    }
}
