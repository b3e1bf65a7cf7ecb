use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 推荐奖励结算凭证 (上传后不再修改)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payment_checks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chat_id: String,
    /// 上传的文件名
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
