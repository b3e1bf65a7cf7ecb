use std::collections::HashMap;

use crate::database::LazyConnection;
use crate::entities::{category_entity as categories, product_entity as products};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_any, fetch_page, parse_id};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

const TOP_CATEGORY_LIMIT: u64 = 5;

#[derive(Debug, FromQueryResult)]
struct CategoryProductCount {
    category_id: Option<i32>,
    count: i64,
}

#[derive(Clone)]
pub struct CategoryService {
    db: LazyConnection,
}

impl CategoryService {
    pub fn new(db: LazyConnection) -> Self {
        Self { db }
    }

    pub async fn list_categories(
        &self,
        params: &ListParams,
    ) -> AppResult<Paginated<CategoryResponse>> {
        let db = self.db.conn().await?;

        let mut select = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id);
        if let Some(term) = &params.search {
            select = select.filter(contains_any(
                &[categories::Column::Name, categories::Column::Description],
                term,
            ));
        }

        let page = fetch_page(db, select, params).await?;
        let ids: Vec<i32> = page.items.iter().map(|c| c.id).collect();
        let counts = product_counts(db, ids).await?;

        Ok(page.map(|category| {
            let product_count = counts.get(&category.id).copied().unwrap_or(0);
            CategoryResponse {
                product_count: Some(product_count),
                ..CategoryResponse::from(category)
            }
        }))
    }

    /// 商品表单的分类下拉框使用，不分页
    pub async fn all_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let db = self.db.conn().await?;
        let rows = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn get_category(&self, id: &str) -> AppResult<CategoryResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;
        categories::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| AppError::NotFound("Category not found".into()))
    }

    pub async fn category_stats(&self) -> AppResult<CategoryStats> {
        let db = self.db.conn().await?;

        let total_categories = categories::Entity::find().count(db).await?;

        let groups = products::Entity::find()
            .select_only()
            .column(products::Column::CategoryId)
            .column_as(products::Column::Id.count(), "count")
            .group_by(products::Column::CategoryId)
            .order_by_desc(products::Column::Id.count())
            .order_by_asc(products::Column::CategoryId)
            .limit(TOP_CATEGORY_LIMIT)
            .into_model::<CategoryProductCount>()
            .all(db)
            .await?;

        let ids: Vec<i32> = groups.iter().filter_map(|g| g.category_id).collect();
        let names: HashMap<i32, String> = if ids.is_empty() {
            HashMap::new()
        } else {
            categories::Entity::find()
                .filter(categories::Column::Id.is_in(ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };

        let top_categories = groups
            .into_iter()
            .map(|group| {
                let resolved = group
                    .category_id
                    .and_then(|id| names.get(&id).map(|name| (id, name.clone())));
                match resolved {
                    Some((id, name)) => TopCategory {
                        id: Some(id),
                        name,
                        count: group.count.max(0) as u64,
                    },
                    None => TopCategory {
                        id: None,
                        name: UNKNOWN_CATEGORY.to_string(),
                        count: group.count.max(0) as u64,
                    },
                }
            })
            .collect();

        Ok(CategoryStats {
            total_categories,
            top_categories,
        })
    }

    pub async fn create_category(&self, input: CategoryInput) -> AppResult<CategoryResponse> {
        let db = self.db.conn().await?;
        ensure_unique_name(db, &input.name, None).await?;

        let created = categories::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            image_url: Set(input.image_url),
            ..Default::default()
        }
        .insert(db)
        .await?;

        log::info!("Category {} created", created.id);
        Ok(CategoryResponse::from(created))
    }

    pub async fn update_category(
        &self,
        id: &str,
        input: CategoryInput,
    ) -> AppResult<CategoryResponse> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let existing = categories::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;
        ensure_unique_name(db, &input.name, Some(id)).await?;

        let mut am = existing.into_active_model();
        am.name = Set(input.name);
        am.description = Set(input.description);
        am.image_url = Set(input.image_url);
        let updated = am.update(db).await?;

        Ok(CategoryResponse::from(updated))
    }

    /// Refuses while any product still references the category.
    ///
    /// The reference count and the delete are separate statements; a product
    /// written in between is not seen.
    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        let db = self.db.conn().await?;

        let existing = categories::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        let referencing = products::Entity::find()
            .filter(products::Column::CategoryId.eq(id))
            .count(db)
            .await?;
        if referencing > 0 {
            return Err(AppError::ReferencedByProducts(referencing));
        }

        existing.delete(db).await?;
        log::info!("Category {id} deleted");
        Ok(())
    }
}

/// 每个分类 id 下的商品数量，一次分组查询
async fn product_counts<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> AppResult<HashMap<i32, u64>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = products::Entity::find()
        .select_only()
        .column(products::Column::CategoryId)
        .column_as(products::Column::Id.count(), "count")
        .filter(products::Column::CategoryId.is_in(ids))
        .group_by(products::Column::CategoryId)
        .into_model::<CategoryProductCount>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| row.category_id.map(|id| (id, row.count.max(0) as u64)))
        .collect())
}

async fn ensure_unique_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<i32>,
) -> AppResult<()> {
    let mut select = categories::Entity::find().filter(categories::Column::Name.eq(name));
    if let Some(id) = except {
        select = select.filter(categories::Column::Id.ne(id));
    }
    if select.count(db).await? > 0 {
        return Err(AppError::ValidationError(FieldErrors::single(
            "name",
            "A category with this name already exists",
        )));
    }
    Ok(())
}
