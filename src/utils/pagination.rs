use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QuerySelect, Select};

use crate::error::AppResult;
use crate::models::{ListParams, Paginated};

/// Runs the count and the page fetch against the same filtered select, so
/// `total` always describes the query the items came from.
pub async fn fetch_page<E, C>(
    db: &C,
    select: Select<E>,
    params: &ListParams,
) -> AppResult<Paginated<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    C: ConnectionTrait,
{
    let total = select.clone().count(db).await?;
    let items = select
        .offset(params.offset())
        .limit(params.limit)
        .all(db)
        .await?;

    Ok(Paginated::new(items, params, total))
}
