use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::city::{City, CityFilter},
};

#[derive(Clone)]
pub struct CityRepository {
    pool: PgPool,
}

impl CityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(city)
    }

    pub async fn list(
        &self,
        filter: &CityFilter,
        pagination: &Pagination,
    ) -> Result<Vec<City>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM cities WHERE is_active = TRUE");

        if let Some(state) = &filter.state {
            qb.push(" AND state = ").push_bind(state.to_uppercase());
        }
        if let Some(search) = &filter.search {
            qb.push(" AND name ILIKE ").push_bind(format!("%{search}%"));
        }

        qb.push(" ORDER BY state, name");
        qb.push(" LIMIT ").push_bind(pagination.limit());
        qb.push(" OFFSET ").push_bind(pagination.offset());

        let cities = qb.build_query_as::<City>().fetch_all(&self.pool).await?;
        Ok(cities)
    }
}
