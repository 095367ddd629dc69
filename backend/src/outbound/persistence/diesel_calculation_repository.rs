//! PostgreSQL-backed `CalculationRepository` implementation using Diesel ORM.
//!
//! Updates replace operands, operation and result in one
//! `UPDATE ... RETURNING` statement, so readers never observe a partially
//! updated row.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageParams;

use crate::domain::ports::{CalculationRepository, CalculationRepositoryError};
use crate::domain::{Calculation, CalculationId, ComputedCalculation, Operation, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CalculationRow, CalculationUpdate, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the `CalculationRepository` port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationRepositoryError {
    map_basic_pool_error(error, CalculationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationRepositoryError {
    map_basic_diesel_error(
        error,
        CalculationRepositoryError::query,
        CalculationRepositoryError::connection,
    )
}

fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationRepositoryError> {
    let operation: Operation = row.operation.parse().map_err(|_| {
        CalculationRepositoryError::query(format!(
            "calculation {} has unknown operation {:?}",
            row.id, row.operation
        ))
    })?;
    Ok(Calculation {
        id: CalculationId::new(row.id),
        a: row.a,
        b: row.b,
        operation,
        result: row.result,
        user_id: row.user_id.map(UserId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn insert(
        &self,
        calculation: &ComputedCalculation,
        owner: Option<UserId>,
    ) -> Result<Calculation, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCalculationRow {
            a: calculation.a(),
            b: calculation.b(),
            operation: calculation.operation().as_str(),
            result: calculation.result(),
            user_id: owner.as_ref().map(|id| *id.as_uuid()),
        };

        let row: CalculationRow = diesel::insert_into(calculations::table)
            .values(&new_row)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_calculation(row)
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CalculationRow> = calculations::table
            .find(id.get())
            .select(CalculationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_calculation).transpose()
    }

    async fn list(&self, page: PageParams) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CalculationRow> = calculations::table
            .order(calculations::id.asc())
            .offset(page.offset_i64())
            .limit(page.limit_i64())
            .select(CalculationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_calculation).collect()
    }

    async fn update(
        &self,
        id: CalculationId,
        calculation: &ComputedCalculation,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = CalculationUpdate {
            a: calculation.a(),
            b: calculation.b(),
            operation: calculation.operation().as_str(),
            result: calculation.result(),
            updated_at: Utc::now(),
        };

        let row: Option<CalculationRow> = diesel::update(calculations::table.find(id.get()))
            .set(&changes)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_calculation).transpose()
    }

    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(calculations::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
