//! PostgreSQL-backed `TravelOrderRepository` using Diesel.
//!
//! Inserts take a per-owner transaction-scoped advisory lock before checking
//! for overlaps, so two concurrent bookings for one owner are serialised. The
//! `travel_orders_no_overlap` exclusion constraint backs this up; when it
//! fires the conflicting rows are re-read and reported like any other
//! overlap.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{
    InsertOutcome, StatusUpdate, TravelOrderRepository, TravelOrderRepositoryError,
};
use crate::domain::{
    DateRange, Destination, TravelOrder, TravelOrderDraft, TravelOrderFilter, TravelOrderId,
    TravelOrderStatus, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, violates_constraint};
use super::models::{NewTravelOrderRow, TravelOrderRow};
use super::pool::DbPool;
use super::schema::travel_orders;

const NO_OVERLAP_CONSTRAINT: &str = "travel_orders_no_overlap";

const OWNER_LOCK_SQL: &str = "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))";

/// Diesel-backed implementation of the travel order repository port.
#[derive(Clone)]
pub struct DieselTravelOrderRepository {
    pool: DbPool,
}

impl DieselTravelOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

enum InsertAttempt {
    Inserted(TravelOrderRow),
    Blocked(Vec<TravelOrderRow>),
}

fn row_to_order(row: TravelOrderRow) -> Result<TravelOrder, TravelOrderRepositoryError> {
    let TravelOrderRow {
        id,
        owner_id,
        destination,
        departure_date,
        return_date,
        status,
        created_at,
        updated_at,
    } = row;

    let destination = Destination::new(destination)
        .map_err(|err| TravelOrderRepositoryError::query(err.to_string()))?;
    let dates = DateRange::new(departure_date, return_date)
        .map_err(|err| TravelOrderRepositoryError::query(err.to_string()))?;
    let status = status
        .parse::<TravelOrderStatus>()
        .map_err(|err| TravelOrderRepositoryError::query(err.to_string()))?;

    TravelOrder::new(TravelOrderDraft {
        id: TravelOrderId::from_uuid(id),
        owner_id: UserId::from_uuid(owner_id),
        destination,
        dates,
        status,
        created_at,
        updated_at,
    })
    .map_err(|err| TravelOrderRepositoryError::query(err.to_string()))
}

fn rows_to_orders(
    rows: Vec<TravelOrderRow>,
) -> Result<Vec<TravelOrder>, TravelOrderRepositoryError> {
    rows.into_iter().map(row_to_order).collect()
}

fn new_row(order: &TravelOrder) -> NewTravelOrderRow<'_> {
    let dates = order.dates();
    NewTravelOrderRow {
        id: *order.id().as_uuid(),
        owner_id: *order.owner_id().as_uuid(),
        destination: order.destination().as_ref(),
        departure_date: dates.start(),
        return_date: dates.end(),
        status: order.status().as_str(),
        created_at: order.created_at(),
        updated_at: order.updated_at(),
    }
}

fn to_sql_count(value: u64) -> Result<i64, TravelOrderRepositoryError> {
    i64::try_from(value).map_err(|_| TravelOrderRepositoryError::query("page out of range"))
}

async fn load_conflicts(
    conn: &mut AsyncPgConnection,
    owner: Uuid,
    range: DateRange,
    exclude: Option<Uuid>,
) -> QueryResult<Vec<TravelOrderRow>> {
    let mut query = travel_orders::table
        .select(TravelOrderRow::as_select())
        .filter(travel_orders::owner_id.eq(owner))
        .filter(travel_orders::status.ne(TravelOrderStatus::Cancelled.as_str()))
        .filter(travel_orders::departure_date.le(range.end()))
        .filter(travel_orders::return_date.ge(range.start()))
        .into_boxed();
    if let Some(id) = exclude {
        query = query.filter(travel_orders::id.ne(id));
    }
    query
        .order((travel_orders::departure_date.asc(), travel_orders::id.asc()))
        .load(conn)
        .await
}

/// Owner-scoped query with `filter` applied.
fn filtered(owner: Uuid, filter: &TravelOrderFilter) -> travel_orders::BoxedQuery<'static, Pg> {
    let mut query = travel_orders::table
        .filter(travel_orders::owner_id.eq(owner))
        .into_boxed();
    if let Some(status) = filter.status() {
        query = query.filter(travel_orders::status.eq(status.to_owned()));
    }
    if let Some(pattern) = filter.destination_pattern() {
        query = query.filter(travel_orders::destination.ilike(pattern));
    }
    if let Some((start, end)) = filter.window() {
        query = query
            .filter(travel_orders::departure_date.le(end))
            .filter(travel_orders::return_date.ge(start));
    }
    query
}

#[async_trait]
impl TravelOrderRepository for DieselTravelOrderRepository {
    async fn insert_unless_conflicting(
        &self,
        order: &TravelOrder,
    ) -> Result<InsertOutcome, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = *order.owner_id().as_uuid();
        let range = order.dates();
        let row = new_row(order);

        let attempt = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    sql_query(OWNER_LOCK_SQL)
                        .bind::<Text, _>(owner.to_string())
                        .execute(conn)
                        .await?;
                    let conflicts = load_conflicts(conn, owner, range, None).await?;
                    if !conflicts.is_empty() {
                        return Ok(InsertAttempt::Blocked(conflicts));
                    }
                    let stored = diesel::insert_into(travel_orders::table)
                        .values(&row)
                        .returning(TravelOrderRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(InsertAttempt::Inserted(stored))
                }
                .scope_boxed()
            })
            .await;

        match attempt {
            Ok(InsertAttempt::Inserted(stored)) => {
                row_to_order(stored).map(InsertOutcome::Inserted)
            }
            Ok(InsertAttempt::Blocked(conflicts)) => {
                rows_to_orders(conflicts).map(InsertOutcome::Conflicts)
            }
            Err(error) if violates_constraint(&error, NO_OVERLAP_CONSTRAINT) => {
                let conflicts = load_conflicts(&mut conn, owner, range, None)
                    .await
                    .map_err(map_diesel_error)?;
                rows_to_orders(conflicts).map(InsertOutcome::Conflicts)
            }
            Err(error) => Err(map_diesel_error(error)),
        }
    }

    async fn find_conflicts(
        &self,
        owner: &UserId,
        range: &DateRange,
        exclude: Option<TravelOrderId>,
    ) -> Result<Vec<TravelOrder>, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = load_conflicts(
            &mut conn,
            *owner.as_uuid(),
            *range,
            exclude.map(|id| *id.as_uuid()),
        )
        .await
        .map_err(map_diesel_error)?;
        rows_to_orders(rows)
    }

    async fn find_by_id(
        &self,
        id: TravelOrderId,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = travel_orders::table
            .filter(travel_orders::id.eq(id.as_uuid()))
            .select(TravelOrderRow::as_select())
            .first::<TravelOrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_order).transpose()
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: TravelOrderId,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = travel_orders::table
            .filter(
                travel_orders::id
                    .eq(id.as_uuid())
                    .and(travel_orders::owner_id.eq(owner.as_uuid())),
            )
            .select(TravelOrderRow::as_select())
            .first::<TravelOrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_order).transpose()
    }

    async fn update_status(
        &self,
        update: &StatusUpdate,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = travel_orders::table.filter(
            travel_orders::id
                .eq(update.order_id.as_uuid())
                .and(travel_orders::owner_id.eq(update.owner_id.as_uuid()))
                .and(travel_orders::status.eq(update.expected.as_str())),
        );
        let row = diesel::update(target)
            .set((
                travel_orders::status.eq(update.next.as_str()),
                travel_orders::updated_at.eq(update.updated_at),
            ))
            .returning(TravelOrderRow::as_returning())
            .get_result::<TravelOrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_order).transpose()
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: TravelOrderId,
    ) -> Result<bool, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = travel_orders::table.filter(
            travel_orders::id
                .eq(id.as_uuid())
                .and(travel_orders::owner_id.eq(owner.as_uuid())),
        );
        let removed = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &TravelOrderFilter,
        page: PageRequest,
    ) -> Result<Page<TravelOrder>, TravelOrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = *owner.as_uuid();

        let total: i64 = filtered(owner, filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows = filtered(owner, filter)
            .order((travel_orders::created_at.desc(), travel_orders::id.desc()))
            .limit(to_sql_count(page.limit())?)
            .offset(to_sql_count(page.offset())?)
            .select(TravelOrderRow::as_select())
            .load::<TravelOrderRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| TravelOrderRepositoryError::query("negative row count"))?;
        Ok(Page::new(rows_to_orders(rows)?, page, total))
    }
}
