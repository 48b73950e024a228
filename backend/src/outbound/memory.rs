//! In-memory travel order repository.
//!
//! Backs the service when no database URL is configured and in behaviour
//! tests. State lives for the life of the process only. The conflict check
//! and the insert happen under one write lock, so concurrent bookings for the
//! same owner are serialised exactly like the PostgreSQL adapter.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    InsertOutcome, StatusUpdate, TravelOrderRepository, TravelOrderRepositoryError,
};
use crate::domain::{
    DateRange, TravelOrder, TravelOrderFilter, TravelOrderId, UserId, find_conflicts,
};

fn poisoned<T>(_: PoisonError<T>) -> TravelOrderRepositoryError {
    TravelOrderRepositoryError::query("travel order store lock poisoned")
}

fn newest_first(orders: &mut [TravelOrder]) {
    orders.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

fn by_departure(orders: &mut [TravelOrder]) {
    orders.sort_by(|a, b| {
        a.dates()
            .start()
            .cmp(&b.dates().start())
            .then_with(|| a.id().cmp(&b.id()))
    });
}

/// Process-local repository keyed by order id.
#[derive(Debug, Default)]
pub struct InMemoryTravelOrderRepository {
    orders: RwLock<HashMap<TravelOrderId, TravelOrder>>,
}

impl InMemoryTravelOrderRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders, across all owners.
    ///
    /// # Errors
    ///
    /// Fails only if the lock was poisoned.
    pub fn len(&self) -> Result<usize, TravelOrderRepositoryError> {
        Ok(self.orders.read().map_err(poisoned)?.len())
    }

    /// Whether the store holds no orders.
    ///
    /// # Errors
    ///
    /// Fails only if the lock was poisoned.
    pub fn is_empty(&self) -> Result<bool, TravelOrderRepositoryError> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl TravelOrderRepository for InMemoryTravelOrderRepository {
    async fn insert_unless_conflicting(
        &self,
        order: &TravelOrder,
    ) -> Result<InsertOutcome, TravelOrderRepositoryError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let mut conflicts = find_conflicts(order.owner_id(), &order.dates(), None, orders.values());
        if !conflicts.is_empty() {
            by_departure(&mut conflicts);
            return Ok(InsertOutcome::Conflicts(conflicts));
        }
        orders.insert(order.id(), order.clone());
        Ok(InsertOutcome::Inserted(order.clone()))
    }

    async fn find_conflicts(
        &self,
        owner: &UserId,
        range: &DateRange,
        exclude: Option<TravelOrderId>,
    ) -> Result<Vec<TravelOrder>, TravelOrderRepositoryError> {
        let orders = self.orders.read().map_err(poisoned)?;
        let mut conflicts = find_conflicts(owner, range, exclude, orders.values());
        by_departure(&mut conflicts);
        Ok(conflicts)
    }

    async fn find_by_id(
        &self,
        id: TravelOrderId,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError> {
        Ok(self.orders.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: TravelOrderId,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders
            .get(&id)
            .filter(|order| order.owner_id() == owner)
            .cloned())
    }

    async fn update_status(
        &self,
        update: &StatusUpdate,
    ) -> Result<Option<TravelOrder>, TravelOrderRepositoryError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let Some(stored) = orders.get_mut(&update.order_id) else {
            return Ok(None);
        };
        if stored.owner_id() != &update.owner_id || stored.status() != update.expected {
            return Ok(None);
        }
        let updated = stored.clone().with_status(update.next, update.updated_at);
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: TravelOrderId,
    ) -> Result<bool, TravelOrderRepositoryError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let owned = orders
            .get(&id)
            .is_some_and(|order| order.owner_id() == owner);
        if owned {
            orders.remove(&id);
        }
        Ok(owned)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &TravelOrderFilter,
        page: PageRequest,
    ) -> Result<Page<TravelOrder>, TravelOrderRepositoryError> {
        let mut matching: Vec<TravelOrder> = self
            .orders
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|order| order.owner_id() == owner && filter.matches(order))
            .cloned()
            .collect();
        newest_first(&mut matching);

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let data = matching.into_iter().skip(offset).take(limit).collect();
        Ok(Page::new(data, page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
    use rstest::{fixture, rstest};

    use crate::domain::{Destination, TravelOrderDraft, TravelOrderStatus};

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
    }

    fn base_time() -> DateTime<Utc> {
        date("2025-03-01").and_time(chrono::NaiveTime::MIN).and_utc()
    }

    fn order(
        owner: &UserId,
        destination: &str,
        (start, end): (&str, &str),
        status: TravelOrderStatus,
        minutes: i64,
    ) -> TravelOrder {
        let at = base_time() + TimeDelta::minutes(minutes);
        TravelOrder::new(TravelOrderDraft {
            id: TravelOrderId::random(),
            owner_id: owner.clone(),
            destination: Destination::new(destination).expect("destination"),
            dates: DateRange::new(date(start), date(end)).expect("range"),
            status,
            created_at: at,
            updated_at: at,
        })
        .expect("order")
    }

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    async fn store(repo: &InMemoryTravelOrderRepository, order: &TravelOrder) {
        let outcome = repo
            .insert_unless_conflicting(order)
            .await
            .expect("insert succeeds");
        assert!(matches!(outcome, InsertOutcome::Inserted(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn overlapping_insert_is_rejected(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        let first = order(
            &owner,
            "Lisbon",
            ("2025-04-01", "2025-04-05"),
            TravelOrderStatus::Requested,
            0,
        );
        store(&repo, &first).await;

        let second = order(
            &owner,
            "Porto",
            ("2025-04-05", "2025-04-08"),
            TravelOrderStatus::Requested,
            1,
        );
        let outcome = repo
            .insert_unless_conflicting(&second)
            .await
            .expect("insert evaluated");

        assert_eq!(outcome, InsertOutcome::Conflicts(vec![first]));
        assert_eq!(repo.len().expect("len"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_and_foreign_orders_do_not_block(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        store(
            &repo,
            &order(&owner, "Lisbon", ("2025-04-01", "2025-04-05"), TravelOrderStatus::Cancelled, 0),
        )
        .await;
        store(
            &repo,
            &order(
                &UserId::random(),
                "Lisbon",
                ("2025-04-01", "2025-04-05"),
                TravelOrderStatus::Approved,
                0,
            ),
        )
        .await;

        store(
            &repo,
            &order(&owner, "Porto", ("2025-04-02", "2025-04-03"), TravelOrderStatus::Requested, 1),
        )
        .await;
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_only_from_the_expected_status(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        let stored = order(
            &owner,
            "Lisbon",
            ("2025-04-01", "2025-04-05"),
            TravelOrderStatus::Requested,
            0,
        );
        store(&repo, &stored).await;
        let later = base_time() + TimeDelta::hours(1);
        let mut update = StatusUpdate {
            owner_id: owner.clone(),
            order_id: stored.id(),
            expected: TravelOrderStatus::Approved,
            next: TravelOrderStatus::Cancelled,
            updated_at: later,
        };

        assert!(repo.update_status(&update).await.expect("update").is_none());

        update.expected = TravelOrderStatus::Requested;
        update.next = TravelOrderStatus::Approved;
        let updated = repo
            .update_status(&update)
            .await
            .expect("update")
            .expect("row changed");
        assert_eq!(updated.status(), TravelOrderStatus::Approved);
        assert_eq!(updated.updated_at(), later);
        assert_eq!(updated.created_at(), stored.created_at());
    }

    #[rstest]
    #[tokio::test]
    async fn other_owners_cannot_see_or_delete(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        let stored = order(
            &owner,
            "Lisbon",
            ("2025-04-01", "2025-04-05"),
            TravelOrderStatus::Requested,
            0,
        );
        store(&repo, &stored).await;
        let stranger = UserId::random();

        assert!(repo.find_for_owner(&stranger, stored.id()).await.expect("lookup").is_none());
        assert!(!repo.delete_for_owner(&stranger, stored.id()).await.expect("delete"));
        assert!(repo.find_by_id(stored.id()).await.expect("lookup").is_some());
        assert!(repo.delete_for_owner(&owner, stored.id()).await.expect("delete"));
        assert!(repo.is_empty().expect("is_empty"));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_newest_first_and_paginated(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        let mut ids = Vec::new();
        for (index, month) in (1_i64..=3).zip(["05", "06", "07"]) {
            let stored = order(
                &owner,
                "Lisbon",
                (&format!("2025-{month}-01"), &format!("2025-{month}-02")),
                TravelOrderStatus::Requested,
                index,
            );
            ids.push(stored.id());
            store(&repo, &stored).await;
        }

        let request = PageRequest::new(1, 2).expect("page");
        let page = repo
            .list_for_owner(&owner, &TravelOrderFilter::any(), request)
            .await
            .expect("list");

        assert_eq!(page.total(), 3);
        assert_eq!(page.last_page(), 2);
        let listed: Vec<_> = page.data().iter().map(TravelOrder::id).collect();
        assert_eq!(listed, vec![ids[2], ids[1]]);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_applies_filters(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        store(
            &repo,
            &order(
                &owner,
                "Lisbon",
                ("2025-04-01", "2025-04-05"),
                TravelOrderStatus::Approved,
                0,
            ),
        )
        .await;
        store(
            &repo,
            &order(
                &owner,
                "Porto",
                ("2025-05-01", "2025-05-05"),
                TravelOrderStatus::Approved,
                1,
            ),
        )
        .await;
        store(
            &repo,
            &order(
                &owner,
                "Lisbon Coast",
                ("2025-06-01", "2025-06-05"),
                TravelOrderStatus::Requested,
                2,
            ),
        )
        .await;

        let filter = TravelOrderFilter::any()
            .with_status(TravelOrderStatus::Approved)
            .with_destination("lisbon");
        let page = repo
            .list_for_owner(&owner, &filter, PageRequest::first(10).expect("page"))
            .await
            .expect("list");

        assert_eq!(page.total(), 1);
        assert_eq!(page.data()[0].destination().as_ref(), "Lisbon");
    }

    #[rstest]
    #[tokio::test]
    async fn reversed_window_selects_spanning_orders(owner: UserId) {
        let repo = InMemoryTravelOrderRepository::new();
        let spanning = order(
            &owner,
            "Lisbon",
            ("2025-04-01", "2025-04-20"),
            TravelOrderStatus::Requested,
            0,
        );
        store(&repo, &spanning).await;
        store(
            &repo,
            &order(
                &owner,
                "Porto",
                ("2025-04-07", "2025-04-08"),
                TravelOrderStatus::Requested,
                1,
            ),
        )
        .await;

        let filter = TravelOrderFilter::any().with_window(date("2025-04-10"), date("2025-04-05"));
        let page = repo
            .list_for_owner(&owner, &filter, PageRequest::first(10).expect("page"))
            .await
            .expect("list");

        let listed: Vec<_> = page.data().iter().map(TravelOrder::id).collect();
        assert_eq!(listed, vec![spanning.id()]);
    }
}
