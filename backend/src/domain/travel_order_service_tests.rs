//! Tests for the travel order service.

use std::sync::Arc;

use chrono::NaiveDate;
use mockall::predicate::always;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockTravelOrderNotifier, MockTravelOrderRepository};
use crate::domain::{
    DateRange, Destination, ErrorCode, NewTravelOrderInput, Principal, TravelOrderFilter, UserId,
};
use crate::test_support::MutableClock;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn order_for(owner: &UserId, status: TravelOrderStatus) -> TravelOrder {
    let now = today().and_time(chrono::NaiveTime::MIN).and_utc();
    TravelOrder::new(TravelOrderDraft {
        id: TravelOrderId::random(),
        owner_id: owner.clone(),
        destination: Destination::new("Lisbon").expect("destination"),
        dates: DateRange::new(date("2025-04-01"), date("2025-04-05")).expect("range"),
        status,
        created_at: now,
        updated_at: now,
    })
    .expect("valid order")
}

fn quiet_notifier() -> MockTravelOrderNotifier {
    let mut notifier = MockTravelOrderNotifier::new();
    notifier.expect_notify().never();
    notifier
}

fn service(
    repo: MockTravelOrderRepository,
    notifier: MockTravelOrderNotifier,
) -> TravelOrderService<MockTravelOrderRepository> {
    TravelOrderService::new(
        Arc::new(repo),
        Arc::new(notifier),
        Arc::new(MutableClock::on(today())),
    )
}

fn create_request(owner: &UserId, departure: &str, return_date: &str) -> CreateTravelOrderRequest {
    CreateTravelOrderRequest {
        principal: Principal::new(owner.clone()),
        input: NewTravelOrderInput {
            destination: Some("  Lisbon ".to_owned()),
            departure_date: Some(departure.to_owned()),
            return_date: Some(return_date.to_owned()),
        },
    }
}

fn transition_request(
    caller: &UserId,
    order: &TravelOrder,
    status: Option<&str>,
) -> TransitionTravelOrderRequest {
    TransitionTravelOrderRequest {
        principal: Principal::new(caller.clone()),
        order_id: order.id(),
        status: status.map(str::to_owned),
    }
}

#[rstest]
#[tokio::test]
async fn create_stores_a_requested_order(owner: UserId) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_insert_unless_conflicting()
        .times(1)
        .returning(|order| Ok(InsertOutcome::Inserted(order.clone())));

    let payload = service(repo, quiet_notifier())
        .create(create_request(&owner, "2025-04-01", "2025-04-05"))
        .await
        .expect("order created");

    assert_eq!(payload.owner_id, owner);
    assert_eq!(payload.destination, "Lisbon");
    assert_eq!(payload.status, TravelOrderStatus::Requested);
    assert_eq!(payload.departure_date, date("2025-04-01"));
    assert_eq!(payload.created_at, payload.updated_at);
}

#[rstest]
#[tokio::test]
async fn create_reports_every_invalid_field(owner: UserId) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_insert_unless_conflicting().never();
    let request = CreateTravelOrderRequest {
        principal: Principal::new(owner),
        input: NewTravelOrderInput {
            destination: None,
            departure_date: Some("2025-02-01".to_owned()),
            return_date: Some("not-a-date".to_owned()),
        },
    };

    let err = service(repo, quiet_notifier())
        .create(request)
        .await
        .expect_err("validation fails");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let errors = err
        .details()
        .and_then(|details| details.get("errors"))
        .expect("field errors");
    for field in ["destination", "departureDate", "returnDate"] {
        assert!(errors.get(field).is_some(), "missing {field}");
    }
}

#[rstest]
#[tokio::test]
async fn create_allows_past_departures_when_configured(owner: UserId) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_insert_unless_conflicting()
        .times(1)
        .returning(|order| Ok(InsertOutcome::Inserted(order.clone())));
    let svc = service(repo, quiet_notifier()).with_settings(TravelOrderSettings {
        creation: CreationPolicy {
            allow_past_departures: true,
        },
        ..TravelOrderSettings::default()
    });

    let payload = svc
        .create(create_request(&owner, "2025-01-10", "2025-01-12"))
        .await
        .expect("past trip accepted");
    assert_eq!(payload.departure_date, date("2025-01-10"));
}

#[rstest]
#[tokio::test]
async fn create_returns_conflicting_orders(owner: UserId) {
    let existing = order_for(&owner, TravelOrderStatus::Approved);
    let existing_id = existing.id();
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_insert_unless_conflicting()
        .times(1)
        .returning(move |_| Ok(InsertOutcome::Conflicts(vec![existing.clone()])));

    let err = service(repo, quiet_notifier())
        .create(create_request(&owner, "2025-04-03", "2025-04-10"))
        .await
        .expect_err("overlap rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Date conflict with existing orders.");
    let conflicts = err
        .details()
        .and_then(|details| details.get("conflicts"))
        .and_then(|value| value.as_array())
        .expect("conflict list");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["id"], existing_id.to_string());
}

#[rstest]
#[tokio::test]
async fn non_owner_is_forbidden_before_status_is_checked(owner: UserId) {
    let order = order_for(&owner, TravelOrderStatus::Requested);
    let request = transition_request(&UserId::random(), &order, Some("bogus"));
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(order.clone())));
    repo.expect_update_status().never();

    let err = service(repo, quiet_notifier())
        .transition(request)
        .await
        .expect_err("stranger rejected");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn missing_order_transition_is_not_found(owner: UserId) {
    let order = order_for(&owner, TravelOrderStatus::Requested);
    let request = transition_request(&owner, &order, Some("approved"));
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_by_id().times(1).returning(|_| Ok(None));

    let err = service(repo, quiet_notifier())
        .transition(request)
        .await
        .expect_err("missing order");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Travel order not found");
}

#[rstest]
#[case(TravelOrderStatus::Approved, "approved", ErrorCode::InvalidTransition)]
#[case(TravelOrderStatus::Requested, "cancelled", ErrorCode::InvalidTransition)]
#[case(TravelOrderStatus::Cancelled, "approved", ErrorCode::InvalidTransition)]
#[case(TravelOrderStatus::Requested, "requested", ErrorCode::InvalidRequest)]
#[case(TravelOrderStatus::Requested, "", ErrorCode::InvalidRequest)]
#[tokio::test]
async fn rejected_transitions_leave_the_order_untouched(
    owner: UserId,
    #[case] current: TravelOrderStatus,
    #[case] target: &str,
    #[case] expected: ErrorCode,
) {
    let order = order_for(&owner, current);
    let request = transition_request(&owner, &order, Some(target));
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(order.clone())));
    repo.expect_update_status().never();

    let err = service(repo, quiet_notifier())
        .transition(request)
        .await
        .expect_err("transition rejected");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[case(TravelOrderStatus::Requested, "approved", TravelOrderStatus::Approved)]
#[case(TravelOrderStatus::Approved, "cancelled", TravelOrderStatus::Cancelled)]
#[tokio::test]
async fn accepted_transitions_notify_the_owner_once(
    owner: UserId,
    #[case] current: TravelOrderStatus,
    #[case] target: &str,
    #[case] next: TravelOrderStatus,
) {
    let order = order_for(&owner, current);
    let request = transition_request(&owner, &order, Some(target));
    let updated = order.clone().with_status(next, order.updated_at());
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(order.clone())));
    repo.expect_update_status()
        .withf(move |update| update.expected == current && update.next == next)
        .times(1)
        .returning(move |_| Ok(Some(updated.clone())));
    let mut notifier = MockTravelOrderNotifier::new();
    let recipient = owner.clone();
    notifier
        .expect_notify()
        .withf(move |event| event.status == next && event.recipient() == &recipient)
        .times(1)
        .return_const(());

    let payload = service(repo, notifier)
        .transition(request)
        .await
        .expect("transition applied");
    assert_eq!(payload.status, next);
}

#[rstest]
#[tokio::test]
async fn concurrent_changes_exhaust_the_retry_budget(owner: UserId) {
    let order = order_for(&owner, TravelOrderStatus::Requested);
    let request = transition_request(&owner, &order, Some("approved"));
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_by_id()
        .times(MAX_TRANSITION_ATTEMPTS as usize)
        .returning(move |_| Ok(Some(order.clone())));
    repo.expect_update_status()
        .with(always())
        .times(MAX_TRANSITION_ATTEMPTS as usize)
        .returning(|_| Ok(None));

    let err = service(repo, quiet_notifier())
        .transition(request)
        .await
        .expect_err("retries exhausted");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn concurrent_cancellation_is_reported_after_re_read(owner: UserId) {
    let order = order_for(&owner, TravelOrderStatus::Requested);
    let cancelled = order
        .clone()
        .with_status(TravelOrderStatus::Cancelled, order.updated_at());
    let request = transition_request(&owner, &order, Some("approved"));
    let mut reads = vec![cancelled, order];
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(reads.pop()));
    repo.expect_update_status().times(1).returning(|_| Ok(None));

    let err = service(repo, quiet_notifier())
        .transition(request)
        .await
        .expect_err("re-read sees cancellation");
    assert_eq!(err.code(), ErrorCode::InvalidTransition);
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_order_is_not_found(owner: UserId) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_delete_for_owner()
        .times(1)
        .returning(|_, _| Ok(false));

    let err = service(repo, quiet_notifier())
        .delete(DeleteTravelOrderRequest {
            principal: Principal::new(owner),
            order_id: TravelOrderId::random(),
        })
        .await
        .expect_err("nothing deleted");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("0")]
#[case("abc")]
#[tokio::test]
async fn list_rejects_invalid_pages(owner: UserId, #[case] page: &str) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_list_for_owner().never();

    let err = service(repo, quiet_notifier())
        .list(ListTravelOrdersRequest {
            principal: Principal::new(owner),
            filter: TravelOrderFilter::any(),
            page: Some(page.to_owned()),
        })
        .await
        .expect_err("invalid page");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn list_uses_the_configured_page_size(owner: UserId) {
    let stored = order_for(&owner, TravelOrderStatus::Requested);
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_list_for_owner()
        .withf(|_, _, page| page.page() == 2 && page.per_page() == 5)
        .times(1)
        .returning(move |_, _, page| Ok(Page::new(vec![stored.clone()], page, 6)));
    let svc = service(repo, quiet_notifier()).with_settings(TravelOrderSettings {
        page_size: 5,
        ..TravelOrderSettings::default()
    });

    let page = svc
        .list(ListTravelOrdersRequest {
            principal: Principal::new(owner),
            filter: TravelOrderFilter::any(),
            page: Some("2".to_owned()),
        })
        .await
        .expect("page listed");
    assert_eq!(page.current_page(), 2);
    assert_eq!(page.last_page(), 2);
    assert_eq!(page.data().len(), 1);
}

#[rstest]
#[tokio::test]
async fn find_conflicts_requires_both_dates(owner: UserId) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_conflicts().never();

    let err = service(repo, quiet_notifier())
        .find_conflicts(FindConflictsRequest {
            principal: Principal::new(owner),
            departure_date: Some("2025-04-01".to_owned()),
            return_date: None,
            exclude: None,
        })
        .await
        .expect_err("return date missing");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(TravelOrderRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(TravelOrderRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_domain_errors(
    owner: UserId,
    #[case] failure: TravelOrderRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockTravelOrderRepository::new();
    repo.expect_find_for_owner()
        .times(1)
        .returning(move |_, _| Err(failure.clone()));

    let err = service(repo, quiet_notifier())
        .get(GetTravelOrderRequest {
            principal: Principal::new(owner),
            order_id: TravelOrderId::random(),
        })
        .await
        .expect_err("repository failure");
    assert_eq!(err.code(), expected);
}
