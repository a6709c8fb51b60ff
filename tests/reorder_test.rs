///! Drag-to-reorder: planning the new order and persisting it.
///!
///! Persistence goes through an in-memory `OrderStore` that records every
///! write, so no database is needed.
///!
///! Run with: `cargo test --test reorder_test`
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use sea_orm::DbErr;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

use showcase_backend::models::RecordKind;
use showcase_backend::ordering::{
    OrderStore, Ordered, ReorderError, ReorderRegistry, ReorderService, array_move, plan_reorder,
};

#[derive(Debug, Clone, PartialEq)]
struct Card {
    id: Uuid,
    name: &'static str,
    order_index: i32,
}

impl Ordered for Card {
    fn id(&self) -> Uuid {
        self.id
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn set_order_index(&mut self, order_index: i32) {
        self.order_index = order_index;
    }
}

fn cards(names: &[&'static str]) -> Vec<Card> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Card {
            id: Uuid::new_v4(),
            name,
            order_index: i as i32,
        })
        .collect()
}

fn names(items: &[Card]) -> Vec<&'static str> {
    items.iter().map(|c| c.name).collect()
}

/// Records every position write, optionally failing for chosen ids.
#[derive(Default)]
struct RecordingStore {
    writes: Mutex<Vec<(Uuid, i32)>>,
    failing: HashSet<Uuid>,
    saving_seen: Mutex<Vec<usize>>,
    observer: Option<watch::Receiver<usize>>,
}

impl RecordingStore {
    fn failing_for(ids: &[Uuid]) -> Self {
        Self {
            failing: ids.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn observing(observer: watch::Receiver<usize>) -> Self {
        Self {
            observer: Some(observer),
            ..Default::default()
        }
    }

    fn writes(&self) -> Vec<(Uuid, i32)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderStore for RecordingStore {
    async fn set_order_index(&self, id: Uuid, order_index: i32) -> Result<(), DbErr> {
        if let Some(observer) = &self.observer {
            self.saving_seen.lock().unwrap().push(*observer.borrow());
        }
        self.writes.lock().unwrap().push((id, order_index));
        if self.failing.contains(&id) {
            return Err(DbErr::Custom(format!("write for {id} failed")));
        }
        Ok(())
    }
}

/// Never completes a write.
struct StalledStore;

#[async_trait]
impl OrderStore for StalledStore {
    async fn set_order_index(&self, _id: Uuid, _order_index: i32) -> Result<(), DbErr> {
        std::future::pending().await
    }
}

#[test]
fn test_array_move_forward_and_back() {
    let mut items = vec!['a', 'b', 'c', 'd'];
    array_move(&mut items, 0, 2);
    assert_eq!(items, vec!['b', 'c', 'a', 'd']);

    array_move(&mut items, 3, 0);
    assert_eq!(items, vec!['d', 'b', 'c', 'a']);
}

#[test]
fn test_array_move_out_of_range_is_noop() {
    let mut items = vec![1, 2, 3];
    array_move(&mut items, 0, 3);
    array_move(&mut items, 5, 1);
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn test_plan_reorder_assigns_dense_indices() {
    let items = cards(&["A", "B", "C", "D"]);
    let planned = plan_reorder(&items, items[3].id, items[1].id)
        .unwrap()
        .unwrap();

    assert_eq!(names(&planned), vec!["A", "D", "B", "C"]);
    let indices: Vec<i32> = planned.iter().map(|c| c.order_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_plan_reorder_closes_gaps_left_by_deletes() {
    let mut items = cards(&["A", "B", "C"]);
    items[1].order_index = 4;
    items[2].order_index = 9;

    let planned = plan_reorder(&items, items[0].id, items[1].id)
        .unwrap()
        .unwrap();
    let indices: Vec<i32> = planned.iter().map(|c| c.order_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_plan_reorder_no_move_cases() {
    let single = cards(&["A"]);
    assert!(plan_reorder(&single, single[0].id, single[0].id).unwrap().is_none());

    let empty: Vec<Card> = Vec::new();
    assert!(plan_reorder(&empty, Uuid::new_v4(), Uuid::new_v4()).unwrap().is_none());

    let items = cards(&["A", "B"]);
    assert!(plan_reorder(&items, items[1].id, items[1].id).unwrap().is_none());
}

#[test]
fn test_plan_reorder_unknown_id() {
    let items = cards(&["A", "B"]);
    let stranger = Uuid::new_v4();

    let err = plan_reorder(&items, items[0].id, stranger).unwrap_err();
    assert!(matches!(err, ReorderError::UnknownRecord(id) if id == stranger));
}

#[test]
fn test_single_record_still_rejects_unknown_ids() {
    let single = cards(&["A"]);
    let stranger = Uuid::new_v4();

    let err = plan_reorder(&single, stranger, single[0].id).unwrap_err();
    assert!(matches!(err, ReorderError::UnknownRecord(id) if id == stranger));

    let err = plan_reorder(&single, single[0].id, stranger).unwrap_err();
    assert!(matches!(err, ReorderError::UnknownRecord(id) if id == stranger));
}

#[tokio::test]
async fn test_unknown_id_on_single_record_issues_no_writes() {
    let single = cards(&["A"]);
    let service = ReorderService::new(RecordKind::Services);
    let store = RecordingStore::default();

    let result = service
        .reorder(&store, single.clone(), Uuid::new_v4(), single[0].id)
        .await;

    assert!(matches!(result, Err(ReorderError::UnknownRecord(_))));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_reorder_persists_every_position_in_new_order() {
    let items = cards(&["A", "B", "C"]);
    let (a, b, c) = (items[0].id, items[1].id, items[2].id);
    let service = ReorderService::new(RecordKind::Portfolios);
    let store = RecordingStore::default();

    let outcome = service.reorder(&store, items, a, c).await.unwrap();

    assert_eq!(names(&outcome.items), vec!["B", "C", "A"]);
    assert_eq!(outcome.writes_issued, 3);
    assert!(outcome.failed.is_empty());
    assert_eq!(store.writes(), vec![(b, 0), (c, 1), (a, 2)]);
}

#[tokio::test]
async fn test_every_drag_yields_a_dense_permutation() {
    let service = ReorderService::new(RecordKind::Services);
    let base = cards(&["A", "B", "C", "D", "E"]);

    for from in 0..base.len() {
        for to in 0..base.len() {
            let store = RecordingStore::default();
            let outcome = service
                .reorder(&store, base.clone(), base[from].id, base[to].id)
                .await
                .unwrap();

            let ids: HashSet<Uuid> = outcome.items.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), base.len());
            for (position, card) in outcome.items.iter().enumerate() {
                assert_eq!(card.order_index, position as i32);
            }
            assert_eq!(outcome.items[to].id, base[from].id);

            let expected_writes = if from == to { 0 } else { base.len() };
            assert_eq!(store.writes().len(), expected_writes);
        }
    }
}

#[tokio::test]
async fn test_drop_onto_itself_issues_no_writes() {
    let items = cards(&["A", "B", "C"]);
    let id = items[1].id;
    let service = ReorderService::new(RecordKind::Portfolios);
    let store = RecordingStore::default();

    let outcome = service.reorder(&store, items.clone(), id, id).await.unwrap();

    assert_eq!(outcome.items, items);
    assert_eq!(outcome.writes_issued, 0);
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_unknown_id_issues_no_writes() {
    let items = cards(&["A", "B"]);
    let service = ReorderService::new(RecordKind::Portfolios);
    let store = RecordingStore::default();

    let result = service
        .reorder(&store, items.clone(), items[0].id, Uuid::new_v4())
        .await;

    assert!(result.is_err());
    assert!(store.writes().is_empty());
    assert!(!service.indicator().is_saving());
}

#[tokio::test]
async fn test_failed_write_is_reported_and_the_rest_still_go_out() {
    let items = cards(&["A", "B", "C"]);
    let (a, b, c) = (items[0].id, items[1].id, items[2].id);
    let service = ReorderService::new(RecordKind::Portfolios);
    let store = RecordingStore::failing_for(&[c]);

    let outcome = service.reorder(&store, items, a, c).await.unwrap();

    // The new order is kept even though one write failed.
    assert_eq!(names(&outcome.items), vec!["B", "C", "A"]);
    assert_eq!(outcome.failed, vec![c]);
    assert_eq!(store.writes(), vec![(b, 0), (c, 1), (a, 2)]);
}

#[tokio::test]
async fn test_saving_indicator_raised_only_while_persisting() {
    let items = cards(&["A", "B", "C"]);
    let service = ReorderService::new(RecordKind::Services);
    let store = RecordingStore::observing(service.indicator().subscribe());

    assert!(!service.indicator().is_saving());
    service
        .reorder(&store, items.clone(), items[2].id, items[0].id)
        .await
        .unwrap();

    assert_eq!(*store.saving_seen.lock().unwrap(), vec![1, 1, 1]);
    assert!(!service.indicator().is_saving());
}

#[tokio::test]
async fn test_cancelled_reorder_clears_saving_indicator() {
    let items = cards(&["A", "B"]);
    let service = ReorderService::new(RecordKind::Portfolios);
    let mut saving = service.indicator().subscribe();

    let attempt = tokio::time::timeout(
        Duration::from_millis(50),
        service.reorder(&StalledStore, items.clone(), items[0].id, items[1].id),
    )
    .await;

    assert!(attempt.is_err());
    assert!(saving.has_changed().unwrap());
    assert_eq!(*saving.borrow_and_update(), 0);
    assert!(!service.indicator().is_saving());
}

#[test]
fn test_registry_keeps_one_service_per_kind() {
    let registry = ReorderRegistry::default();
    assert_eq!(registry.get(RecordKind::Portfolios).kind(), RecordKind::Portfolios);
    assert_eq!(registry.get(RecordKind::Services).kind(), RecordKind::Services);
}
