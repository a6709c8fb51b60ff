//! Drag-to-reorder for ordered record collections.
//!
//! A reorder takes the current list (ordered by `order_index`), moves one
//! record onto the slot held by another, and then writes every record's new
//! zero-based index back to the store one at a time. The new order is
//! returned as-is even when some writes fail; there is no rollback.

pub mod store;

use async_trait::async_trait;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::RecordKind;

/// A record that carries a position within its collection.
pub trait Ordered {
    fn id(&self) -> Uuid;
    fn order_index(&self) -> i32;
    fn set_order_index(&mut self, order_index: i32);
}

/// Persists a single record's position.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn set_order_index(&self, id: Uuid, order_index: i32) -> Result<(), DbErr>;
}

#[derive(Debug, Error)]
pub enum ReorderError {
    #[error("record {0} is not part of this collection")]
    UnknownRecord(Uuid),
}

/// Result of a reorder: the new order, and the records whose position write failed.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderOutcome<T> {
    pub items: Vec<T>,
    pub writes_issued: usize,
    pub failed: Vec<Uuid>,
}

impl<T> ReorderOutcome<T> {
    fn unchanged(items: Vec<T>) -> Self {
        Self {
            items,
            writes_issued: 0,
            failed: Vec::new(),
        }
    }
}

/// Move the element at `from` to `to`, shifting everything in between by one.
///
/// Out-of-range indices leave the slice untouched.
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}

/// Compute the order that results from dropping `active_id` onto `over_id`.
///
/// Returns `Ok(None)` when nothing moves: an empty collection, a single
/// record, or a drop onto itself. Both ids must belong to a non-empty
/// collection. Every returned record has its `order_index` set to its new
/// position.
pub fn plan_reorder<T: Ordered + Clone>(
    items: &[T],
    active_id: Uuid,
    over_id: Uuid,
) -> Result<Option<Vec<T>>, ReorderError> {
    if items.is_empty() {
        return Ok(None);
    }

    let from = position_of(items, active_id)?;
    let to = position_of(items, over_id)?;
    if from == to {
        return Ok(None);
    }

    let mut reordered = items.to_vec();
    array_move(&mut reordered, from, to);
    for (index, item) in reordered.iter_mut().enumerate() {
        item.set_order_index(index as i32);
    }

    Ok(Some(reordered))
}

fn position_of<T: Ordered>(items: &[T], id: Uuid) -> Result<usize, ReorderError> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(ReorderError::UnknownRecord(id))
}

/// Observable "saving" flag for one record kind.
///
/// Counts reorders in flight so overlapping drags keep the flag raised until
/// the last one settles.
#[derive(Debug)]
pub struct SavingIndicator {
    in_flight: watch::Sender<usize>,
}

impl SavingIndicator {
    pub fn new() -> Self {
        let (in_flight, _) = watch::channel(0);
        Self { in_flight }
    }

    pub fn is_saving(&self) -> bool {
        *self.in_flight.borrow() > 0
    }

    /// Receiver that observes the number of reorders currently persisting.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    fn begin(&self) -> SavingGuard<'_> {
        self.in_flight.send_modify(|n| *n += 1);
        SavingGuard { indicator: self }
    }
}

impl Default for SavingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowers the indicator when persistence finishes or the future is dropped.
struct SavingGuard<'a> {
    indicator: &'a SavingIndicator,
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.indicator
            .in_flight
            .send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// Applies reorders for a single record kind.
#[derive(Debug)]
pub struct ReorderService {
    kind: RecordKind,
    indicator: SavingIndicator,
}

impl ReorderService {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            indicator: SavingIndicator::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn indicator(&self) -> &SavingIndicator {
        &self.indicator
    }

    /// Reorder `items` by dropping `active_id` onto `over_id` and persist the result.
    ///
    /// Writes are issued sequentially in the new order, awaiting each one
    /// before the next. A failed write is logged and recorded in
    /// [`ReorderOutcome::failed`]; the remaining writes still go out.
    pub async fn reorder<T, S>(
        &self,
        store: &S,
        items: Vec<T>,
        active_id: Uuid,
        over_id: Uuid,
    ) -> Result<ReorderOutcome<T>, ReorderError>
    where
        T: Ordered + Clone,
        S: OrderStore + ?Sized,
    {
        let Some(reordered) = plan_reorder(&items, active_id, over_id)? else {
            return Ok(ReorderOutcome::unchanged(items));
        };

        let _saving = self.indicator.begin();
        let mut failed = Vec::new();
        for item in &reordered {
            if let Err(e) = store.set_order_index(item.id(), item.order_index()).await {
                warn!(
                    kind = ?self.kind,
                    id = %item.id(),
                    order_index = item.order_index(),
                    "Failed to persist order index: {e}"
                );
                failed.push(item.id());
            }
        }

        info!(
            kind = ?self.kind,
            writes = reordered.len(),
            failed = failed.len(),
            "Persisted new order"
        );

        Ok(ReorderOutcome {
            writes_issued: reordered.len(),
            items: reordered,
            failed,
        })
    }
}

/// One [`ReorderService`] per record kind, shared as app data.
#[derive(Debug)]
pub struct ReorderRegistry {
    portfolios: ReorderService,
    services: ReorderService,
}

impl ReorderRegistry {
    pub fn new() -> Self {
        Self {
            portfolios: ReorderService::new(RecordKind::Portfolios),
            services: ReorderService::new(RecordKind::Services),
        }
    }

    pub fn get(&self, kind: RecordKind) -> &ReorderService {
        match kind {
            RecordKind::Portfolios => &self.portfolios,
            RecordKind::Services => &self.services,
        }
    }
}

impl Default for ReorderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
