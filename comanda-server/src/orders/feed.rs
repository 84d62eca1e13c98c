//! Live Status Feeds
//!
//! One SurrealDB live query watches the whole `order` table; registered
//! per-status feeds re-query their full snapshot on every change and
//! publish it through a `watch` channel. Consumers always see the current
//! complete result set for their status, sorted oldest-first — never a
//! diff. Dropping the receiver is the unsubscribe.
//!
//! A table-level live query is used instead of one filtered live query
//! per status: an update that moves an order OUT of a status must refresh
//! that status's feed too, and the notification only carries the new
//! state of the record.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures::StreamExt;
use surrealdb::{Notification, Surreal};
use surrealdb::engine::local::Db;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::db::repository::{OrderRepository, RepoError, RepoResult};
use shared::models::order::{Order, OrderStatus, StatusFlow};

/// Reconnect delay after the live stream drops
const RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct FeedService {
    db: Surreal<Db>,
    orders: OrderRepository,
    senders: DashMap<OrderStatus, watch::Sender<Vec<Order>>>,
}

impl FeedService {
    pub fn new(db: Surreal<Db>, flow: StatusFlow) -> Arc<Self> {
        Arc::new(Self {
            orders: OrderRepository::new(db.clone(), flow),
            db,
            senders: DashMap::new(),
        })
    }

    /// Start the background watcher. Runs until `shutdown` is cancelled;
    /// the live stream is reopened with a short delay whenever it drops.
    pub fn spawn(self: &Arc<Self>, shutdown: CancellationToken) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.run(shutdown).await;
        });
    }

    /// Subscribe to the full-snapshot feed for `status`.
    ///
    /// Exactly one feed exists per status; repeated subscriptions share
    /// it. The receiver's current value is always the latest snapshot.
    pub async fn subscribe(&self, status: OrderStatus) -> RepoResult<watch::Receiver<Vec<Order>>> {
        if let Some(sender) = self.senders.get(&status) {
            return Ok(sender.subscribe());
        }

        let snapshot = self.orders.find_by_status(status).await?;
        let entry = self
            .senders
            .entry(status)
            .or_insert_with(|| watch::channel(snapshot).0);
        Ok(entry.subscribe())
    }

    /// One-shot snapshot for `status`, bypassing the feed.
    pub async fn snapshot(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        self.orders.find_by_status(status).await
    }

    async fn run(&self, shutdown: CancellationToken) {
        tracing::info!("Live order feed started");
        loop {
            if shutdown.is_cancelled() {
                break;
            }
            match self.watch_once(&shutdown).await {
                Ok(()) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Live order feed interrupted, reopening");
                }
            }
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(RETRY_DELAY) => {}
            }
        }
        tracing::info!("Live order feed stopped");
    }

    /// Hold one live query open and refresh registered feeds on every
    /// notification. Returns when the stream ends or `shutdown` fires.
    async fn watch_once(&self, shutdown: &CancellationToken) -> RepoResult<()> {
        let mut response = self.db.query("LIVE SELECT * FROM order").await?;
        let mut stream = response
            .stream::<Notification<serde_json::Value>>(0)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                note = stream.next() => match note {
                    Some(Ok(_)) => self.refresh_all().await,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                },
            }
        }
    }

    /// Re-query and publish the snapshot of every registered feed.
    async fn refresh_all(&self) {
        let statuses: Vec<OrderStatus> = self.senders.iter().map(|e| *e.key()).collect();
        for status in statuses {
            match self.orders.find_by_status(status).await {
                Ok(snapshot) => {
                    if let Some(sender) = self.senders.get(&status) {
                        sender.send_replace(snapshot);
                    }
                }
                Err(e) => {
                    tracing::warn!(status = %status, error = %e, "Failed to refresh status feed");
                }
            }
        }
    }
}
