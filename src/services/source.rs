// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contract for an external workout data source.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;

use crate::error::Result;
use crate::models::Workout;

/// A provider of completed workouts (health-data gateway, test double).
#[async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Trigger the provider's user-facing permission flow.
    ///
    /// Completion does not guarantee that access was granted: a
    /// privacy-preserving provider never reveals denial.
    async fn request_access(&self) -> Result<()>;

    /// Fetch completed workouts, optionally only those after `since`.
    ///
    /// Returns an empty list (not an error) when access was denied or no
    /// data exists; the two cases are indistinguishable by design and
    /// callers must not infer access state from the result.
    async fn fetch_workouts(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Workout>>;

    /// Subscribe to change notifications.
    ///
    /// Emits one unit event per detected change, with no payload;
    /// consumers re-fetch and dedupe themselves. The subscription is
    /// released when the stream is dropped.
    fn observe_workouts(&self) -> BoxStream<'static, ()>;
}
