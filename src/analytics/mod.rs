// ABOUTME: Debounced analytics refresh after schedule mutations
// ABOUTME: Recomputes the snapshot once the schedule has been quiet, then runs the threshold monitor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Analytics refresh.
//!
//! Mutations arrive in bursts (a shift is one write per entry). Each call to
//! [`AnalyticsRefresher::schedule`] restarts the quiet period; only the last
//! one in a burst recomputes. Outside a tokio runtime the refresh runs inline.

use crate::collaborators::{Notifier, ScheduleAccessor};
use forge_core::models::LoadSeries;
use forge_intelligence::{AnalyticsSnapshot, MonitorReport, ThresholdMonitor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

struct RefreshTarget {
    schedule: Arc<dyn ScheduleAccessor>,
    notifier: Arc<dyn Notifier>,
    monitor: Arc<ThresholdMonitor>,
    history: LoadSeries,
    runs: AtomicUsize,
    last_report: Mutex<Option<MonitorReport>>,
}

impl RefreshTarget {
    fn refresh(&self) -> MonitorReport {
        let series = self.schedule.load_series();
        let snapshot = AnalyticsSnapshot::compute(&self.history, &series);
        let report = self
            .monitor
            .check_and_notify(&snapshot, &series, self.notifier.as_ref());
        self.runs.fetch_add(1, Ordering::SeqCst);
        debug!(
            acwr = ?snapshot.acwr_ratio,
            monotony = ?snapshot.monotony_value,
            breaches = report.breaches.len(),
            "analytics refreshed"
        );
        *lock_or_recover(&self.last_report) = Some(report.clone());
        report
    }
}

/// Debounced recompute of analytics and threshold checks
pub struct AnalyticsRefresher {
    target: Arc<RefreshTarget>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AnalyticsRefresher {
    /// Create a refresher
    #[must_use]
    pub fn new(
        schedule: Arc<dyn ScheduleAccessor>,
        notifier: Arc<dyn Notifier>,
        monitor: Arc<ThresholdMonitor>,
        history: LoadSeries,
        debounce: Duration,
    ) -> Self {
        Self {
            target: Arc::new(RefreshTarget {
                schedule,
                notifier,
                monitor,
                history,
                runs: AtomicUsize::new(0),
                last_report: Mutex::new(None),
            }),
            debounce,
            pending: Mutex::new(None),
        }
    }

    /// Request a refresh after the quiet period, replacing any pending one
    pub fn schedule(&self) {
        let Ok(runtime) = Handle::try_current() else {
            debug!("no async runtime, refreshing inline");
            self.target.refresh();
            return;
        };

        let target = Arc::clone(&self.target);
        let debounce = self.debounce;
        let handle = runtime.spawn(async move {
            sleep(debounce).await;
            target.refresh();
        });

        if let Some(previous) = lock_or_recover(&self.pending).replace(handle) {
            previous.abort();
        }
    }

    /// Refresh immediately, cancelling any pending debounced refresh
    #[must_use]
    pub fn refresh_now(&self) -> MonitorReport {
        if let Some(previous) = lock_or_recover(&self.pending).take() {
            previous.abort();
        }
        self.target.refresh()
    }

    /// Completed refreshes since construction
    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.target.runs.load(Ordering::SeqCst)
    }

    /// Report from the most recent refresh
    #[must_use]
    pub fn last_report(&self) -> Option<MonitorReport> {
        lock_or_recover(&self.target.last_report).clone()
    }
}

impl Drop for AnalyticsRefresher {
    fn drop(&mut self) {
        if let Some(pending) = lock_or_recover(&self.pending).take() {
            pending.abort();
        }
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("analytics refresh lock poisoned, recovering");
        poisoned.into_inner()
    })
}
