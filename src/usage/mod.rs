//! Usage tracking port
//!
//! The engine itself never records anything. A hosting application that
//! wants to count evaluations wires a [`UsageSink`] into a [`UsageTracker`],
//! which keeps the per-session counter and forwards events to the sink.
//! Sink failures are logged and otherwise ignored so that scoring behaves
//! the same whether or not telemetry works.

use std::convert::Infallible;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::algorithm::cohort::{CohortReport, CohortResult};
use crate::algorithm::fossi::category::{RiskResult, classify};
use crate::models::patient::{PatientInput, PatientRecord, Sex};
use crate::utils::logging::log_warning;

/// One recorded evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub session_id: Uuid,
    pub sex: Sex,
    pub score: f64,
    pub risk_label: String,
}

/// Destination for usage events
pub trait UsageSink {
    /// Error type for sink operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a single event
    fn record(&self, event: &UsageEvent) -> Result<(), Self::Error>;

    /// Number of events recorded across all sessions
    fn total_count(&self) -> Result<u64, Self::Error>;
}

/// Per-session evaluation counter
///
/// An evaluation counts only when the patient differs from the previous
/// one, so re-rendering the same input does not inflate the tally.
#[derive(Debug)]
pub struct UsageTracker<S> {
    sink: Option<S>,
    session_id: Uuid,
    session_count: u64,
    last_fingerprint: Option<u64>,
}

impl<S: UsageSink> UsageTracker<S> {
    /// Tracker with a fresh session id
    #[must_use]
    pub fn new(sink: Option<S>) -> Self {
        Self::with_session(sink, Uuid::new_v4())
    }

    /// Tracker bound to an existing session id
    #[must_use]
    pub const fn with_session(sink: Option<S>, session_id: Uuid) -> Self {
        Self {
            sink,
            session_id,
            session_count: 0,
            last_fingerprint: None,
        }
    }

    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Evaluations counted in this session
    #[must_use]
    pub const fn session_count(&self) -> u64 {
        self.session_count
    }

    #[must_use]
    pub const fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Note an evaluation; returns `true` if it was counted
    pub fn observe(&mut self, patient: &PatientInput, result: &RiskResult) -> bool {
        let fingerprint = patient.fingerprint();
        if self.last_fingerprint == Some(fingerprint) {
            return false;
        }
        self.last_fingerprint = Some(fingerprint);
        self.session_count += 1;

        if let Some(sink) = &self.sink {
            let event = UsageEvent {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                session_id: self.session_id,
                sex: patient.sex(),
                score: result.score,
                risk_label: result.category.label().to_string(),
            };
            if let Err(e) = sink.record(&event) {
                log_warning("Usage not logged", Some(e.to_string().as_str()));
            }
        }
        true
    }

    /// Note every scored row of a cohort run, in input order
    ///
    /// `records` must be the slice the report was built from. Returns the
    /// number of rows that were counted.
    pub fn observe_cohort(&mut self, records: &[PatientRecord], report: &CohortReport) -> usize {
        let mut counted = 0;
        for outcome in &report.outcomes {
            let CohortResult::Scored(row) = &outcome.result else {
                continue;
            };
            let Some(patient) = records
                .get(outcome.index)
                .and_then(|record| PatientInput::try_from(record).ok())
            else {
                continue;
            };
            if self.observe(&patient, &classify(row.sex, row.score)) {
                counted += 1;
            }
        }
        counted
    }

    /// Global count from the sink, `None` when unavailable
    #[must_use]
    pub fn global_count(&self) -> Option<u64> {
        let sink = self.sink.as_ref()?;
        match sink.total_count() {
            Ok(count) => Some(count),
            Err(e) => {
                log_warning("Global count unavailable", Some(e.to_string().as_str()));
                None
            }
        }
    }
}

/// In-process sink holding events in memory
#[derive(Debug, Default)]
pub struct MemoryUsageSink {
    events: Mutex<Vec<UsageEvent>>,
}

impl MemoryUsageSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded event, oldest first
    #[must_use]
    pub fn events(&self) -> Vec<UsageEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UsageSink for MemoryUsageSink {
    type Error = Infallible;

    fn record(&self, event: &UsageEvent) -> Result<(), Self::Error> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }

    fn total_count(&self) -> Result<u64, Self::Error> {
        let len = self
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        Ok(len as u64)
    }
}

impl<T: UsageSink> UsageSink for &T {
    type Error = T::Error;

    fn record(&self, event: &UsageEvent) -> Result<(), Self::Error> {
        (**self).record(event)
    }

    fn total_count(&self) -> Result<u64, Self::Error> {
        (**self).total_count()
    }
}
