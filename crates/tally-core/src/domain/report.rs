//! Report: the outcome envelope for a single operation attempt.
//!
//! One producer runs an operation (a query, an insert, a business action),
//! records what happened into a [`Report`], and hands it over. The report
//! carries the success flag, affected-row count, generated id, user-facing
//! and log messages, an optional captured error, and how long the attempt
//! took.
//!
//! Timing follows a "first stamp wins" rule: the completion instant is
//! stamped once, by whichever comes first of an explicit [`Report::complete`],
//! an id/row-count/data write, a failure call, or the first
//! [`Report::elapsed`] read. Later triggers never move an instant that is
//! already stamped.

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::chain_message;
use crate::ports::{Clock, SystemClock};

/// Outcome envelope for one operation attempt.
///
/// The defaulted type parameters give the three shapes callers use:
/// `Report` (no payload), `Report<T>` (typed payload), and `Report<T, X>`
/// (typed payload plus an alternate payload with its own completion
/// instant).
///
/// Design:
/// - One producer populates the report, then consumers read it. The
///   completion instants live in `Cell`s so a read can stamp them through
///   `&self`; that also makes the type not `Sync`. Share it across
///   threads only behind external synchronization.
/// - `success` starts `true` and only ever moves to `false`. A failed
///   attempt stays failed; there is no way back.
/// - The clock is a port (`SystemClock` in production), so tests drive
///   time instead of sleeping.
#[derive(Debug)]
pub struct Report<T = (), X = (), C = SystemClock> {
    clock: C,
    success: bool,
    id: Option<i64>,
    affected_rows: u64,
    message: String,
    log: String,
    error: Option<Box<dyn std::error::Error + Send + Sync>>,
    data: Option<T>,
    alternative: Option<X>,
    started_at: DateTime<Utc>,
    completed_at: Cell<Option<DateTime<Utc>>>,
    alt_completed_at: Cell<Option<DateTime<Utc>>>,
}

impl<T, X> Report<T, X> {
    /// New report on the system clock; the start instant is captured here.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T, X> Default for Report<T, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, X, C: Clock> Report<T, X, C> {
    /// New report on a caller-supplied clock.
    pub fn with_clock(clock: C) -> Self {
        let started_at = clock.now();
        Self {
            clock,
            success: true,
            id: None,
            affected_rows: 0,
            message: String::new(),
            log: String::new(),
            error: None,
            data: None,
            alternative: None,
            started_at,
            completed_at: Cell::new(None),
            alt_completed_at: Cell::new(None),
        }
    }

    /// Whether the attempt is still considered successful.
    pub fn success(&self) -> bool {
        self.success
    }

    /// User-facing explanation of the outcome.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Set the user-facing message. No other state is touched.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Free-form diagnostic text. The report never writes this itself.
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn set_log(&mut self, log: impl Into<String>) {
        self.log = log.into();
    }

    /// Identifier produced by the operation, e.g. a generated primary key.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Record the produced identifier. The operation is considered done at
    /// this instant, so the completion time is stamped.
    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
        self.stamp();
    }

    /// How many rows (or records, documents, ...) the operation touched.
    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// Record the mutation count; stamps the completion time.
    pub fn set_affected_rows(&mut self, rows: u64) {
        self.affected_rows = rows;
        self.stamp();
    }

    /// The captured error, if a failure came with one.
    pub fn error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        self.error.as_deref()
    }

    /// Whether an error value was captured.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Store an error without going through the failure path: no message,
    /// no `success` change, no timing side effect. Use [`Report::capture`]
    /// to get all of those at once.
    pub fn set_error(&mut self, error: impl std::error::Error + Send + Sync + 'static) {
        self.error = Some(Box::new(error));
    }

    /// Mark the attempt failed.
    ///
    /// Repeatable: the message is overwritten each time, the completion
    /// instant keeps its first value. Failure operations only record
    /// state; they never panic.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = false;
        self.message = message.into();
        self.stamp();
    }

    /// Mark the attempt failed with a message built from `error` and its
    /// whole `source()` chain, one cause per line.
    ///
    /// The error value itself is not retained; see [`Report::capture`].
    pub fn fail_from(&mut self, error: &dyn std::error::Error) {
        self.success = false;
        self.message = chain_message(error);
        self.stamp();
    }

    /// Keep `error` on the report and fail with its chain message.
    ///
    /// Afterwards `is_error()` holds and `message()` reads the same as a
    /// [`Report::fail_from`] with the same error.
    pub fn capture(&mut self, error: impl std::error::Error + Send + Sync + 'static) {
        self.fail_from(&error);
        self.error = Some(Box::new(error));
    }

    /// Stamp the completion instant now, unless something already did.
    pub fn complete(&self) {
        self.stamp();
    }

    /// Time from construction to completion.
    ///
    /// Reading this stamps the completion instant if nothing else has,
    /// freezing the duration; repeated reads return the same value.
    pub fn elapsed(&self) -> TimeDelta {
        self.stamp() - self.started_at
    }

    /// The typed payload, if one was recorded. Reading has no side effect.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Record the typed payload. Data being available means the operation
    /// finished, so the completion time is stamped. The value is stored
    /// as-is, defaults and empties included.
    pub fn set_data(&mut self, value: T) {
        self.data = Some(value);
        self.stamp();
    }

    /// Consume the report and take the payload out.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// The alternate payload, if one was recorded. Reading has no side
    /// effect.
    pub fn alternative(&self) -> Option<&X> {
        self.alternative.as_ref()
    }

    /// Record the alternate payload.
    ///
    /// Two things happen here, and callers should know both:
    /// - the alternate completion instant is stamped (first write wins),
    ///   measured from the same start as the main one;
    /// - the report is marked failed with an empty message, exactly as if
    ///   `fail("")` had been called. Assigning an alternate value always
    ///   flips `success` to `false`, even when nothing else went wrong.
    pub fn set_alternative(&mut self, value: X) {
        self.alternative = Some(value);
        self.stamp_alt();
        self.fail("");
    }

    /// Time from construction to the alternate payload being recorded.
    ///
    /// Like [`Report::elapsed`], reading stamps the alternate instant if
    /// nothing else has.
    pub fn alt_elapsed(&self) -> TimeDelta {
        self.stamp_alt() - self.started_at
    }

    /// Serializable snapshot for logs and responses.
    ///
    /// Goes through [`Report::elapsed`], so taking a view stamps the
    /// completion instant.
    pub fn view(&self) -> ReportView {
        ReportView {
            success: self.success,
            is_error: self.is_error(),
            id: self.id,
            affected_rows: self.affected_rows,
            message: self.message.clone(),
            log: self.log.clone(),
            started_at_ms: self.started_at.timestamp_millis(),
            elapsed_ms: self.elapsed().num_milliseconds(),
        }
    }

    fn stamp(&self) -> DateTime<Utc> {
        match self.completed_at.get() {
            Some(instant) => instant,
            None => {
                let now = self.clock.now();
                self.completed_at.set(Some(now));
                now
            }
        }
    }

    fn stamp_alt(&self) -> DateTime<Utc> {
        match self.alt_completed_at.get() {
            Some(instant) => instant,
            None => {
                let now = self.clock.now();
                self.alt_completed_at.set(Some(now));
                now
            }
        }
    }
}

/// Serializable view of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportView {
    pub success: bool,
    pub is_error: bool,
    pub id: Option<i64>,
    pub affected_rows: u64,
    pub message: String,
    pub log: String,
    pub started_at_ms: i64,
    pub elapsed_ms: i64,
}
