//! In-process backend, used when no database is configured and by tests.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::{
    DateRange, ExpenseRecord, ExpenseStore, RecordId, Report, ResultEngine,
    store::validate_entry,
};

/// Records kept in insertion order behind a single lock.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<ExpenseRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record.
    pub async fn records(&self) -> Vec<ExpenseRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl ExpenseStore for MemoryStore {
    async fn insert(&self, date: NaiveDate, category: &str, amount: i64) -> ResultEngine<RecordId> {
        validate_entry(category, amount)?;

        let mut guard = self.records.lock().await;
        let id = RecordId(guard.len() as i64 + 1);
        guard.push(ExpenseRecord {
            id,
            date,
            category: category.to_string(),
            amount,
        });
        tracing::debug!("stored expense {id} in memory");
        Ok(id)
    }

    async fn sum_by_category(&self, range: DateRange) -> ResultEngine<Report> {
        let guard = self.records.lock().await;
        let mut report = Report::empty(range);
        for record in guard.iter().filter(|r| range.contains(r.date)) {
            report.add(&record.category, record.amount)?;
        }
        Ok(report)
    }
}
