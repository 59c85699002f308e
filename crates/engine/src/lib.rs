//! Expense ledger engine.
//!
//! The engine owns the append-only expense store and the report queries built
//! on top of it. Two backends implement [`ExpenseStore`]: [`Engine`], backed by
//! a sea-orm connection, and [`MemoryStore`].

use chrono::NaiveDate;
use sea_orm::{ActiveValue, Statement, prelude::*};

pub use error::EngineError;
pub use expenses::{ExpenseRecord, RecordId};
pub use memory::MemoryStore;
pub use range::{DateRange, MONTH_DAYS, WEEK_DAYS};
pub use report::{CategoryTotal, Report};
pub use store::ExpenseStore;

mod error;
mod expenses;
mod memory;
mod range;
mod report;
mod store;

type ResultEngine<T> = Result<T, EngineError>;

/// Database-backed expense store.
#[derive(Debug, Clone)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Fetch a single record by id.
    pub async fn record(&self, id: RecordId) -> ResultEngine<Option<ExpenseRecord>> {
        let model = expenses::Entity::find_by_id(id.0)
            .one(&self.database)
            .await?;
        Ok(model.map(ExpenseRecord::from))
    }
}

#[async_trait::async_trait]
impl ExpenseStore for Engine {
    async fn insert(&self, date: NaiveDate, category: &str, amount: i64) -> ResultEngine<RecordId> {
        store::validate_entry(category, amount)?;

        let model = expenses::ActiveModel {
            id: ActiveValue::NotSet,
            date: ActiveValue::Set(date),
            category: ActiveValue::Set(category.to_string()),
            amount: ActiveValue::Set(amount),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!("stored expense #{} on {date}", model.id);
        Ok(RecordId(model.id))
    }

    async fn sum_by_category(&self, range: DateRange) -> ResultEngine<Report> {
        // Grouped in SQL, ordered by the first matching row so categories keep
        // their first-seen order.
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT category, SUM(amount) AS total \
             FROM expenses \
             WHERE date >= ? AND date <= ? \
             GROUP BY category \
             ORDER BY MIN(id)",
            [range.start.into(), range.end.into()],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut report = Report::empty(range);
        for row in rows {
            let category: String = row.try_get("", "category")?;
            let total: i64 = row.try_get("", "total")?;
            report.add(&category, total)?;
        }
        Ok(report)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
