//! Expense records.
//!
//! An `ExpenseRecord` is a single logged expense: the day it was logged, a
//! free-text category and a non-negative amount in the smallest currency unit.
//! Records are append-only and never change after insert.

use std::fmt;

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Identity of a stored record, assigned by the backend at insert time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    pub category: String,
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub category: String,
    pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseRecord {
    fn from(model: Model) -> Self {
        Self {
            id: RecordId(model.id),
            date: model.date,
            category: model.category,
            amount: model.amount,
        }
    }
}
