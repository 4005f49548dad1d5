//! Seams to the order-fulfillment side: loading issue orders and validating them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use millwright_core::{DomainError, DomainResult};

use crate::issue_material::{IssueOrder, IssueOrderId, LoadedIssueOrder};

/// Supplies issue orders (with their detail lines) before a workflow opens.
#[async_trait]
pub trait IssueOrderSource: Send + Sync {
    async fn load(&self, id: IssueOrderId) -> DomainResult<IssueOrder>;
}

/// Validates an order before it is handed back to the caller.
///
/// Implementations may consult remote state; the workflow awaits the result
/// on its own event queue.
#[async_trait]
pub trait OrderValidator: Send + Sync {
    async fn validate(&self, order: &IssueOrder) -> DomainResult<()>;
}

/// Validator that only applies the order's own rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomainValidator;

#[async_trait]
impl OrderValidator for DomainValidator {
    async fn validate(&self, order: &IssueOrder) -> DomainResult<()> {
        order.validate()
    }
}

/// Source backed by records kept in memory (tests, demos, offline fixtures).
#[derive(Debug, Default)]
pub struct InMemoryIssueOrderSource {
    records: Mutex<HashMap<IssueOrderId, LoadedIssueOrder>>,
}

impl InMemoryIssueOrderSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: LoadedIssueOrder) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(record.id, record);
        }
    }

    /// Load fixtures from a JSON array of records.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let records: Vec<LoadedIssueOrder> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed issue orders: {e}")))?;
        let source = Self::new();
        for record in records {
            source.insert(record);
        }
        Ok(source)
    }
}

#[async_trait]
impl IssueOrderSource for InMemoryIssueOrderSource {
    async fn load(&self, id: IssueOrderId) -> DomainResult<IssueOrder> {
        let records = self
            .records
            .lock()
            .map_err(|_| DomainError::conflict("issue order source lock poisoned"))?;
        let record = records.get(&id).cloned().ok_or_else(DomainError::not_found)?;
        tracing::debug!(order_id = %id, lines = record.lines.len(), "issue order loaded");
        Ok(IssueOrder::from_loaded(record))
    }
}
