//! Post production workspace: report finished quantity against a work order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use millwright_core::{DomainError, DomainResult, WorkOrderId};

use crate::completion::{Completion, CompletionCallback};
use crate::error::{WorkflowError, WorkflowResult};
use crate::status::ModelStatus;
use crate::surface::{PrimaryQuantityField, WorkspaceLifecycle};

/// Work order snapshot the user posts production against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostProduction {
    pub work_order_id: WorkOrderId,
    pub number: String,
    pub due_date: NaiveDate,
    pub item: String,
    pub site: String,
    /// Work order status label (e.g. "In Process").
    pub status: String,
    pub cos_method: String,
    #[serde(default)]
    pub production_notes: String,
    pub qty_ordered: f64,
    pub qty_received: f64,
    qty_to_post: f64,
    model_status: ModelStatus,
}

impl PostProduction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        work_order_id: WorkOrderId,
        number: impl Into<String>,
        due_date: NaiveDate,
        item: impl Into<String>,
        site: impl Into<String>,
        status: impl Into<String>,
        cos_method: impl Into<String>,
        qty_ordered: f64,
        qty_received: f64,
    ) -> Self {
        let balance = (qty_ordered - qty_received).max(0.0);
        Self {
            work_order_id,
            number: number.into(),
            due_date,
            item: item.into(),
            site: site.into(),
            status: status.into(),
            cos_method: cos_method.into(),
            production_notes: String::new(),
            qty_ordered,
            qty_received,
            // Defaulting the quantity makes a freshly loaded record dirty.
            qty_to_post: balance,
            model_status: ModelStatus::ReadyDirty,
        }
    }

    pub fn balance(&self) -> f64 {
        self.qty_ordered - self.qty_received
    }

    pub fn qty_to_post(&self) -> f64 {
        self.qty_to_post
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model_status
    }

    pub fn is_dirty(&self) -> bool {
        self.model_status.is_dirty()
    }

    pub fn set_qty_to_post(&mut self, qty: f64) {
        self.qty_to_post = qty;
        self.model_status = ModelStatus::ReadyDirty;
    }

    pub fn set_production_notes(&mut self, notes: impl Into<String>) {
        self.production_notes = notes.into();
        self.model_status = ModelStatus::ReadyDirty;
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.qty_to_post.is_finite() || self.qty_to_post <= 0.0 {
            return Err(DomainError::validation(
                "quantity to post must be greater than zero",
            ));
        }
        Ok(())
    }

    fn mark_committed(&mut self) {
        self.model_status = ModelStatus::ReadyClean;
    }
}

/// Posting options remembered between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostOption {
    BackflushMaterials,
    CloseWorkOrderAfterPosting,
    ScrapOnPost,
}

impl PostOption {
    pub const ALL: [PostOption; 3] = [
        PostOption::BackflushMaterials,
        PostOption::CloseWorkOrderAfterPosting,
        PostOption::ScrapOnPost,
    ];

    /// Key the option is remembered under.
    pub fn key(self) -> &'static str {
        match self {
            PostOption::BackflushMaterials => "postProduction.backflushMaterials",
            PostOption::CloseWorkOrderAfterPosting => "postProduction.closeWorkOrderAfterPosting",
            PostOption::ScrapOnPost => "postProduction.scrapOnPost",
        }
    }
}

/// Per-user checkbox memory.
pub trait StickyOptionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<bool>;

    fn set(&self, key: &str, value: bool);
}

#[derive(Debug, Default)]
pub struct InMemoryStickyOptions {
    values: Mutex<HashMap<String, bool>>,
}

impl InMemoryStickyOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StickyOptionStore for InMemoryStickyOptions {
    fn get(&self, key: &str) -> Option<bool> {
        self.values.lock().ok()?.get(key).copied()
    }

    fn set(&self, key: &str, value: bool) {
        match self.values.lock() {
            Ok(mut values) => {
                values.insert(key.to_string(), value);
            }
            Err(_) => warn!(key, "sticky option not remembered: lock poisoned"),
        }
    }
}

pub struct PostProductionWorkflow<S> {
    model: PostProduction,
    surface: S,
    options: HashMap<PostOption, bool>,
    store: Arc<dyn StickyOptionStore>,
    callback: Option<CompletionCallback<PostProductionWorkflow<S>>>,
    started: bool,
    closed: bool,
}

impl<S: PrimaryQuantityField> PostProductionWorkflow<S> {
    pub fn new(model: PostProduction, surface: S, store: Arc<dyn StickyOptionStore>) -> Self {
        let options = PostOption::ALL
            .iter()
            .map(|opt| (*opt, store.get(opt.key()).unwrap_or(false)))
            .collect();
        Self {
            model,
            surface,
            options,
            store,
            callback: None,
            started: false,
            closed: false,
        }
    }

    pub fn on_complete(&mut self, callback: impl FnMut(Completion<'_, Self>) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn model(&self) -> &PostProduction {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn option(&self, option: PostOption) -> bool {
        self.options.get(&option).copied().unwrap_or(false)
    }

    /// Flip a posting option and remember the choice.
    pub fn set_option(&mut self, option: PostOption, value: bool) -> WorkflowResult<()> {
        self.ensure_open()?;
        self.options.insert(option, value);
        self.store.set(option.key(), value);
        Ok(())
    }

    pub fn set_qty_to_post(&mut self, qty: f64) -> WorkflowResult<()> {
        self.ensure_open()?;
        self.model.set_qty_to_post(qty);
        Ok(())
    }

    pub fn set_production_notes(&mut self, notes: impl Into<String>) -> WorkflowResult<()> {
        self.ensure_open()?;
        self.model.set_production_notes(notes);
        Ok(())
    }

    /// Focus and select the quantity to post on the first bind of a dirty record.
    pub fn on_form_ready(&mut self) {
        if !self.started && self.model.model_status() == ModelStatus::ReadyDirty {
            self.surface.focus_and_select_primary();
            self.started = true;
        }
    }

    pub fn commit(&mut self) -> WorkflowResult<()> {
        self.ensure_open()?;
        if let Err(e) = self.model.validate() {
            warn!(work_order = %self.model.number, error = %e, "post production failed validation");
            return Err(e.into());
        }

        self.model.mark_committed();
        info!(
            work_order = %self.model.number,
            qty = self.model.qty_to_post(),
            backflush = self.option(PostOption::BackflushMaterials),
            close = self.option(PostOption::CloseWorkOrderAfterPosting),
            "production posted"
        );
        if let Some(mut callback) = self.callback.take() {
            callback(Completion::Committed(&*self));
            self.callback = Some(callback);
        }
        Ok(())
    }

    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        if self.model.is_dirty() {
            if let Some(mut callback) = self.callback.take() {
                callback(Completion::Cancelled);
            }
        }
        self.closed = true;
        self.callback = None;
    }

    fn ensure_open(&self) -> WorkflowResult<()> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        Ok(())
    }
}

impl<S: PrimaryQuantityField> WorkspaceLifecycle for PostProductionWorkflow<S> {
    fn on_data_bound(&mut self) {
        self.on_form_ready();
    }

    fn on_teardown(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::surface::fake::RecordingSurface;

    fn record() -> PostProduction {
        PostProduction::new(
            WorkOrderId::new(),
            "10051-1",
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            "YTRUCK1",
            "WH1",
            "In Process",
            "Proportional",
            100.0,
            40.0,
        )
    }

    fn workflow(store: Arc<InMemoryStickyOptions>) -> PostProductionWorkflow<RecordingSurface> {
        PostProductionWorkflow::new(record(), RecordingSurface::new(), store)
    }

    #[test]
    fn new_record_defaults_quantity_to_balance() {
        let model = record();
        assert_eq!(model.balance(), 60.0);
        assert_eq!(model.qty_to_post(), 60.0);
        assert!(model.is_dirty());
    }

    #[test]
    fn options_are_remembered_across_workspaces() {
        let store = Arc::new(InMemoryStickyOptions::new());
        let mut first = workflow(Arc::clone(&store));
        assert!(!first.option(PostOption::BackflushMaterials));
        first.set_option(PostOption::BackflushMaterials, true).unwrap();
        first.set_option(PostOption::ScrapOnPost, true).unwrap();
        first.set_option(PostOption::ScrapOnPost, false).unwrap();

        let second = workflow(store);
        assert!(second.option(PostOption::BackflushMaterials));
        assert!(!second.option(PostOption::ScrapOnPost));
        assert!(!second.option(PostOption::CloseWorkOrderAfterPosting));
    }

    #[test]
    fn form_ready_focuses_quantity_once() {
        let mut wf = workflow(Arc::new(InMemoryStickyOptions::new()));
        wf.on_data_bound();
        wf.on_data_bound();
        assert_eq!(wf.surface().count("focus_primary"), 1);
    }

    #[test]
    fn commit_rejects_zero_quantity() {
        let mut wf = workflow(Arc::new(InMemoryStickyOptions::new()));
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        wf.on_complete(move |_| seen.set(seen.get() + 1));

        wf.set_qty_to_post(0.0).unwrap();
        assert!(wf.commit().unwrap_err().is_validation());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn commit_then_teardown_reports_only_commit() {
        let mut wf = workflow(Arc::new(InMemoryStickyOptions::new()));
        let committed = Rc::new(Cell::new(0));
        let cancelled = Rc::new(Cell::new(0));
        let (c, x) = (Rc::clone(&committed), Rc::clone(&cancelled));
        wf.on_complete(move |outcome| match outcome {
            Completion::Committed(w) => {
                assert_eq!(w.model().qty_to_post(), 12.5);
                c.set(c.get() + 1);
            }
            Completion::Cancelled => x.set(x.get() + 1),
        });

        wf.set_qty_to_post(12.5).unwrap();
        wf.commit().unwrap();
        wf.on_teardown();

        assert_eq!((committed.get(), cancelled.get()), (1, 0));
    }

    #[test]
    fn teardown_of_dirty_record_cancels() {
        let mut wf = workflow(Arc::new(InMemoryStickyOptions::new()));
        let cancelled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&cancelled);
        wf.on_complete(move |outcome| flag.set(!outcome.is_committed()));

        wf.teardown();
        assert!(cancelled.get());
        assert_eq!(wf.set_production_notes("late").unwrap_err(), WorkflowError::Closed);
    }

    #[test]
    fn closed_workspace_does_not_remember_options() {
        let store = Arc::new(InMemoryStickyOptions::new());
        let mut wf = workflow(Arc::clone(&store));

        wf.teardown();
        assert_eq!(
            wf.set_option(PostOption::ScrapOnPost, true).unwrap_err(),
            WorkflowError::Closed
        );
        assert!(!wf.option(PostOption::ScrapOnPost));
        assert_eq!(store.get(PostOption::ScrapOnPost.key()), None);
    }
}
