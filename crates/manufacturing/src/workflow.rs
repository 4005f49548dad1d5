//! Issue-material workspace controller.
//!
//! Lets a user spread the quantity to issue across detail lines (stock
//! locations) and hands the validated order back to whoever opened the
//! workspace. All methods run on the host's single UI event queue.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use millwright_core::{NumberLocale, QTY_SCALE};
use millwright_events::{EventBus, InMemoryEventBus, Subscription, execute};

use crate::completion::{Completion, CompletionCallback};
use crate::error::{WorkflowError, WorkflowResult};
use crate::issue_material::{
    AllocateRemaining, ClearLine, DistributeLine, IssueMaterialCommand, IssueMaterialEvent,
    IssueOrder, IssueOrderId, SetToIssue,
};
use crate::source::{IssueOrderSource, OrderValidator};
use crate::status::ModelStatus;
use crate::surface::{IssueMaterialSurface, WorkspaceLifecycle};

/// State of the distribution dialog.
///
/// `Hidden -> Shown -> {Confirmed | Cancelled} -> Hidden`. The hide
/// notification (`on_dialog_closed`) completes the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Hidden,
    Shown { target: u32 },
    Confirmed,
    Cancelled,
}

pub struct IssueMaterialWorkflow<S> {
    order: IssueOrder,
    surface: S,
    locale: NumberLocale,
    validator: Arc<dyn OrderValidator>,
    bus: InMemoryEventBus<IssueMaterialEvent>,
    callback: Option<CompletionCallback<IssueMaterialWorkflow<S>>>,
    dialog: DialogState,
    started: bool,
    closed: bool,
}

impl<S: IssueMaterialSurface> IssueMaterialWorkflow<S> {
    pub fn new(
        order: IssueOrder,
        surface: S,
        locale: NumberLocale,
        validator: Arc<dyn OrderValidator>,
    ) -> Self {
        Self {
            order,
            surface,
            locale,
            validator,
            bus: InMemoryEventBus::new(),
            callback: None,
            dialog: DialogState::Hidden,
            started: false,
            closed: false,
        }
    }

    /// Load the order from `source` and open a workspace on it.
    pub async fn open(
        source: &dyn IssueOrderSource,
        id: IssueOrderId,
        surface: S,
        locale: NumberLocale,
        validator: Arc<dyn OrderValidator>,
    ) -> WorkflowResult<Self> {
        let order = source.load(id).await?;
        info!(order_id = %id, work_order = order.work_order_number(), "issue material workspace opened");
        Ok(Self::new(order, surface, locale, validator))
    }

    /// Register the callback told about commit or cancellation.
    pub fn on_complete(&mut self, callback: impl FnMut(Completion<'_, Self>) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Receive every change this workspace makes to the order.
    pub fn subscribe(&self) -> Subscription<IssueMaterialEvent> {
        self.bus.subscribe()
    }

    pub fn order(&self) -> &IssueOrder {
        &self.order
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn dialog_state(&self) -> DialogState {
        self.dialog
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Toggle a line: clear it if it holds a quantity, else give it everything
    /// still undistributed.
    ///
    /// Returns the line's new distributed quantity.
    pub fn select_line(&mut self, line_no: u32) -> WorkflowResult<f64> {
        self.ensure_open()?;
        let line = self
            .order
            .line(line_no)
            .ok_or(WorkflowError::UnknownLine(line_no))?;
        let order_id = self.order.id_typed();
        let occurred_at = Utc::now();

        let command = if line.is_distributed() {
            IssueMaterialCommand::ClearLine(ClearLine {
                order_id,
                line_no,
                occurred_at,
            })
        } else {
            IssueMaterialCommand::AllocateRemaining(AllocateRemaining {
                order_id,
                line_no,
                occurred_at,
            })
        };

        self.execute_and_publish(&command)?;
        self.surface.refresh_detail_list();
        let distributed = self
            .order
            .line(line_no)
            .map_or(0.0, |line| line.distributed);
        debug!(line_no, distributed, "line selection toggled");
        Ok(distributed)
    }

    /// Change the amount to issue.
    pub fn set_to_issue(&mut self, quantity: f64) -> WorkflowResult<()> {
        self.ensure_open()?;
        let command = IssueMaterialCommand::SetToIssue(SetToIssue {
            order_id: self.order.id_typed(),
            quantity,
            occurred_at: Utc::now(),
        });
        self.execute_and_publish(&command)
    }

    /// Show the quantity dialog for `line_no`, pre-filled with its current quantity.
    pub fn open_quantity_dialog(&mut self, line_no: u32) -> WorkflowResult<()> {
        self.ensure_open()?;
        let line = self
            .order
            .line(line_no)
            .ok_or(WorkflowError::UnknownLine(line_no))?;
        let text = self.locale.format(line.distributed, QTY_SCALE);

        self.dialog = DialogState::Shown { target: line_no };
        self.surface.show_dialog();
        self.surface.set_dialog_text(&text);
        self.surface.focus_and_select_dialog_input();
        debug!(line_no, %text, "quantity dialog shown");
        Ok(())
    }

    /// Apply the dialog's text to its target line.
    ///
    /// Text that does not parse, or a quantity the line rejects, leaves the
    /// dialog open with the text as entered and the line unchanged.
    pub fn confirm_quantity_dialog(&mut self) -> WorkflowResult<()> {
        self.ensure_open()?;
        let DialogState::Shown { target } = self.dialog else {
            return Err(WorkflowError::NoDialogTarget);
        };

        let text = self.surface.dialog_text();
        let quantity = self.locale.parse(&text).inspect_err(|e| {
            warn!(line_no = target, %text, error = %e, "quantity entry rejected");
        })?;

        let command = IssueMaterialCommand::DistributeLine(DistributeLine {
            order_id: self.order.id_typed(),
            line_no: target,
            quantity,
            occurred_at: Utc::now(),
        });
        self.execute_and_publish(&command).inspect_err(|e| {
            warn!(line_no = target, quantity, error = %e, "quantity entry rejected");
        })?;

        self.dialog = DialogState::Confirmed;
        self.surface.hide_dialog();
        self.surface.refresh_detail_list();
        debug!(line_no = target, quantity, "quantity dialog confirmed");
        Ok(())
    }

    /// Close the dialog without touching the target line.
    pub fn cancel_quantity_dialog(&mut self) {
        if let DialogState::Shown { target } = self.dialog {
            self.dialog = DialogState::Cancelled;
            self.surface.hide_dialog();
            debug!(line_no = target, "quantity dialog cancelled");
        }
    }

    /// The host reports the dialog was hidden.
    ///
    /// A hide that was not preceded by confirm or cancel (e.g. a tap outside
    /// the popup) puts the dialog back on screen.
    pub fn on_dialog_closed(&mut self) {
        match self.dialog {
            DialogState::Shown { target } => {
                debug!(line_no = target, "dialog dismissed without a decision; showing again");
                self.surface.show_dialog();
            }
            DialogState::Confirmed | DialogState::Cancelled => {
                self.dialog = DialogState::Hidden;
            }
            DialogState::Hidden => {}
        }
    }

    /// Validate the order and, if it passes, hand this workspace to the callback.
    ///
    /// On failure the callback is not invoked and the workspace stays open.
    pub async fn commit(&mut self) -> WorkflowResult<()> {
        self.ensure_open()?;
        let validator = Arc::clone(&self.validator);
        if let Err(e) = validator.validate(&self.order).await {
            warn!(order_id = %self.order.id_typed(), error = %e, "issue order failed validation");
            return Err(e.into());
        }

        self.order.mark_committed();
        info!(
            order_id = %self.order.id_typed(),
            to_issue = self.order.to_issue(),
            "issue order committed"
        );

        if let Some(mut callback) = self.callback.take() {
            callback(Completion::Committed(&*self));
            self.callback = Some(callback);
        }
        Ok(())
    }

    /// Close the workspace. Pending changes are reported as a cancellation
    /// before anything else happens. Subsequent calls do nothing.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        if self.order.is_dirty() {
            if let Some(mut callback) = self.callback.take() {
                info!(order_id = %self.order.id_typed(), "issue material closed with uncommitted changes");
                callback(Completion::Cancelled);
            }
        }

        self.closed = true;
        self.callback = None;
        if let DialogState::Shown { .. } = self.dialog {
            self.dialog = DialogState::Cancelled;
            self.surface.hide_dialog();
        }
    }

    /// First successful bind after load: focus the amount to issue once, and
    /// hide the detail panel for items that are not tracked by location.
    pub fn on_form_ready(&mut self) {
        if !self.started && self.order.status() == ModelStatus::ReadyDirty {
            self.surface.focus_and_select_primary();
            self.started = true;
        }

        if !self.order.requires_detail() {
            self.surface.set_detail_visible(false);
            self.surface.refresh_menu_layout();
        }
    }

    fn ensure_open(&self) -> WorkflowResult<()> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        Ok(())
    }

    fn execute_and_publish(&mut self, command: &IssueMaterialCommand) -> WorkflowResult<()> {
        let events = execute(&mut self.order, command)?;
        for event in events {
            if let Err(e) = self.bus.publish(event) {
                warn!(error = ?e, "change notification dropped");
            }
        }
        Ok(())
    }
}

impl<S: IssueMaterialSurface> WorkspaceLifecycle for IssueMaterialWorkflow<S> {
    fn on_data_bound(&mut self) {
        self.on_form_ready();
    }

    fn on_teardown(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;
    use millwright_core::{AggregateRoot, DomainError, DomainResult};
    use millwright_events::Event;
    use proptest::prelude::*;

    use super::*;
    use crate::issue_material::LoadedIssueOrder;
    use crate::issue_material::tests::loaded_order;
    use crate::source::{DomainValidator, InMemoryIssueOrderSource};
    use crate::surface::QuantityDialogSurface;
    use crate::surface::fake::RecordingSurface;

    type Workflow = IssueMaterialWorkflow<RecordingSurface>;

    fn workflow(data: LoadedIssueOrder) -> Workflow {
        IssueMaterialWorkflow::new(
            IssueOrder::from_loaded(data),
            RecordingSurface::new(),
            NumberLocale::en_us(),
            Arc::new(DomainValidator),
        )
    }

    /// Records completions as "committed:<to_issue>" / "cancelled".
    fn record_completions(wf: &mut Workflow) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        wf.on_complete(move |outcome| {
            let entry = match outcome {
                Completion::Committed(w) => format!("committed:{}", w.order().to_issue()),
                Completion::Cancelled => "cancelled".to_string(),
            };
            sink.borrow_mut().push(entry);
        });
        log
    }

    struct RejectAll;

    #[async_trait]
    impl OrderValidator for RejectAll {
        async fn validate(&self, _order: &IssueOrder) -> DomainResult<()> {
            Err(DomainError::validation("site is closed for issues"))
        }
    }

    #[test]
    fn select_line_distributes_everything_then_clears() {
        let mut wf = workflow(loaded_order(10.0, &[50.0, 50.0]));

        assert_eq!(wf.select_line(1).unwrap(), 10.0);
        assert_eq!(wf.order().line(1).unwrap().distributed, 10.0);
        assert_eq!(wf.order().undistributed(), 0.0);

        assert_eq!(wf.select_line(1).unwrap(), 0.0);
        assert_eq!(wf.order().line(1).unwrap().distributed, 0.0);
        assert_eq!(wf.order().undistributed(), 10.0);
        assert_eq!(wf.surface().count("refresh_detail"), 2);
    }

    #[test]
    fn select_line_assigns_the_full_remainder_regardless_of_location_stock() {
        let mut wf = workflow(loaded_order(10.0, &[4.0, 4.0]));

        assert_eq!(wf.select_line(1).unwrap(), 10.0);
        assert_eq!(wf.order().undistributed(), 0.0);
        assert_eq!(wf.select_line(2).unwrap(), 0.0);
    }

    #[tokio::test]
    async fn over_stock_allocation_is_caught_at_commit() {
        let mut wf = workflow(loaded_order(10.0, &[4.0, 50.0]));
        let log = record_completions(&mut wf);
        wf.select_line(1).unwrap();

        assert!(wf.commit().await.unwrap_err().is_validation());
        assert!(log.borrow().is_empty());

        wf.select_line(1).unwrap();
        wf.select_line(2).unwrap();
        wf.commit().await.unwrap();
        assert_eq!(*log.borrow(), vec!["committed:10".to_string()]);
    }

    #[test]
    fn select_line_after_partial_dialog_entry_takes_the_rest() {
        let mut wf = workflow(loaded_order(10.0, &[50.0, 50.0]));
        wf.open_quantity_dialog(1).unwrap();
        wf.surface_mut().type_into_dialog("4");
        wf.confirm_quantity_dialog().unwrap();

        assert_eq!(wf.select_line(2).unwrap(), 6.0);
        assert_eq!(wf.order().undistributed(), 0.0);
    }

    #[test]
    fn select_line_with_nothing_undistributed_leaves_line_empty() {
        let mut wf = workflow(loaded_order(10.0, &[50.0, 50.0]));
        wf.select_line(1).unwrap();

        assert_eq!(wf.select_line(2).unwrap(), 0.0);
        assert!(!wf.order().line(2).unwrap().is_distributed());
        assert_eq!(wf.order().version(), 1);
    }

    #[test]
    fn select_unknown_line_is_an_error() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        assert_eq!(wf.select_line(3).unwrap_err(), WorkflowError::UnknownLine(3));
    }

    #[test]
    fn changes_are_published_to_subscribers() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        let changes = wf.subscribe();

        wf.select_line(1).unwrap();
        wf.select_line(1).unwrap();

        let events = changes.drain();
        assert!(events.iter().all(|e| e.line_no() == Some(1)));
        let types: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "manufacturing.issue_material.line_distributed",
                "manufacturing.issue_material.line_cleared",
            ]
        );
    }

    #[test]
    fn dialog_is_prefilled_with_formatted_quantity() {
        let mut data = loaded_order(10.0, &[50.0]);
        data.lines[0].distributed = 3.5;
        let mut wf = workflow(data);

        wf.open_quantity_dialog(1).unwrap();

        assert_eq!(wf.dialog_state(), DialogState::Shown { target: 1 });
        assert_eq!(wf.surface().dialog_text, "3.50");
        assert!(wf.surface().dialog_visible);
        assert_eq!(wf.surface().count("focus_dialog"), 1);
    }

    #[test]
    fn confirming_dialog_sets_quantity_and_closes() {
        let mut data = loaded_order(10.0, &[50.0]);
        data.lines[0].distributed = 3.5;
        let mut wf = workflow(data);

        wf.open_quantity_dialog(1).unwrap();
        wf.surface_mut().type_into_dialog("5");
        wf.confirm_quantity_dialog().unwrap();

        assert_eq!(wf.order().line(1).unwrap().distributed, 5.0);
        assert_eq!(wf.dialog_state(), DialogState::Confirmed);
        assert!(!wf.surface().dialog_visible);
        assert_eq!(wf.surface().count("refresh_detail"), 1);

        wf.on_dialog_closed();
        assert_eq!(wf.dialog_state(), DialogState::Hidden);
        assert_eq!(wf.surface().count("show_dialog"), 1);
    }

    #[test]
    fn confirming_uses_the_workspace_locale() {
        let mut wf = IssueMaterialWorkflow::new(
            IssueOrder::from_loaded(loaded_order(10.0, &[50.0])),
            RecordingSurface::new(),
            NumberLocale::de_de(),
            Arc::new(DomainValidator),
        );

        wf.open_quantity_dialog(1).unwrap();
        assert_eq!(wf.surface().dialog_text, "0,00");
        wf.surface_mut().type_into_dialog("2,5");
        wf.confirm_quantity_dialog().unwrap();
        assert_eq!(wf.order().line(1).unwrap().distributed, 2.5);
    }

    #[test]
    fn unparseable_entry_keeps_dialog_open_and_line_unchanged() {
        let mut data = loaded_order(10.0, &[50.0]);
        data.lines[0].distributed = 3.5;
        let mut wf = workflow(data);

        wf.open_quantity_dialog(1).unwrap();
        wf.surface_mut().type_into_dialog("five");
        let err = wf.confirm_quantity_dialog().unwrap_err();

        assert!(err.is_validation());
        assert_eq!(wf.dialog_state(), DialogState::Shown { target: 1 });
        assert!(wf.surface().dialog_visible);
        assert_eq!(wf.surface().dialog_text, "five");
        assert_eq!(wf.order().line(1).unwrap().distributed, 3.5);
    }

    #[test]
    fn entry_beyond_location_stock_is_rejected() {
        let mut wf = workflow(loaded_order(10.0, &[3.0]));

        wf.open_quantity_dialog(1).unwrap();
        wf.surface_mut().type_into_dialog("4");
        assert!(wf.confirm_quantity_dialog().is_err());

        assert_eq!(wf.order().line(1).unwrap().distributed, 0.0);
        assert_eq!(wf.dialog_state(), DialogState::Shown { target: 1 });
        assert_eq!(wf.surface().count("refresh_detail"), 0);
    }

    #[test]
    fn confirm_without_open_dialog_is_an_error() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        assert_eq!(wf.confirm_quantity_dialog().unwrap_err(), WorkflowError::NoDialogTarget);
    }

    #[test]
    fn cancel_discards_target_and_hides() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        wf.open_quantity_dialog(1).unwrap();
        wf.surface_mut().type_into_dialog("7");

        wf.cancel_quantity_dialog();
        assert_eq!(wf.dialog_state(), DialogState::Cancelled);
        assert!(!wf.surface().dialog_visible);

        wf.on_dialog_closed();
        assert_eq!(wf.dialog_state(), DialogState::Hidden);
        assert_eq!(wf.order().line(1).unwrap().distributed, 0.0);
        assert_eq!(wf.confirm_quantity_dialog().unwrap_err(), WorkflowError::NoDialogTarget);
    }

    #[test]
    fn outside_dismissal_shows_dialog_again() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        wf.open_quantity_dialog(1).unwrap();

        // Host hides the popup on an outside tap, then reports it.
        wf.surface_mut().hide_dialog();
        wf.on_dialog_closed();

        assert!(wf.surface().dialog_visible);
        assert_eq!(wf.surface().count("show_dialog"), 2);
        assert_eq!(wf.dialog_state(), DialogState::Shown { target: 1 });
    }

    #[tokio::test]
    async fn commit_hands_workspace_to_callback() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        let log = record_completions(&mut wf);
        wf.select_line(1).unwrap();

        wf.commit().await.unwrap();

        assert_eq!(*log.borrow(), vec!["committed:10".to_string()]);
        assert!(!wf.order().is_dirty());
    }

    #[tokio::test]
    async fn failed_validation_does_not_call_back() {
        let mut wf = IssueMaterialWorkflow::new(
            IssueOrder::from_loaded(loaded_order(10.0, &[50.0])),
            RecordingSurface::new(),
            NumberLocale::en_us(),
            Arc::new(RejectAll),
        );
        let log = record_completions(&mut wf);

        let err = wf.commit().await.unwrap_err();

        assert!(err.is_validation());
        assert!(log.borrow().is_empty());
        assert!(!wf.is_closed());
    }

    #[tokio::test]
    async fn over_distribution_fails_commit_until_corrected() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        let log = record_completions(&mut wf);
        wf.select_line(1).unwrap();
        wf.set_to_issue(4.0).unwrap();

        assert!(wf.commit().await.is_err());
        assert!(log.borrow().is_empty());

        wf.select_line(1).unwrap();
        wf.select_line(1).unwrap();
        wf.commit().await.unwrap();
        assert_eq!(*log.borrow(), vec!["committed:4".to_string()]);
    }

    #[test]
    fn teardown_while_dirty_signals_cancel_exactly_once() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        let log = record_completions(&mut wf);

        wf.teardown();
        wf.teardown();

        assert_eq!(*log.borrow(), vec!["cancelled".to_string()]);
        assert!(wf.is_closed());
        assert_eq!(wf.select_line(1).unwrap_err(), WorkflowError::Closed);
    }

    #[test]
    fn teardown_of_clean_order_is_silent() {
        let mut data = loaded_order(10.0, &[50.0]);
        data.status = ModelStatus::ReadyClean;
        let mut wf = workflow(data);
        let log = record_completions(&mut wf);

        wf.on_teardown();
        assert!(log.borrow().is_empty());
    }

    #[tokio::test]
    async fn teardown_after_commit_does_not_cancel() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        let log = record_completions(&mut wf);

        wf.commit().await.unwrap();
        wf.teardown();

        assert_eq!(*log.borrow(), vec!["committed:10".to_string()]);
    }

    #[test]
    fn teardown_hides_an_open_dialog() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));
        wf.open_quantity_dialog(1).unwrap();

        wf.teardown();
        wf.on_dialog_closed();

        assert!(!wf.surface().dialog_visible);
        assert_eq!(wf.dialog_state(), DialogState::Hidden);
    }

    #[test]
    fn form_ready_focuses_amount_to_issue_once() {
        let mut wf = workflow(loaded_order(10.0, &[50.0]));

        wf.on_data_bound();
        wf.on_data_bound();

        assert_eq!(wf.surface().count("focus_primary"), 1);
        assert!(wf.surface().detail_visible);
        assert_eq!(wf.surface().count("refresh_menu"), 0);
    }

    #[test]
    fn form_ready_skips_focus_for_clean_orders() {
        let mut data = loaded_order(10.0, &[50.0]);
        data.status = ModelStatus::ReadyClean;
        let mut wf = workflow(data);

        wf.on_form_ready();
        assert_eq!(wf.surface().count("focus_primary"), 0);
    }

    #[test]
    fn form_ready_hides_detail_when_item_needs_none() {
        let mut wf = workflow(loaded_order(10.0, &[]));

        wf.on_form_ready();

        assert!(!wf.surface().detail_visible);
        assert_eq!(wf.surface().count("refresh_menu"), 1);
    }

    #[tokio::test]
    async fn open_loads_from_source() {
        let record = loaded_order(6.0, &[50.0]);
        let id = record.id;
        let source = InMemoryIssueOrderSource::new();
        source.insert(record);

        let wf = IssueMaterialWorkflow::open(
            &source,
            id,
            RecordingSurface::new(),
            NumberLocale::en_us(),
            Arc::new(DomainValidator),
        )
        .await
        .unwrap();

        assert_eq!(wf.order().to_issue(), 6.0);
        assert_eq!(wf.dialog_state(), DialogState::Hidden);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Selecting an undistributed line on a fresh order consumes the whole
        /// undistributed amount; selecting it again restores it.
        #[test]
        fn select_twice_restores_undistributed(
            to_issue in 0.01f64..500.0,
            line_count in 1usize..5,
            pick in 0usize..5,
        ) {
            let available = vec![1_000.0; line_count];
            let mut wf = workflow(loaded_order(to_issue, &available));
            let line_no = (pick % line_count) as u32 + 1;

            wf.select_line(line_no).unwrap();
            prop_assert!(wf.order().undistributed().abs() < 1e-9);

            wf.select_line(line_no).unwrap();
            prop_assert_eq!(wf.order().line(line_no).unwrap().distributed, 0.0);
            prop_assert!((wf.order().undistributed() - to_issue).abs() < 1e-9);
        }
    }
}
