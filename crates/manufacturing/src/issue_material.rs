use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use millwright_core::{
    Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult, Entity, QTY_EPSILON,
    WorkOrderId, qty_le,
};
use millwright_events::Event;

use crate::status::ModelStatus;

/// Issue order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueOrderId(pub AggregateId);

impl IssueOrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for IssueOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One allocation of the quantity to issue against a stock location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    pub line_no: u32,
    /// Parent order (lookup only).
    pub order_id: IssueOrderId,
    pub location: String,
    /// Quantity on hand at `location`.
    pub available: f64,
    pub distributed: f64,
}

impl Entity for DetailLine {
    type Id = u32;

    fn id(&self) -> &Self::Id {
        &self.line_no
    }
}

impl DetailLine {
    pub fn is_distributed(&self) -> bool {
        self.distributed > 0.0
    }

    /// Check `distributed` as a candidate value for this line.
    pub fn check_distributed(&self, distributed: f64) -> DomainResult<()> {
        if !distributed.is_finite() {
            return Err(DomainError::validation("distributed quantity must be a number"));
        }
        if distributed < 0.0 {
            return Err(DomainError::validation(
                "distributed quantity cannot be negative",
            ));
        }
        if !qty_le(distributed, self.available) {
            return Err(DomainError::validation(format!(
                "cannot distribute {distributed} from {}: only {} available",
                self.location, self.available
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.check_distributed(self.distributed)
    }
}

/// Record shape handed over by the order-fulfillment source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedIssueOrder {
    pub id: IssueOrderId,
    pub work_order_id: WorkOrderId,
    pub work_order_number: String,
    pub item: String,
    pub site: String,
    pub unit: String,
    pub qty_required: f64,
    pub qty_issued: f64,
    pub to_issue: f64,
    pub requires_detail: bool,
    pub lines: Vec<LoadedDetailLine>,
    pub status: ModelStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedDetailLine {
    pub location: String,
    pub available: f64,
    #[serde(default)]
    pub distributed: f64,
}

/// Aggregate root: a request to issue material against a work order.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueOrder {
    id: IssueOrderId,
    work_order_id: WorkOrderId,
    work_order_number: String,
    item: String,
    site: String,
    unit: String,
    qty_required: f64,
    qty_issued: f64,
    to_issue: f64,
    requires_detail: bool,
    lines: Vec<DetailLine>,
    status: ModelStatus,
    version: u64,
}

impl IssueOrder {
    /// Build the in-memory aggregate from a loaded record. Lines are numbered from 1.
    pub fn from_loaded(data: LoadedIssueOrder) -> Self {
        let id = data.id;
        let lines = data
            .lines
            .into_iter()
            .zip(1u32..)
            .map(|(line, line_no)| DetailLine {
                line_no,
                order_id: id,
                location: line.location,
                available: line.available,
                distributed: line.distributed,
            })
            .collect();

        Self {
            id,
            work_order_id: data.work_order_id,
            work_order_number: data.work_order_number,
            item: data.item,
            site: data.site,
            unit: data.unit,
            qty_required: data.qty_required,
            qty_issued: data.qty_issued,
            to_issue: data.to_issue,
            requires_detail: data.requires_detail,
            lines,
            status: data.status,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> IssueOrderId {
        self.id
    }

    pub fn work_order_id(&self) -> WorkOrderId {
        self.work_order_id
    }

    pub fn work_order_number(&self) -> &str {
        &self.work_order_number
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn qty_required(&self) -> f64 {
        self.qty_required
    }

    pub fn qty_issued(&self) -> f64 {
        self.qty_issued
    }

    /// Outstanding quantity the user intends to issue now.
    pub fn to_issue(&self) -> f64 {
        self.to_issue
    }

    pub fn requires_detail(&self) -> bool {
        self.requires_detail
    }

    pub fn lines(&self) -> &[DetailLine] {
        &self.lines
    }

    pub fn line(&self, line_no: u32) -> Option<&DetailLine> {
        self.lines.iter().find(|l| l.line_no == line_no)
    }

    pub fn status(&self) -> ModelStatus {
        self.status
    }

    pub fn is_dirty(&self) -> bool {
        self.status.is_dirty()
    }

    pub fn distributed_total(&self) -> f64 {
        self.lines.iter().map(|l| l.distributed).sum()
    }

    /// `to_issue` minus everything already distributed across lines.
    pub fn undistributed(&self) -> f64 {
        self.to_issue - self.distributed_total()
    }

    /// Whole-order validation run at commit.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.to_issue.is_finite() || self.to_issue <= 0.0 {
            return Err(DomainError::validation(
                "quantity to issue must be greater than zero",
            ));
        }
        for line in &self.lines {
            line.validate()?;
        }
        let total = self.distributed_total();
        if !qty_le(total, self.to_issue) {
            return Err(DomainError::invariant(format!(
                "distributed quantity {total} exceeds quantity to issue {}",
                self.to_issue
            )));
        }
        Ok(())
    }

    /// Called once the order has been handed off; pending changes are no longer pending.
    pub fn mark_committed(&mut self) {
        self.status = ModelStatus::ReadyClean;
    }
}

impl AggregateRoot for IssueOrder {
    type Id = IssueOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SetToIssue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetToIssue {
    pub order_id: IssueOrderId,
    pub quantity: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DistributeLine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributeLine {
    pub order_id: IssueOrderId,
    pub line_no: u32,
    pub quantity: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AllocateRemaining.
///
/// Adds everything still undistributed on the order to the line. Stock at the
/// location is not checked here; `validate()` catches it at commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocateRemaining {
    pub order_id: IssueOrderId,
    pub line_no: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearLine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearLine {
    pub order_id: IssueOrderId,
    pub line_no: u32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IssueMaterialCommand {
    SetToIssue(SetToIssue),
    DistributeLine(DistributeLine),
    AllocateRemaining(AllocateRemaining),
    ClearLine(ClearLine),
}

/// Event: ToIssueChanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToIssueChanged {
    pub order_id: IssueOrderId,
    pub quantity: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineDistributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDistributed {
    pub order_id: IssueOrderId,
    pub line_no: u32,
    pub quantity: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineCleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineCleared {
    pub order_id: IssueOrderId,
    pub line_no: u32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IssueMaterialEvent {
    ToIssueChanged(ToIssueChanged),
    LineDistributed(LineDistributed),
    LineCleared(LineCleared),
}

impl IssueMaterialEvent {
    /// Detail line touched by this event, if any.
    pub fn line_no(&self) -> Option<u32> {
        match self {
            IssueMaterialEvent::ToIssueChanged(_) => None,
            IssueMaterialEvent::LineDistributed(e) => Some(e.line_no),
            IssueMaterialEvent::LineCleared(e) => Some(e.line_no),
        }
    }
}

impl Event for IssueMaterialEvent {
    fn event_type(&self) -> &'static str {
        match self {
            IssueMaterialEvent::ToIssueChanged(_) => "manufacturing.issue_material.to_issue_changed",
            IssueMaterialEvent::LineDistributed(_) => {
                "manufacturing.issue_material.line_distributed"
            }
            IssueMaterialEvent::LineCleared(_) => "manufacturing.issue_material.line_cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            IssueMaterialEvent::ToIssueChanged(e) => e.occurred_at,
            IssueMaterialEvent::LineDistributed(e) => e.occurred_at,
            IssueMaterialEvent::LineCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for IssueOrder {
    type Command = IssueMaterialCommand;
    type Event = IssueMaterialEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            IssueMaterialEvent::ToIssueChanged(e) => {
                self.to_issue = e.quantity;
            }
            IssueMaterialEvent::LineDistributed(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.line_no == e.line_no) {
                    line.distributed = e.quantity;
                }
            }
            IssueMaterialEvent::LineCleared(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.line_no == e.line_no) {
                    line.distributed = 0.0;
                }
            }
        }

        self.status = ModelStatus::ReadyDirty;
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            IssueMaterialCommand::SetToIssue(cmd) => self.handle_set_to_issue(cmd),
            IssueMaterialCommand::DistributeLine(cmd) => self.handle_distribute(cmd),
            IssueMaterialCommand::AllocateRemaining(cmd) => self.handle_allocate_remaining(cmd),
            IssueMaterialCommand::ClearLine(cmd) => self.handle_clear(cmd),
        }
    }
}

impl IssueOrder {
    fn ensure_order_id(&self, order_id: IssueOrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn existing_line(&self, line_no: u32) -> Result<&DetailLine, DomainError> {
        self.line(line_no).ok_or_else(DomainError::not_found)
    }

    fn handle_set_to_issue(&self, cmd: &SetToIssue) -> Result<Vec<IssueMaterialEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;
        if !cmd.quantity.is_finite() {
            return Err(DomainError::validation("quantity to issue must be a number"));
        }
        if cmd.quantity < 0.0 {
            return Err(DomainError::validation(
                "quantity to issue cannot be negative",
            ));
        }

        Ok(vec![IssueMaterialEvent::ToIssueChanged(ToIssueChanged {
            order_id: cmd.order_id,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_distribute(&self, cmd: &DistributeLine) -> Result<Vec<IssueMaterialEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;
        let line = self.existing_line(cmd.line_no)?;
        line.check_distributed(cmd.quantity)?;

        Ok(vec![IssueMaterialEvent::LineDistributed(LineDistributed {
            order_id: cmd.order_id,
            line_no: cmd.line_no,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_allocate_remaining(
        &self,
        cmd: &AllocateRemaining,
    ) -> Result<Vec<IssueMaterialEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;
        let line = self.existing_line(cmd.line_no)?;

        let remaining = self.undistributed();
        if remaining <= QTY_EPSILON {
            return Ok(Vec::new());
        }
        Ok(vec![IssueMaterialEvent::LineDistributed(LineDistributed {
            order_id: cmd.order_id,
            line_no: cmd.line_no,
            quantity: line.distributed + remaining,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearLine) -> Result<Vec<IssueMaterialEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;
        self.existing_line(cmd.line_no)?;

        Ok(vec![IssueMaterialEvent::LineCleared(LineCleared {
            order_id: cmd.order_id,
            line_no: cmd.line_no,
            occurred_at: cmd.occurred_at,
        })])
    }
}
