//! Manufacturing module: issue material, post production and module settings.
//!
//! Workspaces here are controllers. They own the record being edited, talk to
//! the hosting UI through the capability traits in [`surface`], and report the
//! outcome through a [`Completion`] callback.

pub mod completion;
pub mod error;
pub mod issue_material;
pub mod post_production;
pub mod settings;
pub mod source;
pub mod status;
pub mod surface;
pub mod workflow;

pub use completion::{Completion, CompletionCallback};
pub use error::{WorkflowError, WorkflowResult};
pub use issue_material::{
    AllocateRemaining, ClearLine, DetailLine, DistributeLine, IssueMaterialCommand,
    IssueMaterialEvent, IssueOrder, IssueOrderId, LoadedDetailLine, LoadedIssueOrder, SetToIssue,
};
pub use post_production::{
    InMemoryStickyOptions, PostOption, PostProduction, PostProductionWorkflow, StickyOptionStore,
};
pub use settings::ManufacturingSettings;
pub use source::{DomainValidator, InMemoryIssueOrderSource, IssueOrderSource, OrderValidator};
pub use status::ModelStatus;
pub use surface::{
    DetailListSurface, HostMenu, IssueMaterialSurface, PrimaryQuantityField,
    QuantityDialogSurface, WorkspaceLifecycle,
};
pub use workflow::{DialogState, IssueMaterialWorkflow};
