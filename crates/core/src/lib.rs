//! `millwright-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no UI, no async).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AggregateId, WorkOrderId};
pub use quantity::{NumberLocale, QTY_EPSILON, QTY_SCALE, qty_le};
pub use value_object::ValueObject;
