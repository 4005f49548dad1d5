//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities owned by an aggregate (order lines, detail rows) are identified
/// within their parent; `Id` only needs to be unique there.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
