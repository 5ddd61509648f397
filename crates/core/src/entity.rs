//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Returns `true` when every entity in `items` carries a distinct identifier.
pub fn ids_are_unique<'a, E, I>(items: I) -> bool
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut seen = std::collections::HashSet::new();
    items.into_iter().all(|e| seen.insert(e.id().clone()))
}
