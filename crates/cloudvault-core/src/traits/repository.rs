//! Generic repository trait for the in-memory record stores.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;

use crate::result::AppResult;

/// A record that can live in a repository.
pub trait Record: Clone + Send + Sync + 'static {
    /// The typed identifier of the record.
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Return the record's identifier.
    fn id(&self) -> Self::Id;
}

/// Predicate used by the filtering repository methods.
pub type Predicate<'a, Entity> = &'a (dyn Fn(&Entity) -> bool + Send + Sync);

/// In-place mutation applied by [`Repository::modify`].
pub type Mutation<Entity> = Box<dyn FnOnce(&mut Entity) + Send>;

/// Mutation over the whole collection, applied by [`Repository::modify_all`].
///
/// Returning an error leaves the store untouched.
pub type BulkMutation<Entity, T> = Box<dyn FnOnce(&mut Vec<Entity>) -> AppResult<T> + Send>;

/// Generic CRUD repository trait.
///
/// Every read hands back owned copies; callers never observe a reference
/// into the store. Entity-specific queries live on the services.
#[async_trait]
pub trait Repository<Entity>: Send + Sync + 'static
where
    Entity: Record,
{
    /// All entities in insertion order.
    async fn list(&self) -> Vec<Entity>;

    /// Find an entity by its identifier.
    async fn find_by_id(&self, id: &Entity::Id) -> Option<Entity>;

    /// Entities matching `predicate`, in insertion order.
    async fn find_where(&self, predicate: Predicate<'_, Entity>) -> Vec<Entity>;

    /// Append a new entity. Fails with a conflict if the id is taken.
    async fn insert(&self, entity: Entity) -> AppResult<Entity>;

    /// Apply `mutate` to the stored entity and return the updated copy.
    ///
    /// The read-modify-write happens under one write lock.
    async fn modify(&self, id: &Entity::Id, mutate: Mutation<Entity>) -> Option<Entity>;

    /// Run `mutate` over every entity, in insertion order, under one write
    /// lock. Entities may be edited or dropped; survivors keep their
    /// position and anything appended goes to the end.
    async fn modify_all<T>(&self, mutate: BulkMutation<Entity, T>) -> AppResult<T>
    where
        T: Send + 'static;

    /// Remove an entity by its identifier.
    async fn remove(&self, id: &Entity::Id) -> Option<Entity>;

    /// Remove every entity matching `predicate` and return them.
    async fn remove_where(&self, predicate: Predicate<'_, Entity>) -> Vec<Entity>;

    /// Count stored entities.
    async fn count(&self) -> usize;

    /// Drop all changes and restore the seed the store was built with.
    async fn reset(&self);
}
