//! The in-memory store behind every mock endpoint.
//!
//! # Id assignment
//!
//! A new record's id is `len + 1` at the moment of insertion. After a delete
//! this can hand out an id that is still in use:
//!
//! ```rust
//! # use mock_api_core::{Store, UserFields, UserId};
//! let mut store = Store::seeded(); // users 1, 2, 3
//! store.users.remove(UserId::new(2));
//! let user = store.users.insert(UserFields::default());
//! assert_eq!(user.id, UserId::new(3)); // collides with the existing user 3
//! ```
//!
//! Clients of the fixture depend on this numbering, so it is kept as-is.
//! Lookups, updates and deletes always act on the first match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, User};

/// Errors raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Applying the increment would leave the `i64` range.
    #[error("counter overflow: {counter} + {increment}")]
    CounterOverflow { counter: i64, increment: i64 },
}

/// A record type that can live in a [`Collection`].
pub trait Record {
    /// Typed id of the record.
    type Id: Copy + PartialEq + From<i64>;
    /// Optional fields accepted on create and merge.
    type Fields;

    /// The record's id.
    fn id(&self) -> Self::Id;

    /// Build a new record, filling absent fields with defaults.
    fn create(id: Self::Id, fields: Self::Fields) -> Self;

    /// Overwrite the fields present in `fields`. Never touches the id.
    fn merge(&mut self, fields: Self::Fields);
}

/// An insertion-ordered list of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Record + Clone> Collection<T> {
    /// All records in insertion order.
    #[must_use]
    pub fn all(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next inserted record will get.
    #[must_use]
    pub fn next_id(&self) -> T::Id {
        let next = i64::try_from(self.items.len()).map_or(i64::MAX, |len| len.saturating_add(1));
        T::Id::from(next)
    }

    /// Create a record from `fields` and append it.
    pub fn insert(&mut self, fields: T::Fields) -> T {
        let record = T::create(self.next_id(), fields);
        self.items.push(record.clone());
        record
    }

    /// First record with the given id.
    #[must_use]
    pub fn find(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Merge `fields` into the first record with the given id.
    ///
    /// Returns the updated record, or `None` if no record matched.
    pub fn update(&mut self, id: T::Id, fields: T::Fields) -> Option<T> {
        let record = self.items.iter_mut().find(|item| item.id() == id)?;
        record.merge(fields);
        Some(record.clone())
    }

    /// Remove the first record with the given id.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

/// All mutable state of the mock server.
///
/// Serializes as `{"users": [...], "products": [...], "counter": n}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub users: Collection<User>,
    pub products: Collection<Product>,
    pub counter: i64,
}

impl Store {
    /// The store a fresh server starts with: three users, two products and a
    /// zero counter.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: Collection::from(vec![
                User::new(1, "张三", 25, "zhangsan@example.com"),
                User::new(2, "李四", 30, "lisi@example.com"),
                User::new(3, "王五", 28, "wangwu@example.com"),
            ]),
            products: Collection::from(vec![
                Product::new(1, "产品A", 99.99, 100),
                Product::new(2, "产品B", 199.99, 50),
            ]),
            counter: 0,
        }
    }

    /// Add `increment` to the counter and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CounterOverflow` if the sum does not fit in an
    /// `i64`. The counter is left unchanged in that case.
    pub fn increment_counter(&mut self, increment: i64) -> Result<i64, StoreError> {
        self.counter = self
            .counter
            .checked_add(increment)
            .ok_or(StoreError::CounterOverflow {
                counter: self.counter,
                increment,
            })?;
        Ok(self.counter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{ProductFields, ProductId, UserFields, UserId};

    #[test]
    fn test_seeded_store() {
        let store = Store::seeded();
        assert_eq!(store.users.len(), 3);
        assert_eq!(store.products.len(), 2);
        assert_eq!(store.counter, 0);
    }

    #[test]
    fn test_insert_assigns_len_plus_one_and_appends() {
        let mut store = Store::seeded();
        let user = store.users.insert(UserFields {
            name: Some("Zed".to_string()),
            age: Some(40),
            email: Some("z@x.com".to_string()),
        });

        assert_eq!(user, User::new(4, "Zed", 40, "z@x.com"));
        assert_eq!(store.users.all().last(), Some(&user));
    }

    #[test]
    fn test_insert_into_empty_collection_starts_at_one() {
        let mut products = Collection::<Product>::default();
        let product = products.insert(ProductFields::default());
        assert_eq!(product.id, ProductId::new(1));
    }

    #[test]
    fn test_id_reuse_after_delete() {
        let mut store = Store::seeded();
        let zed = store.users.insert(UserFields::default());
        assert_eq!(zed.id, UserId::new(4));

        store.users.remove(UserId::new(2));
        let next = store.users.insert(UserFields::default());

        // Length-based ids collide with the surviving user 4.
        assert_eq!(next.id, UserId::new(4));
        let fours = store
            .users
            .all()
            .iter()
            .filter(|u| u.id == UserId::new(4))
            .count();
        assert_eq!(fours, 2);
    }

    #[test]
    fn test_find_returns_first_match() {
        let mut store = Store::seeded();
        store.users.remove(UserId::new(1));
        store.users.insert(UserFields {
            name: Some("dup".to_string()),
            ..UserFields::default()
        });

        // Both the seed user 3 and the new record have id 3.
        let found = store.users.find(UserId::new(3)).unwrap();
        assert_eq!(found.name, "王五");
    }

    #[test]
    fn test_update_missing_returns_none() {
        let mut store = Store::seeded();
        assert!(
            store
                .users
                .update(UserId::new(42), UserFields::default())
                .is_none()
        );
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = Store::seeded();
        let removed = store.users.remove(UserId::new(2)).unwrap();
        assert_eq!(removed.name, "李四");

        let ids: Vec<i64> = store.users.all().iter().map(|u| u.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(store.users.remove(UserId::new(2)).is_none());
    }

    #[test]
    fn test_counter_increments_and_goes_negative() {
        let mut store = Store::default();
        assert_eq!(store.increment_counter(1), Ok(1));
        assert_eq!(store.increment_counter(5), Ok(6));
        assert_eq!(store.increment_counter(-10), Ok(-4));
    }

    #[test]
    fn test_counter_overflow_leaves_value_unchanged() {
        let mut store = Store {
            counter: i64::MAX,
            ..Store::default()
        };
        assert_eq!(
            store.increment_counter(1),
            Err(StoreError::CounterOverflow {
                counter: i64::MAX,
                increment: 1,
            })
        );
        assert_eq!(store.counter, i64::MAX);
    }

    #[test]
    fn test_store_serializes_three_keys() {
        let value = serde_json::to_value(Store::seeded()).unwrap();
        assert_eq!(value["users"][0]["name"], "张三");
        assert_eq!(value["products"][1]["price"], 199.99);
        assert_eq!(value["counter"], 0);
    }
}
