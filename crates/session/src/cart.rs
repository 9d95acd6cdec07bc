//! The shopping cart: persisted line items and derived aggregates.

use serde::{Deserialize, Serialize};
use sipayi_core::{ItemId, Money};

use crate::error::SessionError;
use crate::notify::Notifier;
use crate::state::Session;
use crate::storage::{KeyValueStore, read_json_or_default, write_json};

/// One line in the cart.
///
/// The item name is the cart's merge key: at most one line exists per
/// distinct name, and re-adding a name bumps its quantity. A persisted
/// quantity is always at least 1; updates that would drop it to zero
/// remove the line instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Menu item name, unique within the cart.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Number of units, always >= 1 once persisted.
    pub quantity: u32,
    /// Creation-timestamp id of the line.
    pub id: ItemId,
}

impl CartItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// CRUD over the persisted cart.
///
/// Every mutator performs its whole read-modify-write cycle under the
/// session's store lock, then fires the UI notifications after the
/// lock is released.
pub struct CartStore<S, N> {
    session: Session<S, N>,
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    pub(crate) fn new(session: Session<S, N>) -> Self {
        Self { session }
    }

    fn key(&self) -> &str {
        &self.session.config().cart_key
    }

    /// The current cart contents.
    ///
    /// An absent key and a corrupt stored value both read as empty;
    /// corruption is logged by the storage layer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] only if the backing store
    /// itself fails.
    pub fn items(&self) -> Result<Vec<CartItem>, SessionError> {
        let store = self.session.store();
        Ok(read_json_or_default(&*store, self.key())?)
    }

    /// Add one unit of `name` at `price`.
    ///
    /// Merges into an existing line with the same name, or appends a
    /// fresh line with quantity 1. Afterwards the UI is told to show a
    /// toast and refresh the count badge.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the cart cannot be
    /// persisted.
    pub fn add(&self, name: &str, price: Money) -> Result<(), SessionError> {
        let count = {
            let mut store = self.session.store();
            let mut items: Vec<CartItem> = read_json_or_default(&*store, self.key())?;

            match items.iter_mut().find(|item| item.name == name) {
                Some(existing) => existing.quantity += 1,
                None => items.push(CartItem {
                    name: name.to_owned(),
                    price,
                    quantity: 1,
                    id: ItemId::now(),
                }),
            }

            write_json(&mut *store, self.key(), &items)?;
            items.iter().map(|item| item.quantity).sum::<u32>()
        };

        let notifier = self.session.notifier();
        notifier.refresh_count(count);
        notifier.notify(&format!("{name} added to cart!"));
        Ok(())
    }

    /// Remove the line at `index` (0-based, current cart order).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexOutOfRange`] if `index` does not
    /// name a line, or [`SessionError::Storage`] on persistence
    /// failure.
    pub fn remove(&self, index: usize) -> Result<(), SessionError> {
        let count = {
            let mut store = self.session.store();
            let mut items: Vec<CartItem> = read_json_or_default(&*store, self.key())?;

            if index >= items.len() {
                return Err(SessionError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            items.remove(index);

            write_json(&mut *store, self.key(), &items)?;
            items.iter().map(|item| item.quantity).sum::<u32>()
        };

        self.session.notifier().refresh_count(count);
        Ok(())
    }

    /// Add `delta` (signed) to the quantity of the line at `index`.
    ///
    /// A resulting quantity of zero or less removes the line entirely;
    /// it is never clamped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexOutOfRange`] if `index` does not
    /// name a line, or [`SessionError::Storage`] on persistence
    /// failure.
    pub fn update_quantity(&self, index: usize, delta: i32) -> Result<(), SessionError> {
        let count = {
            let mut store = self.session.store();
            let mut items: Vec<CartItem> = read_json_or_default(&*store, self.key())?;

            let Some(item) = items.get_mut(index) else {
                return Err(SessionError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            };

            let updated = i64::from(item.quantity) + i64::from(delta);
            if updated <= 0 {
                items.remove(index);
            } else {
                item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            }

            write_json(&mut *store, self.key(), &items)?;
            items.iter().map(|item| item.quantity).sum::<u32>()
        };

        self.session.notifier().refresh_count(count);
        Ok(())
    }

    /// Delete the persisted cart entirely.
    ///
    /// Readers treat a deleted key and an empty list identically, so
    /// this is observationally the same as persisting `[]`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the key cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        {
            let mut store = self.session.store();
            store.remove(self.key())?;
        }
        self.session.notifier().refresh_count(0);
        Ok(())
    }

    /// Sum of `price * quantity` over all lines; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the cart cannot be read.
    pub fn total(&self) -> Result<Money, SessionError> {
        Ok(self.items()?.iter().map(CartItem::line_total).sum())
    }

    /// Sum of quantities over all lines; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the cart cannot be read.
    pub fn item_count(&self) -> Result<u32, SessionError> {
        Ok(self.items()?.iter().map(|item| item.quantity).sum())
    }
}
