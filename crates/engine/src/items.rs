//! Menu items and their per-person shares.

use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// A line on the bill: a priced menu entry and the set of participants who
/// split its cost evenly.
///
/// `shared_by` holds participant ids. The order is irrelevant to the
/// arithmetic and duplicates are forbidden; membership is maintained through
/// [`Bill`](crate::Bill), which also keeps the ids pointing at participants
/// that still exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Price per unit, in cents.
    pub price: Money,
    pub quantity: u32,
    pub shared_by: Vec<String>,
    pub notes: Option<String>,
}

impl MenuItem {
    /// Creates an item with a fresh id.
    ///
    /// The name is trimmed and must not be empty; the price must not be
    /// negative and the quantity must be at least 1. `shared_by` must not
    /// contain the same participant twice.
    pub fn new(
        name: &str,
        price: Money,
        quantity: u32,
        shared_by: Vec<String>,
    ) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName(
                "item name must not be empty".to_string(),
            ));
        }
        if price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "price must be >= 0".to_string(),
            ));
        }
        if quantity == 0 {
            return Err(EngineError::InvalidAmount(
                "quantity must be >= 1".to_string(),
            ));
        }
        Self::ensure_unique_shares(&shared_by)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
            quantity,
            shared_by,
            notes: None,
        })
    }

    pub(crate) fn ensure_unique_shares(shared_by: &[String]) -> ResultEngine<()> {
        for (i, id) in shared_by.iter().enumerate() {
            if shared_by[..i].contains(id) {
                return Err(EngineError::InvalidShare(format!(
                    "participant {id} listed twice"
                )));
            }
        }
        Ok(())
    }

    /// Full cost of the line: price times quantity.
    #[must_use]
    pub fn total(&self) -> Money {
        self.price.times(self.quantity)
    }

    #[must_use]
    pub fn is_shared_by(&self, participant_id: &str) -> bool {
        self.shared_by.iter().any(|id| id == participant_id)
    }

    /// The participant's even share of this line, rounded to the cent.
    ///
    /// Zero when the participant does not take part, and zero when nobody
    /// does: an unclaimed item has no per-person share.
    #[must_use]
    pub fn share_of(&self, participant_id: &str) -> Money {
        if !self.is_shared_by(participant_id) {
            return Money::ZERO;
        }
        self.total().split(self.shared_by.len())
    }
}
