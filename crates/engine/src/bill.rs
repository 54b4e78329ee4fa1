//! The bill aggregate.
//!
//! A `Bill` owns the participant roster, the ordered menu items and the two
//! surcharge percentages. All mutation goes through its methods, which keep
//! one invariant: every id in any item's sharing set references a participant
//! that is still on the roster. The computations at the bottom are pure reads
//! over the current snapshot.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    EngineError, MenuItem, Money, Participant, Percent, ResultEngine, totals::Totals,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bill {
    pub id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<MenuItem>,
    pub participants: Vec<Participant>,
    pub service_charge: Percent,
    pub tax: Percent,
}

impl Bill {
    /// Creates an empty bill dated now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            items: Vec::new(),
            participants: Vec::new(),
            service_charge: Percent::ZERO,
            tax: Percent::ZERO,
        }
    }

    /// Rebuilds a bill from already-materialized parts (a restored session or
    /// an imported payload), enforcing every roster invariant:
    ///
    /// - participant and item ids are non-blank and unique
    /// - names are non-blank, prices non-negative, quantities >= 1
    /// - no sharing set lists a participant twice or references an id that is
    ///   not on the roster
    pub fn from_parts(
        id: String,
        date: DateTime<Utc>,
        participants: Vec<Participant>,
        items: Vec<MenuItem>,
        service_charge: Percent,
        tax: Percent,
    ) -> ResultEngine<Self> {
        for (i, participant) in participants.iter().enumerate() {
            if participant.id.trim().is_empty() {
                return Err(EngineError::InvalidName(
                    "participant id must not be blank".to_string(),
                ));
            }
            if participant.name.trim().is_empty() {
                return Err(EngineError::InvalidName(
                    "participant name must not be empty".to_string(),
                ));
            }
            if participants[..i].iter().any(|p| p.id == participant.id) {
                return Err(EngineError::ExistingKey(participant.id.clone()));
            }
        }

        for (i, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(EngineError::InvalidName(
                    "item id must not be blank".to_string(),
                ));
            }
            if item.name.trim().is_empty() {
                return Err(EngineError::InvalidName(
                    "item name must not be empty".to_string(),
                ));
            }
            if item.price.is_negative() {
                return Err(EngineError::InvalidAmount(format!(
                    "price of \"{}\" must be >= 0",
                    item.name
                )));
            }
            if item.quantity == 0 {
                return Err(EngineError::InvalidAmount(format!(
                    "quantity of \"{}\" must be >= 1",
                    item.name
                )));
            }
            if items[..i].iter().any(|other| other.id == item.id) {
                return Err(EngineError::ExistingKey(item.id.clone()));
            }
            MenuItem::ensure_unique_shares(&item.shared_by)?;
            for participant_id in &item.shared_by {
                if !participants.iter().any(|p| &p.id == participant_id) {
                    return Err(EngineError::InvalidShare(format!(
                        "item \"{}\" is shared by unknown participant {participant_id}",
                        item.name
                    )));
                }
            }
        }

        Ok(Self {
            id,
            date,
            items,
            participants,
            service_charge,
            tax,
        })
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Adds a participant and returns the generated id.
    ///
    /// Display names must be unique so the CLI can address people by name.
    pub fn add_participant(&mut self, name: &str, color: Option<String>) -> ResultEngine<String> {
        let participant = Participant::new(name, color)?;
        if self.participant_by_name(&participant.name).is_some() {
            return Err(EngineError::ExistingKey(participant.name));
        }
        let id = participant.id.clone();
        self.participants.push(participant);
        Ok(id)
    }

    /// Removes a participant and scrubs their id from every item's sharing
    /// set, so no dangling reference survives.
    pub fn remove_participant(&mut self, participant_id: &str) -> ResultEngine<()> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or_else(|| EngineError::KeyNotFound(participant_id.to_string()))?;
        self.participants.remove(index);
        for item in &mut self.items {
            item.shared_by.retain(|id| id != participant_id);
        }
        Ok(())
    }

    /// Adds a menu item and returns the generated id.
    ///
    /// With `shared_by: None` the item starts shared by everybody currently
    /// on the roster; an explicit list must reference known participants.
    pub fn add_item(
        &mut self,
        name: &str,
        price: Money,
        quantity: u32,
        shared_by: Option<Vec<String>>,
    ) -> ResultEngine<String> {
        let shared_by = match shared_by {
            Some(ids) => {
                for id in &ids {
                    if self.participant(id).is_none() {
                        return Err(EngineError::KeyNotFound(id.clone()));
                    }
                }
                ids
            }
            None => self.participants.iter().map(|p| p.id.clone()).collect(),
        };
        let item = MenuItem::new(name, price, quantity, shared_by)?;
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    pub fn remove_item(&mut self, item_id: &str) -> ResultEngine<()> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| EngineError::KeyNotFound(item_id.to_string()))?;
        self.items.remove(index);
        Ok(())
    }

    /// Flips a participant's membership in an item's sharing set and returns
    /// the new membership state.
    pub fn toggle_share(&mut self, item_id: &str, participant_id: &str) -> ResultEngine<bool> {
        if self.participant(participant_id).is_none() {
            return Err(EngineError::KeyNotFound(participant_id.to_string()));
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| EngineError::KeyNotFound(item_id.to_string()))?;

        if let Some(index) = item.shared_by.iter().position(|id| id == participant_id) {
            item.shared_by.remove(index);
            Ok(false)
        } else {
            item.shared_by.push(participant_id.to_string());
            Ok(true)
        }
    }

    pub fn set_service_charge(&mut self, service_charge: Percent) {
        self.service_charge = service_charge;
    }

    pub fn set_tax(&mut self, tax: Percent) {
        self.tax = tax;
    }

    /// Sum of `price * quantity` over every item.
    ///
    /// Items nobody shares still count here: the kitchen bills them whether
    /// or not anyone claimed them, so they inflate the bill total while
    /// contributing to nobody's personal total.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::ZERO, |acc, item| acc + item.total())
    }

    /// Sum of one participant's item shares.
    #[must_use]
    pub fn participant_subtotal(&self, participant_id: &str) -> Money {
        self.items
            .iter()
            .fold(Money::ZERO, |acc, item| acc + item.share_of(participant_id))
    }

    /// Bill-level figures: subtotal, both surcharge amounts, grand total.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::compute(self.subtotal(), self.service_charge, self.tax)
    }

    /// One participant's figures, produced by running the same sequential
    /// surcharge pass over that participant's own subtotal.
    #[must_use]
    pub fn participant_totals(&self, participant_id: &str) -> Totals {
        Totals::compute(
            self.participant_subtotal(participant_id),
            self.service_charge,
            self.tax,
        )
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::new()
    }
}
