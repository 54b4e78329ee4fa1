//! Wire format for bill snapshots.
//!
//! These payloads mirror the JSON the app exports and imports: camelCase
//! keys, prices and percentages as plain numbers in major units, RFC3339
//! dates. Conversion into [`engine::Bill`] is the single entry point for
//! untrusted data: missing fields, corrupt numbers and sharing references to
//! participants that do not exist all surface here as a typed
//! [`ImportError`] instead of a half-validated structure.

use chrono::{DateTime, Utc};
use engine::{Bill, EngineError, MenuItem, Money, Participant, Percent};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Why a payload was rejected.
///
/// A rejected import must leave the caller's current bill untouched; these
/// errors carry enough context to tell the user what to fix.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Malformed JSON, or a payload missing `items`/`participants`.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid price for item \"{item}\"")]
    InvalidPrice { item: String },
    #[error(transparent)]
    Domain(#[from] EngineError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPayload {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPayload {
    pub id: String,
    pub name: String,
    /// Price per unit in major units (e.g. `12.5`).
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub shared_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A full bill snapshot as it travels through files and clipboards.
///
/// `items` and `participants` are the two fields an acceptable payload must
/// carry; everything else has a sensible default so older exports (which
/// predate the surcharge settings) still restore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub items: Vec<MenuItemPayload>,
    pub participants: Vec<ParticipantPayload>,
    #[serde(default)]
    pub service_charge: f64,
    #[serde(default)]
    pub tax: f64,
}

impl BillPayload {
    pub fn from_json(data: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_bill(bill: &Bill) -> Self {
        Self {
            id: Some(bill.id.clone()),
            restaurant_name: None,
            date: Some(bill.date),
            items: bill
                .items
                .iter()
                .map(|item| MenuItemPayload {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    price: item.price.to_major(),
                    quantity: item.quantity,
                    shared_by: item.shared_by.clone(),
                    notes: item.notes.clone(),
                })
                .collect(),
            participants: bill
                .participants
                .iter()
                .map(|p| ParticipantPayload {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    color: p.color.clone(),
                })
                .collect(),
            service_charge: bill.service_charge.as_f64(),
            tax: bill.tax.as_f64(),
        }
    }

    /// Validates the payload and builds a [`Bill`] out of it.
    ///
    /// Missing `id`/`date` get fresh defaults. Negative percentages are
    /// clamped to zero (the caller-side coercion the inputs always applied);
    /// a negative or non-finite price is a hard reject, as is any sharing
    /// reference to a participant the payload does not carry.
    pub fn try_into_bill(self) -> Result<Bill, ImportError> {
        let participants: Vec<Participant> = self
            .participants
            .into_iter()
            .map(|p| Participant {
                id: p.id,
                name: p.name.trim().to_string(),
                color: p.color,
            })
            .collect();

        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            let price = Money::try_from_major(item.price).map_err(|_| {
                ImportError::InvalidPrice {
                    item: item.name.clone(),
                }
            })?;
            items.push(MenuItem {
                id: item.id,
                name: item.name.trim().to_string(),
                price,
                quantity: item.quantity,
                shared_by: item.shared_by,
                notes: item.notes,
            });
        }

        let service_charge = Percent::try_from_f64(self.service_charge.max(0.0))?;
        let tax = Percent::try_from_f64(self.tax.max(0.0))?;

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let date = self.date.unwrap_or_else(Utc::now);

        Ok(Bill::from_parts(
            id,
            date,
            participants,
            items,
            service_charge,
            tax,
        )?)
    }
}

impl From<&Bill> for BillPayload {
    fn from(bill: &Bill) -> Self {
        Self::from_bill(bill)
    }
}
