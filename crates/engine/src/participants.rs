//! People splitting the bill.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Somebody taking part in the bill.
///
/// The `color` is a cosmetic display tag assigned by the caller (the CLI
/// cycles through a fixed palette); it never enters any computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

impl Participant {
    /// Creates a participant with a fresh id. The name is trimmed and must
    /// not be empty.
    pub fn new(name: &str, color: Option<String>) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName(
                "participant name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color,
        })
    }
}
