//! Session persistence: one JSON file holding the current bill.
//!
//! The store is created at the composition root with an explicit path and
//! handed to the command handlers; nothing reaches for it as ambient state.
//! The file carries the same payload the import/export commands speak, so a
//! session survives being copied around or hand-edited. A corrupt edit is
//! rejected on load with the import validator's error instead of being
//! half-trusted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use api_types::BillPayload;
use engine::Bill;

use crate::error::Result;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restores the stored bill, or starts an empty one when no session file
    /// exists yet. Surcharge fields absent from an old payload restore as 0.
    pub fn load(&self) -> Result<Bill> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored session, starting fresh");
                return Ok(Bill::new());
            }
            Err(err) => return Err(err.into()),
        };
        let bill = BillPayload::from_json(&content)?.try_into_bill()?;
        tracing::debug!(path = %self.path.display(), "session restored");
        Ok(bill)
    }

    pub fn save(&self, bill: &Bill) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = BillPayload::from_bill(bill).to_json_pretty()?;
        fs::write(&self.path, payload)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use engine::Money;

    use super::*;

    fn temp_store() -> SessionStore {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_sessions");
        SessionStore::new(root.join(format!("session_{}.json", uuid::Uuid::new_v4())))
    }

    #[test]
    fn missing_file_loads_empty_bill() {
        let store = temp_store();
        let bill = store.load().unwrap();
        assert!(bill.participants.is_empty());
        assert!(bill.items.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store();

        let mut bill = Bill::new();
        bill.add_participant("Alice", Some("blue".to_string())).unwrap();
        bill.add_item("Pad Thai", Money::new(12_50), 2, None).unwrap();
        bill.set_service_charge("10".parse().unwrap());
        store.save(&bill).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(restored, bill);
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{\"items\": []").unwrap();
        assert!(store.load().is_err());
    }
}
