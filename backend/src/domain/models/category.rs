//! Domain model for a transaction category.

use serde::{Deserialize, Serialize};
use shared::TransactionKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// ID of the user who owns this category
    pub user_id: String,
    pub name: String,
    /// Categories are either income or expense; a transaction booked
    /// against a category must match its kind.
    pub kind: TransactionKind,
}

impl Category {
    pub fn to_dto(&self) -> shared::Category {
        shared::Category {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}
