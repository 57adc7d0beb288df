use crate::domain::{Item, Trip};
use serde::{Deserialize, Serialize};

/// Patch applied to the trip sub-state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TripAction {
    Set {
        trip: Trip,
    },
    UpdateName {
        new_name: String,
    },
    UpdateDescription {
        new_description: String,
    },
    /// Absent or empty values keep the current date
    UpdateDates {
        #[serde(default)]
        new_start_date: Option<String>,
        #[serde(default)]
        new_end_date: Option<String>,
    },
}

/// Patch applied to the packing-list sub-state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PackingListAction {
    Set {
        items: Vec<Item>,
    },
    Add {
        item: Item,
    },
    UpdateQuantity {
        item_name: String,
        new_quantity: u32,
    },
    UpdateNotes {
        item_name: String,
        new_notes: String,
    },
    Delete {
        item_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Action {
    Trip(TripAction),
    PackingList(PackingListAction),
}

impl From<TripAction> for Action {
    fn from(action: TripAction) -> Self {
        Self::Trip(action)
    }
}

impl From<PackingListAction> for Action {
    fn from(action: PackingListAction) -> Self {
        Self::PackingList(action)
    }
}
