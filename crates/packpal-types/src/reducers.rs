//! Pure, total reducers for the two domain sub-states.
//!
//! Updates by name touch the first matching item; delete removes every match.
//! Unknown names leave the list as it was.

use crate::actions::{PackingListAction, TripAction};
use crate::domain::{Item, Trip};

pub fn reduce_trip(mut trip: Trip, action: &TripAction) -> Trip {
    match action {
        TripAction::Set { trip: replacement } => return replacement.clone(),
        TripAction::UpdateName { new_name } => trip.name = new_name.clone(),
        TripAction::UpdateDescription { new_description } => {
            trip.description = Some(new_description.clone());
        }
        TripAction::UpdateDates {
            new_start_date,
            new_end_date,
        } => {
            if let Some(start) = non_empty(new_start_date) {
                trip.start_date = start.to_string();
            }
            if let Some(end) = non_empty(new_end_date) {
                trip.end_date = end.to_string();
            }
        }
    }
    trip
}

pub fn reduce_packing_list(mut items: Vec<Item>, action: &PackingListAction) -> Vec<Item> {
    match action {
        PackingListAction::Set { items: replacement } => return replacement.clone(),
        PackingListAction::Add { item } => items.push(item.clone()),
        PackingListAction::UpdateQuantity {
            item_name,
            new_quantity,
        } => {
            if let Some(item) = items.iter_mut().find(|item| &item.name == item_name) {
                item.quantity = *new_quantity;
            }
        }
        PackingListAction::UpdateNotes {
            item_name,
            new_notes,
        } => {
            if let Some(item) = items.iter_mut().find(|item| &item.name == item_name) {
                item.notes = Some(new_notes.clone());
            }
        }
        PackingListAction::Delete { item_name } => items.retain(|item| &item.name != item_name),
    }
    items
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
