use crate::error::ToolError;
use crate::registry::{lenient_int, parse_args, present, PackingTool, ToolOutcome, ToolView};
use packpal_types::{Item, PackingListAction};
use serde::Deserialize;
use serde_json::{json, Value};

/// Positive quantity that fits the item model
fn positive_quantity(quantity: Option<i64>) -> Option<u32> {
    quantity
        .filter(|q| *q > 0)
        .and_then(|q| u32::try_from(q).ok())
}

pub struct AddItem;

#[derive(Deserialize)]
struct AddItemArgs {
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    quantity: Option<i64>,
    #[serde(default)]
    notes: Option<String>,
}

impl PackingTool for AddItem {
    fn name(&self) -> &'static str {
        "add_item_to_packing_list"
    }

    fn description(&self) -> &'static str {
        "Adds a new item to the packing list. Use this tool when the user's request requires \
         adding a specific item. You must provide the item's name and quantity; notes are \
         optional. Returns a message indicating the item was added."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item_name": {"type": "string", "description": "Name of the item"},
                "quantity": {"type": "integer", "minimum": 1, "description": "How many to pack"},
                "notes": {"type": "string", "description": "Optional helpful details"}
            },
            "required": ["item_name", "quantity"]
        })
    }

    fn run(&self, _view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: AddItemArgs = parse_args(self.name(), arguments)?;
        let name = present(args.item_name);
        let quantity = positive_quantity(args.quantity);

        let (name, quantity) = match (name, quantity) {
            (None, None) => {
                return Err(ToolError::rejected(
                    "Item was not added to the packing list because no item name or quantity was provided.",
                ))
            }
            (None, _) => {
                return Err(ToolError::rejected(
                    "Item was not added to the packing list because no item name was provided.",
                ))
            }
            (_, None) => {
                return Err(ToolError::rejected(
                    "Item was not added to the packing list because no quantity was provided.",
                ))
            }
            (Some(name), Some(quantity)) => (name, quantity),
        };

        let item = Item {
            id: None,
            name,
            quantity,
            notes: present(args.notes),
        };
        let message = format!("Item was added to the packing list: {}", item);

        Ok(ToolOutcome::new(PackingListAction::Add { item }, message))
    }
}

pub struct RemoveItem;

#[derive(Deserialize)]
struct RemoveItemArgs {
    #[serde(default)]
    item_name: Option<String>,
}

impl PackingTool for RemoveItem {
    fn name(&self) -> &'static str {
        "remove_item_from_packing_list"
    }

    fn description(&self) -> &'static str {
        "Removes an item from the packing list. Use this tool when the user's request requires \
         removing a specific item. You must provide the item's name."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item_name": {"type": "string", "description": "Exact name of the item to remove"}
            },
            "required": ["item_name"]
        })
    }

    fn run(&self, view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: RemoveItemArgs = parse_args(self.name(), arguments)?;

        let Some(item_name) = present(args.item_name) else {
            return Err(ToolError::rejected(
                "Item was not removed from the packing list because no item name was provided.",
            ));
        };
        if !view.contains_item(&item_name) {
            return Err(ToolError::rejected(
                "Item was not removed from the packing list because the item name was not found.",
            ));
        }

        let message = format!("Item was removed from the packing list: {}", item_name);
        Ok(ToolOutcome::new(PackingListAction::Delete { item_name }, message))
    }
}

pub struct UpdateItemQuantity;

#[derive(Deserialize)]
struct UpdateQuantityArgs {
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    new_quantity: Option<i64>,
}

impl PackingTool for UpdateItemQuantity {
    fn name(&self) -> &'static str {
        "update_item_quantity"
    }

    fn description(&self) -> &'static str {
        "Updates the quantity of an item in the packing list. You must provide the item's name \
         and the new quantity, which must be a positive number."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item_name": {"type": "string", "description": "Exact name of the item"},
                "new_quantity": {"type": "integer", "minimum": 1}
            },
            "required": ["item_name", "new_quantity"]
        })
    }

    fn run(&self, view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: UpdateQuantityArgs = parse_args(self.name(), arguments)?;
        let name = present(args.item_name);

        if name.is_none() && args.new_quantity.unwrap_or(0) == 0 {
            return Err(ToolError::rejected(
                "Item quantity was not updated because no item name or quantity was provided.",
            ));
        }
        let Some(item_name) = name else {
            return Err(ToolError::rejected(
                "Item quantity was not updated because no item name was provided.",
            ));
        };
        let Some(new_quantity) = positive_quantity(args.new_quantity) else {
            return Err(ToolError::rejected(
                "Item quantity was not updated because no quantity was provided or the quantity was not a positive number.",
            ));
        };
        if !view.contains_item(&item_name) {
            return Err(ToolError::rejected(
                "Item quantity was not updated because the item name was not found.",
            ));
        }

        let message = format!("Item quantity was updated: {} - {}", item_name, new_quantity);
        Ok(ToolOutcome::new(
            PackingListAction::UpdateQuantity {
                item_name,
                new_quantity,
            },
            message,
        ))
    }
}

pub struct UpdateItemNotes;

#[derive(Deserialize)]
struct UpdateNotesArgs {
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    new_notes: Option<String>,
}

impl PackingTool for UpdateItemNotes {
    fn name(&self) -> &'static str {
        "update_item_notes"
    }

    fn description(&self) -> &'static str {
        "Updates the notes of an item in the packing list. You must provide the item's name \
         and the new notes."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item_name": {"type": "string", "description": "Exact name of the item"},
                "new_notes": {"type": "string"}
            },
            "required": ["item_name", "new_notes"]
        })
    }

    fn run(&self, view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: UpdateNotesArgs = parse_args(self.name(), arguments)?;

        let (item_name, new_notes) = match (present(args.item_name), present(args.new_notes)) {
            (None, None) => {
                return Err(ToolError::rejected(
                    "Item notes were not updated because no item name or notes were provided.",
                ))
            }
            (None, _) => {
                return Err(ToolError::rejected(
                    "Item notes were not updated because no item name was provided.",
                ))
            }
            (_, None) => {
                return Err(ToolError::rejected(
                    "Item notes were not updated because no notes were provided.",
                ))
            }
            (Some(name), Some(notes)) => (name, notes),
        };
        if !view.contains_item(&item_name) {
            return Err(ToolError::rejected(
                "Item notes were not updated because the item name was not found.",
            ));
        }

        let message = format!("Item notes were updated: {} - {}", item_name, new_notes);
        Ok(ToolOutcome::new(
            PackingListAction::UpdateNotes {
                item_name,
                new_notes,
            },
            message,
        ))
    }
}
