use packpal_llm::ToolCall;
use packpal_tools::{ToolRegistry, ToolView};
use packpal_types::{Action, Item, PackingListAction, Trip, TripAction};
use serde_json::{json, Value};

fn view() -> ToolView {
    ToolView::new(
        Trip::new("Hawaiian Getaway")
            .with_id(1)
            .with_dates("2025-08-10", "2025-08-17"),
        vec![Item::new("T-Shirt", 7), Item::new("Socks", 7)],
    )
}

fn call(name: &str, args: Value) -> ToolCall {
    ToolCall::new(format!("call_{}", name), name, args)
}

fn run(name: &str, args: Value) -> packpal_tools::ToolResult {
    ToolRegistry::packpal().execute(&call(name, args), &view())
}

#[test]
fn test_add_item_success() {
    let result = run(
        "add_item_to_packing_list",
        json!({"item_name": "Sunscreen", "quantity": 1, "notes": "Reef-safe"}),
    );

    assert!(!result.is_error);
    assert_eq!(
        result.action,
        Some(Action::PackingList(PackingListAction::Add {
            item: Item::new("Sunscreen", 1).with_notes("Reef-safe"),
        }))
    );
    assert!(result.content.starts_with("Item was added to the packing list: Sunscreen"));
}

#[test]
fn test_add_item_missing_fields() {
    let both = run("add_item_to_packing_list", json!({}));
    assert_eq!(
        both.content,
        "Item was not added to the packing list because no item name or quantity was provided."
    );

    let name = run("add_item_to_packing_list", json!({"quantity": 2}));
    assert_eq!(
        name.content,
        "Item was not added to the packing list because no item name was provided."
    );

    let quantity = run("add_item_to_packing_list", json!({"item_name": "Hat", "quantity": 0}));
    assert_eq!(
        quantity.content,
        "Item was not added to the packing list because no quantity was provided."
    );
    assert!(quantity.is_error && quantity.action.is_none());
}

#[test]
fn test_remove_item() {
    let ok = run("remove_item_from_packing_list", json!({"item_name": "Socks"}));
    assert_eq!(
        ok.action,
        Some(Action::PackingList(PackingListAction::Delete {
            item_name: "Socks".to_string()
        }))
    );

    let missing = run("remove_item_from_packing_list", json!({"item_name": "Snorkel"}));
    assert!(missing.is_error);
    assert_eq!(
        missing.content,
        "Item was not removed from the packing list because the item name was not found."
    );
}

#[test]
fn test_update_quantity_rejects_zero_and_keeps_list() {
    let registry = ToolRegistry::packpal();
    let calls = vec![
        call("add_item_to_packing_list", json!({"item_name": "Sandals", "quantity": 7})),
        call("update_item_quantity", json!({"item_name": "Sandals", "new_quantity": 0})),
    ];

    let results = registry.execute_all(&calls, &view());
    assert!(!results[0].is_error);
    assert!(results[1].is_error);
    assert!(results[1].action.is_none());
    assert_eq!(
        results[1].content,
        "Item quantity was not updated because no quantity was provided or the quantity was not a positive number."
    );

    let mut after = view();
    for result in &results {
        if let Some(action) = &result.action {
            after.apply(action);
        }
    }
    let sandals = after.packing_list.iter().find(|i| i.name == "Sandals").unwrap();
    assert_eq!(sandals.quantity, 7);
}

#[test]
fn test_update_quantity_not_found() {
    let result = run("update_item_quantity", json!({"item_name": "Kayak", "new_quantity": 1}));
    assert_eq!(
        result.content,
        "Item quantity was not updated because the item name was not found."
    );
}

#[test]
fn test_update_notes() {
    let ok = run("update_item_notes", json!({"item_name": "Socks", "new_notes": "Wool"}));
    assert_eq!(ok.content, "Item notes were updated: Socks - Wool");

    let empty = run("update_item_notes", json!({"item_name": "Socks", "new_notes": ""}));
    assert_eq!(
        empty.content,
        "Item notes were not updated because no notes were provided."
    );
}

#[test]
fn test_calls_in_one_step_see_earlier_actions() {
    let registry = ToolRegistry::packpal();
    let calls = vec![
        call("add_item_to_packing_list", json!({"item_name": "Hat", "quantity": 1})),
        call("update_item_notes", json!({"item_name": "Hat", "new_notes": "Wide brim"})),
        call("remove_item_from_packing_list", json!({"item_name": "Hat"})),
    ];

    let results = registry.execute_all(&calls, &view());
    assert!(results.iter().all(|r| !r.is_error));
    assert_eq!(
        results.iter().map(|r| r.call_id.as_str()).collect::<Vec<_>>(),
        vec![
            "call_add_item_to_packing_list",
            "call_update_item_notes",
            "call_remove_item_from_packing_list"
        ]
    );
}

#[test]
fn test_update_trip_name_and_description() {
    let name = run("update_trip_name", json!({"new_name": "Anniversary Celebration"}));
    assert_eq!(name.content, "Trip name was updated to: Anniversary Celebration");

    let empty = run("update_trip_description", json!({"new_description": "  "}));
    assert_eq!(
        empty.content,
        "Trip description was not updated because no new description was provided."
    );
}

#[test]
fn test_update_dates_order_error() {
    let result = run(
        "update_trip_dates",
        json!({"new_start_date": "2025-08-17", "new_end_date": "2025-08-10"}),
    );
    assert!(result.is_error);
    assert!(result.action.is_none());
    assert_eq!(
        result.content,
        "Trip dates were not updated because the start date is after the end date."
    );
}

#[test]
fn test_update_dates_keeps_omitted_start() {
    let result = run(
        "update_trip_dates",
        json!({"new_start_date": "", "new_end_date": "2025-09-01"}),
    );
    assert!(!result.is_error);
    assert_eq!(
        result.action,
        Some(Action::Trip(TripAction::UpdateDates {
            new_start_date: Some("2025-08-10".to_string()),
            new_end_date: Some("2025-09-01".to_string()),
        }))
    );
    assert_eq!(result.content, "Trip dates were updated to: 2025-08-10 - 2025-09-01");
}

#[test]
fn test_update_dates_defaulting_happens_before_order_check() {
    // new end before the current start
    let result = run("update_trip_dates", json!({"new_end_date": "2025-08-01"}));
    assert_eq!(
        result.content,
        "Trip dates were not updated because the start date is after the end date."
    );
}

#[test]
fn test_update_dates_invalid_and_missing() {
    let invalid = run("update_trip_dates", json!({"new_start_date": "next friday"}));
    assert_eq!(
        invalid.content,
        "Trip dates were not updated because the start or end date is not a valid date."
    );

    let missing = run("update_trip_dates", json!({"new_start_date": "", "new_end_date": ""}));
    assert_eq!(
        missing.content,
        "Trip dates were not updated because no new start or end date was provided."
    );
}

#[test]
fn test_wrong_argument_type_is_failure() {
    let result = run("update_item_quantity", json!({"item_name": "Socks", "new_quantity": "lots"}));
    assert!(result.is_error);
    assert!(result.content.contains("invalid arguments"));
}

#[test]
fn test_update_dates_stores_zero_padded_dates() {
    let result = run("update_trip_dates", json!({"new_start_date": "2025-8-1"}));
    assert!(!result.is_error);
    assert_eq!(
        result.action,
        Some(Action::Trip(TripAction::UpdateDates {
            new_start_date: Some("2025-08-01".to_string()),
            new_end_date: Some("2025-08-17".to_string()),
        }))
    );
    assert_eq!(result.content, "Trip dates were updated to: 2025-08-01 - 2025-08-17");
}

#[test]
fn test_quantity_accepts_whole_floats_and_numeric_strings() {
    let float = run(
        "add_item_to_packing_list",
        json!({"item_name": "Socks", "quantity": 7.0}),
    );
    assert!(!float.is_error);
    assert_eq!(
        float.action,
        Some(Action::PackingList(PackingListAction::Add {
            item: Item::new("Socks", 7),
        }))
    );

    let text = run(
        "update_item_quantity",
        json!({"item_name": "Socks", "new_quantity": "5"}),
    );
    assert_eq!(
        text.action,
        Some(Action::PackingList(PackingListAction::UpdateQuantity {
            item_name: "Socks".to_string(),
            new_quantity: 5,
        }))
    );
}

#[test]
fn test_quantity_rejects_fractions() {
    let result = run(
        "add_item_to_packing_list",
        json!({"item_name": "Socks", "quantity": 2.5}),
    );
    assert!(result.is_error);
    assert!(result.action.is_none());
    assert!(result.content.contains("invalid arguments"));

    let result = run(
        "update_item_quantity",
        json!({"item_name": "Socks", "new_quantity": 1.5}),
    );
    assert!(result.is_error);
    assert!(result.action.is_none());
}
