use crate::error::ToolError;
use crate::registry::{parse_args, present, PackingTool, ToolOutcome, ToolView};
use chrono::NaiveDate;
use packpal_types::TripAction;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct UpdateTripName;

#[derive(Deserialize)]
struct NameArgs {
    #[serde(default)]
    new_name: Option<String>,
}

impl PackingTool for UpdateTripName {
    fn name(&self) -> &'static str {
        "update_trip_name"
    }

    fn description(&self) -> &'static str {
        "Updates the name of the trip. Use this tool when the user's request requires a new or \
         changed trip name. You must provide the new name."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "new_name": {"type": "string", "description": "New name for the trip"}
            },
            "required": ["new_name"]
        })
    }

    fn run(&self, _view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: NameArgs = parse_args(self.name(), arguments)?;
        let Some(new_name) = present(args.new_name) else {
            return Err(ToolError::rejected(
                "Trip name was not updated because no new name was provided.",
            ));
        };

        let message = format!("Trip name was updated to: {}", new_name);
        Ok(ToolOutcome::new(TripAction::UpdateName { new_name }, message))
    }
}

pub struct UpdateTripDescription;

#[derive(Deserialize)]
struct DescriptionArgs {
    #[serde(default)]
    new_description: Option<String>,
}

impl PackingTool for UpdateTripDescription {
    fn name(&self) -> &'static str {
        "update_trip_description"
    }

    fn description(&self) -> &'static str {
        "Updates the description of the trip. You must provide the new description."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "new_description": {"type": "string"}
            },
            "required": ["new_description"]
        })
    }

    fn run(&self, _view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: DescriptionArgs = parse_args(self.name(), arguments)?;
        let Some(new_description) = present(args.new_description) else {
            return Err(ToolError::rejected(
                "Trip description was not updated because no new description was provided.",
            ));
        };

        let message = format!("Trip description was updated to: {}", new_description);
        Ok(ToolOutcome::new(
            TripAction::UpdateDescription { new_description },
            message,
        ))
    }
}

pub struct UpdateTripDates;

#[derive(Deserialize)]
struct DatesArgs {
    #[serde(default)]
    new_start_date: Option<String>,
    #[serde(default)]
    new_end_date: Option<String>,
}

impl PackingTool for UpdateTripDates {
    fn name(&self) -> &'static str {
        "update_trip_dates"
    }

    fn description(&self) -> &'static str {
        "Updates the start date, the end date, or both. Dates use the format YYYY-MM-DD. When \
         updating only one date, pass an empty string for the other. The start date must not \
         be after the end date."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "new_start_date": {"type": "string", "description": "YYYY-MM-DD, or empty to keep"},
                "new_end_date": {"type": "string", "description": "YYYY-MM-DD, or empty to keep"}
            },
            "required": []
        })
    }

    fn run(&self, view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError> {
        let args: DatesArgs = parse_args(self.name(), arguments)?;
        let start = present(args.new_start_date);
        let end = present(args.new_end_date);

        if start.is_none() && end.is_none() {
            return Err(ToolError::rejected(
                "Trip dates were not updated because no new start or end date was provided.",
            ));
        }

        let start = start.unwrap_or_else(|| view.trip.start_date.clone());
        let end = end.unwrap_or_else(|| view.trip.end_date.clone());

        let (Ok(start_day), Ok(end_day)) = (parse_date(&start), parse_date(&end)) else {
            return Err(ToolError::rejected(
                "Trip dates were not updated because the start or end date is not a valid date.",
            ));
        };
        if start_day > end_day {
            return Err(ToolError::rejected(
                "Trip dates were not updated because the start date is after the end date.",
            ));
        }

        // stored zero-padded, whatever form was parsed
        let start = start_day.format("%Y-%m-%d").to_string();
        let end = end_day.format("%Y-%m-%d").to_string();

        let message = format!("Trip dates were updated to: {} - {}", start, end);
        Ok(ToolOutcome::new(
            TripAction::UpdateDates {
                new_start_date: Some(start),
                new_end_date: Some(end),
            },
            message,
        ))
    }
}

fn parse_date(value: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}
