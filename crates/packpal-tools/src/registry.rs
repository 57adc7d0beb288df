use crate::error::ToolError;
use crate::items::{AddItem, RemoveItem, UpdateItemNotes, UpdateItemQuantity};
use crate::trip::{UpdateTripDates, UpdateTripDescription, UpdateTripName};
use packpal_llm::{Tool, ToolCall};
use packpal_types::{Action, AssistantState, Item, Trip};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Domain view a tool validates against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolView {
    pub trip: Trip,
    pub packing_list: Vec<Item>,
}

impl ToolView {
    pub fn new(trip: Trip, packing_list: Vec<Item>) -> Self {
        Self { trip, packing_list }
    }

    pub fn from_state(state: &AssistantState) -> Self {
        Self::new(state.trip.clone(), state.packing_list.clone())
    }

    pub fn contains_item(&self, name: &str) -> bool {
        self.packing_list.iter().any(|item| item.name == name)
    }

    /// Fold an accepted action so later calls in the same step see it
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Trip(action) => {
                self.trip = packpal_types::reduce_trip(std::mem::take(&mut self.trip), action);
            }
            Action::PackingList(action) => {
                self.packing_list = packpal_types::reduce_packing_list(
                    std::mem::take(&mut self.packing_list),
                    action,
                );
            }
        }
    }
}

/// Accepted tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub action: Action,
    pub message: String,
}

impl ToolOutcome {
    pub fn new(action: impl Into<Action>, message: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            message: message.into(),
        }
    }
}

/// Resolution of one tool call; failures carry no action
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub call_id: String,
    pub tool_name: String,
    pub content: String,
    pub action: Option<Action>,
    pub is_error: bool,
}

/// A model-callable tool: schema plus a pure `(view, args) -> action` mapping
pub trait PackingTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object
    fn parameters(&self) -> Value;

    fn run(&self, view: &ToolView, arguments: Value) -> Result<ToolOutcome, ToolError>;

    fn definition(&self) -> Tool {
        Tool::new(self.name(), self.description(), self.parameters())
    }
}

/// Fixed set of tools offered to the model, kept in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn PackingTool>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every trip and packing-list tool
    pub fn packpal() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(UpdateTripName));
        registry.register(Arc::new(UpdateTripDescription));
        registry.register(Arc::new(UpdateTripDates));
        registry.register(Arc::new(AddItem));
        registry.register(Arc::new(RemoveItem));
        registry.register(Arc::new(UpdateItemQuantity));
        registry.register(Arc::new(UpdateItemNotes));
        registry
    }

    /// Add a tool, replacing any earlier one with the same name
    pub fn register(&mut self, tool: Arc<dyn PackingTool>) {
        match self.index.get(tool.name()) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(tool.name(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schemas in provider format
    pub fn definitions(&self) -> Vec<Tool> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Resolve one call against `view`; never fails
    pub fn execute(&self, call: &ToolCall, view: &ToolView) -> ToolResult {
        let outcome = self.run_call(call, view);

        match outcome {
            Ok(ToolOutcome { action, message }) => {
                tracing::debug!("TOOL: {} accepted ({})", call.name(), call.id);
                ToolResult {
                    call_id: call.id.clone(),
                    tool_name: call.name().to_string(),
                    content: message,
                    action: Some(action),
                    is_error: false,
                }
            }
            Err(e) => {
                tracing::warn!("TOOL: {} rejected ({}): {}", call.name(), call.id, e);
                ToolResult {
                    call_id: call.id.clone(),
                    tool_name: call.name().to_string(),
                    content: e.to_string(),
                    action: None,
                    is_error: true,
                }
            }
        }
    }

    /// Resolve calls in order, each seeing the actions accepted before it
    pub fn execute_all(&self, calls: &[ToolCall], view: &ToolView) -> Vec<ToolResult> {
        let mut scratch = view.clone();
        calls
            .iter()
            .map(|call| {
                let result = self.execute(call, &scratch);
                if let Some(action) = &result.action {
                    scratch.apply(action);
                }
                result
            })
            .collect()
    }

    fn run_call(&self, call: &ToolCall, view: &ToolView) -> Result<ToolOutcome, ToolError> {
        let tool = self
            .index
            .get(call.name())
            .map(|&slot| &self.tools[slot])
            .ok_or_else(|| ToolError::UnknownTool(call.name().to_string()))?;

        let arguments: Value = call.parse_arguments().map_err(|e| ToolError::InvalidArguments {
            tool: call.name().to_string(),
            message: e.to_string(),
        })?;

        if !arguments.is_object() {
            return Err(ToolError::InvalidArguments {
                tool: call.name().to_string(),
                message: "arguments must be a JSON object".to_string(),
            });
        }

        tool.run(view, arguments)
    }
}

/// Deserialize a tool's argument struct, mapping failures to `InvalidArguments`
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(
    tool: &str,
    arguments: Value,
) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Whole number sent as an integer, an integral float (`7.0`) or a numeric string
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde::Deserialize;

    let whole = |f: f64| {
        if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
            Ok(f as i64)
        } else {
            Err(D::Error::custom(format!("expected a whole number, got {}", f)))
        }
    };

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Some(i)),
            (None, Some(f)) => whole(f).map(Some),
            (None, None) => Err(D::Error::custom(format!("number {} is out of range", n))),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Ok(Some(i)),
                Err(_) => s
                    .parse::<f64>()
                    .map_err(|_| D::Error::custom(format!("expected a whole number, got \"{}\"", s)))
                    .and_then(whole)
                    .map(Some),
            }
        }
        Some(other) => Err(D::Error::custom(format!(
            "invalid type: {}, expected a whole number",
            other
        ))),
    }
}

/// Trimmed text, `None` when absent or blank
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
