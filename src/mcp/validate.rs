//! Argument validation.
//!
//! Validation is presence-only: the tool must exist and every required
//! argument must be present and non-null. Types are checked later, when a
//! handler deserializes its parameters.

use serde_json::Value;

use super::catalog::{self, ToolDefinition};
use super::dispatch::JsonObject;
use super::error::DispatchError;

/// Check a call against the catalog.
///
/// Reports the first missing required field in declaration order.
pub fn validate(
    name: &str,
    arguments: &JsonObject,
) -> Result<&'static ToolDefinition, DispatchError> {
    let definition = catalog::find(name).ok_or_else(|| DispatchError::UnknownTool {
        name: name.to_string(),
    })?;

    if let Some(missing) = definition
        .required_fields()
        .find(|field| is_absent(arguments.get(*field)))
    {
        return Err(DispatchError::MissingArgument { field: missing });
    }

    Ok(definition)
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}
