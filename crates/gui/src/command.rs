//! JSON command protocol for scripting and integration tests.
//!
//! Wraps the builder `Command` enum with a couple of introspection
//! commands, executed against the headless harness.

use serde::{Deserialize, Serialize};

use crate::harness::TestHarness;
use crate::state::Command;

/// A command accepted by the JSON interface: any builder command, plus
/// read-only introspection.
#[derive(Debug)]
pub enum AgentCommand {
    Builder(Command),
    /// List all entities
    Inspect,
    /// Export the full snapshot as JSON
    ExportState,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }
}

/// Parse a single JSON command.
pub fn parse_command(json: &str) -> Result<AgentCommand, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    parse_value(value)
}

fn parse_value(value: serde_json::Value) -> Result<AgentCommand, String> {
    match value.get("command").and_then(|c| c.as_str()) {
        Some("inspect") => Ok(AgentCommand::Inspect),
        Some("export_state") => Ok(AgentCommand::ExportState),
        _ => serde_json::from_value::<Command>(value)
            .map(AgentCommand::Builder)
            .map_err(|e| format!("Invalid command JSON: {e}")),
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, command: AgentCommand) -> CommandResponse {
    match command {
        AgentCommand::Builder(Command::AddEntity { profile_id, name }) => {
            harness.dispatch(Command::AddEntity { profile_id, name });
            let id = harness.snapshot().primary_selection().cloned();
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::Builder(Command::DeleteEntities { ids }) => {
            let removed: Vec<&String> = ids
                .iter()
                .filter(|id| harness.snapshot().entity(id).is_some())
                .collect();
            let removed = serde_json::json!({ "removed": removed });
            harness.dispatch(Command::DeleteEntities { ids: ids.clone() });
            CommandResponse::ok_with_data(removed)
        }

        AgentCommand::Builder(Command::Undo) => {
            let undone = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": undone }))
        }

        AgentCommand::Builder(Command::Redo) => {
            let redone = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": redone }))
        }

        AgentCommand::Builder(command) => {
            harness.dispatch(command);
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let snapshot = harness.snapshot();
            let entities: Vec<serde_json::Value> = snapshot
                .entities
                .iter()
                .map(|entity| {
                    serde_json::json!({
                        "id": entity.id,
                        "name": entity.name,
                        "profile_id": entity.profile_id,
                        "visible": entity.visible,
                        "locked": entity.locked,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "entity_count": entities.len(),
                "entities": entities,
                "selection": snapshot.selection,
                "tool": snapshot.tool,
            }))
        }

        AgentCommand::ExportState => {
            let json = harness.export_state_json();
            CommandResponse::ok_with_data(serde_json::json!({ "state_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    Ok(execute_command(harness, parse_command(json)?))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    values
        .into_iter()
        .map(|value| Ok(execute_command(harness, parse_value(value)?)))
        .collect()
}
