use serde_json::Value;

use crate::tool::ToolArgs;

/// Marker that opens a tool-call line in model output.
const MARKER: &str = "tool:";

/// A parsed request, embedded in model output, to invoke one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub args: ToolArgs,
}

/// Extract tool calls from a block of model text, one per matching line.
///
/// The grammar is line oriented: `tool: <name>(<json-object>)`. Lines that do
/// not start with the marker are prose and are ignored. A marker line with no
/// opening parenthesis is not a call. Malformed argument JSON produces the
/// call with empty arguments; capabilities tolerate missing keys. Unknown
/// capability names are not this function's concern; the registry lookup is
/// the only trust decision. Parsing is total.
pub fn parse_tool_calls(text: &str) -> Vec<ToolCall> {
    let mut calls = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(MARKER) else {
            continue;
        };
        let Some((name, raw_args)) = rest.split_once('(') else {
            continue;
        };
        let raw_args = raw_args.strip_suffix(')').unwrap_or(raw_args);
        calls.push(ToolCall {
            name: name.trim().to_string(),
            args: parse_args(raw_args),
        });
    }
    calls
}

/// Top-level JSON values are coerced to strings: string values verbatim,
/// anything else via its JSON rendering.
fn parse_args(raw: &str) -> ToolArgs {
    let mut args = ToolArgs::new();
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) {
        for (key, value) in fields {
            let value = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            args.insert(key.trim().to_string(), value);
        }
    }
    args
}
