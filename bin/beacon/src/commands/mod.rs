//! Subcommands of the `beacon` binary.

pub(crate) mod decode;
pub(crate) mod node;

use serde_json::Value;
use std::io::Write;

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn print_json(value: &impl serde::Serialize) -> eyre::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Returns `true` for a full `GET /eth/v2/beacon/blocks/{block_id}` response rather than a bare
/// block message.
pub(crate) fn is_block_response(value: &Value) -> bool {
    value.get("data").is_some_and(Value::is_object)
}
