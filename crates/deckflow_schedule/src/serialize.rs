//! Simulator state serialization using `MessagePack`.
//!
//! The state a simulator carries from one run to the next (action run
//! history, UDQ values and the well lists) is saved and loaded as a unit.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use deckflow_foundation::{Error, ErrorContext, Result};
use deckflow_registry::WListManager;
use deckflow_state::{ActionState, UdqState};
use serde::{Deserialize, Serialize};

/// Run state persisted between simulator runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorState {
    /// Action run history.
    pub action_state: ActionState,
    /// UDQ values and update policies.
    pub udq_state: UdqState,
    /// Well lists of the latest report step.
    pub wlists: WListManager,
}

/// Serializes the state to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(state: &SimulatorState) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(state).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes the state from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<SimulatorState> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
}

fn io_error(err: std::io::Error, path: &Path) -> Error {
    Error::from(err).with_context(ErrorContext::new().with_source(path.display().to_string()))
}

/// Saves the state to a file, creating or overwriting it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(state: &SimulatorState, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error(e, path))?;
    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(state)?;
    writer.write_all(&bytes).map_err(|e| io_error(e, path))?;
    writer.flush().map_err(|e| io_error(e, path))?;
    Ok(())
}

/// Loads the state from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<SimulatorState> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error(e, path))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error(e, path))?;
    from_bytes(&bytes)
}
