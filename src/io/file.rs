use std::path::Path;

use tracing::info;

use crate::error::HangarResult;
use crate::snapshot::ScheduleState;

/// Save the schedule state to a JSON file.
pub fn save_state(state: &ScheduleState, path: &Path) -> HangarResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), tasks = state.tasks.len(), "saved schedule");
    Ok(())
}

/// Load the schedule state from a JSON file.
pub fn load_state(path: &Path) -> HangarResult<ScheduleState> {
    let json = std::fs::read_to_string(path)?;
    let state: ScheduleState = serde_json::from_str(&json)?;
    info!(path = %path.display(), tasks = state.tasks.len(), "loaded schedule");
    Ok(state)
}
