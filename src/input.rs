use crate::error::{ScResult, ScoutError};
use crate::transform::RawObservation;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

pub fn read_observations_from_file<P: AsRef<Path>>(path: P) -> ScResult<Vec<RawObservation>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ScoutError::Config(format!(
            "Could not open observations at '{}': {}",
            path.display(),
            e
        ))
    })?;
    read_observations(BufReader::new(file))
}

/// Reads either a JSON array of observations or one observation per line.
///
/// Entries that are not objects, or that fail to parse, are skipped with a warning.
/// A top-level array that is itself malformed is an error.
pub fn read_observations<R: Read>(mut reader: R) -> ScResult<Vec<RawObservation>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut observations = Vec::new();
    let mut skipped = 0;

    if content.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(&content)?;
        for (idx, value) in values.into_iter().enumerate() {
            match parse_entry(value) {
                Ok(raw) => observations.push(raw),
                Err(e) => {
                    skipped += 1;
                    warn!("[Entry {}] Skipping observation: {}", idx, e);
                }
            }
        }
    } else {
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = serde_json::from_str::<Value>(line)
                .map_err(ScoutError::from)
                .and_then(parse_entry);
            match parsed {
                Ok(raw) => observations.push(raw),
                Err(e) => {
                    skipped += 1;
                    warn!("[Line {}] Skipping observation: {}", idx + 1, e);
                }
            }
        }
    }

    debug!(
        "Read {} observations ({} skipped)",
        observations.len(),
        skipped
    );
    Ok(observations)
}

fn parse_entry(value: Value) -> ScResult<RawObservation> {
    if !value.is_object() {
        return Err(ScoutError::Config("observation is not a JSON object".to_string()));
    }
    Ok(serde_json::from_value(value)?)
}
