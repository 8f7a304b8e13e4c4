//! Persistence collaborator for the fitted booster.
//!
//! Round-trips the gbdt ensemble through serde_json at a named location.
//! The on-disk format is not part of the classifier contract; only exact
//! round-trip fidelity is.
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use gbdt::gradient_boost::GBDT;

use crate::error::DelayError;

/// Load a persisted booster. Absence is not an error; any other failure is.
pub fn load(path: &Path) -> Result<Option<GBDT>, DelayError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(DelayError::Persistence(format!(
                "open {}: {}",
                path.display(),
                e
            )))
        }
    };
    let model = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        DelayError::Persistence(format!("decode {}: {}", path.display(), e))
    })?;
    Ok(Some(model))
}

/// Persist a fitted booster, replacing any previous state at `path`.
pub fn save(path: &Path, model: &GBDT) -> Result<(), DelayError> {
    let file = File::create(path).map_err(|e| {
        DelayError::Persistence(format!("create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, model)
        .map_err(|e| DelayError::Persistence(format!("encode {}: {}", path.display(), e)))?;
    writer
        .flush()
        .map_err(|e| DelayError::Persistence(format!("flush {}: {}", path.display(), e)))
}
