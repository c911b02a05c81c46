//! JSON implementation of the snapshot repositories
//!
//! Snapshots are pretty-printed JSON so a trained table or a solved plan can
//! be inspected and diffed by hand. Writes go through a temporary file in
//! the destination directory followed by an atomic rename, so a crash
//! mid-write cannot corrupt the last good snapshot.

use std::{fs::File, io::Write, path::Path};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::{
    Result,
    error::Error,
    ports::repository::{AgentRepository, PlanRepository},
    q_learning::SavedAgent,
    search::SavedPlan,
};

/// JSON file store with atomic replace.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }

    fn write_atomic<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());

        let mut tmp = match dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new_in("."),
        }
        .map_err(|source| Error::Io {
            operation: format!("create temporary snapshot near {path:?}"),
            source,
        })?;

        serde_json::to_writer_pretty(tmp.as_file_mut(), value)?;
        tmp.as_file_mut().flush().map_err(|source| Error::Io {
            operation: format!("flush snapshot for {path:?}"),
            source,
        })?;

        tmp.persist(path).map_err(|e| Error::Io {
            operation: format!("replace snapshot {path:?}"),
            source: e.error,
        })?;

        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open snapshot {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }
}

impl AgentRepository for JsonStore {
    fn save_agent(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        self.write_atomic(agent, path)
    }

    fn load_agent(&self, path: &Path) -> Result<SavedAgent> {
        self.read(path)
    }
}

impl PlanRepository for JsonStore {
    fn save_plan(&self, plan: &SavedPlan, path: &Path) -> Result<()> {
        self.write_atomic(plan, path)
    }

    fn load_plan(&self, path: &Path) -> Result<SavedPlan> {
        self.read(path)
    }
}
