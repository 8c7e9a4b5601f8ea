// Local snapshot of the three source collections.
//
// The real records live in the remote persistence service; the host keeps a
// JSON snapshot on disk so the terminal views work offline. The calendar core
// never calls into this module.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the record structs in model::record require incrementing
// AGENDA_STORAGE_VERSION below.
use crate::context::AppContext;
use crate::model::SourceCollections;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: Bare `SourceCollections` object, no wrapper
// - v2: Versioned wrapper, tagged itinerary details
const AGENDA_STORAGE_VERSION: u32 = 2;

/// Wrapper struct for versioned local storage
#[derive(Serialize, Deserialize)]
struct AgendaStorageData {
    #[serde(default)]
    version: u32,
    sources: SourceCollections,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut p = file_path.as_os_str().to_owned();
        p.push(".lock");
        PathBuf::from(p)
    }

    /// Runs `f` while holding an exclusive lock on `<file>.lock`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads the snapshot from the context's data directory.
    /// A missing file is an empty agenda, not an error.
    pub fn load(ctx: &dyn AppContext) -> Result<SourceCollections> {
        let path = ctx.get_agenda_path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<SourceCollections> {
        if !path.exists() {
            log::info!("No agenda snapshot at {}, starting empty", path.display());
            return Ok(SourceCollections::default());
        }

        let json = Self::with_lock(path, || Ok(fs::read_to_string(path)?))
            .with_context(|| format!("Failed to read agenda snapshot '{}'", path.display()))?;

        let sources = Self::parse_snapshot(&json)
            .with_context(|| format!("Failed to parse agenda snapshot '{}'", path.display()))?;

        log::debug!(
            "Loaded {} itinerary entries, {} appointments, {} tasks from {}",
            sources.itinerary.len(),
            sources.appointments.len(),
            sources.tasks.len(),
            path.display()
        );
        Ok(sources)
    }

    /// Accepts both the versioned wrapper and the unversioned v1 layout.
    pub fn parse_snapshot(json: &str) -> Result<SourceCollections> {
        if let Ok(data) = serde_json::from_str::<AgendaStorageData>(json) {
            if data.version > AGENDA_STORAGE_VERSION {
                anyhow::bail!(
                    "Snapshot version {} is newer than supported version {}",
                    data.version,
                    AGENDA_STORAGE_VERSION
                );
            }
            return Ok(data.sources);
        }

        log::info!("Reading unversioned agenda snapshot as v1");
        Ok(serde_json::from_str::<SourceCollections>(json)?)
    }

    pub fn save(ctx: &dyn AppContext, sources: &SourceCollections) -> Result<()> {
        let path = ctx.get_agenda_path()?;
        Self::save_to_path(&path, sources)
    }

    pub fn save_to_path(path: &Path, sources: &SourceCollections) -> Result<()> {
        let data = AgendaStorageData {
            version: AGENDA_STORAGE_VERSION,
            sources: sources.clone(),
        };
        Self::with_lock(path, || {
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(path, json)?;
            Ok(())
        })
    }
}
