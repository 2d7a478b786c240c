// File: ./src/storage.rs
//! Local persistence: the task collection as versioned JSON, plus the staged
//! advice text kept between the `recommend` and `accept` steps. All writes
//! go through an exclusive file lock and a write-to-temp-then-rename.
use crate::context::AppContext;
use crate::model::Task;
use anyhow::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StorageData {
    version: u32,
    tasks: Vec<Task>,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

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
        FileExt::unlock(&file)?;
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

    // --- TASKS ---

    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Task>> {
        let path = ctx.get_task_file_path()?;
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            let data: StorageData = serde_json::from_str(&json).map_err(|e| {
                anyhow::anyhow!("Failed to parse task file '{}': {}", path.display(), e)
            })?;
            if data.version != STORAGE_VERSION {
                log::info!("loading task file version {}", data.version);
            }
            Ok(data.tasks)
        })
    }

    pub fn save(ctx: &dyn AppContext, tasks: &[Task]) -> Result<()> {
        let path = ctx.get_task_file_path()?;
        Self::with_lock(&path, || {
            let data = StorageData {
                version: STORAGE_VERSION,
                tasks: tasks.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }

    // --- STAGED ADVICE ---

    pub fn stage_advice(ctx: &dyn AppContext, text: &str) -> Result<()> {
        let path = ctx.get_advice_file_path()?;
        Self::with_lock(&path, || {
            Self::atomic_write(&path, text)?;
            Ok(())
        })
    }

    pub fn load_advice(ctx: &dyn AppContext) -> Result<Option<String>> {
        let path = ctx.get_advice_file_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(&path, || Ok(Some(fs::read_to_string(&path)?)))
    }

    pub fn clear_advice(ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_advice_file_path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
