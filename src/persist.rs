//! Saving and restoring sessions.
//!
//! A [`Store`] is a flat map of named JSON values. The live cells go under one key
//! as an array of `[x, y]` pairs, the settings under [`SETTINGS_KEY`].

use crate::{Error, Grid, Pos2, Result, Settings, seed};
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_CELLS_KEY: &str = "cells";
pub const SETTINGS_KEY: &str = "settings";

pub trait Store {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Keeps everything in memory, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A single JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}
impl JsonFileStore {
    /// Opens `path`, starting empty if the file does not exist or is not a JSON
    /// object.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Map<String, Value>>(&text) {
                Ok(values) => values,
                Err(err) => {
                    log::warn!("ignoring unreadable store {}: {}", path.display(), err);
                    Map::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        // write next to the target then rename, a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        self.flush()
    }
}

pub fn save_cells<S: Store + ?Sized>(store: &mut S, key: &str, grid: &Grid) -> Result<()> {
    let cells = grid.snapshot();
    store.set(key, serde_json::to_value(&cells)?)?;
    log::info!("saved {} cells under {:?}", cells.len(), key);
    Ok(())
}

/// Reads the cell list under `key`.
///
/// `Ok(None)` means nothing was saved. Any malformed entry fails the whole list.
pub fn load_cells<S: Store + ?Sized>(store: &S, key: &str) -> Result<Option<Vec<Pos2>>> {
    match store.get(key) {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Rebuilds the saved grid, or the default seed if there is none or it is
/// malformed.
pub fn restore_grid<S: Store + ?Sized>(store: &S, key: &str) -> Grid {
    match load_cells(store, key) {
        Ok(Some(cells)) => {
            log::info!("restored {} cells from {:?}", cells.len(), key);
            let mut grid = Grid::new();
            for cell in cells {
                grid.add(cell);
            }
            grid
        }
        Ok(None) => seed::default_grid(),
        Err(err) => {
            log::warn!("discarding saved cells under {:?}: {}", key, err);
            seed::default_grid()
        }
    }
}

pub fn save_settings<S: Store + ?Sized>(store: &mut S, settings: &Settings) -> Result<()> {
    store.set(SETTINGS_KEY, serde_json::to_value(settings)?)
}

/// Reads the saved settings, falling back to the defaults when missing or
/// invalid.
pub fn load_settings<S: Store + ?Sized>(store: &S) -> Settings {
    let Some(value) = store.get(SETTINGS_KEY) else {
        return Settings::default();
    };
    let parsed = serde_json::from_value::<Settings>(value)
        .map_err(Error::from)
        .and_then(|settings| settings.validate().map(|_| settings));
    match parsed {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("discarding saved settings: {}", err);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sparselife-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn saves_pairs_in_order() {
        let mut store = MemoryStore::new();
        let grid = Grid::from_alive([Pos2::new(3, 1), Pos2::new(-1, 0), Pos2::new(2, 0)]);
        save_cells(&mut store, "cells", &grid).unwrap();

        assert_eq!(store.get("cells"), Some(json!([[-1, 0], [2, 0], [3, 1]])));
    }

    #[test]
    fn restores_saved_cells() {
        let mut store = MemoryStore::new();
        let grid = Grid::from_alive([Pos2::new(-40, 7), Pos2::new(0, 0)]);
        save_cells(&mut store, "board", &grid).unwrap();

        assert_eq!(restore_grid(&store, "board"), grid);
    }

    #[test]
    fn missing_cells_use_default_seed() {
        let store = MemoryStore::new();

        assert_eq!(load_cells(&store, "cells").unwrap(), None);
        assert_eq!(restore_grid(&store, "cells"), seed::default_grid());
    }

    #[test]
    fn malformed_cells_are_rejected_whole() {
        let cases = [
            json!([[1, 2], [3]]),
            json!([[1, 2], [3.5, 4]]),
            json!([[1, 2], ["a", 4]]),
            json!({"x": 1, "y": 2}),
            json!("nope"),
        ];
        for value in cases {
            let mut store = MemoryStore::new();
            store.set("cells", value).unwrap();

            assert!(load_cells(&store, "cells").is_err());
            assert_eq!(restore_grid(&store, "cells"), seed::default_grid());
        }
    }

    #[test]
    fn empty_list_is_not_missing() {
        let mut store = MemoryStore::new();
        save_cells(&mut store, "cells", &Grid::new()).unwrap();

        assert!(restore_grid(&store, "cells").is_empty());
    }

    #[test]
    fn settings_round_trip_and_fallback() {
        let mut store = MemoryStore::new();
        assert_eq!(load_settings(&store), Settings::default());

        let settings = Settings {
            cell_size: 3,
            interval_ms: 40,
        };
        save_settings(&mut store, &settings).unwrap();
        assert_eq!(load_settings(&store), settings);

        store.set(SETTINGS_KEY, json!({"cell_size": 0})).unwrap();
        assert_eq!(load_settings(&store), Settings::default());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        save_cells(&mut store, "cells", &Grid::from_alive([Pos2::new(5, -5)])).unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(load_cells(&store, "cells").unwrap(), Some(vec![Pos2::new(5, -5)]));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_store_ignores_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(restore_grid(&store, "cells"), seed::default_grid());

        fs::remove_file(&path).unwrap();
    }
}
