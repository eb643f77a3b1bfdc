use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{debug, info};

use super::parser::{CatalogTable, load_catalogs};

/// Table name of the game's built-in search results, never indexed
pub const RESERVED_CATALOG: &str = "BMS Search";

/// Hash → difficulty folder lookup aggregated from difficulty tables.
///
/// Both SHA-256 and MD5 spellings of a chart hash are keys into the same
/// index. Ordered maps keep rebuilds deterministic.
#[derive(Debug, Clone, Default)]
pub struct DifficultyIndex {
    catalogs: Vec<CatalogTable>,
    exclude_list: BTreeSet<String>,
    hash_to_folders: BTreeMap<String, BTreeSet<String>>,
    hash_to_title: BTreeMap<String, (String, String)>,
}

impl DifficultyIndex {
    /// Build an index over `catalogs`, skipping tables in `exclude_list`
    pub fn rebuild<I, S>(catalogs: Vec<CatalogTable>, exclude_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self {
            catalogs,
            exclude_list: exclude_list.into_iter().map(Into::into).collect(),
            ..Default::default()
        };
        index.aggregate();
        index
    }

    /// Build an index from every `*.bmt` table in `dir`
    pub fn from_dir<P, I, S>(dir: P, exclude_list: I) -> Self
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::rebuild(load_catalogs(dir), exclude_list)
    }

    /// Rescan `dir` and rebuild, keeping the current exclusions
    pub fn reload_from_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.catalogs = load_catalogs(dir);
        self.aggregate();
    }

    fn aggregate(&mut self) {
        self.hash_to_folders.clear();
        self.hash_to_title.clear();

        let mut aggregated = 0usize;
        for table in &self.catalogs {
            if table.name == RESERVED_CATALOG || self.exclude_list.contains(&table.name) {
                debug!("Table '{}' excluded from index", table.name);
                continue;
            }
            aggregated += 1;

            for folder in &table.folders {
                for song in &folder.songs {
                    for hash in song.hashes() {
                        self.hash_to_folders
                            .entry(hash.to_string())
                            .or_default()
                            .insert(folder.name.clone());
                        // Later tables overwrite titles of earlier ones
                        self.hash_to_title.insert(
                            hash.to_string(),
                            (folder.name.clone(), song.title().to_string()),
                        );
                    }
                }
            }
        }

        info!(
            "Difficulty index rebuilt: {} of {} tables, {} hashes",
            aggregated,
            self.catalogs.len(),
            self.hash_to_folders.len()
        );
    }

    /// Folder names classifying `hash`, sorted. Empty for unknown hashes.
    pub fn lookup(&self, hash: &str) -> Vec<String> {
        self.hash_to_folders
            .get(hash)
            .map(|folders| folders.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Union of the folders of several hash spellings of one chart, sorted
    pub fn lookup_any<'a, I>(&self, hashes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let folders: BTreeSet<&String> = hashes
            .into_iter()
            .filter_map(|hash| self.hash_to_folders.get(hash))
            .flatten()
            .collect();
        folders.into_iter().cloned().collect()
    }

    /// Folder and title of the last table entry seen for `hash`
    pub fn title_of(&self, hash: &str) -> Option<(&str, &str)> {
        self.hash_to_title
            .get(hash)
            .map(|(folder, title)| (folder.as_str(), title.as_str()))
    }

    /// Names of every discovered table except the reserved one, including excluded tables
    pub fn catalog_names(&self) -> BTreeSet<&str> {
        self.catalogs
            .iter()
            .map(|table| table.name.as_str())
            .filter(|name| *name != RESERVED_CATALOG)
            .collect()
    }

    pub fn exclude_list(&self) -> &BTreeSet<String> {
        &self.exclude_list
    }

    /// Add tables to the exclusion list.
    ///
    /// Rebuilds only when the list actually changed. Returns whether it did.
    pub fn add_exclusions<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut changed = false;
        for name in names {
            changed |= self.exclude_list.insert(name.into());
        }
        if changed {
            self.aggregate();
        }
        changed
    }

    /// Number of indexed hash keys
    pub fn len(&self) -> usize {
        self.hash_to_folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hash_to_folders.is_empty()
    }
}
