//! The user's personal library and the shared media store.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::Catalog;
use crate::{Error, Result};

/// A movie owned (or borrowed) by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedMovie {
    /// Catalogue id
    pub id: String,
    /// Borrowed rather than owned outright
    pub borrowed: bool,
}

/// Result of an add operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    /// Ids that changed
    pub applied: Vec<String>,
    /// Ids that were already in the requested state
    pub skipped: Vec<String>,
}

/// Movies and show episodes in the user's library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserLibrary {
    movies: Vec<OwnedMovie>,
    shows: BTreeMap<String, Vec<String>>,
}

impl UserLibrary {
    /// The starting library: three movies and two episodes of Rebels.
    #[must_use]
    pub fn builtin() -> Self {
        let movies = ["ROGUE1", "SW_EP04", "SW_EP05"]
            .iter()
            .map(|id| OwnedMovie {
                id: (*id).to_string(),
                borrowed: false,
            })
            .collect();
        let mut shows = BTreeMap::new();
        shows.insert(
            "SW_REB".to_string(),
            vec!["S01E01".to_string(), "S02E02".to_string()],
        );
        Self { movies, shows }
    }

    /// Owned movies in the order they were added.
    #[must_use]
    pub fn movies(&self) -> &[OwnedMovie] {
        &self.movies
    }

    /// Owned episodes keyed by show id.
    #[must_use]
    pub fn shows(&self) -> &BTreeMap<String, Vec<String>> {
        &self.shows
    }

    /// Ids of owned movies.
    #[must_use]
    pub fn owned_movie_ids(&self) -> Vec<String> {
        self.movies.iter().map(|m| m.id.clone()).collect()
    }

    /// Whether a movie is in the library.
    #[must_use]
    pub fn owns_movie(&self, id: &str) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    /// Owned episodes of a show, empty if the show is not in the library.
    #[must_use]
    pub fn owned_episodes(&self, show_id: &str) -> &[String] {
        self.shows.get(show_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Catalogue movies the user does not own yet.
    #[must_use]
    pub fn movies_not_owned(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .movies
            .iter()
            .filter(|m| !self.owns_movie(&m.id))
            .map(|m| m.id.clone())
            .collect()
    }

    /// Add movies to the library.
    ///
    /// # Errors
    ///
    /// Fails without changes if any id is not in the catalogue.
    pub fn add_movies(&mut self, catalog: &Catalog, ids: &[String], borrowed: bool) -> Result<Change> {
        if let Some(missing) = ids.iter().find(|id| catalog.movie(id).is_none()) {
            return Err(Error::not_found(format!("Movie '{missing}'")));
        }

        let mut change = Change::default();
        for id in ids {
            if self.owns_movie(id) || change.applied.contains(id) {
                change.skipped.push(id.clone());
            } else {
                self.movies.push(OwnedMovie {
                    id: id.clone(),
                    borrowed,
                });
                change.applied.push(id.clone());
            }
        }
        Ok(change)
    }

    /// Remove movies from the library.
    ///
    /// # Errors
    ///
    /// Fails without changes if any id is not owned.
    pub fn remove_movies(&mut self, ids: &[String]) -> Result<Change> {
        if let Some(missing) = ids.iter().find(|id| !self.owns_movie(id)) {
            return Err(Error::not_found(format!("Movie '{missing}' in library")));
        }
        self.movies.retain(|m| !ids.contains(&m.id));
        Ok(Change {
            applied: ids.to_vec(),
            skipped: Vec::new(),
        })
    }

    /// Add episodes of a show. An empty episode list adds the whole show.
    ///
    /// # Errors
    ///
    /// Fails without changes if the show or any episode is unknown.
    pub fn add_episodes(
        &mut self,
        catalog: &Catalog,
        show_id: &str,
        episodes: &[String],
    ) -> Result<Change> {
        let show = catalog
            .show(show_id)
            .ok_or_else(|| Error::not_found(format!("Show '{show_id}'")))?;

        let requested: Vec<String> = if episodes.is_empty() {
            show.episodes().cloned().collect()
        } else {
            if let Some(missing) = episodes.iter().find(|e| !show.has_episode(e)) {
                return Err(Error::not_found(format!(
                    "Episode '{missing}' of show '{show_id}'"
                )));
            }
            episodes.to_vec()
        };

        let owned = self.shows.entry(show_id.to_string()).or_default();
        let mut change = Change::default();
        for episode in requested {
            if owned.contains(&episode) {
                change.skipped.push(episode);
            } else {
                owned.push(episode.clone());
                change.applied.push(episode);
            }
        }

        // Keep season order regardless of the order episodes were added in
        let order: Vec<&String> = show.episodes().collect();
        owned.sort_by_key(|e| order.iter().position(|o| *o == e));
        Ok(change)
    }

    /// Remove episodes of a show. An empty episode list removes the whole show.
    ///
    /// # Errors
    ///
    /// Fails without changes if the show or any episode is not in the library.
    pub fn remove_episodes(&mut self, show_id: &str, episodes: &[String]) -> Result<Change> {
        let owned = self
            .shows
            .get_mut(show_id)
            .ok_or_else(|| Error::not_found(format!("Show '{show_id}' in library")))?;

        if episodes.is_empty() {
            let applied = std::mem::take(owned);
            self.shows.remove(show_id);
            return Ok(Change {
                applied,
                skipped: Vec::new(),
            });
        }

        if let Some(missing) = episodes.iter().find(|e| !owned.contains(e)) {
            return Err(Error::not_found(format!(
                "Episode '{missing}' of show '{show_id}' in library"
            )));
        }
        owned.retain(|e| !episodes.contains(e));
        if owned.is_empty() {
            self.shows.remove(show_id);
        }
        Ok(Change {
            applied: episodes.to_vec(),
            skipped: Vec::new(),
        })
    }

    /// Drop movies that are no longer in the catalogue.
    pub fn forget_movies(&mut self, ids: &[String]) {
        self.movies.retain(|m| !ids.contains(&m.id));
    }
}

/// Catalogue plus library: everything commands and completions read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaStore {
    /// Movie and show catalogue
    pub catalog: Catalog,
    /// The user's library
    pub library: UserLibrary,
}

impl MediaStore {
    /// Create a store from a catalogue and library.
    #[must_use]
    pub fn new(catalog: Catalog, library: UserLibrary) -> Self {
        Self { catalog, library }
    }

    /// The built-in catalogue and library.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin(), UserLibrary::builtin())
    }
}

/// Store shared between the session and the line editor's completer.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(Arc<RwLock<MediaStore>>);

impl SharedStore {
    /// Wrap a store for sharing.
    #[must_use]
    pub fn new(store: MediaStore) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// Read access. A poisoned lock still yields the data.
    pub fn read(&self) -> RwLockReadGuard<'_, MediaStore> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access. A poisoned lock still yields the data.
    pub fn write(&self) -> RwLockWriteGuard<'_, MediaStore> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}
