//! Media catalogue: movies, shows and their console listings.
//!
//! The catalogue is plain in-memory data. The built-in fixture is used unless
//! a JSON catalogue is supplied on the command line.

mod fixtures;

use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use fixtures::{ACTORS, DIRECTORS, MOVIE_RATINGS, SHOW_RATINGS};

const RULE: &str = "-----------------------------";

/// Kind of media a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film
    Movie,
    /// Episodic show
    Show,
}

impl MediaKind {
    /// Names accepted on the command line.
    pub const NAMES: &'static [&'static str] = &["movie", "show"];

    /// Command-line name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "movie" => Ok(Self::Movie),
            "show" => Ok(Self::Show),
            other => Err(Error::invalid_argument(format!(
                "Unknown media type: '{other}'. Use: movie, show"
            ))),
        }
    }
}

/// A movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalogue identifier, e.g. `SW_EP04`
    pub id: String,
    /// Display title
    pub title: String,
    /// MPAA rating
    pub rating: String,
    /// Director names
    pub directors: Vec<String>,
    /// Cast
    pub actors: Vec<String>,
    /// Runtime in minutes, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
}

/// A show record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Catalogue identifier, e.g. `SW_REB`
    pub id: String,
    /// Display title
    pub title: String,
    /// TV rating
    pub rating: String,
    /// Typical episode runtime in minutes, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_runtime: Option<u32>,
    /// Episode identifiers keyed by season number
    pub seasons: BTreeMap<u32, Vec<String>>,
}

impl Show {
    /// All episode identifiers in season order.
    pub fn episodes(&self) -> impl Iterator<Item = &String> {
        self.seasons.values().flatten()
    }

    /// Whether the show has an episode with this identifier.
    #[must_use]
    pub fn has_episode(&self, episode: &str) -> bool {
        self.episodes().any(|e| e == episode)
    }
}

/// Filter applied by `movies list`.
///
/// Every populated field must match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Any of these ratings
    pub ratings: Vec<String>,
    /// Case-insensitive director name
    pub director: Option<String>,
    /// All of these actors must be in the cast
    pub actors: Vec<String>,
}

impl MovieFilter {
    /// Whether the filter has no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.ratings.is_empty()
            && self.director.is_none()
            && self.actors.is_empty()
    }

    /// Whether `movie` satisfies the filter.
    #[must_use]
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(title) = &self.title {
            if !movie.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if !self.ratings.is_empty() && !self.ratings.iter().any(|r| *r == movie.rating) {
            return false;
        }
        if let Some(director) = &self.director {
            if !movie
                .directors
                .iter()
                .any(|d| d.eq_ignore_ascii_case(director))
            {
                return false;
            }
        }
        self.actors
            .iter()
            .all(|actor| movie.actors.iter().any(|a| a.eq_ignore_ascii_case(actor)))
    }
}

/// A movie to be added to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    /// Display title
    pub title: String,
    /// MPAA rating
    pub rating: String,
    /// One or two directors
    pub directors: Vec<String>,
    /// Cast, possibly empty
    pub actors: Vec<String>,
    /// Runtime in minutes, if known
    pub runtime: Option<u32>,
}

/// In-memory movie and show catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Movies in insertion order
    pub movies: Vec<Movie>,
    /// Shows in insertion order
    pub shows: Vec<Show>,
}

impl Catalog {
    /// The built-in fixture catalogue.
    #[must_use]
    pub fn builtin() -> Self {
        fixtures::builtin()
    }

    /// Parse a catalogue from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate ids.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalogue.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json_str(&json)
    }

    /// Serialize the catalogue as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.movies.iter().map(|m| &m.id).chain(self.shows.iter().map(|s| &s.id)) {
            if !seen.insert(id.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "Duplicate catalogue id: '{id}'"
                )));
            }
        }
        Ok(())
    }

    /// Look up a movie by id.
    #[must_use]
    pub fn movie(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Look up a show by id.
    #[must_use]
    pub fn show(&self, id: &str) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == id)
    }

    /// All movie ids in catalogue order.
    #[must_use]
    pub fn movie_ids(&self) -> Vec<String> {
        self.movies.iter().map(|m| m.id.clone()).collect()
    }

    /// All show ids in catalogue order.
    #[must_use]
    pub fn show_ids(&self) -> Vec<String> {
        self.shows.iter().map(|s| s.id.clone()).collect()
    }

    /// Known actor names: the fixture list followed by any other cast member.
    #[must_use]
    pub fn actors(&self) -> Vec<String> {
        let extra = self.movies.iter().flat_map(|m| m.actors.iter().map(String::as_str));
        unique(ACTORS.iter().copied().chain(extra))
    }

    /// Known director names: the fixture list followed by any other director.
    #[must_use]
    pub fn directors(&self) -> Vec<String> {
        let extra = self
            .movies
            .iter()
            .flat_map(|m| m.directors.iter().map(String::as_str));
        unique(DIRECTORS.iter().copied().chain(extra))
    }

    /// Movies matching `filter`, in catalogue order.
    #[must_use]
    pub fn filter_movies(&self, filter: &MovieFilter) -> Vec<&Movie> {
        self.movies.iter().filter(|m| filter.matches(m)).collect()
    }

    /// Add a movie and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank, the rating is unknown or the
    /// director count is not one or two.
    pub fn add_movie(&mut self, movie: NewMovie) -> Result<String> {
        if movie.title.trim().is_empty() {
            return Err(Error::invalid_argument("Movie title cannot be empty"));
        }
        if !MOVIE_RATINGS.contains(&movie.rating.as_str()) {
            return Err(Error::invalid_argument(format!(
                "Unknown rating: '{}'. Use: {}",
                movie.rating,
                MOVIE_RATINGS.join(", ")
            )));
        }
        if !(1..=2).contains(&movie.directors.len()) {
            return Err(Error::invalid_argument(
                "A movie takes one or two directors",
            ));
        }

        let id = self.unused_id(&movie_id_from_title(&movie.title));
        self.movies.push(Movie {
            id: id.clone(),
            title: movie.title,
            rating: movie.rating,
            directors: movie.directors,
            actors: movie.actors,
            runtime: movie.runtime,
        });
        Ok(id)
    }

    /// Remove movies by id, returning the removed records.
    ///
    /// Nothing is removed unless every id exists.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown id.
    pub fn remove_movies(&mut self, ids: &[String]) -> Result<Vec<Movie>> {
        if let Some(missing) = ids.iter().find(|id| self.movie(id).is_none()) {
            return Err(Error::not_found(format!("Movie '{missing}'")));
        }
        let (removed, kept): (Vec<Movie>, Vec<Movie>) = std::mem::take(&mut self.movies)
            .into_iter()
            .partition(|m| ids.contains(&m.id));
        self.movies = kept;
        Ok(removed)
    }

    fn unused_id(&self, base: &str) -> String {
        let taken = |id: &str| self.movie(id).is_some() || self.show(id).is_some();
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

fn unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|n| seen.insert(*n))
        .map(str::to_string)
        .collect()
}

/// Derive a catalogue id from a title: `"A New Hope"` becomes `A_NEW_HOPE`.
#[must_use]
pub fn movie_id_from_title(title: &str) -> String {
    let words: Vec<String> = title
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_uppercase())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        "MOVIE".to_string()
    } else {
        words.join("_")
    }
}

/// Render a movie listing block.
#[must_use]
pub fn render_movie(movie: &Movie) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}   ID: {}", movie.rating, movie.id);
    let _ = writeln!(out, "Director: {}", movie.directors.join(", "));
    let _ = writeln!(out, "Cast:");
    let _ = writeln!(out, "    {}", movie.actors.join("\n    "));
    out.push_str("\n\n");
    out
}

/// Render a show listing block with its seasons.
#[must_use]
pub fn render_show(show: &Show) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", show.title);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}   ID: {}", show.rating, show.id);
    for (season, episodes) in &show.seasons {
        let _ = writeln!(out, "  Season {season}:");
        let _ = writeln!(out, "    {}", episodes.join("\n    "));
    }
    out.push('\n');
    out
}
