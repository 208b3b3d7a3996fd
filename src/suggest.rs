//! Viewing suggestions constrained by duration.

use std::fmt;

use crate::catalog::MediaKind;
use crate::library::MediaStore;
use crate::{Error, Result};

/// Duration constraint in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationConstraint {
    /// Single value: maximum duration
    Max(u32),
    /// Two values: inclusive range
    Range(u32, u32),
}

impl DurationConstraint {
    /// Build a constraint from the values given to one `--duration` flag.
    ///
    /// # Errors
    ///
    /// Returns an error for zero or more than two values, or a range whose
    /// lower bound exceeds its upper bound.
    pub fn from_values(values: &[u32]) -> Result<Self> {
        match *values {
            [max] => Ok(Self::Max(max)),
            [min, max] if min <= max => Ok(Self::Range(min, max)),
            [min, max] => Err(Error::invalid_argument(format!(
                "Duration range {min}..{max} is empty"
            ))),
            _ => Err(Error::invalid_argument(format!(
                "--duration takes one or two values, got {}",
                values.len()
            ))),
        }
    }

    /// Whether `minutes` satisfies the constraint.
    #[must_use]
    pub fn allows(&self, minutes: u32) -> bool {
        match *self {
            Self::Max(max) => minutes <= max,
            Self::Range(min, max) => (min..=max).contains(&minutes),
        }
    }
}

impl fmt::Display for DurationConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max(max) => write!(f, "at most {max} min"),
            Self::Range(min, max) => write!(f, "{min}-{max} min"),
        }
    }
}

/// One suggested title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Catalogue id
    pub id: String,
    /// Display title
    pub title: String,
    /// Runtime (movies) or episode runtime (shows) in minutes, if known
    pub minutes: Option<u32>,
}

/// Titles of `kind` not yet in the library that satisfy every constraint,
/// in catalogue order.
///
/// A title with an unknown runtime only fits when there are no constraints.
#[must_use]
pub fn suggest(
    store: &MediaStore,
    kind: MediaKind,
    constraints: &[DurationConstraint],
) -> Vec<Suggestion> {
    let fits = |minutes: Option<u32>| match minutes {
        Some(minutes) => constraints.iter().all(|c| c.allows(minutes)),
        None => constraints.is_empty(),
    };

    match kind {
        MediaKind::Movie => store
            .catalog
            .movies
            .iter()
            .filter(|m| !store.library.owns_movie(&m.id) && fits(m.runtime))
            .map(|m| Suggestion {
                id: m.id.clone(),
                title: m.title.clone(),
                minutes: m.runtime,
            })
            .collect(),
        MediaKind::Show => store
            .catalog
            .shows
            .iter()
            .filter(|s| !store.library.shows().contains_key(&s.id) && fits(s.episode_runtime))
            .map(|s| Suggestion {
                id: s.id.clone(),
                title: s.title.clone(),
                minutes: s.episode_runtime,
            })
            .collect(),
    }
}
