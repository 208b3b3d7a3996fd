//! Built-in catalogue used when no `--catalog` file is given.

use std::collections::BTreeMap;

use super::{Catalog, Movie, Show};

/// Actor names offered by the actor completion query.
pub const ACTORS: &[&str] = &[
    "Mark Hamill",
    "Harrison Ford",
    "Carrie Fisher",
    "Alec Guinness",
    "Peter Mayhew",
    "Anthony Daniels",
    "Adam Driver",
    "Daisy Ridley",
    "John Boyega",
    "Oscar Isaac",
    "Lupita Nyong'o",
    "Andy Serkis",
    "Liam Neeson",
    "Ewan McGregor",
    "Natalie Portman",
    "Jake Lloyd",
    "Hayden Christensen",
    "Christopher Lee",
];

/// Directors offered as a static completion list.
pub const DIRECTORS: &[&str] = &[
    "J. J. Abrams",
    "Irvin Kershner",
    "George Lucas",
    "Richard Marquand",
    "Rian Johnson",
    "Gareth Edwards",
];

/// Movie rating choices.
pub const MOVIE_RATINGS: &[&str] = &["G", "PG", "PG-13", "R", "NC-17"];

/// Show rating choices.
pub const SHOW_RATINGS: &[&str] = &["TV-Y", "TV-Y7", "TV-G", "TV-PG", "TV-14", "TV-MA"];

const ORIGINAL_CAST: &[&str] = &[
    "Mark Hamill",
    "Harrison Ford",
    "Carrie Fisher",
    "Alec Guinness",
    "Peter Mayhew",
    "Anthony Daniels",
];

fn movie(
    id: &str,
    title: &str,
    rating: &str,
    directors: &[&str],
    actors: &[&str],
    runtime: u32,
) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        rating: rating.to_string(),
        directors: directors.iter().map(|d| (*d).to_string()).collect(),
        actors: actors.iter().map(|a| (*a).to_string()).collect(),
        runtime: Some(runtime),
    }
}

fn two_season_show(id: &str, title: &str, rating: &str, episode_runtime: u32) -> Show {
    let mut seasons = BTreeMap::new();
    for season in 1..=2u32 {
        let episodes = (1..=3u32)
            .map(|ep| format!("S{season:02}E{ep:02}"))
            .collect();
        seasons.insert(season, episodes);
    }
    Show {
        id: id.to_string(),
        title: title.to_string(),
        rating: rating.to_string(),
        episode_runtime: Some(episode_runtime),
        seasons,
    }
}

pub(super) fn builtin() -> Catalog {
    let movies = vec![
        movie(
            "SW_EP04",
            "Star Wars: Episode IV - A New Hope",
            "PG",
            &["George Lucas"],
            ORIGINAL_CAST,
            121,
        ),
        movie(
            "SW_EP05",
            "Star Wars: Episode V - The Empire Strikes Back",
            "PG",
            &["Irvin Kershner"],
            ORIGINAL_CAST,
            124,
        ),
        movie(
            "SW_EP06",
            "Star Wars: Episode VI - Return of the Jedi",
            "PG",
            &["Richard Marquand"],
            ORIGINAL_CAST,
            131,
        ),
        movie(
            "SW_EP01",
            "Star Wars: Episode I - The Phantom Menace",
            "PG",
            &["George Lucas"],
            &["Liam Neeson", "Ewan McGregor", "Natalie Portman", "Jake Lloyd"],
            136,
        ),
        movie(
            "SW_EP02",
            "Star Wars: Episode II - Attack of the Clones",
            "PG",
            &["George Lucas"],
            &[
                "Liam Neeson",
                "Ewan McGregor",
                "Natalie Portman",
                "Hayden Christensen",
                "Christopher Lee",
            ],
            142,
        ),
        movie(
            "SW_EP03",
            "Star Wars: Episode III - Revenge of the Sith",
            "PG-13",
            &["George Lucas"],
            &[
                "Liam Neeson",
                "Ewan McGregor",
                "Natalie Portman",
                "Hayden Christensen",
            ],
            140,
        ),
        movie(
            "ROGUE1",
            "Rogue One: A Star Wars Story",
            "PG-13",
            &["Gareth Edwards"],
            &["Felicity Jones", "Diego Luna", "Alan Tudyk", "Donnie Yen"],
            133,
        ),
        movie(
            "SW_EP07",
            "Star Wars: Episode VII - The Force Awakens",
            "PG-13",
            &["J. J. Abrams"],
            &[
                "Harrison Ford",
                "Mark Hamill",
                "Carrie Fisher",
                "Adam Driver",
                "Daisy Ridley",
                "John Boyega",
                "Oscar Isaac",
                "Lupita Nyong'o",
                "Andy Serkis",
            ],
            138,
        ),
        movie(
            "SW_EP08",
            "Star Wars: Episode VIII - The Last Jedi",
            "PG-13",
            &["Rian Johnson"],
            &[
                "Mark Hamill",
                "Carrie Fisher",
                "Adam Driver",
                "Daisy Ridley",
                "John Boyega",
                "Oscar Isaac",
                "Andy Serkis",
            ],
            152,
        ),
        movie(
            "SW_EP09",
            "Star Wars: Episode IX - The Rise of Skywalker",
            "PG-13",
            &["J. J. Abrams"],
            &[
                "Carrie Fisher",
                "Mark Hamill",
                "Adam Driver",
                "Daisy Ridley",
                "John Boyega",
                "Oscar Isaac",
                "Anthony Daniels",
            ],
            142,
        ),
    ];

    let shows = vec![
        two_season_show("SW_CW", "Star Wars: Clone Wars", "TV-Y7", 12),
        two_season_show("SW_TCW", "Star Wars: The Clone Wars", "TV-PG", 22),
        two_season_show("SW_REB", "Star Wars: Rebels", "TV-Y7", 22),
    ];

    Catalog { movies, shows }
}
