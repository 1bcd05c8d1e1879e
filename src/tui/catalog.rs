//! # Demo Catalog
//!
//! A fixed in-memory media library standing in for the remote server. The
//! core never sees any of this; it only receives focusable elements and
//! locations derived from it.
//!
//! Locations:
//! - `/` lists libraries
//! - `/library/<slug>` lists that library's items

use crate::core::state::HOME_LOCATION;

const LIBRARY_PREFIX: &str = "/library/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileKind {
    /// Opens another location.
    Library(String),
    /// Plays in place.
    Media,
    /// Shown, but not focusable.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: u64,
    pub title: String,
    pub kind: TileKind,
}

struct Library {
    slug: &'static str,
    name: &'static str,
    titles: &'static [&'static str],
}

const LIBRARIES: &[Library] = &[
    Library {
        slug: "movies",
        name: "Movies",
        titles: &[
            "Northern Lights",
            "The Long Harbor",
            "Paper Moons",
            "Glass Orchard",
            "Midnight Ferry",
            "A Quiet Frontier",
            "Salt & Static",
            "Copper Valley",
            "The Lantern Keeper",
            "Seven Small Rooms",
            "Riverbend",
            "Echo Street",
            "Cold Open",
            "The Cartographer",
            "Blue Hour",
            "Ironwood",
            "Second Summer",
            "Far Signal",
            "Wild Geometry",
            "The Last Matinee",
            "Undertow",
            "Harvest Road",
        ],
    },
    Library {
        slug: "shows",
        name: "TV Shows",
        titles: &[
            "Station Eleven Park",
            "Low Tide",
            "The Commons",
            "Night Shift",
            "Orbit",
            "Cedar House",
            "Small Claims",
            "Overland",
            "The Bureau",
            "Fieldwork",
            "Parallel Lines",
            "Downriver",
            "Static Season",
            "Open Water",
        ],
    },
    Library {
        slug: "music",
        name: "Music",
        titles: &[
            "Slow Rivers",
            "Neon Choir",
            "Weathervane",
            "Kites",
            "Porchlight Sessions",
            "Marigold",
            "Tape Hiss",
            "Afterglow",
            "Field Recordings",
        ],
    },
    Library {
        slug: "photos",
        name: "Photos",
        titles: &[],
    },
];

#[derive(Debug, Default)]
pub struct Catalog;

impl Catalog {
    pub fn demo() -> Self {
        Self
    }

    fn library(&self, location: &str) -> Option<(usize, &'static Library)> {
        let slug = location.strip_prefix(LIBRARY_PREFIX)?;
        LIBRARIES.iter().enumerate().find(|(_, lib)| lib.slug == slug)
    }

    /// Tiles shown at `location`, filtered by a case-insensitive `query`.
    pub fn tiles_for(&self, location: &str, query: &str) -> Vec<Tile> {
        let query = query.trim().to_lowercase();
        let matches = |title: &str| query.is_empty() || title.to_lowercase().contains(&query);

        if location == HOME_LOCATION {
            let mut tiles: Vec<Tile> = LIBRARIES
                .iter()
                .enumerate()
                .filter(|(_, lib)| matches(lib.name))
                .map(|(i, lib)| Tile {
                    id: i as u64,
                    title: lib.name.to_string(),
                    kind: TileKind::Library(format!("{LIBRARY_PREFIX}{}", lib.slug)),
                })
                .collect();
            if matches("Live TV") {
                tiles.push(Tile {
                    id: LIBRARIES.len() as u64,
                    title: "Live TV".to_string(),
                    kind: TileKind::Unavailable,
                });
            }
            return tiles;
        }

        let Some((lib_index, library)) = self.library(location) else {
            return Vec::new();
        };
        library
            .titles
            .iter()
            .enumerate()
            .filter(|(_, title)| matches(**title))
            .map(|(i, title)| Tile {
                id: ((lib_index as u64 + 1) << 16) | i as u64,
                title: title.to_string(),
                kind: TileKind::Media,
            })
            .collect()
    }

    /// Human-readable heading for `location`.
    pub fn heading(&self, location: &str) -> String {
        if location == HOME_LOCATION {
            return "Home".to_string();
        }
        match self.library(location) {
            Some((_, library)) => library.name.to_string(),
            None => location.to_string(),
        }
    }
}
