use serde::{Deserialize, Serialize};

/// TVMaze show identifier
pub type ShowId = i64;

/// TVMaze episode identifier
pub type EpisodeId = i64;

/// Show facts as resolved from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    /// HTML-bearing summary as delivered by the catalog
    pub summary: Option<String>,
    pub genres: Vec<String>,
}

/// Episode facts. `season` and `number` are only unique within one show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub id: EpisodeId,
    pub show_id: ShowId,
    pub season: u32,
    pub number: u32,
    pub name: String,
    pub summary: Option<String>,
    pub airdate: Option<String>,
    pub runtime: Option<u32>,
}

/// One season of a show with its episodes ordered by number
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Season {
    pub season_number: u32,
    pub episodes: Vec<Episode>,
}

/// Show facts plus its episodes grouped by season
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowDetails {
    #[serde(flatten)]
    pub show: Show,
    pub seasons: Vec<Season>,
}

// ============================================================================
// TVMaze API Types
// ============================================================================

/// Entry of `GET /search/shows`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchResult {
    #[serde(default)]
    #[allow(dead_code)]
    pub score: Option<f64>,
    pub show: ApiShow,
}

/// Raw show payload from `GET /shows/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiShow {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub image: Option<ApiImage>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Raw episode payload from `GET /shows/{id}/episodes`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEpisode {
    pub id: EpisodeId,
    pub season: u32,
    /// Specials carry no number
    #[serde(default)]
    pub number: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub airdate: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
}

impl ApiShow {
    fn year(&self) -> Option<i32> {
        self.premiered
            .as_deref()
            .and_then(|premiered| premiered.get(..4))
            .and_then(|year| year.parse().ok())
    }

    /// Converts a search hit, which only exposes the medium poster
    pub fn into_search_show(self) -> Show {
        let year = self.year();
        let poster_url = self.image.and_then(|image| image.medium);

        Show {
            id: self.id,
            name: self.name,
            year,
            poster_url,
            summary: self.summary,
            genres: self.genres,
        }
    }
}

impl From<ApiShow> for Show {
    fn from(show: ApiShow) -> Self {
        let year = show.year();
        // Prefer the full-size poster on detail lookups
        let poster_url = show
            .image
            .and_then(|image| image.original.or(image.medium));

        Show {
            id: show.id,
            name: show.name,
            year,
            poster_url,
            summary: show.summary,
            genres: show.genres,
        }
    }
}

impl ApiEpisode {
    pub fn into_episode(self, show_id: ShowId) -> Episode {
        Episode {
            id: self.id,
            show_id,
            season: self.season,
            number: self.number.unwrap_or(0),
            name: self.name,
            summary: self.summary,
            airdate: self.airdate,
            runtime: self.runtime,
        }
    }
}
