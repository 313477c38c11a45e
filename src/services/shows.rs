use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Episode, Season, Show, ShowDetails, ShowId},
    services::catalog::CatalogLookup,
};

/// Show search, delegated to the configured catalog
pub async fn search_shows(catalog: Arc<dyn CatalogLookup>, query: &str) -> AppResult<Vec<Show>> {
    catalog.search(query).await
}

/// Show facts plus every episode grouped by season.
///
/// Seasons ascend by number; episodes within a season are ordered by their
/// number. `None` when the catalog does not know the show.
pub async fn get_show_details(
    catalog: Arc<dyn CatalogLookup>,
    show_id: ShowId,
) -> AppResult<Option<ShowDetails>> {
    let Some(show) = catalog.get_by_id(show_id).await? else {
        return Ok(None);
    };

    let episodes = catalog.get_episodes(show_id).await?;
    tracing::debug!(
        show_id = show_id,
        episodes = episodes.len(),
        "Grouping episodes into seasons"
    );

    Ok(Some(ShowDetails {
        show,
        seasons: group_into_seasons(episodes),
    }))
}

fn group_into_seasons(episodes: Vec<Episode>) -> Vec<Season> {
    let mut by_season: BTreeMap<u32, Vec<Episode>> = BTreeMap::new();
    for episode in episodes {
        by_season.entry(episode.season).or_default().push(episode);
    }

    by_season
        .into_iter()
        .map(|(season_number, mut episodes)| {
            // Stable, so specials numbered 0 keep catalog order
            episodes.sort_by_key(|e| e.number);
            Season {
                season_number,
                episodes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::MockCatalogLookup;

    fn episode(id: i64, season: u32, number: u32) -> Episode {
        Episode {
            id,
            show_id: 1,
            season,
            number,
            name: format!("S{}E{}", season, number),
            summary: None,
            airdate: None,
            runtime: None,
        }
    }

    fn show() -> Show {
        Show {
            id: 1,
            name: "Lost".to_string(),
            year: Some(2004),
            poster_url: None,
            summary: None,
            genres: vec![],
        }
    }

    #[test]
    fn test_group_into_seasons_orders_seasons_and_episodes() {
        let seasons = group_into_seasons(vec![
            episode(5, 2, 2),
            episode(1, 1, 1),
            episode(4, 2, 1),
            episode(3, 1, 3),
            episode(2, 1, 2),
        ]);

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season_number, 1);
        let ids: Vec<i64> = seasons[0].episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(seasons[1].season_number, 2);
        let ids: Vec<i64> = seasons[1].episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn test_group_into_seasons_empty() {
        assert!(group_into_seasons(vec![]).is_empty());
    }

    #[tokio::test]
    async fn test_get_show_details() {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_get_by_id().returning(|_| Ok(Some(show())));
        catalog
            .expect_get_episodes()
            .returning(|_| Ok(vec![episode(2, 1, 2), episode(1, 1, 1)]));

        let details = get_show_details(Arc::new(catalog), 1).await.unwrap().unwrap();
        assert_eq!(details.show.name, "Lost");
        assert_eq!(details.seasons.len(), 1);
        assert_eq!(details.seasons[0].episodes[0].id, 1);
    }

    #[tokio::test]
    async fn test_get_show_details_unknown_show() {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_get_by_id().returning(|_| Ok(None));
        catalog.expect_get_episodes().never();

        assert!(get_show_details(Arc::new(catalog), 1).await.unwrap().is_none());
    }
}
