use super::models::StacItem;

/// Rank used for items without a usable cloud cover value
pub const MISSING_CLOUD_COVER: f64 = 100.0;

/// Cloud cover used for ranking; missing or non-finite values rank worst
pub fn ranking_cloud_cover(item: &StacItem) -> f64 {
    match item.properties.cloud_cover {
        Some(c) if c.is_finite() => c,
        _ => MISSING_CLOUD_COVER,
    }
}

/// Picks the least cloudy item, the first one encountered on ties
pub fn select_best(items: &[StacItem]) -> Option<&StacItem> {
    let mut best: Option<(&StacItem, f64)> = None;

    for item in items {
        let cover = ranking_cloud_cover(item);
        match best {
            Some((_, best_cover)) if cover >= best_cover => {}
            _ => best = Some((item, cover)),
        }
    }

    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stac::models::ItemProperties;
    use std::collections::HashMap;

    fn item(id: &str, cloud_cover: Option<f64>) -> StacItem {
        StacItem {
            id: id.to_string(),
            properties: ItemProperties { datetime: None, cloud_cover },
            assets: HashMap::new(),
        }
    }

    #[test]
    fn test_first_of_tied_minimum_wins() {
        let items = vec![
            item("a", Some(22.1)),
            item("b", Some(5.4)),
            item("c", Some(5.4)),
            item("d", Some(30.0)),
        ];
        assert_eq!(select_best(&items).unwrap().id, "b");
    }

    #[test]
    fn test_empty() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn test_missing_cloud_cover_ranks_worst() {
        let items = vec![item("a", None), item("b", Some(99.9))];
        assert_eq!(select_best(&items).unwrap().id, "b");
    }

    #[test]
    fn test_all_missing_picks_first() {
        let items = vec![item("a", None), item("b", None)];
        assert_eq!(select_best(&items).unwrap().id, "a");
    }

    #[test]
    fn test_missing_ties_with_explicit_hundred() {
        let items = vec![item("a", Some(100.0)), item("b", None)];
        assert_eq!(select_best(&items).unwrap().id, "a");
    }

    #[test]
    fn test_nan_ranks_as_missing() {
        let items = vec![item("a", Some(f64::NAN)), item("b", Some(14.0))];
        assert_eq!(select_best(&items).unwrap().id, "b");
        assert_eq!(ranking_cloud_cover(&items[0]), MISSING_CLOUD_COVER);
    }
}
