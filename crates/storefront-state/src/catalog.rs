//! Catalog Filters and Pagination
//!
//! [`FilterState`] is the single source of truth for the filter controls and
//! lives in the page URL. [`CategoryPager`] tracks the load-more offset of one
//! category block.

use std::collections::{BTreeSet, HashSet};

use url::form_urlencoded;

use crate::config::{CatalogConfig, Endpoints};
use crate::models::ProductCard;

const CATEGORY: &str = "category";
const COLORS: &str = "colors";
const MEMORY: &str = "built_in_memory";
const FAVORITES: &str = "favorites";
const PAGE: &str = "page";

/// Which multi-select a filter value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Category,
    Color,
    Memory,
}

impl FilterKind {
    pub fn query_key(self) -> &'static str {
        match self {
            Self::Category => CATEGORY,
            Self::Color => COLORS,
            Self::Memory => MEMORY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub categories: BTreeSet<u64>,
    pub colors: BTreeSet<String>,
    pub memory: BTreeSet<String>,
    pub favorites_only: bool,
}

fn is_filter_key(key: &str) -> bool {
    matches!(key, CATEGORY | COLORS | MEMORY | FAVORITES)
}

/// Values of a repeated key; a single comma separated value is split too.
fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|v| !v.is_empty())
}

impl FilterState {
    /// Decode from a query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                CATEGORY => state
                    .categories
                    .extend(split_values(&value).filter_map(|v| v.parse::<u64>().ok())),
                COLORS => state.colors.extend(split_values(&value).map(str::to_string)),
                MEMORY => state.memory.extend(split_values(&value).map(str::to_string)),
                FAVORITES => state.favorites_only = value == "true",
                _ => {}
            }
        }
        state
    }

    /// Filter parameters in a stable order, as used by both the page URL and
    /// the load-more request.
    pub fn filter_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        params.extend(self.categories.iter().map(|id| (CATEGORY, id.to_string())));
        params.extend(self.colors.iter().map(|c| (COLORS, c.clone())));
        params.extend(self.memory.iter().map(|m| (MEMORY, m.clone())));
        if self.favorites_only {
            params.push((FAVORITES, "true".to_string()));
        }
        params
    }

    /// Encode only the filter parameters (no leading `?`).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.filter_params() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Replace the filter parameters inside `current` (a full query string),
    /// keeping foreign keys such as sorting. A present `page` goes back to 1.
    pub fn merge_into_query(&self, current: &str) -> String {
        let current = current.strip_prefix('?').unwrap_or(current);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form_urlencoded::parse(current.as_bytes()) {
            if is_filter_key(&key) {
                continue;
            }
            if key == PAGE {
                serializer.append_pair(PAGE, "1");
            } else {
                serializer.append_pair(&key, &value);
            }
        }
        for (key, value) in self.filter_params() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Where applying these filters leads from a page whose query is `current`.
    pub fn target(&self, current: &str, catalog: &CatalogConfig, ep: &Endpoints) -> FilterTarget {
        let query = self.merge_into_query(current);
        if catalog.filtered_page {
            FilterTarget::Navigate(ep.filtered(&query))
        } else {
            FilterTarget::Reload(query)
        }
    }

    pub fn is_selected(&self, kind: FilterKind, value: &str) -> bool {
        match kind {
            FilterKind::Category => value
                .parse::<u64>()
                .map(|id| self.categories.contains(&id))
                .unwrap_or(false),
            FilterKind::Color => self.colors.contains(value),
            FilterKind::Memory => self.memory.contains(value),
        }
    }

    /// Set or clear one checkbox. Returns whether the state changed.
    pub fn toggle(&mut self, kind: FilterKind, value: &str, checked: bool) -> bool {
        match kind {
            FilterKind::Category => match value.parse::<u64>() {
                Ok(id) if checked => self.categories.insert(id),
                Ok(id) => self.categories.remove(&id),
                Err(_) => false,
            },
            FilterKind::Color => set_membership(&mut self.colors, value, checked),
            FilterKind::Memory => set_membership(&mut self.memory, value, checked),
        }
    }

    pub fn selected_count(&self, kind: FilterKind) -> usize {
        match kind {
            FilterKind::Category => self.categories.len(),
            FilterKind::Color => self.colors.len(),
            FilterKind::Memory => self.memory.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn set_membership(set: &mut BTreeSet<String>, value: &str, checked: bool) -> bool {
    if checked {
        set.insert(value.to_string())
    } else {
        set.remove(value)
    }
}

/// Case-insensitive substring match for the dropdown search box.
pub fn option_matches(label: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || label.to_lowercase().contains(&needle.to_lowercase())
}

/// Dropdown that should be open after clicking `clicked`; at most one is open.
pub fn toggle_dropdown(open: Option<FilterKind>, clicked: FilterKind) -> Option<FilterKind> {
    if open == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// New favorite flag after a toggle response. Servers that return no flag
/// are taken to have flipped the previous value.
pub fn resolve_favorite(previous: bool, reported: Option<bool>) -> bool {
    reported.unwrap_or(!previous)
}

/// Whether a card has to leave the grid after its favorite flag changed.
pub fn should_remove_card(filters: &FilterState, now_favorite: bool) -> bool {
    filters.favorites_only && !now_favorite
}

/// Result of applying the filter controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTarget {
    /// Push this query onto the current page and reload it
    Reload(String),
    /// Open the filtered product listing
    Navigate(String),
}

/// Parameters of one load-more request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub category_id: u64,
    pub skip: usize,
    /// `None` asks for everything after `skip`
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Cards appended; `exhausted` hides the load-more button
    Appended { count: usize, exhausted: bool },
    /// Nothing more on the server
    NoMore,
}

/// Load-more state of one category block
#[derive(Debug, Clone)]
pub struct CategoryPager {
    category_id: u64,
    initial_visible: usize,
    page_size: usize,
    skip: usize,
    initial_ids: HashSet<u64>,
    /// Server-rendered cards removed since the page loaded
    removed_initial: usize,
    appended: Vec<ProductCard>,
    loading: bool,
    exhausted: bool,
    initially_exhausted: bool,
}

impl CategoryPager {
    /// `initial_ids` are the cards the server already rendered.
    pub fn new(
        category_id: u64,
        initial_ids: impl IntoIterator<Item = u64>,
        initial_visible: usize,
        page_size: usize,
    ) -> Self {
        let initial_ids: HashSet<u64> = initial_ids.into_iter().collect();
        // Fewer cards than a full first screen means there is nothing to load
        let exhausted = initial_ids.len() < initial_visible;
        Self {
            category_id,
            initial_visible,
            page_size: page_size.max(1),
            skip: initial_visible,
            initial_ids,
            removed_initial: 0,
            appended: Vec::new(),
            loading: false,
            exhausted,
            initially_exhausted: exhausted,
        }
    }

    pub fn category_id(&self) -> u64 {
        self.category_id
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn appended(&self) -> &[ProductCard] {
        &self.appended
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_load_more(&self) -> bool {
        !self.exhausted && !self.loading
    }

    pub fn can_collapse(&self) -> bool {
        !self.appended.is_empty()
    }

    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        self.begin(Some(self.page_size))
    }

    /// Request all remaining cards of the category in one go.
    pub fn begin_load_rest(&mut self) -> Option<LoadRequest> {
        self.begin(None)
    }

    fn begin(&mut self, limit: Option<usize>) -> Option<LoadRequest> {
        if !self.can_load_more() {
            return None;
        }
        self.loading = true;
        Some(LoadRequest {
            category_id: self.category_id,
            skip: self.skip,
            limit,
        })
    }

    pub fn apply(&mut self, req: LoadRequest, items: Vec<ProductCard>) -> LoadOutcome {
        self.loading = false;
        let received = items.len();
        self.skip += received;
        if !req.limit.is_some_and(|limit| received >= limit) {
            self.exhausted = true;
        }
        if received == 0 {
            return LoadOutcome::NoMore;
        }
        let before = self.appended.len();
        for card in items {
            let shown = self.initial_ids.contains(&card.id)
                || self.appended.iter().any(|c| c.id == card.id);
            if !shown {
                self.appended.push(card);
            }
        }
        LoadOutcome::Appended {
            count: self.appended.len() - before,
            exhausted: self.exhausted,
        }
    }

    /// Request failed; the button becomes usable again.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Drop appended cards and restart from the initial offset.
    pub fn collapse(&mut self) {
        self.appended.clear();
        self.skip = self.initial_visible.saturating_sub(self.removed_initial);
        self.exhausted = self.initially_exhausted;
        self.loading = false;
    }

    /// Remove a card, e.g. after it was un-favorited in favorites-only mode.
    ///
    /// The server-side list shrinks by one as well, so the offset of the
    /// next load moves back to keep the following product in view.
    pub fn remove(&mut self, product_id: u64) {
        let before = self.appended.len();
        self.appended.retain(|c| c.id != product_id);
        let was_shown = if self.appended.len() < before {
            true
        } else if self.initial_ids.remove(&product_id) {
            self.removed_initial += 1;
            true
        } else {
            false
        };
        if was_shown {
            self.skip = self.skip.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64) -> ProductCard {
        ProductCard {
            id,
            name: format!("p{}", id),
            price: None,
            stock: 1,
            image_urls: vec![],
            favorite: false,
        }
    }

    #[test]
    fn test_decode_repeated_and_comma_values() {
        let f = FilterState::from_query("?category=2&category=5&colors=black,white&built_in_memory=128+GB&favorites=true");
        assert_eq!(f.categories, BTreeSet::from([2, 5]));
        assert_eq!(f.colors.len(), 2);
        assert!(f.memory.contains("128 GB"));
        assert!(f.favorites_only);
    }

    #[test]
    fn test_round_trip() {
        let mut f = FilterState::default();
        f.toggle(FilterKind::Category, "3", true);
        f.toggle(FilterKind::Color, "Space Gray", true);
        f.toggle(FilterKind::Memory, "1 TB", true);
        f.favorites_only = true;
        assert_eq!(FilterState::from_query(&f.to_query()), f);
        assert_eq!(FilterState::from_query(""), FilterState::default());
    }

    #[test]
    fn test_merge_keeps_foreign_keys_and_resets_page() {
        let mut f = FilterState::default();
        f.toggle(FilterKind::Color, "red", true);
        let merged = f.merge_into_query("?sort_by=price&colors=blue&page=4");
        assert_eq!(merged, "sort_by=price&page=1&colors=red");
    }

    #[test]
    fn test_toggle_reports_change() {
        let mut f = FilterState::default();
        assert!(f.toggle(FilterKind::Memory, "64 GB", true));
        assert!(!f.toggle(FilterKind::Memory, "64 GB", true));
        assert!(f.toggle(FilterKind::Memory, "64 GB", false));
        assert!(!f.toggle(FilterKind::Category, "abc", true));
        assert!(f.is_empty());
    }

    #[test]
    fn test_option_search_ignores_case() {
        assert!(option_matches("Смартфоны", "смарт"));
        assert!(option_matches("Black", ""));
        assert!(!option_matches("Black", "white"));
    }

    #[test]
    fn test_single_open_dropdown() {
        let open = toggle_dropdown(None, FilterKind::Color);
        assert_eq!(open, Some(FilterKind::Color));
        assert_eq!(toggle_dropdown(open, FilterKind::Memory), Some(FilterKind::Memory));
        assert_eq!(toggle_dropdown(Some(FilterKind::Memory), FilterKind::Memory), None);
    }

    #[test]
    fn test_favorite_resolution() {
        assert!(resolve_favorite(false, None));
        assert!(!resolve_favorite(false, Some(false)));
        let mut f = FilterState::default();
        assert!(!should_remove_card(&f, false));
        f.favorites_only = true;
        assert!(should_remove_card(&f, false));
    }

    #[test]
    fn test_pager_advances_by_received() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        let req = pager.begin_load().unwrap();
        assert_eq!(req.skip, 6);
        assert!(pager.begin_load().is_none());
        let outcome = pager.apply(req, (7..=12).map(card).collect());
        assert_eq!(outcome, LoadOutcome::Appended { count: 6, exhausted: false });
        assert_eq!(pager.skip(), 12);

        let req = pager.begin_load().unwrap();
        let outcome = pager.apply(req, (13..=14).map(card).collect());
        assert_eq!(outcome, LoadOutcome::Appended { count: 2, exhausted: true });
        assert!(!pager.can_load_more());
    }

    #[test]
    fn test_pager_skips_already_shown() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 3);
        let req = pager.begin_load().unwrap();
        let outcome = pager.apply(req, vec![card(6), card(7), card(8)]);
        assert_eq!(outcome, LoadOutcome::Appended { count: 2, exhausted: false });
        assert_eq!(pager.skip(), 9);
    }

    #[test]
    fn test_pager_empty_response() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        let req = pager.begin_load().unwrap();
        assert_eq!(pager.apply(req, vec![]), LoadOutcome::NoMore);
        assert!(!pager.can_load_more());
    }

    #[test]
    fn test_collapse_resets_to_initial_visible() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        let req = pager.begin_load().unwrap();
        pager.apply(req, (7..=8).map(card).collect());
        assert!(pager.can_collapse());
        pager.collapse();
        assert_eq!(pager.skip(), 6);
        assert!(pager.appended().is_empty());
        assert!(pager.can_load_more());
    }

    #[test]
    fn test_short_initial_grid_has_nothing_to_load() {
        let pager = CategoryPager::new(1, 1..=4, 6, 6);
        assert!(!pager.can_load_more());
    }

    #[test]
    fn test_removed_card_moves_offset_back() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        let req = pager.begin_load().unwrap();
        pager.apply(req, (7..=12).map(card).collect());
        assert_eq!(pager.skip(), 12);

        pager.remove(9);
        assert_eq!(pager.appended().len(), 5);
        assert_eq!(pager.begin_load().map(|r| r.skip), Some(11));
    }

    #[test]
    fn test_removing_unknown_card_keeps_offset() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        pager.remove(42);
        assert_eq!(pager.skip(), 6);
    }

    #[test]
    fn test_collapse_after_removal_can_load_again() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        pager.remove(3);
        assert_eq!(pager.skip(), 5);
        let req = pager.begin_load().unwrap();
        assert_eq!(req.skip, 5);
        pager.apply(req, (7..=12).map(card).collect());

        pager.collapse();
        assert!(pager.can_load_more());
        assert_eq!(pager.skip(), 5);
    }

    #[test]
    fn test_favorites_grid_marks_cards_active() {
        let plain = card(1);
        assert!(!plain.favorite_shown(false));
        assert!(plain.favorite_shown(true));
        let parsed: ProductCard =
            serde_json::from_str(r#"{"id":2,"name":"p","is_favorite":true}"#).unwrap();
        assert!(parsed.favorite_shown(false));

        let filters = FilterState { favorites_only: true, ..FilterState::default() };
        let now = resolve_favorite(plain.favorite_shown(filters.favorites_only), None);
        assert!(!now);
        assert!(should_remove_card(&filters, now));
    }

    #[test]
    fn test_load_rest_exhausts_category() {
        let mut pager = CategoryPager::new(4, 1..=6, 6, 6);
        let req = pager.begin_load_rest().unwrap();
        assert_eq!(req, LoadRequest { category_id: 4, skip: 6, limit: None });
        let outcome = pager.apply(req, (7..=20).map(card).collect());
        assert_eq!(outcome, LoadOutcome::Appended { count: 14, exhausted: true });
        assert!(!pager.can_load_more());
        pager.collapse();
        assert!(pager.can_load_more());
    }

    #[test]
    fn test_filter_target_follows_config() {
        let mut f = FilterState::default();
        f.toggle(FilterKind::Color, "red", true);
        let ep = Endpoints::default();
        let mut catalog = CatalogConfig::default();
        assert_eq!(
            f.target("?page=3", &catalog, &ep),
            FilterTarget::Reload("page=1&colors=red".into())
        );
        catalog.filtered_page = true;
        assert_eq!(
            f.target("?page=3", &catalog, &ep),
            FilterTarget::Navigate("/products/filtered?page=1&colors=red".into())
        );
    }

    #[test]
    fn test_failure_reenables_button() {
        let mut pager = CategoryPager::new(1, 1..=6, 6, 6);
        pager.begin_load();
        pager.fail();
        assert!(pager.can_load_more());
        assert_eq!(pager.skip(), 6);
    }
}
