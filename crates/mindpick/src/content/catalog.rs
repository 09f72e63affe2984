use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bucket that lists every item regardless of category.
pub const ALL_CATEGORY: &str = "all";
/// Bucket counted for items without a category.
pub const UNCATEGORIZED: &str = "etc";

/// Contents of `catalog.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|category| !category.is_empty())
    }

    fn haystack(&self) -> String {
        [
            self.title.as_deref(),
            self.subtitle.as_deref(),
            self.category.as_deref(),
            self.badge.as_deref(),
            self.author.as_deref(),
            Some(self.slug.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// Every whitespace-separated token occurs somewhere in the item's text.
    pub fn matches(&self, tokens: &[String]) -> bool {
        if tokens.is_empty() {
            return true;
        }
        let haystack = self.haystack();
        tokens.iter().all(|token| haystack.contains(token.as_str()))
    }
}

/// Search text and category filter, as accepted by the catalog endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogQuery {
    pub fn tokens(&self) -> Vec<String> {
        self.q
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogListing {
    pub categories: Vec<CategoryCount>,
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// Declared categories, else distinct item categories in first-seen order,
    /// always led by [`ALL_CATEGORY`].
    pub fn category_names(&self) -> Vec<String> {
        let mut names = vec![ALL_CATEGORY.to_string()];
        if self.categories.is_empty() {
            for category in self.items.iter().filter_map(CatalogItem::category) {
                if !names[1..].iter().any(|name| name == category) {
                    names.push(category.to_string());
                }
            }
        } else {
            names.extend(self.categories.iter().cloned());
        }
        names
    }

    /// Search-filtered items with per-category counts, narrowed to the
    /// requested category unless it is [`ALL_CATEGORY`].
    pub fn search(&self, query: &CatalogQuery) -> CatalogListing {
        let tokens = query.tokens();
        let found: Vec<&CatalogItem> = self.items.iter().filter(|item| item.matches(&tokens)).collect();

        let mut categories: Vec<CategoryCount> = self
            .category_names()
            .into_iter()
            .map(|name| CategoryCount { name, count: 0 })
            .collect();
        if let Some(all) = categories.first_mut() {
            all.count = found.len();
        }
        for item in &found {
            let name = item.category().unwrap_or(UNCATEGORIZED);
            match categories[1..].iter_mut().find(|bucket| bucket.name == name) {
                Some(bucket) => bucket.count += 1,
                None => categories.push(CategoryCount {
                    name: name.to_string(),
                    count: 1,
                }),
            }
        }

        let selected = query
            .category
            .as_deref()
            .filter(|category| !category.is_empty() && *category != ALL_CATEGORY);
        let items = found
            .into_iter()
            .filter(|item| selected.map_or(true, |category| item.category.as_deref() == Some(category)))
            .cloned()
            .collect();

        CatalogListing { categories, items }
    }
}
