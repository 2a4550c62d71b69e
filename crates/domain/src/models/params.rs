//! Request parameter types used by the operation facade.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::QueryParams;

/// Identifies a project by numeric id or by slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectParam {
    Id(i64),
    Slug(String),
}

impl fmt::Display for ProjectParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

impl From<i64> for ProjectParam {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ProjectParam {
    fn from(raw: &str) -> Self {
        raw.parse::<i64>()
            .map_or_else(|_| Self::Slug(raw.to_string()), Self::Id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySort {
    Magic,
    #[serde(rename = "popularity")]
    Popular,
    Newest,
    #[serde(rename = "end_date")]
    EndingSoon,
}

impl DiscoverySort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Magic => "magic",
            Self::Popular => "popularity",
            Self::Newest => "newest",
            Self::EndingSoon => "end_date",
        }
    }
}

/// Filters for the discovery listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryParams {
    pub sort: Option<DiscoverySort>,
    pub category_id: Option<i64>,
    pub query: Option<String>,
    pub staff_picks: Option<bool>,
    pub starred: Option<bool>,
    pub backed: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl DiscoveryParams {
    /// Encodes the set filters as route parameters.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("sort", self.sort.map(DiscoverySort::as_str))
            .with_opt("category_id", self.category_id)
            .with_opt("term", self.query.clone())
            .with_opt("staff_picks", self.staff_picks)
            .with_opt("starred", self.starred.map(i64::from))
            .with_opt("backed", self.backed.map(i64::from))
            .with_opt("page", self.page)
            .with_opt("per_page", self.per_page)
    }
}
