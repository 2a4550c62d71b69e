//! Categories, from both the REST and the GraphQL API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// A category node as the GraphQL schema shapes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<SubcategoryConnection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryConnection {
    #[serde(default)]
    pub nodes: Vec<GraphCategory>,
    #[serde(default)]
    pub total_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCategoriesEnvelope {
    pub root_categories: Vec<GraphCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEnvelope {
    pub node: GraphCategory,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_root_categories() {
        let envelope: RootCategoriesEnvelope = serde_json::from_str(
            r#"{"rootCategories": [{"id": "Q2F0LTE=", "name": "Art",
                "subcategories": {"nodes": [{"id": "Q2F0LTI=", "name": "Painting"}], "totalCount": 1}}]}"#,
        )
        .unwrap();

        let art = &envelope.root_categories[0];
        assert_eq!(art.name, "Art");
        let subcategories = art.subcategories.as_ref().unwrap();
        assert_eq!(subcategories.total_count, 1);
        assert_eq!(subcategories.nodes[0].name, "Painting");
    }
}
