//! Project updates and drafts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub sequence: i64,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDraft {
    pub update: Update,
    #[serde(default)]
    pub images: Vec<UpdateDraftImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<UpdateDraftVideo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDraftImage {
    pub id: i64,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub full: String,
}

/// A video attached to a draft; `status` moves from `processing` to
/// `successful` or `failed` once the upload is transcoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDraftVideo {
    pub id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub frame: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_decodes() {
        let draft: UpdateDraft = serde_json::from_str(
            r#"{"update": {"id": 3, "project_id": 7, "title": "Shipping soon"},
                "images": [{"id": 1, "thumb": "t.jpg", "full": "f.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(draft.update.project_id, 7);
        assert!(!draft.update.is_public);
        assert_eq!(draft.images.len(), 1);
        assert!(draft.video.is_none());
    }

    #[test]
    fn test_draft_with_video() {
        let draft: UpdateDraft = serde_json::from_str(
            r#"{"update": {"id": 3, "project_id": 7},
                "video": {"id": 9, "status": "processing", "frame": "frame.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(draft.video.map(|v| v.status), Some("processing".to_string()));
    }
}
