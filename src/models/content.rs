//! Documents served by the content API
//!
//! These types double as the validation boundary: a body that parses as JSON
//! but lacks a required field fails to deserialize instead of yielding a
//! half-populated value.

use serde::{Deserialize, Serialize};

/// Site menu and metadata from `GET /mobile-api`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    pub menu: Vec<MenuItem>,
    /// Free-form site metadata (name, theme, links)
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

/// A top-level menu entry pointing at a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub uuid: String,
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A page document from `GET /mobile-api/page/{uuid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub page_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Child pages of a collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PageSummary>>,
    /// Raw HTML body, rendered by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioMeta>,
}

/// A child entry listed inside a collection page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub uuid: String,
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// Audio attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMeta {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
}

/// One hit from `GET /mobile-api/search?q=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uuid: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize_collection() {
        let json = r#"{
            "uuid": "c1",
            "title": "Episodes",
            "type": "collection",
            "cover": "https://cdn/cover.jpg",
            "children": [
                {"uuid": "e1", "title": "Episode 1", "type": "audio"},
                {"uuid": "e2", "title": "Episode 2"}
            ]
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();

        assert_eq!(page.page_type, "collection");
        let children = page.children.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].page_type.as_deref(), Some("audio"));
        assert!(page.content.is_none());
    }

    #[test]
    fn test_page_deserialize_audio() {
        let json = r#"{
            "title": "Episode 1",
            "type": "audio",
            "content": "<p>Notes</p>",
            "audio": {"url": "https://cdn/e1.mp3", "duration_seconds": 1800}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();

        let audio = page.audio.unwrap();
        assert_eq!(audio.url, "https://cdn/e1.mp3");
        assert_eq!(audio.duration_seconds, Some(1800));
        assert_eq!(page.content.as_deref(), Some("<p>Notes</p>"));
    }

    #[test]
    fn test_page_missing_title_is_rejected() {
        let json = r#"{"type": "text", "content": "<p>x</p>"}"#;
        let err = serde_json::from_str::<Page>(json).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_search_results_deserialize() {
        let json = r#"[
            {"uuid": "a", "title": "Alpha", "description": "First", "url": "/a"},
            {"uuid": "b", "title": "Beta", "url": "/b"}
        ]"#;
        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[1].description.is_none());
    }

    #[test]
    fn test_search_result_missing_url_is_rejected() {
        let json = r#"[{"uuid": "a", "title": "Alpha"}]"#;
        assert!(serde_json::from_str::<Vec<SearchResult>>(json).is_err());
    }

    #[test]
    fn test_site_data_deserialize() {
        let json = r#"{
            "menu": [{"uuid": "home", "title": "Home", "type": "text", "icon": "house"}],
            "metadata": {"name": "Demo"}
        }"#;
        let site: SiteData = serde_json::from_str(json).unwrap();

        assert_eq!(site.menu[0].icon.as_deref(), Some("house"));
        assert_eq!(site.metadata["name"], "Demo");
    }

    #[test]
    fn test_page_serialize_omits_absent_fields() {
        let page = Page {
            uuid: None,
            title: "About".to_string(),
            page_type: "text".to_string(),
            cover: None,
            children: None,
            content: None,
            audio: None,
        };
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(json, r#"{"title":"About","type":"text"}"#);
    }
}
