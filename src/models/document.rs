// file: src/models/document.rs
// description: free-text search results used for keyword extraction
// reference: https://developers.naver.com/docs/serviceapi/search/blog/blog.md

use crate::analysis::patterns::strip_markup;
use serde::{Deserialize, Serialize};

/// Title and description of one search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub description: String,
}

impl Document {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// One item of the blog search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub title: String,
    pub link: String,
    pub description: String,
    pub bloggername: String,
    pub bloggerlink: String,
    /// `YYYYMMDD` as delivered by the API
    pub postdate: String,
}

impl BlogPost {
    /// Title with the `<b>` highlight tags the API injects removed.
    pub fn display_title(&self) -> String {
        strip_markup(&self.title)
    }
}

impl From<&BlogPost> for Document {
    fn from(post: &BlogPost) -> Self {
        Document::new(post.title.clone(), post.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_strips_highlight_tags() {
        let post = BlogPost {
            title: "<b>오메가3</b> 추천 후기".to_string(),
            ..Default::default()
        };

        assert_eq!(post.display_title(), "오메가3 추천 후기");
    }

    #[test]
    fn test_blog_post_deserializes_with_missing_fields() {
        let post: BlogPost =
            serde_json::from_str(r#"{"title":"제목","postdate":"20240101"}"#).unwrap();

        assert_eq!(post.title, "제목");
        assert_eq!(post.postdate, "20240101");
        assert!(post.description.is_empty());
    }

    #[test]
    fn test_document_from_blog_post() {
        let post = BlogPost {
            title: "가나".to_string(),
            description: "다라".to_string(),
            ..Default::default()
        };

        let doc = Document::from(&post);
        assert_eq!(doc, Document::new("가나", "다라"));
    }
}
