use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::shape::{self, Document, DocumentShape};

/// A blog entry; `content` may contain markdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    pub author: String,
    /// URL of the cover image.
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DocumentShape for BlogPost {
    const COLLECTION: &'static str = "blogpost";

    fn from_document(doc: &Document) -> Result<Self, ModelError> {
        Ok(BlogPost {
            title: shape::required_str(doc, "title")?,
            excerpt: shape::optional_str(doc, "excerpt")?,
            content: shape::required_str(doc, "content")?,
            author: shape::required_str(doc, "author")?,
            cover_image: shape::optional_str(doc, "cover_image")?,
            tags: shape::string_list(doc, "tags")?,
        })
    }
}
