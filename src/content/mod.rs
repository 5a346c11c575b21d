use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod mdx_file;
pub mod frontmatter;
pub mod mdx_parser;
pub mod mdx_renderer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeVideo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    pub language: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runnable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_url: Option<String>,
}

/// A post read from one `.mdx` file, with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub excerpt: String,
    /// Date as written in the frontmatter.
    pub date: String,
    pub formatted_date: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: String,
    pub author: Author,
    pub related_articles: Vec<String>,
    pub content: String,
    pub featured: bool,
    pub published: bool,
    pub youtube_videos: Vec<YouTubeVideo>,
    pub code_examples: Vec<CodeExample>,
    pub seo_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    #[serde(skip)]
    pub published_at: Option<NaiveDateTime>,
    #[serde(skip)]
    pub file_name: PathBuf,
}

impl BlogPost {
    /// Site relative link of the post page.
    pub fn link(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// Absolute url of the post page under `site_url`.
    pub fn url(&self, site_url: &str) -> String {
        format!("{}{}", site_url.trim_end_matches('/'), self.link())
    }

    /// Canonical url, falling back to the post page on this site.
    pub fn canonical_url_or(&self, site_url: &str) -> String {
        match self.canonical_url {
            Some(ref url) if !url.is_empty() => url.clone(),
            _ => self.url(site_url),
        }
    }

    /// Cover image as an absolute url.
    pub fn cover_image_url(&self, site_url: &str) -> Option<String> {
        if self.cover_image.is_empty() {
            return None;
        }
        if self.cover_image.starts_with("http") {
            Some(self.cover_image.clone())
        } else {
            Some(format!("{}{}", site_url.trim_end_matches('/'), self.cover_image))
        }
    }
}
