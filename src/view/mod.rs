use chrono::{DateTime, Datelike, Utc};

use crate::config::Config;
use crate::content::BlogPost;

pub mod list_renderer;
pub mod post_renderer;
pub mod page_renderer;
pub mod rss_renderer;
pub mod atom_renderer;
pub mod json_feed;
pub mod sitemap_renderer;

pub const RSS_PATH: &str = "/api/rss";
pub const ATOM_PATH: &str = "/api/atom.xml";
pub const JSON_FEED_PATH: &str = "/api/feed.json";
pub const GENERATOR: &str = "Folio";

/// Site wide data shared by the feeds and the sitemap.
pub struct FeedChannel<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub description: &'a str,
    pub language: &'a str,
    pub author_name: &'a str,
    pub author_email: &'a str,
    pub logo: Option<&'a str>,
    pub favicon: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> FeedChannel<'a> {
    pub fn from_config(config: &'a Config, generated_at: DateTime<Utc>) -> Self {
        FeedChannel {
            title: config.site.title.as_str(),
            link: config.site_url(),
            description: config.site.description.as_str(),
            language: config.site.language.as_str(),
            author_name: config.personal.name.as_str(),
            author_email: config.personal.email.as_str(),
            logo: config.site.logo.as_deref(),
            favicon: config.site.favicon.as_deref(),
            generated_at,
        }
    }

    /// Absolute url of a site path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.link.trim_end_matches('/'), path)
    }

    pub fn copyright(&self) -> String {
        format!("All rights reserved {}, {}", self.generated_at.year(), self.author_name)
    }
}

/// Mime type of an image, guessed from its extension.
pub fn image_mime(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "image/jpeg",
    }
}

/// One post as shown in lists (blog list, index, related posts).
#[derive(ramhorns::Content)]
pub struct PostSummary {
    pub slug: String,
    pub link: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub cover_image: String,
    pub featured: bool,
    pub tags: Vec<ViewTag>,
}

#[derive(ramhorns::Content)]
pub struct ViewTag {
    pub tag: String,
}

impl PostSummary {
    pub fn from_post(post: &BlogPost) -> Self {
        PostSummary {
            slug: post.slug.clone(),
            link: post.link(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            date: post.formatted_date.clone(),
            read_time: post.read_time.clone(),
            category: post.category.clone(),
            cover_image: post.cover_image.clone(),
            featured: post.featured,
            tags: view_tags(&post.tags),
        }
    }
}

pub fn view_tags(tags: &[String]) -> Vec<ViewTag> {
    tags.iter().map(|t| ViewTag { tag: t.clone() }).collect()
}
