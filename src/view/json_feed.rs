use chrono::{SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::content::BlogPost;
use crate::view::{FeedChannel, JSON_FEED_PATH};

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Serialize)]
struct FeedAuthor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Serialize)]
struct FeedItem {
    id: String,
    url: String,
    title: String,
    summary: String,
    content_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    authors: Vec<FeedAuthor>,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct Feed {
    version: &'static str,
    title: String,
    home_page_url: String,
    feed_url: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<String>,
    language: String,
    authors: Vec<FeedAuthor>,
    items: Vec<FeedItem>,
}

/// JSON Feed 1.1 document.
pub struct JsonFeed<'a> {
    pub channel: &'a FeedChannel<'a>,
}

impl<'a> JsonFeed<'a> {
    pub fn render(&self, posts: &[BlogPost]) -> serde_json::Result<Vec<u8>> {
        let ch = self.channel;
        let feed = Feed {
            version: JSON_FEED_VERSION,
            title: ch.title.to_string(),
            home_page_url: ch.link.to_string(),
            feed_url: ch.url(JSON_FEED_PATH),
            description: ch.description.to_string(),
            icon: ch.logo.map(|logo| ch.url(logo)),
            favicon: ch.favicon.map(|favicon| ch.url(favicon)),
            language: ch.language.to_string(),
            authors: vec![FeedAuthor { name: ch.author_name.to_string(), url: Some(ch.link.to_string()) }],
            items: posts.iter().map(|post| self.item(post)).collect(),
        };

        serde_json::to_vec_pretty(&feed)
    }

    fn item(&self, post: &BlogPost) -> FeedItem {
        let ch = self.channel;
        let url = post.url(ch.link);
        let author_name = if post.author.name.is_empty() { ch.author_name } else { post.author.name.as_str() };

        // The category travels as a tag, like in the other feeds.
        let mut tags = Vec::with_capacity(post.tags.len() + 1);
        if !post.category.is_empty() {
            tags.push(post.category.clone());
        }
        tags.extend(post.tags.iter().filter(|t| **t != post.category).cloned());

        FeedItem {
            id: url.clone(),
            url,
            title: post.title.clone(),
            summary: post.description.clone(),
            content_html: post.excerpt.clone(),
            image: post.cover_image_url(ch.link),
            date_published: post.published_at
                .map(|dt| Utc.from_utc_datetime(&dt).to_rfc3339_opts(SecondsFormat::Secs, true)),
            authors: vec![FeedAuthor { name: author_name.to_string(), url: None }],
            tags,
        }
    }
}
