use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::content::{Author, CodeExample, YouTubeVideo};

pub const DELIMITER: &str = "---";

/// Metadata block at the top of a post. Every field is optional: missing
/// values, and values of the wrong type, surface as empty values on the post.
/// Only a YAML syntax error rejects the block.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFrontmatter {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "string_list")]
    pub related_articles: Option<Vec<String>>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub read_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub youtube_videos: Option<Vec<YouTubeVideo>>,
    #[serde(default, deserialize_with = "lenient")]
    pub code_examples: Option<Vec<CodeExample>>,
    #[serde(default, deserialize_with = "string_list")]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub canonical_url: Option<String>,
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Unquoted dates and numeric titles are read as their text.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

// A single scalar is a one element list. Nested values in a list are dropped.
fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Sequence(items) => Ok(Some(items.into_iter().filter_map(scalar_to_string).collect())),
        other => Ok(scalar_to_string(other).map(|item| vec![item])),
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_yaml::from_value(value).ok())
}

/// Splits a file into its YAML frontmatter and its body.
///
/// The frontmatter starts on a first line holding only `---` and ends on the
/// next such line. Without the opening line there is no frontmatter; without
/// the closing one everything after the opening line is frontmatter.
pub fn split_frontmatter(raw: &str) -> (&str, &str) {
    let mut lines = raw.split_inclusive('\n');

    let yaml_start = match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => first.len(),
        _ => return ("", raw),
    };

    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return (&raw[yaml_start..offset], &raw[offset + line.len()..]);
        }
        offset += line.len();
    }

    (&raw[yaml_start..], "")
}

pub fn parse_frontmatter(yaml: &str) -> Result<BlogFrontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(BlogFrontmatter::default());
    }
    serde_yaml::from_str(yaml)
}
