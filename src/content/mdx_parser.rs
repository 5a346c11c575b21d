use std::io;
use std::io::ErrorKind;

use crate::content::frontmatter::{parse_frontmatter, split_frontmatter};
use crate::content::mdx_file::MdxFile;
use crate::content::BlogPost;
use crate::text_utils::{format_long_date, parse_post_date, reading_time, INVALID_DATE};

pub struct MdxParser {}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl MdxParser {
    pub fn parse(mdx_file: &MdxFile) -> io::Result<BlogPost> {
        let (yaml, body) = split_frontmatter(&mdx_file.raw_content);
        let fm = match parse_frontmatter(yaml) {
            Ok(fm) => fm,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Invalid frontmatter: {} - file={}", e, mdx_file.file_path.display()))),
        };

        let date = fm.date.unwrap_or_default();
        let published_at = parse_post_date(&date).ok();
        let formatted_date = match published_at {
            Some(ref dt) => format_long_date(dt),
            None => INVALID_DATE.to_string(),
        };

        let description = fm.description.unwrap_or_default();
        let excerpt = non_empty(fm.excerpt).unwrap_or_else(|| description.clone());
        let read_time = non_empty(fm.read_time).unwrap_or_else(|| reading_time(body));

        Ok(BlogPost {
            id: non_empty(fm.id).unwrap_or_else(|| mdx_file.slug.clone()),
            slug: mdx_file.slug.clone(),
            title: fm.title.unwrap_or_default(),
            description,
            excerpt,
            date,
            formatted_date,
            read_time,
            category: fm.category.unwrap_or_default(),
            tags: fm.tags.unwrap_or_default(),
            cover_image: fm.cover_image.unwrap_or_default(),
            author: fm.author.unwrap_or_default(),
            related_articles: fm.related_articles.unwrap_or_default(),
            content: body.to_string(),
            featured: fm.featured.unwrap_or(false),
            published: fm.published != Some(false),
            youtube_videos: fm.youtube_videos.unwrap_or_default(),
            code_examples: fm.code_examples.unwrap_or_default(),
            seo_keywords: fm.seo_keywords.unwrap_or_default(),
            canonical_url: non_empty(fm.canonical_url),
            published_at,
            file_name: mdx_file.file_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::test_data::{POST_CHUNKING, POST_DRAFT, POST_MARKETING, POST_RAG};

    use super::*;

    fn mdx(slug: &str, raw: &str) -> MdxFile {
        MdxFile {
            slug: slug.to_string(),
            file_path: PathBuf::from(format!("content/blogs/{}.mdx", slug)),
            raw_content: raw.to_string(),
        }
    }

    #[test]
    fn test_parse_post() {
        let post = MdxParser::parse(&mdx("building-a-rag-pipeline", POST_RAG)).unwrap();
        assert_eq!(post.id, "building-a-rag-pipeline");
        assert_eq!(post.slug, "building-a-rag-pipeline");
        assert_eq!(post.title, "Building a RAG pipeline");
        assert_eq!(post.excerpt, "Retrieval augmented generation from scratch");
        assert_eq!(post.date, "2025-01-15");
        assert_eq!(post.formatted_date, "January 15, 2025");
        assert_eq!(post.read_time, "1 min read");
        assert_eq!(post.category, "AI");
        assert_eq!(post.tags, ["rag", "agents"]);
        assert_eq!(post.author.name, "Jane Doe");
        assert!(post.featured);
        assert!(post.published);
        assert!(post.related_articles.is_empty());
        assert!(post.canonical_url.is_none());
        assert!(post.content.starts_with("\nimport { Callout }"));
        assert_eq!(post.file_name, PathBuf::from("content/blogs/building-a-rag-pipeline.mdx"));
    }

    #[test]
    fn test_frontmatter_overrides() {
        let post = MdxParser::parse(&mdx("chunking-strategies", POST_CHUNKING)).unwrap();
        assert_eq!(post.excerpt, "Split documents the right way");
        assert!(!post.featured);

        let post = MdxParser::parse(&mdx("positioning", POST_MARKETING)).unwrap();
        assert_eq!(post.read_time, "12 min read");
        assert_eq!(post.canonical_url.as_deref(), Some("https://medium.com/@jane/positioning"));
    }

    #[test]
    fn test_published_defaults_to_true() {
        let post = MdxParser::parse(&mdx("draft", POST_DRAFT)).unwrap();
        assert!(!post.published);

        let post = MdxParser::parse(&mdx("explicit", "---\npublished: true\n---\n")).unwrap();
        assert!(post.published);

        let post = MdxParser::parse(&mdx("implicit", "---\ntitle: x\n---\n")).unwrap();
        assert!(post.published);
    }

    #[test]
    fn test_missing_fields() {
        let post = MdxParser::parse(&mdx("bare", "Just some words here.\n")).unwrap();
        assert_eq!(post.id, "bare");
        assert_eq!(post.title, "");
        assert_eq!(post.date, "");
        assert_eq!(post.formatted_date, "Invalid Date");
        assert!(post.published_at.is_none());
        assert!(post.tags.is_empty());
        assert_eq!(post.author.id, "");
        assert_eq!(post.content, "Just some words here.\n");
    }

    #[test]
    fn test_explicit_id() {
        let post = MdxParser::parse(&mdx("slug", "---\nid: post-42\n---\nbody")).unwrap();
        assert_eq!(post.id, "post-42");
        assert_eq!(post.slug, "slug");

        let post = MdxParser::parse(&mdx("slug", "---\nid: \"\"\n---\nbody")).unwrap();
        assert_eq!(post.id, "slug");
    }

    #[test]
    fn test_invalid_frontmatter() {
        let res = MdxParser::parse(&mdx("broken", "---\ntags: [a, b\n---\nbody"));
        assert_eq!(res.err().map(|e| e.kind()), Some(ErrorKind::InvalidData));
    }
}
