use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::{Author, BlogPost};
use crate::view::{view_tags, PostSummary, ViewTag};

#[derive(ramhorns::Content)]
struct ViewAuthor<'a> {
    id: &'a str,
    name: &'a str,
    avatar: &'a str,
    bio: &'a str,
    twitter: &'a str,
    github: &'a str,
    website: &'a str,
}

impl<'a> ViewAuthor<'a> {
    fn from_author(author: &'a Author) -> Self {
        ViewAuthor {
            id: author.id.as_str(),
            name: author.name.as_str(),
            avatar: author.avatar.as_str(),
            bio: author.bio.as_str(),
            twitter: author.twitter.as_deref().unwrap_or(""),
            github: author.github.as_deref().unwrap_or(""),
            website: author.website.as_deref().unwrap_or(""),
        }
    }
}

#[derive(ramhorns::Content)]
struct ViewVideo<'a> {
    id: &'a str,
    title: &'a str,
    timestamp: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewCodeExample<'a> {
    language: &'a str,
    file: &'a str,
    runnable: bool,
    sandbox_url: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site_title: &'a str,
    id: &'a str,
    slug: &'a str,
    post_title: &'a str,
    description: &'a str,
    date: &'a str,
    read_time: &'a str,
    category: &'a str,
    tags: Vec<ViewTag>,
    cover_image: &'a str,
    author: ViewAuthor<'a>,
    canonical_url: &'a str,
    seo_keywords: String,
    youtube_videos: Vec<ViewVideo<'a>>,
    code_examples: Vec<ViewCodeExample<'a>>,
    post_content: &'a str,
    related: Vec<PostSummary>,
    has_related: bool,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    /// `rendered` is the html of the post body.
    pub fn render(&self, site_title: &str, post: &BlogPost, rendered: &str, related: &[BlogPost]) -> String {
        let youtube_videos = post.youtube_videos.iter()
            .map(|v| ViewVideo {
                id: v.id.as_str(),
                title: v.title.as_str(),
                timestamp: v.timestamp.as_deref().unwrap_or(""),
            })
            .collect();

        let code_examples = post.code_examples.iter()
            .map(|c| ViewCodeExample {
                language: c.language.as_str(),
                file: c.file.as_str(),
                runnable: c.runnable.unwrap_or(false),
                sandbox_url: c.sandbox_url.as_deref().unwrap_or(""),
            })
            .collect();

        self.template.render(&ViewItem {
            site_title,
            id: post.id.as_str(),
            slug: post.slug.as_str(),
            post_title: post.title.as_str(),
            description: post.description.as_str(),
            date: post.formatted_date.as_str(),
            read_time: post.read_time.as_str(),
            category: post.category.as_str(),
            tags: view_tags(&post.tags),
            cover_image: post.cover_image.as_str(),
            author: ViewAuthor::from_author(&post.author),
            canonical_url: post.canonical_url.as_deref().unwrap_or(""),
            seo_keywords: post.seo_keywords.join(", "),
            youtube_videos,
            code_examples,
            post_content: rendered,
            related: related.iter().map(PostSummary::from_post).collect(),
            has_related: !related.is_empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::blog_query::tests::post;
    use crate::content::YouTubeVideo;

    use super::*;

    #[test]
    fn render_view() {
        let template_src = r##"
TITLE=[{{post_title}}]
AUTHOR=[{{#author}}{{name}}{{#github}} gh:{{github}}{{/github}}{{/author}}]
DATE=[{{date}} - {{read_time}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
VIDEOS=[{{#youtube_videos}}{{id}}@{{timestamp}}{{/youtube_videos}}]
POST_CONTENT=[{{{post_content}}}]
RELATED=[{{#has_related}}{{#related}}({{title}} {{link}}){{/related}}{{/has_related}}]"##;
        let post_renderer = PostRenderer::new(template_src).unwrap();

        let mut current = post("rag", "AI", &["<rust>", "rag"], "2024-01-02");
        current.title = "<post-title>".to_string();
        current.formatted_date = "January 2, 2024".to_string();
        current.author.github = Some("janedoe".to_string());
        current.youtube_videos = vec![YouTubeVideo {
            id: "abc".to_string(),
            title: "demo".to_string(),
            timestamp: Some("1:30".to_string()),
        }];
        let related = vec![post("chunking", "AI", &["rag"], "2025-02-01")];

        let res = post_renderer.render("blog", &current, "<p>post-content</p>", &related);
        assert_eq!(res, r##"
TITLE=[&lt;post-title&gt;]
AUTHOR=[Jane Doe gh:janedoe]
DATE=[January 2, 2024 - 1 min read]
TAGS=[(&lt;rust&gt;)(rag)]
VIDEOS=[abc@1:30]
POST_CONTENT=[<p>post-content</p>]
RELATED=[(title-of-chunking /blog/chunking)]"##);
    }

    #[test]
    fn render_without_related() {
        let post_renderer = PostRenderer::new("{{^has_related}}none{{/has_related}}").unwrap();
        let current = post("rag", "AI", &[], "2024-01-02");
        assert_eq!(post_renderer.render("blog", &current, "", &[]), "none");
    }
}
