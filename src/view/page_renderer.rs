use std::io;
use std::io::ErrorKind;

use chrono::NaiveDate;
use ramhorns::Template;

use crate::config::Config;
use crate::content::BlogPost;
use crate::view::PostSummary;

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    site_title: &'a str,
    description: &'a str,
    name: &'a str,
    email: &'a str,
    resume_path: &'a str,
    years_experience: i64,
    post_count: i64,
    days_since_started: i64,
    featured: Vec<PostSummary>,
    latest: Vec<PostSummary>,
}

#[derive(ramhorns::Content)]
struct AdminPost<'a> {
    slug: &'a str,
    link: String,
    title: &'a str,
    date: &'a str,
    category: &'a str,
    published: bool,
    featured: bool,
}

#[derive(ramhorns::Content)]
struct AdminPage<'a> {
    site_title: &'a str,
    posts: Vec<AdminPost<'a>>,
    post_count: usize,
    published_count: usize,
}

#[derive(ramhorns::Content)]
struct SitePage<'a> {
    site_title: &'a str,
    name: &'a str,
    path: &'a str,
}

/// Renders the pages that are not posts: index, admin, chat, login and register.
pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new<'a>(tpl_src: &'a str, page_name: &str) -> io::Result<PageRenderer<'a>> {
        let template = match Template::new(tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", page_name, e)));
            }
        };

        Ok(PageRenderer { template })
    }

    /// `posts` are the published posts, newest first.
    pub fn render_index(&self, config: &Config, posts: &[BlogPost], latest_count: usize, today: NaiveDate) -> String {
        let featured = posts.iter()
            .filter(|p| p.featured)
            .map(PostSummary::from_post)
            .collect();

        self.template.render(&IndexPage {
            site_title: config.site.title.as_str(),
            description: config.site.description.as_str(),
            name: config.personal.name.as_str(),
            email: config.personal.email.as_str(),
            resume_path: config.site.resume_path.as_deref().unwrap_or(""),
            years_experience: config.personal.career_start_date.years_until(today),
            post_count: posts.len() as i64,
            days_since_started: config.personal.blog_start_date.days_until(today),
            featured,
            latest: posts.iter().take(latest_count).map(PostSummary::from_post).collect(),
        })
    }

    /// `posts` are all posts, drafts included.
    pub fn render_admin(&self, site_title: &str, posts: &[BlogPost]) -> String {
        let admin_posts = posts.iter()
            .map(|p| AdminPost {
                slug: p.slug.as_str(),
                link: p.link(),
                title: p.title.as_str(),
                date: p.formatted_date.as_str(),
                category: p.category.as_str(),
                published: p.published,
                featured: p.featured,
            })
            .collect();

        self.template.render(&AdminPage {
            site_title,
            posts: admin_posts,
            post_count: posts.len(),
            published_count: posts.iter().filter(|p| p.published).count(),
        })
    }

    pub fn render_site_page(&self, config: &Config, path: &str) -> String {
        self.template.render(&SitePage {
            site_title: config.site.title.as_str(),
            name: config.personal.name.as_str(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::blog_query::tests::post;
    use crate::config::parse_config;
    use crate::test_data::CONFIG_DATA;

    use super::*;

    #[test]
    fn render_index() {
        let config = parse_config(CONFIG_DATA).unwrap();
        let mut featured = post("rag", "AI", &[], "2025-01-15");
        featured.featured = true;
        let posts = vec![post("chunking", "AI", &[], "2025-02-01"), featured, post("bread", "Life", &[], "2024-06-01")];

        let tpl = "{{name}}:{{years_experience}}y:{{post_count}}p:{{days_since_started}}d|\
{{#featured}}[{{slug}}]{{/featured}}|{{#latest}}({{slug}}){{/latest}}";
        let renderer = PageRenderer::new(tpl, "index").unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let res = renderer.render_index(&config, &posts, 2, today);
        assert_eq!(res, "Jane Doe:10y:3p:416d|[rag]|(chunking)(rag)");
    }

    #[test]
    fn render_admin() {
        let mut draft = post("draft", "AI", &[], "2025-03-01");
        draft.published = false;
        let posts = vec![draft, post("rag", "AI", &[], "2025-01-15")];

        let tpl = "{{published_count}}/{{post_count}}|\
{{#posts}}({{slug}} {{link}}{{^published}} draft{{/published}}){{/posts}}";
        let renderer = PageRenderer::new(tpl, "admin").unwrap();
        assert_eq!(renderer.render_admin("blog", &posts), "1/2|(draft /blog/draft draft)(rag /blog/rag)");
    }

    #[test]
    fn render_site_page() {
        let config = parse_config(CONFIG_DATA).unwrap();
        let renderer = PageRenderer::new("{{site_title}} {{path}}", "chat").unwrap();
        assert_eq!(renderer.render_site_page(&config, "/chat"), "Jane Doe - Engineering Blog /chat");
    }

    #[test]
    fn invalid_template() {
        let err = PageRenderer::new("{{#posts}}{{/featured}}", "admin").err().unwrap();
        assert!(err.to_string().contains("admin template"));
    }
}
