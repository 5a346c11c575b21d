use std::io;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use ntex::web;
use ntex::web::Error;
use ntex_files::NamedFile;
use spdlog::info;

use crate::blog_query;
use crate::blog_store::BlogStore;
use crate::config::Config;
use crate::content::mdx_renderer::render_mdx;
use crate::paginator::Paginator;
use crate::query_string::QueryString;
use crate::view::atom_renderer::AtomFeed;
use crate::view::json_feed::JsonFeed;
use crate::view::list_renderer::{ListFilter, ListRenderer, ListView};
use crate::view::page_renderer::PageRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;
use crate::view::sitemap_renderer::SitemapRenderer;
use crate::view::FeedChannel;

pub const INDEX_TEMPLATE: &str = "index.tpl";
pub const LIST_TEMPLATE: &str = "postlist.tpl";
pub const POST_TEMPLATE: &str = "post.tpl";
pub const ADMIN_TEMPLATE: &str = "admin.tpl";

/// Latest posts shown on the index page.
pub const INDEX_LATEST_POSTS: usize = 3;

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    match std::fs::read_to_string(&full_path) {
        Ok(src) => Ok(src),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))),
    }
}

pub fn get_file(root_dir: &Path, file: &str) -> Result<NamedFile, Error> {
    if file.contains("../") || file.contains("..\\") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    Ok(NamedFile::open(root_dir.join(file))?)
}

/// Page number and filter of a blog list request.
pub fn list_params(query: Option<&str>) -> (u32, ListFilter) {
    let Some(query) = query else {
        return (1, ListFilter::default());
    };

    let qs = QueryString::from(query);
    let filter = ListFilter {
        tag: qs.get_tag().map(str::to_string),
        category: qs.get_category().map(str::to_string),
    };
    (qs.get_page(), filter)
}

fn store(config: &Config) -> BlogStore {
    BlogStore::new(&config.paths.content_dir)
}

pub fn render_index(config: &Config, today: chrono::NaiveDate) -> io::Result<String> {
    let tpl_src = read_template(&config.paths.template_dir, INDEX_TEMPLATE)?;
    let renderer = PageRenderer::new(&tpl_src, "index")?;
    let posts = store(config).published_posts()?;
    Ok(renderer.render_index(config, &posts, INDEX_LATEST_POSTS, today))
}

pub fn render_list(config: &Config, cur_page: u32, filter: &ListFilter) -> io::Result<String> {
    let posts = store(config).published_posts()?;

    let tags = blog_query::tags_by_frequency(&posts);
    let categories = blog_query::unique_categories(&posts);
    let filtered: Vec<_> = posts.iter()
        .filter(|post| filter.matches(post))
        .cloned()
        .collect();

    let paginator = Paginator::from(&filtered, config.defaults.page_size);
    let cur_page = paginator.clamp_page(cur_page);
    let content_page = if paginator.page_count() == 0 {
        &filtered[..]
    } else {
        match paginator.get_page(cur_page) {
            Ok(content) => content,
            Err(err_desc) => return Err(io::Error::new(ErrorKind::InvalidInput, err_desc)),
        }
    };

    let tpl_src = read_template(&config.paths.template_dir, LIST_TEMPLATE)?;
    let renderer = ListRenderer::new(&tpl_src)?;
    Ok(renderer.render(&config.site.title, &ListView {
        posts: content_page,
        cur_page,
        page_count: paginator.page_count(),
        tags: &tags,
        categories: &categories,
        filter,
    }))
}

/// Post page, or `None` when the slug is unknown or not published.
pub fn render_post(config: &Config, slug: &str) -> io::Result<Option<String>> {
    let posts = store(config).published_posts()?;
    let Some(post) = posts.iter().find(|post| post.slug == slug) else {
        return Ok(None);
    };

    let related: Vec<_> = blog_query::related_posts(post, &posts, config.related_limit())
        .into_iter()
        .cloned()
        .collect();
    let rendered = render_mdx(&post.content)?;

    let tpl_src = read_template(&config.paths.template_dir, POST_TEMPLATE)?;
    let renderer = PostRenderer::new(&tpl_src)?;
    Ok(Some(renderer.render(&config.site.title, post, &rendered, &related)))
}

pub fn render_admin(config: &Config) -> io::Result<String> {
    let posts = store(config).all_posts()?;
    let tpl_src = read_template(&config.paths.template_dir, ADMIN_TEMPLATE)?;
    let renderer = PageRenderer::new(&tpl_src, "admin")?;
    Ok(renderer.render_admin(&config.site.title, &posts))
}

/// Chat, login and register pages: `/chat` renders `chat.tpl`.
pub fn render_site_page(config: &Config, path: &str) -> io::Result<String> {
    let page_name = path.trim_start_matches('/');
    let tpl_src = read_template(&config.paths.template_dir, &format!("{}.tpl", page_name))?;
    let renderer = PageRenderer::new(&tpl_src, page_name)?;
    Ok(renderer.render_site_page(config, path))
}

fn xml_error(e: quick_xml::Error) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("Error writing xml: {}", e))
}

pub fn render_rss(config: &Config, now: DateTime<Utc>) -> io::Result<Vec<u8>> {
    let posts = store(config).published_posts()?;
    info!("Generating rss feed with {} posts", posts.len());
    let channel = FeedChannel::from_config(config, now);
    RssChannel { channel: &channel }.render(&posts).map_err(xml_error)
}

pub fn render_atom(config: &Config, now: DateTime<Utc>) -> io::Result<Vec<u8>> {
    let posts = store(config).published_posts()?;
    let channel = FeedChannel::from_config(config, now);
    AtomFeed { channel: &channel }.render(&posts).map_err(xml_error)
}

pub fn render_json_feed(config: &Config, now: DateTime<Utc>) -> io::Result<Vec<u8>> {
    let posts = store(config).published_posts()?;
    let channel = FeedChannel::from_config(config, now);
    Ok(JsonFeed { channel: &channel }.render(&posts)?)
}

pub fn render_sitemap(config: &Config, now: DateTime<Utc>) -> io::Result<Vec<u8>> {
    let posts = store(config).published_posts()?;
    let sitemap = SitemapRenderer {
        site_url: config.site_url(),
        resume_path: config.site.resume_path.as_deref(),
        today: now.date_naive(),
    };
    sitemap.render(&posts).map_err(xml_error)
}
