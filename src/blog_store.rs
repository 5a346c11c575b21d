use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, error};

use crate::blog_query;
use crate::content::mdx_file::MdxFile;
use crate::content::mdx_parser::MdxParser;
use crate::content::{Author, BlogPost};
use crate::post_list::PostList;

/// Posts of the content directory. Nothing is kept between calls: every
/// query reads and parses the files again.
pub struct BlogStore {
    content_dir: PathBuf,
}

impl BlogStore {
    pub fn new(content_dir: &Path) -> Self {
        BlogStore {
            content_dir: content_dir.to_path_buf(),
        }
    }

    fn read_post(slug: String, post_path: PathBuf) -> Option<BlogPost> {
        let parsed = MdxFile::from_file(slug, post_path.clone())
            .and_then(|mdx_file| MdxParser::parse(&mdx_file));
        match parsed {
            Ok(post) => Some(post),
            Err(e) => {
                error!("Error reading post {}: {}", post_path.display(), e);
                None
            }
        }
    }

    /// Every readable post, newest first.
    pub fn all_posts(&self) -> io::Result<Vec<BlogPost>> {
        let post_list = PostList::new(&self.content_dir);
        let mut posts: Vec<BlogPost> = post_list.retrieve_files()?
            .into_iter()
            .filter_map(|link| Self::read_post(link.slug, link.post_path))
            .collect();

        debug!("Loaded {} posts from {}", posts.len(), self.content_dir.display());
        blog_query::sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    pub fn post_by_slug(&self, slug: &str) -> io::Result<Option<BlogPost>> {
        let mdx_file = match MdxFile::from_slug(&self.content_dir, slug)? {
            Some(mdx_file) => mdx_file,
            None => return Ok(None),
        };

        match MdxParser::parse(&mdx_file) {
            Ok(post) => Ok(Some(post)),
            Err(e) => {
                error!("Error reading post {}: {}", slug, e);
                Ok(None)
            }
        }
    }

    pub fn post_by_id(&self, id: &str) -> io::Result<Option<BlogPost>> {
        let posts = self.all_posts()?;
        Ok(posts.into_iter().find(|post| post.id == id))
    }

    pub fn published_posts(&self) -> io::Result<Vec<BlogPost>> {
        let mut posts = self.all_posts()?;
        posts.retain(|post| post.published);
        Ok(posts)
    }

    pub fn posts_by_category(&self, category: &str) -> io::Result<Vec<BlogPost>> {
        let mut posts = self.published_posts()?;
        posts.retain(|post| post.category == category);
        Ok(posts)
    }

    pub fn posts_by_tag(&self, tag: &str) -> io::Result<Vec<BlogPost>> {
        let mut posts = self.published_posts()?;
        posts.retain(|post| post.tags.iter().any(|t| t == tag));
        Ok(posts)
    }

    pub fn posts_by_author(&self, author_id: &str) -> io::Result<Vec<BlogPost>> {
        let mut posts = self.published_posts()?;
        posts.retain(|post| post.author.id == author_id);
        Ok(posts)
    }

    pub fn featured_posts(&self) -> io::Result<Vec<BlogPost>> {
        let mut posts = self.published_posts()?;
        posts.retain(|post| post.featured);
        Ok(posts)
    }

    pub fn categories(&self) -> io::Result<Vec<String>> {
        Ok(blog_query::unique_categories(&self.published_posts()?))
    }

    pub fn tags(&self) -> io::Result<Vec<String>> {
        Ok(blog_query::unique_tags(&self.published_posts()?))
    }

    pub fn authors(&self) -> io::Result<Vec<Author>> {
        Ok(blog_query::unique_authors(&self.all_posts()?))
    }

    pub fn author_by_id(&self, id: &str) -> io::Result<Option<Author>> {
        let authors = self.authors()?;
        Ok(authors.into_iter().find(|author| author.id == id))
    }

    /// Published posts closest to the published post `post_id`.
    pub fn related_posts(&self, post_id: &str, limit: usize) -> io::Result<Vec<BlogPost>> {
        let posts = self.published_posts()?;
        let Some(current) = posts.iter().find(|post| post.id == post_id) else {
            return Ok(vec![]);
        };

        let related = blog_query::related_posts(current, &posts, limit)
            .into_iter()
            .cloned()
            .collect();
        Ok(related)
    }
}
