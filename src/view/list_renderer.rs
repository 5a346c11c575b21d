use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::BlogPost;
use crate::view::PostSummary;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_title: &'a str,
    post_list: Vec<PostSummary>,
    has_posts: bool,
    tags: Vec<TagItem<'a>>,
    categories: Vec<CategoryItem<'a>>,
    filter_label: String,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct TagItem<'a> {
    tag: &'a str,
    count: u32,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct CategoryItem<'a> {
    category: &'a str,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    /// Query string of the page link, filter included.
    query: String,
}

/// Active `?tag=` / `?category=` filter of the blog list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListFilter {
    pub tag: Option<String>,
    pub category: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, post: &BlogPost) -> bool {
        let tag_ok = self.tag.as_ref().map_or(true, |t| post.tags.contains(t));
        let category_ok = self.category.as_ref().map_or(true, |c| post.category == *c);
        tag_ok && category_ok
    }

    /// Query string of `page` keeping this filter.
    pub fn page_query(&self, page: u32) -> String {
        let mut params: Vec<(&str, String)> = vec![];
        if let Some(ref category) = self.category {
            params.push(("category", category.clone()));
        }
        if let Some(ref tag) = self.tag {
            params.push(("tag", tag.clone()));
        }
        params.push(("page", page.to_string()));
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }

    fn label(&self) -> String {
        match (&self.category, &self.tag) {
            (Some(c), Some(t)) => format!("{} / #{}", c, t),
            (Some(c), None) => c.clone(),
            (None, Some(t)) => format!("#{}", t),
            (None, None) => String::new(),
        }
    }
}

/// One page of the blog list with the navigation around it.
pub struct ListView<'a> {
    pub posts: &'a [BlogPost],
    pub cur_page: u32,
    pub page_count: u32,
    pub tags: &'a [(String, u32)],
    pub categories: &'a [String],
    pub filter: &'a ListFilter,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer { template })
    }

    pub fn render(&self, site_title: &str, view: &ListView) -> String {
        let filter = view.filter;
        let page_list = (1..=view.page_count)
            .map(|number| ViewPagination {
                current: number == view.cur_page,
                number,
                query: filter.page_query(number),
            })
            .collect();

        let tags = view.tags.iter()
            .map(|(tag, count)| TagItem {
                tag: tag.as_str(),
                count: *count,
                selected: filter.tag.as_deref() == Some(tag.as_str()),
            })
            .collect();

        let categories = view.categories.iter()
            .map(|c| CategoryItem {
                category: c.as_str(),
                selected: filter.category.as_deref() == Some(c.as_str()),
            })
            .collect();

        self.template.render(&ListPage {
            site_title,
            post_list: view.posts.iter().map(PostSummary::from_post).collect(),
            has_posts: !view.posts.is_empty(),
            tags,
            categories,
            filter_label: filter.label(),
            page_list,
            show_pagination: view.page_count > 1,
        })
    }
}
