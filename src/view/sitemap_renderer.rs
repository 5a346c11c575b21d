use std::io::Cursor;

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::content::BlogPost;
use crate::view::rss_renderer::push_text;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

/// Site pages listed before the posts: path, change frequency and priority.
pub const STATIC_ENTRIES: [(&str, ChangeFreq, &str); 8] = [
    ("/", ChangeFreq::Weekly, "1.0"),
    ("/blog", ChangeFreq::Weekly, "0.8"),
    ("/chat", ChangeFreq::Monthly, "0.6"),
    ("/#about", ChangeFreq::Monthly, "0.7"),
    ("/#projects", ChangeFreq::Weekly, "0.8"),
    ("/#experience", ChangeFreq::Monthly, "0.7"),
    ("/#contact", ChangeFreq::Monthly, "0.6"),
    ("/llms.txt", ChangeFreq::Monthly, "0.5"),
];

const RESUME_PRIORITY: &str = "0.9";
const POST_PRIORITY: &str = "0.7";

pub struct SitemapRenderer<'a> {
    pub site_url: &'a str,
    pub resume_path: Option<&'a str>,
    /// lastmod of the static pages.
    pub today: NaiveDate,
}

impl<'a> SitemapRenderer<'a> {
    pub fn render(&self, posts: &[BlogPost]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let today = self.today.format("%Y-%m-%d").to_string();

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"));
        writer.write_event(Event::Start(urlset))?;

        for (path, freq, priority) in STATIC_ENTRIES {
            self.push_url(&mut writer, path, &today, freq, priority)?;
        }
        if let Some(resume) = self.resume_path {
            self.push_url(&mut writer, resume, &today, ChangeFreq::Monthly, RESUME_PRIORITY)?;
        }

        for post in posts {
            let lastmod = match post.published_at {
                Some(dt) => dt.date().format("%Y-%m-%d").to_string(),
                None => today.clone(),
            };
            self.push_url(&mut writer, &post.link(), &lastmod, ChangeFreq::Monthly, POST_PRIORITY)?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;
        Ok(writer.into_inner().into_inner())
    }

    fn push_url(&self, writer: &mut Writer<Cursor<Vec<u8>>>, path: &str, lastmod: &str,
                freq: ChangeFreq, priority: &str) -> quick_xml::Result<()> {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        push_text(writer, "loc", &format!("{}{}", self.site_url.trim_end_matches('/'), path))?;
        push_text(writer, "lastmod", lastmod)?;
        push_text(writer, "changefreq", freq.as_str())?;
        push_text(writer, "priority", priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
        Ok(())
    }
}
