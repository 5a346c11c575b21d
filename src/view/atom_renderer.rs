use std::io::Cursor;

use chrono::{SecondsFormat, TimeZone, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::BlogPost;
use crate::view::rss_renderer::push_text;
use crate::view::{FeedChannel, ATOM_PATH, GENERATOR};

pub struct AtomFeed<'a> {
    pub channel: &'a FeedChannel<'a>,
}

impl<'a> AtomFeed<'a> {
    pub fn render(&self, posts: &[BlogPost]) -> quick_xml::Result<Vec<u8>> {
        let ch = self.channel;
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let updated = ch.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut feed = BytesStart::new("feed");
        feed.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(feed))?;

        push_text(&mut writer, "id", ch.link)?;
        push_text(&mut writer, "title", ch.title)?;
        push_text(&mut writer, "updated", &updated)?;
        push_text(&mut writer, "generator", GENERATOR)?;
        push_person(&mut writer, ch.author_name, Some(ch.author_email), Some(ch.link))?;
        push_link(&mut writer, "alternate", ch.link)?;
        push_link(&mut writer, "self", &ch.url(ATOM_PATH))?;
        push_text(&mut writer, "subtitle", ch.description)?;
        if let Some(logo) = ch.logo {
            push_text(&mut writer, "logo", &ch.url(logo))?;
        }
        if let Some(favicon) = ch.favicon {
            push_text(&mut writer, "icon", &ch.url(favicon))?;
        }
        push_text(&mut writer, "rights", &ch.copyright())?;

        for post in posts {
            self.push_entry(&mut writer, post, &updated)?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;
        Ok(writer.into_inner().into_inner())
    }

    fn push_entry(&self, writer: &mut Writer<Cursor<Vec<u8>>>, post: &BlogPost, feed_updated: &str) -> quick_xml::Result<()> {
        let ch = self.channel;
        let url = post.url(ch.link);
        let published = post.published_at
            .map(|dt| Utc.from_utc_datetime(&dt).to_rfc3339_opts(SecondsFormat::Secs, true));

        writer.write_event(Event::Start(BytesStart::new("entry")))?;
        push_typed_text(writer, "title", &post.title)?;
        push_text(writer, "id", &url)?;
        push_link(writer, "alternate", &url)?;
        push_text(writer, "updated", published.as_deref().unwrap_or(feed_updated))?;
        if let Some(ref published) = published {
            push_text(writer, "published", published)?;
        }
        push_typed_text(writer, "summary", &post.description)?;
        push_typed_text(writer, "content", &post.excerpt)?;

        let author_name = if post.author.name.is_empty() { ch.author_name } else { post.author.name.as_str() };
        push_person(writer, author_name, Some(ch.author_email), Some(ch.link))?;

        if !post.category.is_empty() {
            let mut category = BytesStart::new("category");
            category.push_attribute(("term", post.category.as_str()));
            writer.write_event(Event::Empty(category))?;
        }

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
        Ok(())
    }
}

fn push_typed_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    let mut elem = BytesStart::new(tag);
    elem.push_attribute(("type", "html"));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_link(writer: &mut Writer<Cursor<Vec<u8>>>, rel: &str, href: &str) -> quick_xml::Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("rel", rel));
    link.push_attribute(("href", href));
    writer.write_event(Event::Empty(link))?;
    Ok(())
}

fn push_person(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, email: Option<&str>, uri: Option<&str>) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("author")))?;
    push_text(writer, "name", name)?;
    if let Some(email) = email {
        push_text(writer, "email", email)?;
    }
    if let Some(uri) = uri {
        push_text(writer, "uri", uri)?;
    }
    writer.write_event(Event::End(BytesEnd::new("author")))?;
    Ok(())
}
