use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::BlogPost;
use crate::view::{image_mime, FeedChannel, GENERATOR, RSS_PATH};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
  <title>Jane Doe - Engineering Blog</title>
  <link>https://janedoe.dev</link>
  <description>Notes on AI agents, retrieval and product work</description>
  ...
  <item>
    <title>Building a RAG pipeline</title>
    <link>https://janedoe.dev/blog/building-a-rag-pipeline</link>
    <guid>https://janedoe.dev/blog/building-a-rag-pipeline</guid>
    <description><![CDATA[Retrieval augmented generation from scratch]]></description>
    <content:encoded><![CDATA[Retrieval augmented generation from scratch]]></content:encoded>
    <author>jane@janedoe.dev (Jane Doe)</author>
    <category>AI</category>
    <pubDate>Wed, 15 Jan 2025 00:00:00 +0000</pubDate>
    <enclosure url="https://janedoe.dev/images/rag.png" length="0" type="image/png"/>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub channel: &'a FeedChannel<'a>,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[BlogPost]) -> quick_xml::Result<Vec<u8>> {
        let ch = self.channel;
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", "http://purl.org/rss/1.0/modules/content/"));
        rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", ch.title)?;
        push_text(&mut writer, "link", ch.link)?;
        push_text(&mut writer, "description", ch.description)?;
        push_text(&mut writer, "language", ch.language)?;
        push_text(&mut writer, "copyright", &ch.copyright())?;
        push_text(&mut writer, "generator", GENERATOR)?;
        push_text(&mut writer, "lastBuildDate", &ch.generated_at.to_rfc2822())?;

        let self_link = ch.url(RSS_PATH);
        let mut atom_link = BytesStart::new("atom:link");
        atom_link.push_attribute(("href", self_link.as_str()));
        atom_link.push_attribute(("rel", "self"));
        atom_link.push_attribute(("type", "application/rss+xml"));
        writer.write_event(Event::Empty(atom_link))?;

        if let Some(logo) = ch.logo {
            writer.write_event(Event::Start(BytesStart::new("image")))?;
            push_text(&mut writer, "url", &ch.url(logo))?;
            push_text(&mut writer, "title", ch.title)?;
            push_text(&mut writer, "link", ch.link)?;
            writer.write_event(Event::End(BytesEnd::new("image")))?;
        }

        for post in posts {
            self.push_item(&mut writer, post)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }

    fn push_item(&self, writer: &mut Writer<Cursor<Vec<u8>>>, post: &BlogPost) -> quick_xml::Result<()> {
        let ch = self.channel;
        let url = post.url(ch.link);

        writer.write_event(Event::Start(BytesStart::new("item")))?;
        push_text(writer, "title", &post.title)?;
        push_text(writer, "link", &url)?;
        push_text(writer, "guid", &url)?;
        push_cdata(writer, "description", &post.description)?;
        push_cdata(writer, "content:encoded", &post.excerpt)?;

        let author_name = if post.author.name.is_empty() { ch.author_name } else { post.author.name.as_str() };
        push_text(writer, "author", &format!("{} ({})", ch.author_email, author_name))?;

        if !post.category.is_empty() {
            push_text(writer, "category", &post.category)?;
        }

        if let Some(ref dt) = post.published_at {
            let dt = Utc.from_utc_datetime(dt);
            push_text(writer, "pubDate", &dt.to_rfc2822())?;
        }

        if let Some(image) = post.cover_image_url(ch.link) {
            let mut enclosure = BytesStart::new("enclosure");
            enclosure.push_attribute(("url", image.as_str()));
            enclosure.push_attribute(("length", "0"));
            enclosure.push_attribute(("type", image_mime(&image)));
            writer.write_event(Event::Empty(enclosure))?;
        }

        writer.write_event(Event::End(BytesEnd::new("item")))?;
        Ok(())
    }
}

pub(crate) fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::str;

    use chrono::TimeZone;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    use crate::blog_query::tests::post;

    use super::*;

    pub(crate) fn channel() -> FeedChannel<'static> {
        FeedChannel {
            title: "my feed",
            link: "https://janedoe.dev",
            description: "My blog & notes",
            language: "en",
            author_name: "Jane Doe",
            author_email: "jane@janedoe.dev",
            logo: Some("/assets/logo.png"),
            favicon: Some("/favicon.ico"),
            generated_at: Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
        }
    }

    /// Number of `name` elements in a well-formed document.
    pub(crate) fn count_elements(xml: &[u8], name: &[u8]) -> usize {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut count = 0;
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name => count += 1,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        count
    }

    #[test]
    fn render_xml() {
        let mut first = post("rag", "AI", &["rag"], "2025-01-15");
        first.author.name = "Jane Doe".to_string();
        let posts = vec![first, post("broken-date", "", &[], "someday")];

        let channel = channel();
        let rss = RssChannel { channel: &channel };
        let xml = rss.render(&posts).unwrap();
        let xml_str = str::from_utf8(&xml).unwrap();

        assert_eq!(count_elements(&xml, b"item"), 2);
        assert!(xml_str.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0""#));
        assert!(xml_str.contains("<description>My blog &amp; notes</description>"));
        assert!(xml_str.contains("<copyright>All rights reserved 2025, Jane Doe</copyright>"));
        assert!(xml_str.contains("<lastBuildDate>Mon, 10 Mar 2025 08:00:00 +0000</lastBuildDate>"));
        assert!(xml_str.contains(r#"<atom:link href="https://janedoe.dev/api/rss" rel="self" type="application/rss+xml"/>"#));
        assert!(xml_str.contains("<url>https://janedoe.dev/assets/logo.png</url>"));
        assert!(xml_str.contains(concat!(
            "<item><title>title-of-rag</title>",
            "<link>https://janedoe.dev/blog/rag</link>",
            "<guid>https://janedoe.dev/blog/rag</guid>",
            "<description><![CDATA[description-of-rag]]></description>",
            "<content:encoded><![CDATA[excerpt-of-rag]]></content:encoded>",
            "<author>jane@janedoe.dev (Jane Doe)</author>",
            "<category>AI</category>",
            "<pubDate>Wed, 15 Jan 2025 00:00:00 +0000</pubDate>",
            r#"<enclosure url="https://janedoe.dev/images/rag.png" length="0" type="image/png"/>"#,
            "</item>")));
        // No category and no date on the second post.
        assert_eq!(count_elements(&xml, b"pubDate"), 1);
        assert_eq!(count_elements(&xml, b"category"), 1);
    }

    #[test]
    fn render_cdata_terminator() {
        let mut tricky = post("tricky", "AI", &[], "2025-01-15");
        tricky.description = "a ]]> b".to_string();

        let channel = channel();
        let xml = RssChannel { channel: &channel }.render(&[tricky]).unwrap();
        assert!(str::from_utf8(&xml).unwrap().contains("<![CDATA[a ]] > b]]>"));
        assert_eq!(count_elements(&xml, b"item"), 1);
    }

    #[test]
    fn render_empty() {
        let channel = channel();
        let xml = RssChannel { channel: &channel }.render(&[]).unwrap();
        assert_eq!(count_elements(&xml, b"channel"), 1);
        assert_eq!(count_elements(&xml, b"item"), 0);
    }
}
