use std::io;
use std::io::ErrorKind;

use markdown::Options;

const FENCE: &str = "```";

/// Renders the body of a post to HTML.
///
/// MDX module lines and comments are dropped first. The rest is rendered as
/// GitHub flavoured markdown; JSX elements come out escaped.
pub fn render_mdx(body: &str) -> io::Result<String> {
    let buf = remove_comments(&remove_esm(body));
    match markdown::to_html_with_options(buf.as_str(), &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Drops top level `import` and `export` lines. Code fences are left alone.
pub fn remove_esm(body: &str) -> String {
    let mut res = String::with_capacity(body.len());
    let mut in_fence = false;

    for line in body.split_inclusive('\n') {
        if is_fence(line) {
            in_fence = !in_fence;
        }

        let trimmed = line.trim_start();
        if !in_fence && (trimmed.starts_with("import ") || trimmed.starts_with("export ")) {
            continue;
        }
        res.push_str(line);
    }

    res
}

/// Drops `{/* */}` and `<!-- -->` comments outside code fences.
pub fn remove_comments(body: &str) -> String {
    fn strip(prose: &str) -> String {
        remove_blocks(&remove_blocks(prose, "{/*", "*/}"), "<!--", "-->")
    }

    let mut res = String::with_capacity(body.len());
    let mut prose = String::new();
    let mut in_fence = false;

    for line in body.split_inclusive('\n') {
        let fence = is_fence(line);
        if !in_fence && !fence {
            prose.push_str(line);
            continue;
        }

        res.push_str(&strip(&prose));
        prose.clear();
        res.push_str(line);
        if fence {
            in_fence = !in_fence;
        }
    }
    res.push_str(&strip(&prose));

    res
}

/// Length of the code span at the start of `text`, backticks included.
/// An opening run with no matching closing run counts as plain backticks.
fn code_span_len(text: &str) -> usize {
    let open = text.bytes().take_while(|b| *b == b'`').count();
    let mut pos = open;

    while let Some(found) = text[pos..].find('`') {
        let start = pos + found;
        let run = text[start..].bytes().take_while(|b| *b == b'`').count();
        if run == open {
            return start + run;
        }
        pos = start + run;
    }

    open
}

/// Removes every `start ... end` block, delimiters included.
///
/// Inline code spans are copied as they are. A start mark without its end
/// mark is kept along with the rest of the text.
pub fn remove_blocks(text: &str, start_mark: &str, end_mark: &str) -> String {
    let mut res: String = String::with_capacity(text.len());
    let mut slice = text;

    loop {
        let mark = slice.find(start_mark);
        let tick = slice.find('`');

        match (mark, tick) {
            (Some(start), tick) if tick.map_or(true, |t| start < t) => {
                let next: &str = &slice[(start + start_mark.len())..];
                match next.find(end_mark) {
                    Some(end) => {
                        res.push_str(&slice[0..start]);
                        slice = &next[(end + end_mark.len())..];
                    }
                    None => break,
                }
            }
            (_, Some(t)) => {
                let span_end = t + code_span_len(&slice[t..]);
                res.push_str(&slice[0..span_end]);
                slice = &slice[span_end..];
            }
            _ => break,
        }
    }
    res.push_str(slice);

    res
}

#[cfg(test)]
mod tests {
    use crate::content::frontmatter::split_frontmatter;
    use crate::test_data::POST_RAG;

    use super::*;

    #[test]
    fn test_render_post_body() {
        let (_yaml, body) = split_frontmatter(POST_RAG);
        let html = render_mdx(body).unwrap();
        assert!(html.contains("<h1>Building a RAG pipeline</h1>"));
        assert!(html.contains("<p>Retrieval comes first.</p>"));
        assert!(html.contains("<p>Then generation.</p>"));
        assert!(!html.contains("import"));
        assert!(!html.contains("draft note"));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn test_remove_esm_keeps_code() {
        let body = "import A from 'a'\n\n```js\nimport b from 'b'\n```\nexport const x = 1\ntext\n";
        assert_eq!(remove_esm(body), "\n```js\nimport b from 'b'\n```\ntext\n");
    }

    #[test]
    fn test_remove_blocks() {
        let res = remove_blocks("Some text.<!-- more -->Wo<!-- xyz -->rd", "<!--", "-->");
        assert_eq!(res, "Some text.Word");

        assert_eq!(remove_blocks("Some text.Word", "<!--", "-->"), "Some text.Word");
        assert_eq!(remove_blocks("", "<!--", "-->"), "");
        assert_eq!(remove_blocks("a{/* one */}b{/* two */}", "{/*", "*/}"), "ab");
    }

    #[test]
    fn test_unclosed_comment_is_kept() {
        assert_eq!(remove_blocks("a<!-- open", "<!--", "-->"), "a<!-- open");
        assert_eq!(remove_blocks("a<!-- x -->b<!-- open", "<!--", "-->"), "ab<!-- open");
    }

    #[test]
    fn test_inline_code_is_kept() {
        let text = "Open one with `<!--` and close it with `-->`.<!-- gone -->";
        assert_eq!(remove_blocks(text, "<!--", "-->"), "Open one with `<!--` and close it with `-->`.");

        let text = "Use ``{/* `x` */}`` in JSX{/* gone */}";
        assert_eq!(remove_blocks(text, "{/*", "*/}"), "Use ``{/* `x` */}`` in JSX");

        assert_eq!(remove_blocks("a ` b<!-- c -->", "<!--", "-->"), "a ` b");
    }

    #[test]
    fn test_marker_in_inline_code_renders() {
        let html = render_mdx("Open an HTML comment with `<!--` in your markup.\n").unwrap();
        assert!(html.contains("<p>Open an HTML comment with <code>&lt;!--</code> in your markup.</p>"));
    }

    #[test]
    fn test_fenced_code_keeps_comments() {
        let html = render_mdx("```jsx\n<div>{/* keep me */}</div>\n<!-- and me -->\n```\n{/* gone */}\nAfter\n").unwrap();
        assert!(html.contains("&lt;div&gt;{/* keep me */}&lt;/div&gt;"));
        assert!(html.contains("&lt;!-- and me --&gt;"));
        assert!(!html.contains("gone"));
        assert!(html.contains("<p>After</p>"));
    }

    #[test]
    fn test_render_gfm() {
        let html = render_mdx("| a | b |\n|---|---|\n| 1 | 2 |\n").unwrap();
        assert!(html.contains("<table>"));
    }
}
