use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use folio::content::Author;
use folio::util::os_helper::os_author;

use crate::{PostArgs, PostOutput};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPost<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    excerpt: &'a str,
    date: String,
    category: &'a str,
    tags: &'a [String],
    cover_image: &'a str,
    author: Author,
    featured: bool,
    published: bool,
}

fn get_author(args: &PostArgs) -> Author {
    match args.name {
        Some(ref name) => Author {
            id: slug_from_title(name),
            name: name.clone(),
            ..Default::default()
        },
        None => os_author(),
    }
}

fn render_post(id: &str, author: Author, date: &NaiveDate, args: &PostArgs) -> Result<String> {
    let title = args.title.as_deref().unwrap_or("Replace with title");
    let header = NewPost {
        id,
        title,
        description: "",
        excerpt: "",
        date: date.format("%Y-%m-%d").to_string(),
        category: args.category.as_deref().unwrap_or(""),
        tags: &args.tags,
        cover_image: "",
        author,
        featured: false,
        // New posts stay out of the site until they are reviewed
        published: false,
    };

    let yaml = serde_yaml::to_string(&header).context("Error writing frontmatter")?;
    Ok(format!("---\n{}---\n\n# {}\n\nThis is a body example.\nPlease remove it and replace with your content.\n", yaml, title))
}

/// Lowercase ascii words joined by dashes.
fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title).to_ascii_lowercase();
    ascii.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn post_cmd(args: PostArgs) -> Result<()> {
    if args.output == PostOutput::File && args.title.is_none() {
        bail!("For file output, title is required");
    }

    let id = Uuid::new_v4().to_string();
    let author = get_author(&args);
    let post = render_post(&id, author, &Utc::now().date_naive(), &args)?;

    match args.output {
        PostOutput::Stdout => println!("{}", post),
        PostOutput::File => {
            let title = args.title.as_deref().unwrap_or_default();
            let file_path = PathBuf::from(&args.dir).join(format!("{}.mdx", slug_from_title(title)));
            println!("Creating file {}", file_path.display());

            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .with_context(|| format!("Error creating {}", file_path.display()))?;
            file.write_all(post.as_bytes())?;
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use folio::content::frontmatter::{parse_frontmatter, split_frontmatter};

    use super::*;

    fn post_args(title: Option<&str>) -> PostArgs {
        PostArgs {
            name: Some("Jane Doe".to_string()),
            title: title.map(str::to_string),
            category: Some("AI".to_string()),
            tags: vec!["rag".to_string(), "agents".to_string()],
            output: PostOutput::Stdout,
            dir: ".".to_string(),
        }
    }

    #[test]
    fn test_render_post() {
        let id = "bcfc427f-f9f3-4442-bfc2-deca95db96d5";
        let date = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
        let args = post_args(Some("Agents: a \"field\" guide"));
        let post = render_post(id, get_author(&args), &date, &args).unwrap();

        let (yaml, body) = split_frontmatter(&post);
        let fm = parse_frontmatter(yaml).unwrap();
        assert_eq!(fm.id.as_deref(), Some(id));
        assert_eq!(fm.title.as_deref(), Some("Agents: a \"field\" guide"));
        assert_eq!(fm.date.as_deref(), Some("2025-02-27"));
        assert_eq!(fm.category.as_deref(), Some("AI"));
        assert_eq!(fm.tags.unwrap(), ["rag", "agents"]);
        assert_eq!(fm.published, Some(false));
        assert_eq!(fm.author.unwrap().id, "jane-doe");
        assert!(body.starts_with("\n# Agents: a \"field\" guide\n"));
    }

    #[test]
    fn test_render_without_title() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
        let args = post_args(None);
        let post = render_post("id", get_author(&args), &date, &args).unwrap();
        assert!(post.contains("# Replace with title"));
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slug_from_title("Post title of mine ábaco - dir2"), "post-title-of-mine-abaco-dir2");
        assert_eq!(slug_from_title("  RAG: the good parts!  "), "rag-the-good-parts");
    }
}
