use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const MDX_EXTENSION: &str = "mdx";

pub struct MdxFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl MdxFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> io::Result<MdxFile> {
        if !Self::is_mdx(&file_path) {
            return Err(io::Error::new(ErrorKind::Unsupported, format!("Not an MDX file: {}", file_path.display())));
        }

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(MdxFile {
            slug,
            file_path,
            raw_content,
        })
    }

    /// Opens `<content_dir>/<slug>.mdx`. `None` when there is no such post.
    pub fn from_slug(content_dir: &Path, slug: &str) -> io::Result<Option<MdxFile>> {
        if !Self::is_valid_slug(slug) {
            return Ok(None);
        }

        let file_path = content_dir.join(format!("{}.{}", slug, MDX_EXTENSION));
        if !file_path.is_file() {
            return Ok(None);
        }

        Self::from_file(slug.to_string(), file_path).map(Some)
    }

    /// The slug of a post is its file name without the extension.
    pub fn slug_from_path(path: &Path) -> Option<String> {
        if !Self::is_mdx(path) {
            return None;
        }
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.to_string())
    }

    fn is_mdx(path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(MDX_EXTENSION)
    }

    fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
    }
}
