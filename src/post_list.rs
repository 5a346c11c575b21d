use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::mdx_file::MdxFile;

#[derive(Debug, PartialEq)]
pub struct PostLink {
    pub slug: String,
    pub post_path: PathBuf,
}

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: &Path) -> Self {
        PostList {
            root_dir: root_dir.to_path_buf(),
        }
    }

    /// Every `.mdx` file directly inside the content directory, ordered by
    /// file name. A missing directory has no posts.
    pub fn retrieve_files(&self) -> io::Result<Vec<PostLink>> {
        let entries = match fs::read_dir(self.root_dir.as_path()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e),
        };

        let mut posts = vec![];
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let post_path = entry.path();
            if let Some(slug) = MdxFile::slug_from_path(&post_path) {
                posts.push(PostLink { slug, post_path });
            }
        }

        posts.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::test_data::{TempContentDir, POST_CHUNKING, POST_RAG};

    use super::*;

    #[test]
    fn test_retrieve_files() -> io::Result<()> {
        let dir = TempContentDir::with_posts(&[("rag", POST_RAG), ("chunking", POST_CHUNKING)]);
        dir.write("notes.md", "not a post");
        dir.write("draft.mdx.bak", "not a post either");
        fs::create_dir(dir.path().join("nested.mdx"))?;

        let post_list = PostList::new(dir.path());
        let posts = post_list.retrieve_files()?;
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["chunking", "rag"]);
        assert_eq!(posts[1].post_path, dir.path().join("rag.mdx"));
        Ok(())
    }

    #[test]
    fn test_missing_dir() -> io::Result<()> {
        let post_list = PostList::new(Path::new("/definitely/not/here/content"));
        assert!(post_list.retrieve_files()?.is_empty());
        Ok(())
    }
}
