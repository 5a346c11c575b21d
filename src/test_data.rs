#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

pub const CONFIG_DATA: &str = r##"[personal]
name = "Jane Doe"
email = "jane@janedoe.dev"
career_start_date = 2015-03-01
blog_start_date = 2024-01-10

[site]
title = "Jane Doe - Engineering Blog"
description = "Notes on AI agents, retrieval and product work"
url = "https://janedoe.dev/"
logo = "/assets/logo.png"
favicon = "/favicon.ico"

[paths]
template_dir = "template"
public_dir = "public"
content_dir = "content/blogs"

[defaults]
page_size = 2

[server]
address = "127.0.0.1"
port = 8001

[auth]
session_token = "s3cret"
"##;

pub const POST_RAG: &str = r##"---
title: "Building a RAG pipeline"
description: "Retrieval augmented generation from scratch"
date: "2025-01-15"
category: "AI"
tags: ["rag", "agents"]
coverImage: "/images/rag.png"
featured: true
author:
  id: "jane"
  name: "Jane Doe"
  avatar: "/avatars/jane.png"
  bio: "Engineer"
  github: "janedoe"
---

import { Callout } from '../components/callout'

# Building a RAG pipeline

Retrieval comes first.

{/* draft note */}

<!-- hidden -->

Then generation.
"##;

pub const POST_CHUNKING: &str = r##"---
title: "Chunking strategies"
description: "How to split documents"
excerpt: "Split documents the right way"
date: "2025-02-01"
category: "AI"
tags: ["rag"]
coverImage: "https://cdn.example.com/chunks.jpg"
author:
  id: "jane"
  name: "Jane Doe"
  avatar: "/avatars/jane.png"
  bio: "Engineer"
---

Chunk size matters.
"##;

pub const POST_MARKETING: &str = r##"---
title: "Positioning AI products"
description: "Marketing agents"
date: "2024-11-20"
category: "Marketing"
tags: ["agents"]
coverImage: "/images/pos.png"
readTime: "12 min read"
canonicalUrl: "https://medium.com/@jane/positioning"
author:
  id: "sam"
  name: "Sam Roe"
  avatar: "/avatars/sam.png"
  bio: "Marketer"
---

Positioning is everything.
"##;

pub const POST_COOKING: &str = r##"---
title: "Sourdough"
description: "Bread"
date: "2024-06-01"
category: "Life"
tags: ["bread"]
coverImage: "/images/bread.png"
author:
  id: "jane"
  name: "Jane Doe"
  avatar: "/avatars/jane.png"
  bio: "Engineer"
---

Flour and water.
"##;

pub const POST_DRAFT: &str = r##"---
title: "Unfinished thoughts on MCP"
description: "Draft"
date: "2025-03-01"
category: "AI"
tags: ["mcp", "agents"]
coverImage: "/images/mcp.png"
published: false
author:
  id: "jane"
  name: "Jane Doe"
  avatar: "/avatars/jane.png"
  bio: "Engineer"
---

Not ready yet.
"##;

/// A content directory under the OS temp dir, removed on drop.
pub struct TempContentDir {
    pub path: PathBuf,
}

impl TempContentDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("folio-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        TempContentDir { path }
    }

    pub fn with_posts(posts: &[(&str, &str)]) -> Self {
        let dir = Self::new();
        for (slug, content) in posts {
            dir.write(&format!("{}.mdx", slug), content);
        }
        dir
    }

    /// The five sample posts above.
    pub fn sample() -> Self {
        Self::with_posts(&[
            ("building-a-rag-pipeline", POST_RAG),
            ("chunking-strategies", POST_CHUNKING),
            ("positioning-ai-products", POST_MARKETING),
            ("sourdough", POST_COOKING),
            ("mcp-draft", POST_DRAFT),
        ])
    }

    pub fn write(&self, file_name: &str, content: &str) {
        fs::write(self.path.join(file_name), content).unwrap();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempContentDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
