use std::cmp::Ordering;
use std::collections::HashSet;

use crate::content::{Author, BlogPost};

pub const CATEGORY_SCORE: u32 = 3;
pub const SHARED_TAG_SCORE: u32 = 2;

/// Newest first. Posts whose date does not parse go last.
pub fn sort_by_date_desc(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| match (&a.published_at, &b.published_at) {
        (Some(da), Some(db)) => db.cmp(da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn filter_by_category<'a>(posts: &'a [BlogPost], category: &str) -> Vec<&'a BlogPost> {
    posts.iter().filter(|post| post.category == category).collect()
}

pub fn filter_by_tag<'a>(posts: &'a [BlogPost], tag: &str) -> Vec<&'a BlogPost> {
    posts.iter().filter(|post| post.tags.iter().any(|t| t == tag)).collect()
}

/// Similarity of `candidate` to `current`: a matching category plus every
/// distinct tag the two share.
pub fn related_score(current: &BlogPost, candidate: &BlogPost) -> u32 {
    let mut score = 0;
    if candidate.category == current.category {
        score += CATEGORY_SCORE;
    }

    let shared: HashSet<&str> = candidate.tags.iter()
        .filter(|tag| current.tags.contains(tag))
        .map(|tag| tag.as_str())
        .collect();
    score += shared.len() as u32 * SHARED_TAG_SCORE;

    score
}

/// Best scoring candidates, highest score first, at most `limit` of them.
/// `current` itself and candidates scoring zero are left out.
pub fn related_posts<'a>(current: &BlogPost, candidates: &'a [BlogPost], limit: usize) -> Vec<&'a BlogPost> {
    let mut scored: Vec<(u32, &BlogPost)> = candidates.iter()
        .filter(|post| post.id != current.id)
        .map(|post| (related_score(current, post), post))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|(sa, _), (sb, _)| sb.cmp(sa));

    scored.into_iter()
        .take(limit)
        .map(|(_, post)| post)
        .collect()
}

/// Distinct categories in order of first appearance.
pub fn unique_categories(posts: &[BlogPost]) -> Vec<String> {
    let mut seen = HashSet::new();
    posts.iter()
        .filter(|post| seen.insert(post.category.as_str()))
        .map(|post| post.category.clone())
        .collect()
}

/// Distinct tags in order of first appearance.
pub fn unique_tags(posts: &[BlogPost]) -> Vec<String> {
    let mut seen = HashSet::new();
    posts.iter()
        .flat_map(|post| post.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Authors deduplicated by id; the first post of an author wins.
pub fn unique_authors(posts: &[BlogPost]) -> Vec<Author> {
    let mut seen = HashSet::new();
    posts.iter()
        .filter(|post| seen.insert(post.author.id.as_str()))
        .map(|post| post.author.clone())
        .collect()
}

/// Tags ordered by the number of posts using them, most used first.
pub fn tags_by_frequency(posts: &[BlogPost]) -> Vec<(String, u32)> {
    let mut tag_list: Vec<(String, u32)> = Vec::new();
    for tag in posts.iter().flat_map(|post| post.tags.iter()) {
        match tag_list.iter_mut().find(|(t, _)| t == tag) {
            Some((_, count)) => *count += 1,
            None => tag_list.push((tag.clone(), 1)),
        }
    }

    tag_list.sort_by(|(_, va), (_, vb)| vb.cmp(va));
    tag_list
}
