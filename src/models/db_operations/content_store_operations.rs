use crate::models::envelope::PageMeta;
use crate::models::{District, GalleryItem, Post, Profile, Settings};
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture '{name}': {source}")]
    Io {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse fixture '{name}': {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate post id in fixture: {0}")]
    DuplicatePostId(i64),
    #[error("Duplicate post slug in fixture: {0}")]
    DuplicatePostSlug(String),
    #[error("Malformed post slug in fixture: '{0}'")]
    MalformedSlug(String),
}

/// Read-only collections loaded once at startup. Nothing mutates a
/// `ContentStore` after `new` returns.
#[derive(Debug)]
pub struct ContentStore {
    settings: Settings,
    posts: Vec<Post>,
    profiles: Vec<Profile>,
    districts: Vec<District>,
    gallery: Vec<GalleryItem>,
    post_index_by_id: HashMap<i64, usize>,
    post_index_by_slug: HashMap<String, usize>,
}

impl ContentStore {
    /// Builds the store and its lookup indexes, rejecting posts whose id or
    /// slug is not unique.
    pub fn new(
        settings: Settings,
        posts: Vec<Post>,
        profiles: Vec<Profile>,
        districts: Vec<District>,
        gallery: Vec<GalleryItem>,
    ) -> Result<Self, FixtureError> {
        // Lowercase words joined by single hyphens.
        let slug_pattern = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid");

        let mut post_index_by_id = HashMap::with_capacity(posts.len());
        let mut post_index_by_slug = HashMap::with_capacity(posts.len());
        for (idx, post) in posts.iter().enumerate() {
            if !slug_pattern.is_match(&post.slug) {
                return Err(FixtureError::MalformedSlug(post.slug.clone()));
            }
            if post_index_by_id.insert(post.id, idx).is_some() {
                return Err(FixtureError::DuplicatePostId(post.id));
            }
            if post_index_by_slug.insert(post.slug.clone(), idx).is_some() {
                return Err(FixtureError::DuplicatePostSlug(post.slug.clone()));
            }
        }

        Ok(Self {
            settings,
            posts,
            profiles,
            districts,
            gallery,
            post_index_by_id,
            post_index_by_slug,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.gallery
    }
}

// ====================================================================
// ========================= POST QUERIES =============================
// ====================================================================

/// Returns one page of posts in fixture order plus its pagination info.
///
/// `page` and `per_page` of zero are treated as 1. A page past the end yields
/// an empty slice with accurate totals.
pub fn read_posts_paginated(store: &ContentStore, page: u32, per_page: u32) -> (&[Post], PageMeta) {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = store.posts.len();
    let per = per_page as usize;

    let start = (page as usize - 1).saturating_mul(per).min(total);
    let end = start.saturating_add(per).min(total);

    let meta = PageMeta {
        current_page: page,
        per_page,
        total,
        total_pages: total.div_ceil(per),
    };
    (&store.posts[start..end], meta)
}

pub fn read_post_by_id(store: &ContentStore, id: i64) -> Option<&Post> {
    store.post_index_by_id.get(&id).map(|&idx| &store.posts[idx])
}

pub fn read_post_by_slug<'a>(store: &'a ContentStore, slug: &str) -> Option<&'a Post> {
    store.post_index_by_slug.get(slug).map(|&idx| &store.posts[idx])
}

pub fn read_profile_by_id(store: &ContentStore, id: i64) -> Option<&Profile> {
    store.profiles.iter().find(|p| p.id == id)
}
