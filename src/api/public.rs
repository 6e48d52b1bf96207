use super::PortalApi;
use crate::models::db_operations::content_store_operations;
use crate::models::envelope::Envelope;
use crate::models::{District, GalleryItem, Post, Profile, Settings};

pub const DEFAULT_PAGE_SIZE: u32 = 6;

impl PortalApi {
    pub async fn fetch_settings(&self) -> Envelope<Settings> {
        self.simulate_delay().await;
        Envelope::ok(self.store.settings().clone())
    }

    /// One page of posts in publication-list order. Zero `page`/`per_page`
    /// are clamped to 1; pages past the end are empty, not failures.
    pub async fn fetch_posts(&self, page: u32, per_page: u32) -> Envelope<Vec<Post>> {
        self.simulate_delay().await;
        let (posts, meta) = content_store_operations::read_posts_paginated(&self.store, page, per_page);
        log::debug!("Serving posts page {} ({} of {})", meta.current_page, posts.len(), meta.total);
        Envelope::paged(posts.to_vec(), meta)
    }

    pub async fn fetch_post_by_id(&self, id: i64) -> Envelope<Post> {
        self.simulate_delay().await;
        match content_store_operations::read_post_by_id(&self.store, id) {
            Some(post) => Envelope::ok(post.clone()),
            None => Envelope::failure("Post not found"),
        }
    }

    pub async fn fetch_post_by_slug(&self, slug: &str) -> Envelope<Post> {
        self.simulate_delay().await;
        match content_store_operations::read_post_by_slug(&self.store, slug) {
            Some(post) => Envelope::ok(post.clone()),
            None => Envelope::failure("Post not found"),
        }
    }

    pub async fn fetch_profiles(&self) -> Envelope<Vec<Profile>> {
        self.simulate_delay().await;
        Envelope::ok(self.store.profiles().to_vec())
    }

    pub async fn fetch_profile_by_id(&self, id: i64) -> Envelope<Profile> {
        self.simulate_delay().await;
        match content_store_operations::read_profile_by_id(&self.store, id) {
            Some(profile) => Envelope::ok(profile.clone()),
            None => Envelope::failure("Profile not found"),
        }
    }

    pub async fn fetch_districts(&self) -> Envelope<Vec<District>> {
        self.simulate_delay().await;
        Envelope::ok(self.store.districts().to_vec())
    }

    pub async fn fetch_gallery(&self) -> Envelope<Vec<GalleryItem>> {
        self.simulate_delay().await;
        Envelope::ok(self.store.gallery().to_vec())
    }
}
