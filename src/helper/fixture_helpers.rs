use crate::models::db_operations::content_store_operations::{ContentStore, FixtureError};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const SETTINGS: &str = "settings.json";
const POSTS: &str = "posts.json";
const KEY_PERSONS: &str = "key_persons.json";
const DISTRICTS: &str = "districts.json";
const GALLERY: &str = "gallery.json";

const BUNDLED_SETTINGS: &str = include_str!("../../fixtures/settings.json");
const BUNDLED_POSTS: &str = include_str!("../../fixtures/posts.json");
const BUNDLED_KEY_PERSONS: &str = include_str!("../../fixtures/key_persons.json");
const BUNDLED_DISTRICTS: &str = include_str!("../../fixtures/districts.json");
const BUNDLED_GALLERY: &str = include_str!("../../fixtures/gallery.json");

fn parse<T: DeserializeOwned>(name: &'static str, raw: &str) -> Result<T, FixtureError> {
    serde_json::from_str(raw).map_err(|source| FixtureError::Parse { name, source })
}

fn read(dir: &Path, name: &'static str) -> Result<String, FixtureError> {
    fs::read_to_string(dir.join(name)).map_err(|source| FixtureError::Io { name, source })
}

/// Builds the content store from the datasets compiled into the binary.
pub fn bundled_store() -> Result<ContentStore, FixtureError> {
    let store = ContentStore::new(
        parse(SETTINGS, BUNDLED_SETTINGS)?,
        parse(POSTS, BUNDLED_POSTS)?,
        parse(KEY_PERSONS, BUNDLED_KEY_PERSONS)?,
        parse(DISTRICTS, BUNDLED_DISTRICTS)?,
        parse(GALLERY, BUNDLED_GALLERY)?,
    )?;
    log::debug!("Loaded bundled fixtures ({} posts)", store.posts().len());
    Ok(store)
}

/// Builds the content store from the same five JSON files found in `dir`.
pub fn store_from_dir(dir: &Path) -> Result<ContentStore, FixtureError> {
    let store = ContentStore::new(
        parse(SETTINGS, &read(dir, SETTINGS)?)?,
        parse(POSTS, &read(dir, POSTS)?)?,
        parse(KEY_PERSONS, &read(dir, KEY_PERSONS)?)?,
        parse(DISTRICTS, &read(dir, DISTRICTS)?)?,
        parse(GALLERY, &read(dir, GALLERY)?)?,
    )?;
    log::info!("Loaded fixtures from '{}' ({} posts)", dir.display(), store.posts().len());
    Ok(store)
}
