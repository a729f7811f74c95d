//! The on-disk tag cache produced by the image classifier.
//!
//! The cache is a JSON object mapping each image reference to the tags the
//! classifier assigned it:
//!
//! ```json
//! {
//!   "https://example.com/beach.jpg": [
//!     { "name": "beach", "score": 0.98 },
//!     { "name": "sand", "score": 0.91 }
//!   ]
//! }
//! ```
//!
//! Older caches use capitalized `Name`/`Score` keys; both spellings load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// One classifier tag on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTag {
    /// The tag term
    #[serde(alias = "name", alias = "Name", alias = "Term")]
    pub term: String,

    /// Classifier confidence from 0.0 to 1.0
    #[serde(alias = "Score")]
    pub score: f32,
}

impl ImageTag {
    pub fn new(term: impl Into<String>, score: f32) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }
}

/// Image reference → ordered tag list.
///
/// Backed by a `BTreeMap`, so iteration is ordered by image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCache {
    images: BTreeMap<String, Vec<ImageTag>>,
}

impl TagCache {
    /// Load the tag cache from a JSON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let cache = Self::from_json(&content, path)?;
        tracing::info!("Loaded tag cache: {} images", cache.len());
        Ok(cache)
    }

    /// Parse a tag cache from a JSON document. `source` labels errors.
    pub fn from_json(content: &str, source: &Path) -> LoadResult<Self> {
        let cache: TagCache =
            serde_json::from_str(content).map_err(|e| LoadError::TagCache {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;

        let out_of_range = cache
            .images
            .values()
            .flatten()
            .filter(|t| !(0.0..=1.0).contains(&t.score))
            .count();
        if out_of_range > 0 {
            tracing::warn!(
                "{} tags in {:?} have scores outside [0, 1]",
                out_of_range,
                source
            );
        }

        Ok(cache)
    }

    /// Build a cache from in-memory `(image, tags)` pairs.
    pub fn from_images<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<ImageTag>)>,
        S: Into<String>,
    {
        Self {
            images: images
                .into_iter()
                .map(|(image, tags)| (image.into(), tags))
                .collect(),
        }
    }

    /// Number of images in the cache.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the cache holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate over `(image, tags)` in image-reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ImageTag])> {
        self.images
            .iter()
            .map(|(image, tags)| (image.as_str(), tags.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase_keys() {
        let json = r#"{"img1": [{"name": "cat", "score": 0.9}]}"#;
        let cache = TagCache::from_json(json, Path::new("cache.json")).unwrap();
        assert_eq!(cache.len(), 1);
        let (image, tags) = cache.iter().next().unwrap();
        assert_eq!(image, "img1");
        assert_eq!(tags, &[ImageTag::new("cat", 0.9)]);
    }

    #[test]
    fn test_parse_capitalized_keys() {
        let json = r#"{"img1": [{"Name": "cat", "Score": 0.9}, {"Name": "pet", "Score": 0.7}]}"#;
        let cache = TagCache::from_json(json, Path::new("cache.json")).unwrap();
        let (_, tags) = cache.iter().next().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].term, "pet");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = TagCache::from_json("{\"img1\": [", Path::new("cache.json")).unwrap_err();
        assert!(matches!(err, LoadError::TagCache { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err =
            TagCache::from_json(r#"["img1", "img2"]"#, Path::new("cache.json")).unwrap_err();
        assert!(matches!(err, LoadError::TagCache { .. }));
    }

    #[test]
    fn test_iter_is_ordered_by_image() {
        let cache = TagCache::from_images(vec![
            ("b.jpg", vec![]),
            ("a.jpg", vec![ImageTag::new("cat", 0.1)]),
        ]);
        let images: Vec<&str> = cache.iter().map(|(image, _)| image).collect();
        assert_eq!(images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TagCache::load(&dir.path().join("cache.json")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, r#"{"img1": [{"name": "beach", "score": 0.98}]}"#).unwrap();
        let cache = TagCache::load(&path).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.iter().next().unwrap().1[0].term, "beach");
    }
}
