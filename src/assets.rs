//! Icon asset provider backed by the Font Awesome desktop archive.
//!
//! The archive is fetched once over HTTP and kept in a content-addressed
//! store keyed by archive version + source URL. An existing blob is reused
//! as-is; two runs racing to populate the same key is an accepted hazard.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use scraper::{Html, Selector};
use sha2::{Digest, Sha256};

use crate::{Error, IconGlyph, Result};

/// See <https://fontawesome.com/how-to-use/on-the-desktop/setup/getting-started>
pub const FA_VERSION: &str = "5.15.2";

/// A provider of icon glyphs, consumed by the assembler
///
/// Implementations return the icon's outline markup and intrinsic
/// dimensions, or fail if the named icon does not exist in the asset set.
pub trait IconSource {
    fn glyph(&self, icon_name: &str) -> Result<IconGlyph>;

    /// Licensing notice to embed in the generated document, if any.
    fn attribution(&self) -> Option<String> {
        None
    }
}

/// Identifies one archive blob in a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheKey<'a> {
    pub version: &'a str,
    pub url: &'a str,
}

impl CacheKey<'_> {
    /// Stable content address for this key.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.version.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.url.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Where fetched archives are kept between runs
pub trait ArchiveStore {
    /// Returns the blob path if the key is already populated.
    fn get(&self, key: &CacheKey<'_>) -> Option<PathBuf>;

    /// Stores the blob and returns its path.
    fn put(&self, key: &CacheKey<'_>, bytes: &[u8]) -> Result<PathBuf>;
}

/// Archive store over a local directory
///
/// Blobs are named by the key digest. Present blobs are trusted without any
/// integrity check.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, key: &CacheKey<'_>) -> PathBuf {
        self.root.join(format!("{}.zip", key.digest()))
    }
}

impl ArchiveStore for DirStore {
    fn get(&self, key: &CacheKey<'_>) -> Option<PathBuf> {
        let path = self.blob_path(key);
        path.exists().then_some(path)
    }

    fn put(&self, key: &CacheKey<'_>, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.blob_path(key);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Icon source reading from a versioned Font Awesome desktop archive
pub struct FontAwesomeSource<S> {
    client: reqwest::blocking::Client,
    store: S,
    version: String,
    archive_url: String,
}

impl<S: ArchiveStore> FontAwesomeSource<S> {
    /// Source for the pinned Font Awesome release, cached in `store`.
    pub fn new(store: S) -> Self {
        let archive_url = format!(
            "https://use.fontawesome.com/releases/v{FA_VERSION}/fontawesome-free-{FA_VERSION}-desktop.zip"
        );
        Self::with_archive_url(store, FA_VERSION, archive_url)
    }

    /// Source for an arbitrary archive location (used by tests).
    pub fn with_archive_url(store: S, version: impl Into<String>, archive_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            store,
            version: version.into(),
            archive_url: archive_url.into(),
        }
    }

    /// Path of the local archive blob, fetching it on a cold store.
    fn archive(&self) -> Result<PathBuf> {
        let key = CacheKey {
            version: &self.version,
            url: &self.archive_url,
        };
        if let Some(path) = self.store.get(&key) {
            log::debug!("using cached icon archive at {}", path.display());
            return Ok(path);
        }

        log::info!("fetching icon archive from {}", self.archive_url);
        let response = self
            .client
            .get(&self.archive_url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Network(format!("failed to fetch icon archive: {e}")))?;
        let bytes = response
            .bytes()
            .map_err(|e| Error::Network(format!("failed to read icon archive: {e}")))?;

        self.store.put(&key, &bytes)
    }
}

impl<S: ArchiveStore> IconSource for FontAwesomeSource<S> {
    fn glyph(&self, icon_name: &str) -> Result<IconGlyph> {
        let path = self.archive()?;
        let file = fs::File::open(&path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| Error::Archive(format!("{}: {e}", path.display())))?;

        // Archive members look like:
        //     fontawesome-free-5.15.2-desktop/svgs/solid/snowflake.svg
        // The "solid" family matches what the original tool shipped.
        let member = format!(
            "fontawesome-free-{}-desktop/svgs/solid/{}.svg",
            self.version, icon_name
        );
        let mut entry = match archive.by_name(&member) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(Error::AssetNotFound(icon_name.to_string()))
            }
            Err(e) => return Err(Error::Archive(format!("{member}: {e}"))),
        };
        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;

        parse_glyph(&contents).ok_or_else(|| Error::Archive(format!("no <path> outline in {member}")))
    }

    fn attribution(&self) -> Option<String> {
        Some(format!(
            "Font Awesome Free {} by @fontawesome - https://fontawesome.com License - https://fontawesome.com/license/free (Icons: CC BY 4.0, Fonts: SIL OFL 1.1, Code: MIT License)",
            self.version
        ))
    }
}

/// Extracts the outline and `viewBox` dimensions from one icon document.
///
/// Font Awesome icons are a single `<svg viewBox="0 0 W H">` wrapping one
/// `<path>`; anything else (comments, metadata) is ignored.
fn parse_glyph(contents: &str) -> Option<IconGlyph> {
    let document = Html::parse_document(contents);
    let svg_selector = Selector::parse("svg").unwrap();
    let path_selector = Selector::parse("path").unwrap();

    let svg = document.select(&svg_selector).next()?;
    let view_box = svg.value().attr("viewBox")?;
    let mut dimensions = view_box.split_whitespace().skip(2);
    let width: f64 = dimensions.next()?.parse().ok()?;
    let height: f64 = dimensions.next()?.parse().ok()?;

    let outline = document.select(&path_selector).next()?.html();
    Some(IconGlyph {
        width,
        height,
        outline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: &str = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 448 512">"#,
        r#"<!-- Font Awesome Free 5.15.2 by @fontawesome -->"#,
        r#"<path d="M224 96l32 64h-64z"/></svg>"#
    );

    #[test]
    fn parse_glyph_extracts_dimensions_and_outline() {
        let glyph = parse_glyph(ICON).unwrap();
        assert_eq!(glyph.width, 448.0);
        assert_eq!(glyph.height, 512.0);
        assert!(glyph.outline.starts_with("<path"));
        assert!(glyph.outline.contains("M224 96l32 64h-64z"));
    }

    #[test]
    fn parse_glyph_rejects_pathless_documents() {
        let contents = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 448 512"></svg>"#;
        assert!(parse_glyph(contents).is_none());
    }

    #[test]
    fn cache_key_digest_is_stable_and_distinct() {
        let a = CacheKey { version: "5.15.2", url: "https://example.com/fa.zip" };
        let b = CacheKey { version: "5.15.2", url: "https://example.com/fa.zip" };
        let other_version = CacheKey { version: "6.0.0", url: "https://example.com/fa.zip" };
        let other_url = CacheKey { version: "5.15.2", url: "https://example.org/fa.zip" };

        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), other_version.digest());
        assert_ne!(a.digest(), other_url.digest());
    }

    #[test]
    fn dir_store_round_trips_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());
        let key = CacheKey { version: "5.15.2", url: "https://example.com/fa.zip" };

        assert!(store.get(&key).is_none());
        let path = store.put(&key, b"not really a zip").unwrap();
        assert_eq!(store.get(&key).as_deref(), Some(path.as_path()));
        assert_eq!(fs::read(&path).unwrap(), b"not really a zip");
    }
}
