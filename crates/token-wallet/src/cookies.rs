//! Session cookie persistence
//!
//! Stores ambient session cookies in a plain JSON file next to the token
//! cache. The wallet asks for them to be cleared whenever the current token
//! transitions from present to absent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

/// A single session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
}

/// File format for persisted cookies
#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieFile {
    version: u32,
    cookies: Vec<SessionCookie>,
}

/// Trait for clearing session artifacts tied to the previous authentication
///
/// `clear` must be idempotent; the wallet treats failures as best-effort and
/// never retries.
#[async_trait]
pub trait CookieClearer: Send + Sync {
    /// Remove all stored session cookies
    async fn clear(&self) -> Result<()>;
}

/// File-backed session cookie jar
pub struct FileCookieJar {
    /// Path to the cookie file
    cookie_file: PathBuf,
}

impl FileCookieJar {
    /// Create a cookie jar storing its file in the given directory
    pub fn new(storage_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(storage_dir)?;

        Ok(Self {
            cookie_file: storage_dir.join("session_cookies.json"),
        })
    }

    /// Store a cookie, replacing any existing cookie with the same name and
    /// domain
    pub async fn set(&self, cookie: SessionCookie) -> Result<()> {
        let mut file = self.load_file().await?;
        file.cookies
            .retain(|c| !(c.name == cookie.name && c.domain == cookie.domain));
        file.cookies.push(cookie);

        self.save_file(&file).await
    }

    /// Look up a cookie by name and domain
    pub async fn get(&self, name: &str, domain: &str) -> Result<Option<SessionCookie>> {
        let file = self.load_file().await?;

        Ok(file
            .cookies
            .into_iter()
            .find(|c| c.name == name && c.domain == domain))
    }

    /// List all stored cookies
    pub async fn all(&self) -> Result<Vec<SessionCookie>> {
        Ok(self.load_file().await?.cookies)
    }

    async fn load_file(&self) -> Result<CookieFile> {
        if !self.cookie_file.exists() {
            return Ok(CookieFile {
                version: 1,
                cookies: Vec::new(),
            });
        }

        let contents = tokio::fs::read_to_string(&self.cookie_file).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn save_file(&self, file: &CookieFile) -> Result<()> {
        let contents = serde_json::to_string_pretty(file)?;

        // Write atomically using a temp file
        let temp_path = self.cookie_file.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await?;
        tokio::fs::rename(&temp_path, &self.cookie_file).await?;

        Ok(())
    }
}

#[async_trait]
impl CookieClearer for FileCookieJar {
    async fn clear(&self) -> Result<()> {
        if self.cookie_file.exists() {
            tokio::fs::remove_file(&self.cookie_file).await?;
            debug!("Cleared session cookies at {:?}", self.cookie_file);
        }

        Ok(())
    }
}
