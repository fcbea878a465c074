//! Simulated public page publishing for MockDrive.
//!
//! Each user can publish named HTML pages served at
//! `{base_url}/pages/{username}/{name}`. Page names are unique per owner
//! and must end in `.html`; the body is held in memory.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::{SimulationConfig, SiteConfig};
use crate::{MockDriveError, Result};

use super::Latency;

/// A published HTML page.
#[derive(Debug, Clone, Serialize)]
pub struct PublicPage {
    /// Unique page ID.
    pub id: Uuid,
    /// Page name, unique per owner ("portfolio.html").
    pub name: String,
    /// Username of the publisher.
    pub owner_username: String,
    /// When the page was published.
    pub created_at: DateTime<Utc>,
    /// When the page was last changed.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct StoredPage {
    page: PublicPage,
    html: String,
}

/// Simulated public page API.
#[derive(Debug)]
pub struct PublicPageService {
    pages: RwLock<Vec<StoredPage>>,
    latency: Latency,
    base_url: String,
}

impl PublicPageService {
    /// Create a new PublicPageService.
    pub fn new(sim: &SimulationConfig, site: &SiteConfig) -> Self {
        Self {
            pages: RwLock::new(Vec::new()),
            latency: Latency::for_upload(sim),
            base_url: site.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Publish a page for `owner`.
    ///
    /// Fails with Validation for bad names or empty bodies and Conflict
    /// when the owner already has a page with that name.
    pub async fn publish(&self, owner: &str, name: &str, html: &str) -> Result<PublicPage> {
        self.latency.pause().await;
        validate_page_name(name)?;
        if html.trim().is_empty() {
            return Err(MockDriveError::Validation(
                "page body is empty".to_string(),
            ));
        }

        let mut pages = self.pages.write();
        if pages
            .iter()
            .any(|p| p.page.owner_username == owner && p.page.name == name)
        {
            return Err(MockDriveError::Conflict(format!(
                "page \"{name}\" is already published"
            )));
        }

        let now = Utc::now();
        let page = PublicPage {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_username: owner.to_string(),
            created_at: now,
            updated_at: now,
        };
        pages.push(StoredPage {
            page: page.clone(),
            html: html.to_string(),
        });
        info!(owner = %owner, name = %name, "public page published");
        Ok(page)
    }

    /// List the pages published by `owner`.
    pub async fn list_for(&self, owner: &str) -> Result<Vec<PublicPage>> {
        self.latency.pause().await;
        Ok(self
            .pages
            .read()
            .iter()
            .filter(|p| p.page.owner_username == owner)
            .map(|p| p.page.clone())
            .collect())
    }

    /// Fetch a page and its HTML body, as the serve endpoint would.
    pub async fn fetch(&self, owner: &str, name: &str) -> Result<(PublicPage, String)> {
        self.latency.pause().await;
        self.pages
            .read()
            .iter()
            .find(|p| p.page.owner_username == owner && p.page.name == name)
            .map(|p| (p.page.clone(), p.html.clone()))
            .ok_or_else(|| MockDriveError::NotFound(format!("page {owner}/{name}")))
    }

    /// Remove a published page.
    pub async fn unpublish(&self, owner: &str, name: &str) -> Result<()> {
        self.latency.pause().await;
        let mut pages = self.pages.write();
        let before = pages.len();
        pages.retain(|p| !(p.page.owner_username == owner && p.page.name == name));
        if pages.len() == before {
            return Err(MockDriveError::NotFound(format!("page {owner}/{name}")));
        }
        info!(owner = %owner, name = %name, "public page removed");
        Ok(())
    }

    /// The URL a page is served under.
    pub fn page_url(&self, page: &PublicPage) -> String {
        format!(
            "{}/pages/{}/{}",
            self.base_url,
            urlencoding::encode(&page.owner_username),
            urlencoding::encode(&page.name)
        )
    }
}

/// Page names must be non-empty single segments ending in ".html".
fn validate_page_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MockDriveError::Validation("page name is empty".to_string()));
    }
    if name.contains('/') {
        return Err(MockDriveError::Validation(format!(
            "page name \"{name}\" must not contain '/'"
        )));
    }
    if !name.ends_with(".html") {
        return Err(MockDriveError::Validation(format!(
            "page name \"{name}\" must end in .html"
        )));
    }
    Ok(())
}
