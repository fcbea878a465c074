//! Demo dataset for the mock store.
//!
//! Mirrors the fixture tree the simulated backend served during UI
//! development: a public subtree with a small published site, a couple of
//! private folders, and a loose file at the root.

use crate::Result;

use super::tree::MockStore;

/// Username owning every seeded node.
pub const DEMO_OWNER: &str = "testuser";

/// Build a store pre-populated with the demo tree:
///
/// ```text
/// /
/// ├── public/
/// │   ├── README.md
/// │   ├── portfolio.html
/// │   └── assets/
/// │       └── logo.png
/// ├── Docs/
/// │   ├── project_plan.docx
/// │   ├── Archive/
/// │   └── Test/
/// │       └── subtest.txt
/// ├── Pictures/
/// │   └── vacation.jpg
/// └── report.txt
/// ```
pub fn demo_store(public_root: &str) -> Result<MockStore> {
    let mut store = MockStore::with_public_root(public_root);

    store.create_folder("/", "public", DEMO_OWNER)?;
    store.upload("/public", "README.md", 2048, None, DEMO_OWNER)?;
    store.upload("/public", "portfolio.html", 5120, None, DEMO_OWNER)?;
    store.create_folder("/public", "assets", DEMO_OWNER)?;
    store.upload("/public/assets", "logo.png", 10240, None, DEMO_OWNER)?;

    store.create_folder("/", "Docs", DEMO_OWNER)?;
    store.upload("/Docs", "project_plan.docx", 51200, None, DEMO_OWNER)?;
    store.create_folder("/Docs", "Archive", DEMO_OWNER)?;
    store.create_folder("/Docs", "Test", DEMO_OWNER)?;
    store.upload("/Docs/Test", "subtest.txt", 50, None, DEMO_OWNER)?;

    store.create_folder("/", "Pictures", DEMO_OWNER)?;
    store.upload("/Pictures", "vacation.jpg", 204800, None, DEMO_OWNER)?;

    store.upload("/", "report.txt", 1024, None, DEMO_OWNER)?;

    Ok(store)
}
