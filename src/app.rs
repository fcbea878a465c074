//! Simulator facade wiring configuration, store, and services together.

use tracing::info;

use crate::auth::{AuthService, NewMockUser};
use crate::config::Config;
use crate::service::{FileService, PublicPageService, SharingService, ShellService};
use crate::store::{self, MockStore, SharedStore};
use crate::Result;

/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// Email of the seeded demo account.
pub const DEMO_EMAIL: &str = "test@example.com";

/// The assembled backend simulator.
///
/// Owns the shared store and exposes one service per simulated API
/// surface. Construct with [`Simulator::new`] for an empty tree or
/// [`Simulator::with_demo_data`] for the seeded demo dataset plus a demo
/// account.
pub struct Simulator {
    config: Config,
    store: SharedStore,
    /// Simulated file API.
    pub files: FileService,
    /// Simulated shell.
    pub shell: ShellService,
    /// Simulated sharing API.
    pub sharing: SharingService,
    /// Simulated public page API.
    pub pages: PublicPageService,
    /// Mock authentication API.
    pub auth: AuthService,
}

impl Simulator {
    /// Build a simulator over an empty store (root directory only).
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let store = store::shared(MockStore::with_public_root(&config.site.public_root));
        Ok(Self::assemble(config, store))
    }

    /// Build a simulator over the seeded demo tree, with the demo user
    /// registered (`test@example.com` / `password123`).
    pub fn with_demo_data(config: Config) -> Result<Self> {
        config.validate()?;
        let store = store::shared(store::demo_store(&config.site.public_root)?);
        let simulator = Self::assemble(config, store);

        simulator.auth.add_user(
            NewMockUser::new(
                DEMO_EMAIL,
                &simulator.config.site.default_owner,
                DEMO_PASSWORD,
            )
            .with_name("Test", "User"),
        )?;

        info!(owner = %simulator.config.site.default_owner, "simulator seeded with demo data");
        Ok(simulator)
    }

    fn assemble(config: Config, store: SharedStore) -> Self {
        let files = FileService::new(store.clone(), &config.simulation);
        let shell = ShellService::new(
            store.clone(),
            &config.simulation,
            config.site.default_owner.clone(),
        );
        let sharing = SharingService::new(store.clone(), &config.simulation);
        let pages = PublicPageService::new(&config.simulation, &config.site);
        let auth = AuthService::new(&config.auth, &config.simulation);

        Self {
            config,
            store,
            files,
            shell,
            sharing,
            pages,
            auth,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle to the underlying store (tests and setup code).
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::MockDriveError;

    fn instant_config() -> Config {
        let mut config = Config::default();
        config.simulation = SimulationConfig::instant();
        config
    }

    #[tokio::test]
    async fn test_empty_simulator_has_bare_root() {
        let sim = Simulator::new(instant_config()).unwrap();
        assert!(sim.files.list_files("/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_demo_simulator_seeds_tree_and_account() {
        let sim = Simulator::with_demo_data(instant_config()).unwrap();

        assert_eq!(sim.files.list_files("/").await.unwrap().len(), 4);
        assert!(sim.auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = instant_config();
        config.auth.jwt_secret = String::new();
        assert!(matches!(
            Simulator::new(config),
            Err(MockDriveError::Config(_))
        ));
    }
}
