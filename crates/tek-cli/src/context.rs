use std::path::Path;

use anyhow::Context;
use tek_client::ApiClient;
use tek_config::TekConfig;
use tek_db::TekService;
use tek_roster::DebouncedVerifier;

use crate::cli::GlobalFlags;

/// Where registrations and evaluations go.
pub enum Backend {
    Remote(ApiClient),
    Local(Box<TekService>),
}

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TekConfig,
    pub backend: Backend,
    /// The membership service is always remote, local store or not.
    membership: ApiClient,
}

impl AppContext {
    pub async fn init(config: TekConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let membership = ApiClient::new(&config.api).context("failed to build HTTP client")?;

        let backend = if flags.local {
            let service = open_local(&config, flags.as_admin.as_deref()).await?;
            Backend::Local(Box::new(service))
        } else {
            let client = ApiClient::from_token_store(&config.api)
                .context("failed to build HTTP client")?;
            if !client.has_token() {
                tracing::debug!("no stored admin token; admin commands will fail");
            }
            Backend::Remote(client)
        };

        Ok(Self {
            config,
            backend,
            membership,
        })
    }

    pub const fn membership(&self) -> &ApiClient {
        &self.membership
    }

    pub fn verifier(&self) -> DebouncedVerifier<ApiClient> {
        DebouncedVerifier::new(
            self.membership.clone(),
            self.config.roster.debounce(),
            self.config.roster.lookup_timeout(),
        )
    }
}

async fn open_local(config: &TekConfig, as_admin: Option<&str>) -> anyhow::Result<TekService> {
    let db_path = &config.store.db_path;
    ensure_parent_dir(db_path)?;

    let mut service = TekService::new_local(&db_path.to_string_lossy())
        .await
        .with_context(|| format!("failed to open local store at {}", db_path.display()))?
        .with_default_weight(config.general.default_admin_weight);

    if let Some(username) = as_admin {
        service
            .act_as(username)
            .await
            .with_context(|| format!("no local admin named '{username}' — create one with `tkf --local admin create`"))?;
    }
    Ok(service)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
impl AppContext {
    /// Remote context aimed at a port nothing listens on, so any request
    /// that gets sent fails as a transport error.
    pub(crate) fn offline() -> Self {
        let mut config = TekConfig::default();
        config.api.base_url = "http://127.0.0.1:9/api".into();
        let client = ApiClient::new(&config.api).expect("client");
        Self {
            membership: client.clone(),
            backend: Backend::Remote(client),
            config,
        }
    }

    /// Local context backed by a fresh store under `dir`.
    pub(crate) async fn local_in(dir: &Path) -> Self {
        let mut config = TekConfig::default();
        config.store.db_path = dir.join("teknofest.db");
        let service = open_local(&config, None).await.expect("open");
        Self {
            membership: ApiClient::new(&config.api).expect("client"),
            backend: Backend::Local(Box::new(service)),
            config,
        }
    }
}
