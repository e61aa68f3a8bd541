use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Document container a module needs before it can serve requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: &'static str,
    /// JSON field holding the document key; every lookup goes through it
    pub partition_key: &'static str,
}

impl ContainerSpec {
    /// Container keyed by the document's `id` field
    pub const fn keyed_by_id(name: &'static str) -> Self {
        Self {
            name,
            partition_key: "id",
        }
    }
}

/// Core module trait that all catalog modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup after containers exist
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Paths are absolute; the router is merged at the server root
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON
    /// Will be merged with other modules' specs
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Return the document containers this module reads and writes
    fn containers(&self) -> Vec<ContainerSpec> {
        vec![]
    }

    /// Start background tasks for this module
    /// Called after every module has been initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
