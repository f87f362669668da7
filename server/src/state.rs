//! Application state

use std::sync::Arc;

use chrono::{DateTime, Utc};
use epub_creator_core::{
    App, ComponentLibrary, Environment, MountedApp, RouteTable, Router, TitleGuard, ICONS,
};
use tracing::info;

use crate::config::Config;
use crate::templates::LayoutShell;

/// Title shown before any route has applied its own
pub const APP_NAME: &str = "Simple EPUB Creator";

/// Anchor the application mounts onto
pub const MOUNT_SELECTOR: &str = "#app";

/// Shared application state
///
/// Cheap to clone; the mounted application is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub environment: Environment,
    pub app: Arc<MountedApp>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Bootstrap the application: resolve the base path, build the router,
    /// install components and mount onto the layout shell.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let environment = config.environment();
        let base = config.resolve_base_path()?;
        info!(mode = %environment.mode, command = %environment.command, base_path = %base, "Environment resolved");

        let router = Router::new(base, RouteTable::standard()?).before_each(TitleGuard);
        let shell = LayoutShell::render()?;

        let app = App::new("App")
            .install(&ComponentLibrary::standard())?
            .register_icons(ICONS)?
            .use_router(router)
            .mount(MOUNT_SELECTOR, &shell)?;

        Ok(Self {
            config: Arc::new(config),
            environment,
            app: Arc::new(app),
            started_at: Utc::now(),
        })
    }

    pub fn router(&self) -> &Router {
        self.app.router()
    }
}
