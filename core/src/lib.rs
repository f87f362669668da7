//! Core library for Simple EPUB Creator
//!
//! This crate defines the routing model, base path resolution, navigation
//! guards and the application bootstrap shared by the server binary.

pub mod base_path;
pub mod bootstrap;
pub mod error;
pub mod guard;
pub mod icons;
pub mod router;
pub mod types;

// Re-exports
pub use base_path::{resolve_base_path, BasePath, BasePathPolicy, Trigger, DEFAULT_DEPLOY_PATH};
pub use bootstrap::{App, ComponentKind, ComponentLibrary, ComponentRegistry, MountHost, MountedApp};
pub use error::{Error, Result};
pub use guard::{Document, DocumentTitle, NavigationContext, NavigationGuard, TitleGuard};
pub use icons::{Icon, ICONS};
pub use router::{Navigation, PageId, Route, RouteTable, Router};
pub use types::{BuildCommand, Environment, EnvironmentMode};
