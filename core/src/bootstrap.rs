//! Application bootstrap
//!
//! Startup runs once, in order: create the root, install the component
//! library, register the icon set, install the router, mount.

use std::collections::BTreeMap;

use crate::icons::Icon;
use crate::router::Router;
use crate::{Error, Result};

/// What a registered component renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Library widget, rendered with the given CSS class
    Widget { class: &'static str },
    Icon(&'static Icon),
}

/// Components registered on the application, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentKind>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. Names must be unique across widgets and icons.
    pub fn register(&mut self, name: &str, kind: ComponentKind) -> Result<()> {
        if self.components.contains_key(name) {
            return Err(Error::DuplicateComponent(name.to_string()));
        }
        tracing::trace!(component = %name, "Registering component");
        self.components.insert(name.to_string(), kind);
        Ok(())
    }

    /// SVG markup of a registered icon
    pub fn icon_svg(&self, name: &str) -> Option<&'static str> {
        match self.components.get(name) {
            Some(ComponentKind::Icon(icon)) => Some(icon.svg),
            _ => None,
        }
    }

    /// CSS class of a registered widget
    pub fn widget_class(&self, name: &str) -> Option<&'static str> {
        match self.components.get(name) {
            Some(ComponentKind::Widget { class }) => Some(*class),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn icon_count(&self) -> usize {
        self.components
            .values()
            .filter(|k| matches!(k, ComponentKind::Icon(_)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// UI component library: a named set of widgets
#[derive(Debug, Clone, Copy)]
pub struct ComponentLibrary {
    pub name: &'static str,
    pub widgets: &'static [(&'static str, &'static str)],
}

impl ComponentLibrary {
    /// Widgets used by the home and converter pages
    pub const fn standard() -> Self {
        Self {
            name: "element",
            widgets: &[
                ("ElButton", "el-button"),
                ("ElCard", "el-card"),
                ("ElForm", "el-form"),
                ("ElFormItem", "el-form-item"),
                ("ElInput", "el-input"),
                ("ElUpload", "el-upload"),
                ("ElAlert", "el-alert"),
                ("ElMenu", "el-menu"),
                ("ElMenuItem", "el-menu-item"),
            ],
        }
    }

    fn install(&self, registry: &mut ComponentRegistry) -> Result<()> {
        for &(name, class) in self.widgets {
            registry.register(name, ComponentKind::Widget { class })?;
        }
        Ok(())
    }
}

/// Host document that provides mount anchors
pub trait MountHost {
    /// Whether an element matching `selector` (`#id`) exists
    fn has_anchor(&self, selector: &str) -> bool;
}

/// Application root being assembled
#[derive(Debug)]
pub struct App {
    root: &'static str,
    libraries: Vec<&'static str>,
    components: ComponentRegistry,
    router: Option<Router>,
}

impl App {
    pub fn new(root: &'static str) -> Self {
        tracing::debug!(root = %root, "Creating application root");
        Self {
            root,
            libraries: Vec::new(),
            components: ComponentRegistry::new(),
            router: None,
        }
    }

    /// Install a component library
    pub fn install(mut self, library: &ComponentLibrary) -> Result<Self> {
        tracing::info!(
            library = %library.name,
            widgets = library.widgets.len(),
            "Installing component library"
        );
        library.install(&mut self.components)?;
        self.libraries.push(library.name);
        Ok(self)
    }

    /// Register each icon under its exported name
    pub fn register_icons(mut self, icons: &'static [Icon]) -> Result<Self> {
        for icon in icons {
            self.components.register(icon.name, ComponentKind::Icon(icon))?;
        }
        tracing::info!(icons = icons.len(), "Registered icon components");
        Ok(self)
    }

    pub fn use_router(mut self, router: Router) -> Self {
        tracing::info!(
            base_path = %router.base(),
            routes = router.table().len(),
            "Installing router"
        );
        self.router = Some(router);
        self
    }

    /// Mount onto the anchor matching `selector`. A missing anchor is fatal.
    pub fn mount(self, selector: &str, host: &dyn MountHost) -> Result<MountedApp> {
        let router = self.router.ok_or(Error::RouterNotInstalled)?;

        if !host.has_anchor(selector) {
            tracing::error!(selector = %selector, "Mount target missing");
            return Err(Error::MountTargetMissing(selector.to_string()));
        }

        tracing::info!(root = %self.root, selector = %selector, "Application mounted");
        Ok(MountedApp {
            root: self.root,
            selector: selector.to_string(),
            libraries: self.libraries,
            components: self.components,
            router,
        })
    }
}

/// Fully bootstrapped application, immutable after mount
#[derive(Debug)]
pub struct MountedApp {
    root: &'static str,
    selector: String,
    libraries: Vec<&'static str>,
    components: ComponentRegistry,
    router: Router,
}

impl MountedApp {
    pub fn root(&self) -> &'static str {
        self.root
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn libraries(&self) -> &[&'static str] {
        &self.libraries
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::TitleGuard;
    use crate::icons::ICONS;
    use crate::{BasePath, RouteTable};

    struct Anchors(&'static [&'static str]);

    impl MountHost for Anchors {
        fn has_anchor(&self, selector: &str) -> bool {
            self.0.iter().any(|anchor| *anchor == selector)
        }
    }

    fn router() -> Router {
        Router::new(BasePath::root(), RouteTable::standard().unwrap()).before_each(TitleGuard)
    }

    #[test]
    fn test_full_bootstrap() {
        let app = App::new("App")
            .install(&ComponentLibrary::standard())
            .unwrap()
            .register_icons(ICONS)
            .unwrap()
            .use_router(router())
            .mount("#app", &Anchors(&["#app"]))
            .unwrap();

        assert_eq!(app.selector(), "#app");
        assert_eq!(app.libraries(), &["element"]);
        assert_eq!(app.router().table().len(), 2);

        let components = app.components();
        assert_eq!(components.icon_count(), ICONS.len());
        for icon in ICONS {
            assert_eq!(components.icon_svg(icon.name), Some(icon.svg));
        }
        assert_eq!(components.widget_class("ElButton"), Some("el-button"));
        assert_eq!(
            components.len(),
            ICONS.len() + ComponentLibrary::standard().widgets.len()
        );
    }

    #[test]
    fn test_icons_registered_under_export_names() {
        let app = App::new("App").register_icons(ICONS).unwrap();
        let names: Vec<_> = app.components.names().collect();

        assert_eq!(names.len(), ICONS.len());
        for icon in ICONS {
            assert_eq!(names.iter().filter(|n| **n == icon.name).count(), 1);
        }
    }

    #[test]
    fn test_duplicate_icon_rejected() {
        static TWICE: &[Icon] = &[
            Icon { name: "Dup", svg: "<svg/>" },
            Icon { name: "Dup", svg: "<svg/>" },
        ];
        let err = App::new("App").register_icons(TWICE).unwrap_err();
        assert!(matches!(err, Error::DuplicateComponent(name) if name == "Dup"));
    }

    #[test]
    fn test_missing_anchor_is_fatal() {
        let err = App::new("App")
            .use_router(router())
            .mount("#app", &Anchors(&["#root"]))
            .unwrap_err();
        assert!(matches!(err, Error::MountTargetMissing(_)));
    }

    #[test]
    fn test_mount_requires_router() {
        let err = App::new("App")
            .mount("#app", &Anchors(&["#app"]))
            .unwrap_err();
        assert!(matches!(err, Error::RouterNotInstalled));
    }
}
