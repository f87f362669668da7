//! Askama templates for the pages

use askama::Template;
use epub_creator_core::{ComponentRegistry, MountHost, MountedApp, PageId, Route};

use crate::state::APP_NAME;

// ============================================================================
// Page context shared by every page
// ============================================================================

/// Navigation bar entry
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub icon: &'static str,
    pub active: bool,
}

/// Data every page layout needs
pub struct PageContext<'a> {
    pub title: &'a str,
    pub home_href: String,
    pub static_prefix: String,
    pub nav: Vec<NavLink>,
    components: &'a ComponentRegistry,
}

impl<'a> PageContext<'a> {
    pub fn new(app: &'a MountedApp, title: &'a str, current: Option<&Route>) -> Self {
        let router = app.router();
        let nav = router
            .table()
            .routes()
            .iter()
            .map(|route| NavLink {
                label: route.title().unwrap_or(route.name()).to_string(),
                href: router.base().href(route.path()),
                icon: nav_icon(route.page()),
                active: current.is_some_and(|c| c.name() == route.name()),
            })
            .collect();

        Self {
            title,
            home_href: router.base().href("/"),
            static_prefix: router.base().href("/static"),
            nav,
            components: app.components(),
        }
    }

    /// Inline SVG of a registered icon, empty when unknown
    pub fn icon(&self, name: &str) -> &'static str {
        self.components.icon_svg(name).unwrap_or("")
    }

    /// CSS class of a registered widget
    pub fn widget(&self, name: &str) -> &'static str {
        self.components.widget_class(name).unwrap_or("")
    }
}

fn nav_icon(page: PageId) -> &'static str {
    match page {
        PageId::Home => "House",
        PageId::TxtToEpubConverter => "Document",
    }
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate<'a> {
    pub page: PageContext<'a>,
    pub converter_href: String,
}

#[derive(Template)]
#[template(path = "pages/txt_to_epub.html")]
pub struct ConverterTemplate<'a> {
    pub page: PageContext<'a>,
    /// Form action; empty when no conversion service is configured
    pub endpoint: String,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate<'a> {
    pub page: PageContext<'a>,
    pub path: String,
}

// ============================================================================
// Mount shell
// ============================================================================

/// Bare layout, rendered once at startup to check the mount anchor
#[derive(Template)]
#[template(path = "shell.html")]
struct ShellTemplate<'a> {
    page: PageContext<'a>,
}

/// Rendered layout used as the mount host
pub struct LayoutShell {
    html: String,
}

impl LayoutShell {
    pub fn render() -> askama::Result<Self> {
        let components = ComponentRegistry::new();
        let template = ShellTemplate {
            page: PageContext {
                title: APP_NAME,
                home_href: "/".to_string(),
                static_prefix: "/static".to_string(),
                nav: Vec::new(),
                components: &components,
            },
        };
        Ok(Self {
            html: template.render()?,
        })
    }
}

impl MountHost for LayoutShell {
    fn has_anchor(&self, selector: &str) -> bool {
        match selector.strip_prefix('#') {
            Some(id) if !id.is_empty() => self.html.contains(&format!(r#"id="{}""#, id)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_has_app_anchor() {
        let shell = LayoutShell::render().unwrap();
        assert!(shell.has_anchor("#app"));
        assert!(!shell.has_anchor("#missing"));
        assert!(!shell.has_anchor("app"));
        assert!(!shell.has_anchor("#"));
    }
}
