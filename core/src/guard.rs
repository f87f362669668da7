//! Navigation guards
//!
//! Guards observe every route transition before it commits. They receive
//! the target and source routes, the document whose title they may change,
//! and a `next` callback that lets the transition proceed.

use crate::router::Route;

/// Target/source pair handed to every guard
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
    pub to: &'a Route,
    /// `None` on the first navigation of a session
    pub from: Option<&'a Route>,
}

/// Surface that owns the document title
pub trait DocumentTitle {
    fn set_title(&mut self, title: &str);
    fn title(&self) -> &str;
}

/// In-memory document state for one rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with a title already set, e.g. the shell's static title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl DocumentTitle for Document {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// Hook invoked before a route transition commits.
///
/// A guard lets the transition continue by calling `next`. Not calling it
/// cancels the navigation.
pub trait NavigationGuard: Send + Sync {
    /// Guard name used in logs
    fn name(&self) -> &'static str;

    fn before_each(
        &self,
        ctx: &NavigationContext<'_>,
        document: &mut dyn DocumentTitle,
        next: &mut dyn FnMut(),
    );
}

/// Applies the target route's title to the document.
///
/// Never cancels: `next` is called exactly once whether or not the route has
/// a title.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleGuard;

impl NavigationGuard for TitleGuard {
    fn name(&self) -> &'static str {
        "title"
    }

    fn before_each(
        &self,
        ctx: &NavigationContext<'_>,
        document: &mut dyn DocumentTitle,
        next: &mut dyn FnMut(),
    ) {
        if let Some(title) = ctx.to.title() {
            document.set_title(title);
        }
        next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{PageId, Route};

    fn run_guard(to: &Route, document: &mut Document) -> usize {
        let mut calls = 0;
        let ctx = NavigationContext { to, from: None };
        TitleGuard.before_each(&ctx, document, &mut || calls += 1);
        calls
    }

    #[test]
    fn test_title_applied_and_proceeds_once() {
        let route = Route::new("/", "Home", PageId::Home).with_title("線上 EPUB 編輯器");
        let mut document = Document::with_title("Simple EPUB Creator");

        assert_eq!(run_guard(&route, &mut document), 1);
        assert_eq!(document.title(), "線上 EPUB 編輯器");
    }

    #[test]
    fn test_missing_title_still_proceeds() {
        let untitled = Route::new("/about", "About", PageId::Home);
        let mut document = Document::with_title("Simple EPUB Creator");

        assert_eq!(run_guard(&untitled, &mut document), 1);
        assert_eq!(document.title(), "Simple EPUB Creator");

        let empty = Route::new("/empty", "Empty", PageId::Home).with_title("");
        assert_eq!(run_guard(&empty, &mut document), 1);
        assert_eq!(document.title(), "Simple EPUB Creator");
    }

    #[test]
    fn test_source_route_does_not_matter() {
        let home = Route::new("/", "Home", PageId::Home).with_title("Home");
        let converter =
            Route::new("/txt-to-epub", "TxtToEpubConverter", PageId::TxtToEpubConverter)
                .with_title("Converter");

        let mut document = Document::new();
        let mut calls = 0;
        let ctx = NavigationContext {
            to: &converter,
            from: Some(&home),
        };
        TitleGuard.before_each(&ctx, &mut document, &mut || calls += 1);

        assert_eq!(calls, 1);
        assert_eq!(document.title(), "Converter");
    }
}
