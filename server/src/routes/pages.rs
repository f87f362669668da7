//! Page rendering

use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use epub_creator_core::{Document, DocumentTitle, Error, PageId, Route, Router};
use tracing::debug;

use super::AppError;
use crate::{
    state::{AppState, APP_NAME},
    templates::{ConverterTemplate, HomeTemplate, NotFoundTemplate, PageContext},
};

/// Page handler: one navigation per request
pub async fn page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
        )
            .into_response());
    }

    let router = state.router();
    let from = source_route(router, &headers);
    let mut document = Document::with_title(APP_NAME);

    let nav = match router.navigate(uri.path(), from, &mut document) {
        Ok(nav) => nav,
        Err(Error::RouteNotFound(path)) => return not_found(&state, &path),
        Err(e) => return Err(e.into()),
    };

    debug!(path = %uri.path(), route = %nav.to.name(), title = %document.title(), "Rendering page");
    render(&state, nav.to, document.title()).map(|html| html.into_response())
}

fn render(state: &AppState, route: &Route, title: &str) -> Result<Html<String>, AppError> {
    let page = PageContext::new(&state.app, title, Some(route));

    let html = match route.page() {
        PageId::Home => HomeTemplate {
            page,
            converter_href: state
                .router()
                .href("TxtToEpubConverter")
                .unwrap_or_default(),
        }
        .render()?,
        PageId::TxtToEpubConverter => ConverterTemplate {
            page,
            endpoint: state.config.converter_endpoint.clone().unwrap_or_default(),
        }
        .render()?,
    };

    Ok(Html(html))
}

/// 404 page, rendered outside the route table
fn not_found(state: &AppState, path: &str) -> Result<Response, AppError> {
    debug!(path = %path, "No route matched");

    let template = NotFoundTemplate {
        page: PageContext::new(&state.app, "404 - 找不到頁面", None),
        path: path.to_string(),
    };
    Ok((StatusCode::NOT_FOUND, Html(template.render()?)).into_response())
}

/// Route the user navigated from, when the Referer points inside the app
fn source_route<'a>(router: &'a Router, headers: &HeaderMap) -> Option<&'a Route> {
    let path = referer_path(headers)?;
    router.resolve_location(&path).ok()
}

/// Path component of the Referer header
fn referer_path(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::REFERER)?.to_str().ok()?;
    let uri: Uri = value.parse().ok()?;
    Some(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use epub_creator_core::{BasePath, RouteTable, TitleGuard};

    fn headers_with_referer(referer: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static(referer));
        headers
    }

    #[test]
    fn test_referer_path() {
        let mut headers = HeaderMap::new();
        assert_eq!(referer_path(&headers), None);

        headers.insert(
            header::REFERER,
            HeaderValue::from_static("https://example.com/epubCreator/simple-epub-creator/txt-to-epub?x=1"),
        );
        assert_eq!(
            referer_path(&headers).as_deref(),
            Some("/epubCreator/simple-epub-creator/txt-to-epub")
        );
    }

    #[test]
    fn test_source_route_from_referer() {
        let base = BasePath::parse("/epubCreator/simple-epub-creator/").unwrap();
        let router = Router::new(base, RouteTable::standard().unwrap()).before_each(TitleGuard);

        let headers = headers_with_referer("http://localhost:8080/epubCreator/simple-epub-creator/");
        assert_eq!(source_route(&router, &headers).map(|r| r.name()), Some("Home"));

        let headers =
            headers_with_referer("http://localhost:8080/epubCreator/simple-epub-creator/txt-to-epub");
        assert_eq!(
            source_route(&router, &headers).map(|r| r.name()),
            Some("TxtToEpubConverter")
        );

        // Outside the base path or unknown
        let headers = headers_with_referer("http://localhost:8080/txt-to-epub");
        assert!(source_route(&router, &headers).is_none());
        let headers = headers_with_referer("https://elsewhere.example/epubCreator/simple-epub-creator/nope");
        assert!(source_route(&router, &headers).is_none());
        assert!(source_route(&router, &HeaderMap::new()).is_none());
    }
}
