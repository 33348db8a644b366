pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::{pages, versions};
use crate::state::AppState;

/// Build the wiki route tree.
///
/// Static segments take priority over `{name}`, so `/new` and `/health`
/// never reach the page handlers.
///
/// ```text
/// GET    /                               list_pages
/// POST   /                               create_page
/// GET    /new                            new_page_form
/// GET    /{name}                         show_page
/// PUT    /{name}                         update_page
/// POST   /{name}                         override_page (__method=PUT)
/// GET    /{name}/versions                list_versions
/// GET    /{name}/versions/new            edit_form
/// GET    /{name}/versions/{version_id}   show_version
/// ```
pub fn wiki_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages).post(pages::create_page))
        .route("/new", get(pages::new_page_form))
        .route(
            "/{name}",
            get(pages::show_page)
                .put(pages::update_page)
                .post(pages::override_page),
        )
        .route("/{name}/versions", get(versions::list_versions))
        .route("/{name}/versions/new", get(versions::edit_form))
        .route("/{name}/versions/{version_id}", get(versions::show_version))
}
