//! Greeting page.
//!
//! - `GET /`: render the `hello` view
//! - `GET /hello`: same view, same behavior
//!
//! The optional `name` query parameter is bound into the rendering context;
//! when it is missing or blank the default name is rendered instead. A
//! repeated `name` renders its values joined with commas.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use storefront_core::domain::greeting::{resolve_name, GREETING_VIEW, NAME_KEY};
use tera::{Context, Tera};
use tracing::{error, warn};

const EMBEDDED_HELLO: &str = include_str!("../../../templates/hello.html");

#[derive(Clone)]
pub struct GreetingState {
    templates: Arc<Tera>,
}

/// Every `name` value in query order, joined with commas.
fn requested_name(params: &[(String, String)]) -> Option<String> {
    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == NAME_KEY)
        .map(|(_, value)| value.as_str())
        .collect();

    (!values.is_empty()).then(|| values.join(","))
}

/// Template file backing a view identifier.
fn template_file(view: &str) -> String {
    format!("{view}.html")
}

/// Load view templates from `dir`, filling in the embedded defaults for any
/// view the directory does not provide.
pub fn init_templates(dir: &Path) -> Arc<Tera> {
    let pattern = format!("{}/**/*.html", dir.display());
    let mut tera = match Tera::new(&pattern) {
        Ok(t) => t,
        Err(e) => {
            warn!(
                event_name = "system.templates.load_failed",
                correlation_id = "bootstrap",
                error = %e,
                "failed to load templates from filesystem, using embedded templates"
            );
            Tera::default()
        }
    };

    let hello = template_file(GREETING_VIEW);
    if !tera.get_template_names().any(|name| name == hello) {
        if let Err(e) = tera.add_raw_template(&hello, EMBEDDED_HELLO) {
            error!(error = %e, template = %hello, "embedded template failed to parse");
        }
    }

    Arc::new(tera)
}

pub fn router(templates: Arc<Tera>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/hello", get(hello))
        .with_state(GreetingState { templates })
}

pub async fn hello(
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<GreetingState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let name = requested_name(&params);
    let mut context = Context::new();
    context.insert(NAME_KEY, resolve_name(name.as_deref()));

    state.templates.render(&template_file(GREETING_VIEW), &context).map(Html).map_err(|e| {
        error!(
            event_name = "greeting.render_failed",
            error = %e,
            "greeting view could not be rendered"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Rendering Error</h1>".to_string()))
    })
}
