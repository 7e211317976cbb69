//! # Web Form
//!
//! A single HTML page with a form to pick a tool, enter a URL and the tool's
//! argument, and see the tool's text output. The page is rendered with
//! minijinja; the result is HTML-escaped.
//!
//! - `GET /`: empty form
//! - `POST /`: run the selected tool and show its result

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::tools::{INVALID_TOOL_MESSAGE, ToolKind, ToolRequest, Toolbox};

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// Shared state for the form handlers
#[derive(Clone)]
struct AppState {
    toolbox: Toolbox,
    templates: Arc<Environment<'static>>,
}

/// Fields posted by the form; missing fields are empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolForm {
    pub url: String,
    pub tool: String,
    pub instruction: String,
    pub query: String,
}

impl ToolForm {
    /// Build the tool request, or `None` for an unknown tool name
    pub fn into_request(self) -> Option<ToolRequest> {
        let kind = self.tool.parse::<ToolKind>().ok()?;
        Some(ToolRequest::new(kind, self.url, self.query, self.instruction))
    }
}

#[derive(Serialize)]
struct ToolOption {
    value: &'static str,
    label: &'static str,
}

const TOOL_OPTIONS: [ToolOption; 3] = [
    ToolOption {
        value: "scrape",
        label: "Scrape page to markdown",
    },
    ToolOption {
        value: "query",
        label: "Find keyword in page",
    },
    ToolOption {
        value: "smart",
        label: "Smart extract (Gemini)",
    },
];

/// Template rendering failure, answered with a 500
struct RenderError(minijinja::Error);

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Failed to render page");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render page: {}", self.0),
        )
            .into_response()
    }
}

fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    Ok(env)
}

/// Create the form router
pub fn create_router(toolbox: Toolbox) -> anyhow::Result<Router> {
    let state = AppState {
        toolbox,
        templates: Arc::new(templates()?),
    };

    Ok(Router::new()
        .route("/", get(index).post(submit))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Serve the form until Ctrl-C
#[instrument(skip(toolbox))]
pub async fn serve(toolbox: Toolbox, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(toolbox)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web form listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, RenderError> {
    render(&state, &ToolForm::default(), "")
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ToolForm>,
) -> Result<Html<String>, RenderError> {
    let result = dispatch(&state.toolbox, form.clone()).await;
    render(&state, &form, &result)
}

/// Run the tool named by the form and return its text
///
/// The tool runs on its own task; a panic there becomes an `[ERROR]` result
/// instead of tearing down the connection.
pub async fn dispatch(toolbox: &Toolbox, form: ToolForm) -> String {
    let Some(request) = form.into_request() else {
        return INVALID_TOOL_MESSAGE.to_string();
    };

    let toolbox = toolbox.clone();
    match tokio::spawn(async move { toolbox.run(request).await }).await {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Tool task failed");
            format!("[ERROR] {}", e)
        }
    }
}

fn render(state: &AppState, form: &ToolForm, result: &str) -> Result<Html<String>, RenderError> {
    let template = state.templates.get_template("index.html").map_err(RenderError)?;
    let tool = if form.tool.is_empty() {
        ToolKind::Scrape.as_str()
    } else {
        form.tool.as_str()
    };

    template
        .render(context! {
            url => &form.url,
            tool => tool,
            query => &form.query,
            instruction => &form.instruction,
            tools => &TOOL_OPTIONS,
            result => result,
        })
        .map(Html)
        .map_err(RenderError)
}
