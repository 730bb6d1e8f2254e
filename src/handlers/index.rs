use crate::error::ApiError;
use crate::models::Route;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};

const INDEX_TEMPLATE: &str = include_str!("index.html");

/// GET / handler
///
/// Serves the direct input when one was given, re-parsed on every request.
/// Otherwise lists the routes: as JSON when the client asks for exactly
/// `application/json`, as an HTML page for anything else.
pub async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(input) = &state.direct_input {
        let value = input.parse().map_err(|e| {
            tracing::warn!("Direct input is not a valid JSON object: {}", e);
            ApiError::from(e)
        })?;
        return Ok(Json(value).into_response());
    }

    if wants_json(&headers) {
        return Ok(Json(state.routes.to_vec()).into_response());
    }

    Ok(Html(render_index(&state.routes)).into_response())
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .is_some_and(|accept| accept.as_bytes() == b"application/json")
}

/// Render the HTML listing, one link per route in resolution order
pub fn render_index(routes: &[Route]) -> String {
    let endpoints: Vec<String> = routes
        .iter()
        .map(|route| {
            format!(
                "            <li><a href=\"{}\">{}</a></li>",
                escape_html(&route.url_path),
                escape_html(&route.file_path)
            )
        })
        .collect();

    INDEX_TEMPLATE.replace("{{ENDPOINTS}}", &endpoints.join("\n"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
