use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::AppStateArc;
use crate::registry::{Category, RegistryEntry};

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    id: &'static str,
    name: &'static str,
    category: Category,
    description: &'static str,
    placeholders: Vec<&'static str>,
}

impl From<&RegistryEntry> for TemplateSummary {
    fn from(entry: &RegistryEntry) -> Self {
        Self {
            id: entry.id(),
            name: entry.template.name,
            category: entry.category,
            description: entry.description,
            placeholders: entry.template.extract_placeholders(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateDetail {
    #[serde(flatten)]
    summary: TemplateSummary,
    is_active: bool,
    sample_data: BTreeMap<&'static str, &'static str>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    variables: HashMap<String, String>,
    /// Start from the entry's sample data; explicit variables win.
    use_sample_data: bool,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    html: String,
    missing: Vec<&'static str>,
}

pub async fn list_categories(State(state): State<AppStateArc>) -> Json<Vec<Category>> {
    Json(state.registry.list_categories().to_vec())
}

pub async fn list_templates(
    State(state): State<AppStateArc>,
    Query(query): Query<ListQuery>,
) -> Response {
    let entries = match query.category.as_deref() {
        None => state.registry.list_all_active(),
        Some(label) => match label.parse::<Category>() {
            Ok(category) => state.registry.list_by_category(category),
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        },
    };

    let summaries: Vec<TemplateSummary> = entries.into_iter().map(Into::into).collect();
    Json(summaries).into_response()
}

pub async fn get_template(State(state): State<AppStateArc>, Path(id): Path<String>) -> Response {
    let Some(entry) = state.registry.find_by_id(&id) else {
        return (StatusCode::NOT_FOUND, "Template not found").into_response();
    };

    Json(TemplateDetail {
        summary: entry.into(),
        is_active: entry.is_active,
        sample_data: entry.sample_data.iter().copied().collect(),
    })
    .into_response()
}

pub async fn render_template(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Json(request): Json<RenderRequest>,
) -> Response {
    let Some(entry) = state.registry.find_by_id(&id) else {
        return (StatusCode::NOT_FOUND, "Template not found").into_response();
    };

    let variables = if request.use_sample_data {
        let mut merged = entry.sample_variables();
        merged.extend(request.variables);
        merged
    } else {
        request.variables
    };
    debug!("Rendering {} with {} variables", id, variables.len());

    let html = entry.template.render(&variables);
    let missing = entry.template.missing_placeholders(&variables);
    info!("Rendered {} ({} bytes, {} unset)", id, html.len(), missing.len());

    Json(RenderResponse { html, missing }).into_response()
}
