use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use minijinja::context;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::AppStateArc;
use crate::registry::{Category, Registry, RegistryEntry};

const ALL_CATEGORIES: &str = "all";
/// Form fields carrying template variables are named `var.<placeholder>`.
const VAR_PREFIX: &str = "var.";

pub fn routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(editor_page))
        .route("/preview/{id}", post(preview))
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct EditorQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    category: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    template: Option<String>,
    /// Template the submitted variables belong to.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    sample: bool,
}

fn submitted_variables(fields: &HashMap<String, String>) -> HashMap<String, String> {
    fields
        .iter()
        .filter_map(|(k, v)| Some((k.strip_prefix(VAR_PREFIX)?.to_string(), v.clone())))
        .collect()
}

/// Templates offered by the selector and the one being edited.
pub struct Selection<'a> {
    pub filtered: Vec<&'a RegistryEntry>,
    pub current: Option<&'a RegistryEntry>,
}

impl Selection<'_> {
    pub fn current_in_filter(&self) -> bool {
        self.current
            .is_some_and(|c| self.filtered.iter().any(|e| e.id() == c.id()))
    }
}

/// Resolve the category filter and requested template against the active
/// entries. A requested template outside the filter yields to the first
/// filtered one.
pub fn select<'a>(
    registry: &'a Registry,
    category: Option<&str>,
    requested: Option<&str>,
) -> Selection<'a> {
    let all = registry.list_all_active();
    let filtered = match category {
        None | Some(ALL_CATEGORIES) => all.clone(),
        Some(label) => label
            .parse::<Category>()
            .map(|c| registry.list_by_category(c))
            .unwrap_or_default(),
    };

    let requested = requested.and_then(|id| all.iter().copied().find(|e| e.id() == id));
    let current = match requested {
        Some(entry) if filtered.iter().any(|e| e.id() == entry.id()) => Some(entry),
        Some(entry) => filtered.first().copied().or(Some(entry)),
        None => filtered.first().copied().or_else(|| all.first().copied()),
    };

    Selection { filtered, current }
}

#[derive(Serialize)]
struct FieldView<'a> {
    key: &'a str,
    label: &'a str,
    input_type: &'a str,
    placeholder: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct HiddenValue<'a> {
    key: &'a str,
    value: &'a str,
}

fn render_view(state: &AppStateArc, name: &str, ctx: minijinja::value::Value) -> Response {
    match state.views.render(name, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render {}: {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

fn sample_href(category: &str, id: &str) -> String {
    format!(
        "/?category={}&template={}&sample=true",
        utf8_percent_encode(category, NON_ALPHANUMERIC),
        utf8_percent_encode(id, NON_ALPHANUMERIC)
    )
}

pub async fn editor_page(
    State(state): State<AppStateArc>,
    Query(query): Query<EditorQuery>,
    Query(fields): Query<HashMap<String, String>>,
) -> Response {
    // An empty template select (category without the edited template) keeps the current one.
    let requested = query.template.as_deref().or(query.current.as_deref());
    let selection = select(state.registry, query.category.as_deref(), requested);
    let selected_category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);

    let categories: Vec<_> = std::iter::once((ALL_CATEGORIES, "All Templates"))
        .chain(
            state
                .registry
                .list_categories()
                .iter()
                .map(|c| (c.label(), c.label())),
        )
        .map(|(value, label)| {
            context! {
                value => value,
                label => label,
                selected => value == selected_category,
            }
        })
        .collect();

    let templates: Vec<_> = selection
        .filtered
        .iter()
        .map(|e| context! { id => e.id(), name => e.template.name })
        .collect();

    let Some(current) = selection.current else {
        return render_view(
            &state,
            "editor.html",
            context! {
                categories => categories,
                templates => templates,
                in_filter => false,
                current => None::<&str>,
            },
        );
    };

    // Variables survive filter changes; switching templates starts from an empty mapping.
    let same_template = query.current.as_deref() == Some(current.id());
    let variables = if query.sample {
        current.sample_variables()
    } else if same_template {
        submitted_variables(&fields)
    } else if state.config.prefill_sample_data {
        current.sample_variables()
    } else {
        HashMap::new()
    };
    debug!(
        "Editing {} with {} preset variables",
        current.id(),
        variables.len()
    );

    let fields = current.panel.fields(&current.template);
    let field_views: Vec<_> = fields
        .iter()
        .map(|f| FieldView {
            key: f.key,
            label: f.label,
            input_type: f.kind.input_type(),
            placeholder: f.placeholder,
            value: f.value(&variables),
        })
        .collect();
    let mut hidden_values: Vec<_> = variables
        .iter()
        .filter(|(k, _)| !fields.iter().any(|f| f.key == k.as_str()))
        .map(|(k, v)| HiddenValue { key: k, value: v })
        .collect();
    hidden_values.sort_by_key(|h| h.key);

    render_view(
        &state,
        "editor.html",
        context! {
            categories => categories,
            templates => templates,
            in_filter => selection.current_in_filter(),
            selected_category => selected_category,
            sample_href => sample_href(selected_category, current.id()),
            current => context! {
                id => current.id(),
                name => current.template.name,
                category => current.category,
                description => current.description,
            },
            fields => field_views,
            hidden_values => hidden_values,
            id => current.id(),
            html => current.template.render(&variables),
            missing => current.template.missing_placeholders(&variables),
            height => state.config.preview_height,
        },
    )
}

pub async fn preview(
    State(state): State<AppStateArc>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let Some(entry) = state.registry.find_by_id(&id) else {
        return (StatusCode::NOT_FOUND, "Template not found").into_response();
    };
    let variables = submitted_variables(&fields);

    render_view(
        &state,
        "partials/preview.html",
        context! {
            id => entry.id(),
            html => entry.template.render(&variables),
            missing => entry.template.missing_placeholders(&variables),
            height => state.config.preview_height,
        },
    )
}
