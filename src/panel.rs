//! Editable settings panels, one per built-in template.
//!
//! The panel is picked once when a registry entry is built. Templates without
//! a hand-built panel get a text field per placeholder.

use serde::Serialize;

use crate::template::{EmailTemplate, Variables};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Url,
    Email,
    Color { default: &'static str },
}

impl FieldKind {
    /// HTML `<input type=..>` for this kind.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Url => "url",
            FieldKind::Email => "email",
            FieldKind::Color { .. } => "color",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
}

impl Field {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind, placeholder: &'static str) -> Self {
        Self {
            key,
            label,
            kind,
            placeholder,
        }
    }

    /// Value shown in the input: the bound value, else the color default.
    pub fn value<'a, V: Variables + ?Sized>(&self, vars: &'a V) -> &'a str {
        match (vars.lookup(self.key), self.kind) {
            (Some(v), _) if !v.is_empty() => v,
            (_, FieldKind::Color { default }) => default,
            _ => "",
        }
    }
}

const WELCOME_FIELDS: &[Field] = &[
    Field::new("company_name", "Company Name", FieldKind::Text, "Your Company"),
    Field::new("user_name", "User Name", FieldKind::Text, "John Doe"),
    Field::new("get_started_url", "Get Started URL", FieldKind::Url, "https://example.com/get-started"),
    Field::new("dashboard_url", "Dashboard URL", FieldKind::Url, "https://example.com/dashboard"),
    Field::new("feature_1_title", "Feature 1 Title", FieldKind::Text, "Fast Setup"),
    Field::new(
        "feature_1_description",
        "Feature 1 Description",
        FieldKind::Text,
        "Get up and running in minutes",
    ),
    Field::new("primary_color", "Primary Color", FieldKind::Color { default: "#007ace" }, ""),
    Field::new("button_color", "Button Color", FieldKind::Color { default: "#28a745" }, ""),
    Field::new("support_email", "Support Email", FieldKind::Email, "support@company.com"),
];

const RESET_PASSWORD_FIELDS: &[Field] = &[
    Field::new("company_name", "Company Name", FieldKind::Text, "Company Name"),
    Field::new("user_name", "User Name", FieldKind::Text, "User Name"),
    Field::new("reset_url", "Reset URL", FieldKind::Url, "Reset URL"),
    Field::new("expiry_time", "Expiry Time", FieldKind::Text, "Expiry Time (e.g. 24 hours)"),
    Field::new("background_color", "Background Color", FieldKind::Color { default: "#f4f5f6" }, ""),
    Field::new("button_color", "Button Color", FieldKind::Color { default: "#007ace" }, ""),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPanel {
    Welcome,
    ResetPassword,
    Generic,
}

impl SettingsPanel {
    pub fn for_template(id: &str) -> Self {
        match id {
            "welcome-email" => SettingsPanel::Welcome,
            "sample-reset-password" => SettingsPanel::ResetPassword,
            _ => SettingsPanel::Generic,
        }
    }

    pub fn fields(self, template: &EmailTemplate) -> Vec<Field> {
        match self {
            SettingsPanel::Welcome => WELCOME_FIELDS.to_vec(),
            SettingsPanel::ResetPassword => RESET_PASSWORD_FIELDS.to_vec(),
            SettingsPanel::Generic => template
                .extract_placeholders()
                .into_iter()
                .map(|name| Field::new(name, name, FieldKind::Text, ""))
                .collect(),
        }
    }
}
