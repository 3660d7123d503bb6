use anyhow::{Result, anyhow};
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::email_templates;
use crate::panel::SettingsPanel;
use crate::template::EmailTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Authentication,
    Onboarding,
    Performance,
    General,
}

impl Category {
    /// Declaration order, used for every category listing.
    pub const ALL: [Category; 4] = [
        Category::Authentication,
        Category::Onboarding,
        Category::Performance,
        Category::General,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Authentication => "Authentication & Security",
            Category::Onboarding => "Affiliate Onboarding",
            Category::Performance => "Performance & Engagement",
            Category::General => "General Communication",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| anyhow!("Unknown template category: {}", s))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub template: EmailTemplate,
    pub category: Category,
    pub description: &'static str,
    /// Demo values; not required to cover every placeholder.
    pub sample_data: &'static [(&'static str, &'static str)],
    pub is_active: bool,
    pub panel: SettingsPanel,
}

impl RegistryEntry {
    pub fn new(
        template: EmailTemplate,
        category: Category,
        description: &'static str,
        sample_data: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            panel: SettingsPanel::for_template(template.id),
            template,
            category,
            description,
            sample_data,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn id(&self) -> &'static str {
        self.template.id
    }

    pub fn sample_variables(&self) -> HashMap<String, String> {
        self.sample_data
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Immutable table of registry entries in declaration order.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self> {
        let mut ids = HashSet::new();
        for entry in &entries {
            if !ids.insert(entry.id()) {
                return Err(anyhow!("Duplicate template id in registry: {}", entry.id()));
            }
        }
        Ok(Self { entries })
    }

    /// Active entries of `category`.
    pub fn list_by_category(&self, category: Category) -> Vec<&RegistryEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_active && e.category == category)
            .collect()
    }

    pub fn list_all_active(&self) -> Vec<&RegistryEntry> {
        self.entries.iter().filter(|e| e.is_active).collect()
    }

    /// Lookup by template id. Inactive entries are still found here; only the
    /// listings hide them.
    pub fn find_by_id(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn list_categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    pub fn list_template_definitions(&self) -> Vec<&EmailTemplate> {
        self.list_all_active()
            .into_iter()
            .map(|e| &e.template)
            .collect()
    }
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    Registry::new(email_templates::entries()).expect("built-in template ids must be unique")
});

/// The process-wide built-in registry.
pub fn builtin() -> &'static Registry {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "<p>{{a}}</p>";

    fn entry(id: &'static str, category: Category) -> RegistryEntry {
        RegistryEntry::new(EmailTemplate::new(id, id, BODY), category, "test", &[])
    }

    fn fixture() -> Registry {
        Registry::new(vec![
            entry("one", Category::Authentication),
            entry("two", Category::General),
            entry("three", Category::Authentication).inactive(),
            entry("four", Category::Authentication),
        ])
        .unwrap()
    }

    fn ids(entries: Vec<&RegistryEntry>) -> Vec<&'static str> {
        entries.into_iter().map(RegistryEntry::id).collect()
    }

    #[test]
    fn category_listing_keeps_declaration_order_and_skips_inactive() {
        let registry = fixture();
        assert_eq!(
            ids(registry.list_by_category(Category::Authentication)),
            vec!["one", "four"]
        );
        assert_eq!(ids(registry.list_by_category(Category::General)), vec!["two"]);
        assert!(registry.list_by_category(Category::Performance).is_empty());
    }

    #[test]
    fn all_active_hides_inactive() {
        assert_eq!(ids(fixture().list_all_active()), vec!["one", "two", "four"]);
    }

    #[test]
    fn find_by_id_ignores_active_flag() {
        let registry = fixture();
        let found = registry.find_by_id("three").unwrap();
        assert!(!found.is_active);
        assert!(registry.find_by_id("missing").is_none());
    }

    #[test]
    fn categories_are_fixed_regardless_of_entries() {
        let empty = Registry::new(Vec::new()).unwrap();
        let labels: Vec<_> = empty.list_categories().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Authentication & Security",
                "Affiliate Onboarding",
                "Performance & Engagement",
                "General Communication",
            ]
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Registry::new(vec![
            entry("dup", Category::General),
            entry("dup", Category::Onboarding),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("dup"));
    }

    #[test]
    fn category_parses_exact_labels_only() {
        assert_eq!(
            "Affiliate Onboarding".parse::<Category>().unwrap(),
            Category::Onboarding
        );
        assert!("affiliate onboarding".parse::<Category>().is_err());
        assert!("all".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Performance).unwrap();
        assert_eq!(json, "\"Performance & Engagement\"");
    }

    #[test]
    fn definitions_follow_active_entries() {
        let registry = fixture();
        let names: Vec<_> = registry
            .list_template_definitions()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(names, vec!["one", "two", "four"]);
    }

    #[test]
    fn builtin_registry_exposes_both_templates() {
        let registry = builtin();
        assert_eq!(
            ids(registry.list_by_category(Category::Authentication)),
            vec!["sample-reset-password"]
        );
        assert_eq!(
            ids(registry.list_all_active()),
            vec!["welcome-email", "sample-reset-password"]
        );
    }
}
