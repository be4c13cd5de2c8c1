//! Reusable action-set templates.
//!
//! A template captures an archetype's action economies and catalog so a
//! new creature can be stamped out of it. Instantiation deep-copies:
//! mutating the creature never touches the template.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::core::{ActionId, CombatantId, TemplateId};
use crate::creature::Creature;

/// Export format version.
pub const EXPORT_VERSION: &str = "1.0";

/// Seed for a recharge entry on an instantiated creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargeSeed {
    pub action_id: ActionId,
    pub threshold: u8,
}

/// Grouping for the template picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCategory {
    pub id: String,
    pub name: String,
}

/// A reusable action set for a creature archetype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_legendary_actions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mythic_actions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragon_phases: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub villain_actions_per_round: Option<u32>,
    #[serde(default)]
    pub recharge_abilities: Vec<RechargeSeed>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Versioned export envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateExport {
    pub categories: Vec<TemplateCategory>,
    pub templates: Vec<ActionTemplate>,
    pub version: String,
    pub export_date: DateTime<Utc>,
}

/// Catalog of templates, grouped into categories.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    #[serde(default)]
    categories: Vec<TemplateCategory>,
    #[serde(default)]
    templates: Vec<ActionTemplate>,
}

impl TemplateLibrary {
    /// An empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A library pre-loaded with the built-in archetypes.
    #[must_use]
    pub fn with_builtins() -> Self {
        super::builtin::library()
    }

    /// Add or replace a category by id.
    pub fn add_category(&mut self, category: TemplateCategory) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[TemplateCategory] {
        &self.categories
    }

    /// Add or replace a template by id.
    pub fn add_template(&mut self, template: ActionTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn remove_template(&mut self, id: &TemplateId) -> Option<ActionTemplate> {
        let index = self.templates.iter().position(|t| &t.id == id)?;
        Some(self.templates.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&ActionTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn templates(&self) -> &[ActionTemplate] {
        &self.templates
    }

    pub fn templates_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a ActionTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Stamp a creature out of a template.
    ///
    /// The action list and recharge table are deep copies; mutating the
    /// returned creature never alters the template.
    #[must_use]
    pub fn instantiate(
        &self,
        template: &TemplateId,
        id: impl Into<CombatantId>,
        name: impl Into<String>,
    ) -> Option<Creature> {
        let template = self.get(template)?;

        let mut creature = Creature::new(id, name);
        if let Some(max) = template.max_legendary_actions {
            creature = creature.with_legendary_actions(max);
        }
        if let Some(max) = template.max_mythic_actions {
            creature = creature.with_mythic_actions(max);
        }
        if let Some(phases) = template.paragon_phases {
            creature = creature.with_paragon_phases(phases);
        }
        if let Some(per_round) = template.villain_actions_per_round {
            creature = creature.with_villain_actions(per_round);
        }
        for seed in &template.recharge_abilities {
            creature = creature.with_recharge(seed.action_id.clone(), seed.threshold, true);
        }
        for action in &template.actions {
            creature = creature.with_action(action.clone());
        }

        Some(creature)
    }

    /// Export the whole library.
    #[must_use]
    pub fn export(&self) -> TemplateExport {
        TemplateExport {
            categories: self.categories.clone(),
            templates: self.templates.clone(),
            version: EXPORT_VERSION.to_string(),
            export_date: Utc::now(),
        }
    }

    /// Merge an export into this library (upsert by id). Returns the
    /// number of templates imported.
    pub fn import(&mut self, export: TemplateExport) -> usize {
        for category in export.categories {
            self.add_category(category);
        }
        let count = export.templates.len();
        for template in export.templates {
            self.add_template(template);
        }
        count
    }

    /// Export as a JSON string.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export())
    }

    /// Import from a JSON export. Returns the number of templates
    /// imported.
    pub fn import_json(&mut self, json: &str) -> serde_json::Result<usize> {
        let export: TemplateExport = serde_json::from_str(json)?;
        Ok(self.import(export))
    }
}
