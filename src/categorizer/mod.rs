use crate::models::usage::set_app_category;
use crate::models::{Category, CategoryRule};
use log::info;
use rusqlite::Connection;
use std::collections::HashMap;

/// In-memory view of the user's category rules.
///
/// Loaded once from `category_rules`; every edit goes through [`Categorizer::set_rule`],
/// which persists first and only then updates the map.
pub struct Categorizer {
    rules: HashMap<String, Category>,
}

impl Categorizer {
    pub fn new(conn: &Connection) -> rusqlite::Result<Self> {
        let rules = CategoryRule::find_all(conn)?
            .into_iter()
            .map(|rule| (rule.app_name, rule.category))
            .collect();

        Ok(Self { rules })
    }

    /// Category for `app_name`, defaulting to Neutral. Never creates a rule.
    pub fn resolve(&self, app_name: &str) -> Category {
        self.rule_for(app_name).unwrap_or_default()
    }

    pub fn rule_for(&self, app_name: &str) -> Option<Category> {
        self.rules.get(app_name).copied()
    }

    /// Upsert the rule for `app_name` and rewrite that app's category for `today`.
    ///
    /// Records of earlier days keep the category they had. Returns whether a
    /// record for `today` existed and was rewritten.
    pub fn set_rule(
        &mut self,
        conn: &mut Connection,
        app_name: &str,
        category: Category,
        today: &str,
    ) -> rusqlite::Result<bool> {
        let tx = conn.transaction()?;
        CategoryRule::upsert(&tx, app_name, category)?;
        let rewritten = set_app_category(&tx, today, app_name, category)?;
        tx.commit()?;

        self.rules.insert(app_name.to_string(), category);
        info!("Categorized {app_name} as {category} (today's record rewritten: {rewritten})");
        Ok(rewritten)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, Category)> + '_ {
        self.rules.iter().map(|(app, category)| (app.as_str(), *category))
    }
}
