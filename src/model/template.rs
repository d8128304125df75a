use serde::{Deserialize, Serialize};

use super::status::{Category, Swatch};

/// One status in a template. `category` may be absent in older template
/// files, which carried only the legacy `is_completed`/`is_default` flags;
/// `resolved_category` derives the category in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStatus {
    pub name: String,
    pub color: Swatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_default: bool,
}

impl TemplateStatus {
    /// Fallback rule: category, else completed → done, default → todo,
    /// otherwise active.
    pub fn resolved_category(&self) -> Category {
        match self.category {
            Some(category) => category,
            None if self.is_completed => Category::Done,
            None if self.is_default => Category::Todo,
            None => Category::Active,
        }
    }
}

/// A named status template used to seed a new board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub statuses: Vec<TemplateStatus>,
}

fn tpl(name: &str, color: Swatch, category: Category) -> TemplateStatus {
    TemplateStatus {
        name: name.to_string(),
        color,
        category: Some(category),
        is_completed: category.is_completed(),
        is_default: category.is_default(),
    }
}

/// The built-in templates offered by `slate init --template`
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "basic".to_string(),
            name: "Basic".to_string(),
            statuses: vec![
                tpl("Todo", Swatch::Gray, Category::Todo),
                tpl("In Progress", Swatch::Blue, Category::Active),
                tpl("Done", Swatch::Green, Category::Done),
            ],
        },
        Template {
            id: "software".to_string(),
            name: "Software".to_string(),
            statuses: vec![
                tpl("Backlog", Swatch::Gray, Category::Todo),
                tpl("Ready", Swatch::Teal, Category::Todo),
                tpl("In Progress", Swatch::Blue, Category::Active),
                tpl("In Review", Swatch::Purple, Category::Active),
                tpl("Done", Swatch::Green, Category::Done),
                tpl("Cancelled", Swatch::Red, Category::Cancelled),
            ],
        },
        Template {
            id: "writing".to_string(),
            name: "Writing".to_string(),
            statuses: vec![
                tpl("Idea", Swatch::Yellow, Category::Todo),
                tpl("Drafting", Swatch::Blue, Category::Active),
                tpl("Editing", Swatch::Amber, Category::Active),
                tpl("Published", Swatch::Green, Category::Done),
            ],
        },
    ]
}

/// Look up a built-in template by id
pub fn find_template(id: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_category_wins_over_flags() {
        let status = TemplateStatus {
            name: "Weird".into(),
            color: Swatch::Gray,
            category: Some(Category::Active),
            is_completed: true,
            is_default: true,
        };
        assert_eq!(status.resolved_category(), Category::Active);
    }

    #[test]
    fn legacy_flags_derive_category() {
        let completed = TemplateStatus {
            name: "Shipped".into(),
            color: Swatch::Green,
            category: None,
            is_completed: true,
            is_default: false,
        };
        assert_eq!(completed.resolved_category(), Category::Done);

        let default = TemplateStatus {
            name: "Queue".into(),
            color: Swatch::Gray,
            category: None,
            is_completed: false,
            is_default: true,
        };
        assert_eq!(default.resolved_category(), Category::Todo);

        let neither = TemplateStatus {
            name: "Working".into(),
            color: Swatch::Blue,
            category: None,
            is_completed: false,
            is_default: false,
        };
        assert_eq!(neither.resolved_category(), Category::Active);
    }

    #[test]
    fn legacy_template_file_parses_without_category() {
        let json = r#"[
            {"name": "Queue", "color": "gray", "is_default": true},
            {"name": "Doing", "color": "blue"},
            {"name": "Shipped", "color": "green", "is_completed": true}
        ]"#;
        let statuses: Vec<TemplateStatus> = serde_json::from_str(json).unwrap();
        let categories: Vec<Category> =
            statuses.iter().map(|s| s.resolved_category()).collect();
        assert_eq!(
            categories,
            vec![Category::Todo, Category::Active, Category::Done]
        );
    }

    #[test]
    fn builtins_are_well_formed() {
        for template in builtin_templates() {
            let done = template
                .statuses
                .iter()
                .filter(|s| s.resolved_category() == Category::Done)
                .count();
            let todo = template
                .statuses
                .iter()
                .filter(|s| s.resolved_category() == Category::Todo)
                .count();
            assert_eq!(done, 1, "template {} must have exactly one done", template.id);
            assert!(todo >= 1, "template {} must have a todo status", template.id);
            assert!(template.statuses.len() >= 2);
        }
    }
}
