//! Built-in visual templates.
//!
//! A template only carries colours and sizes; switching it never touches
//! tasks or lanes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateStyles {
    pub background_color: String,
    pub text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub bar_radius: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub styles: TemplateStyles,
    /// Task colours offered by the editor; the first one is used for new tasks.
    pub palette: Vec<String>,
}

impl Template {
    pub fn primary_color(&self) -> &str {
        self.palette
            .first()
            .map(String::as_str)
            .unwrap_or(super::task::DEFAULT_TASK_COLOR)
    }

    /// Whether the background is dark enough to need light chrome.
    pub fn is_dark(&self) -> bool {
        super::task::hex_to_rgb(&self.styles.background_color)
            .map(|[r, g, b]| (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000 < 128)
            .unwrap_or(false)
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "clean-default".into(),
            name: "Clean Default".into(),
            styles: TemplateStyles {
                background_color: "#FFFFFF".into(),
                text_color: "#1F2937".into(),
                axis_color: "#6B7280".into(),
                grid_color: "#E5E7EB".into(),
                bar_radius: 4.0,
                font_size: 13.0,
            },
            palette: palette(&[
                "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4",
            ]),
        },
        Template {
            id: "corporate-blue".into(),
            name: "Corporate Blue".into(),
            styles: TemplateStyles {
                background_color: "#F0F4F8".into(),
                text_color: "#1E3A5F".into(),
                axis_color: "#4A6FA5".into(),
                grid_color: "#CBD5E1".into(),
                bar_radius: 2.0,
                font_size: 12.0,
            },
            palette: palette(&[
                "#1E3A5F", "#2563EB", "#3B82F6", "#60A5FA", "#93C5FD", "#1D4ED8", "#1E40AF",
            ]),
        },
        Template {
            id: "minimal-dark".into(),
            name: "Minimal Dark".into(),
            styles: TemplateStyles {
                background_color: "#1A1A2E".into(),
                text_color: "#E0E0E0".into(),
                axis_color: "#888888".into(),
                grid_color: "#2D2D44".into(),
                bar_radius: 6.0,
                font_size: 13.0,
            },
            palette: palette(&[
                "#00D9FF", "#FF6B6B", "#FFE66D", "#4ECB71", "#A78BFA", "#FB923C", "#F472B6",
            ]),
        },
    ]
}

pub fn template_by_id(id: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

pub fn default_template() -> Template {
    builtin_templates().remove(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::normalize_hex_color;

    #[test]
    fn builtins_have_unique_ids_and_valid_colors() {
        let templates = builtin_templates();
        let mut ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
        for t in &templates {
            assert!(!t.palette.is_empty());
            for c in t.palette.iter().chain([
                &t.styles.background_color,
                &t.styles.text_color,
                &t.styles.axis_color,
                &t.styles.grid_color,
            ]) {
                assert!(normalize_hex_color(c).is_ok(), "{} has bad color {}", t.id, c);
            }
        }
    }

    #[test]
    fn lookup_and_darkness() {
        assert_eq!(default_template().id, "clean-default");
        assert!(template_by_id("minimal-dark").unwrap().is_dark());
        assert!(!template_by_id("corporate-blue").unwrap().is_dark());
        assert!(template_by_id("nope").is_none());
    }
}
