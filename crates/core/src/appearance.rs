//! Appearance settings for a link page: the working copy, its defaults, and
//! the shallow merge over the project's stored JSON blob.
//!
//! Color values are opaque strings; nothing here validates them as hex. The
//! three text colors stay unset until the user picks one -- the preview
//! derives a readable fallback from the corresponding background at render
//! time.

use serde::{Deserialize, Serialize};

use crate::color;

/// Documented defaults for the non-derived fields.
pub mod defaults {
    pub const THEME: &str = "light";
    pub const BACKGROUND_COLOR: &str = "#FFFFFF";
    pub const FONT_FAMILY: &str = "Inter";
    pub const BUTTON_STYLE: &str = "rounded-lg";
    pub const BUTTON_COLOR: &str = "#6366F1";
    pub const BUTTON_HOVER_COLOR: &str = "#4F46E5";
}

/// The working copy of a page's cosmetic configuration.
///
/// Every field is independently optional; `None` means "use the default"
/// (for text colors, "derive from the background"). Serialized with the
/// camelCase keys the stored blobs use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_hover_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_hover_font_color: Option<String>,
}

/// Appearance with every value made concrete, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAppearance {
    pub theme: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub button_style: String,
    pub button_color: String,
    pub button_font_color: String,
    pub button_hover_color: String,
    pub button_hover_font_color: String,
}

impl AppearanceSettings {
    /// Build the working copy from the project's stored blob.
    ///
    /// A shallow merge: fields defined in the stored value win, everything
    /// else stays unset (falling back to defaults at resolve time). A
    /// missing or non-object blob yields the pristine defaults.
    pub fn from_stored(stored: Option<&serde_json::Value>) -> Self {
        match stored {
            Some(value) if value.is_object() => {
                serde_json::from_value(value.clone()).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }

    /// The JSON blob persisted on the project row. Whole-object overwrite;
    /// there is no field-level diffing.
    pub fn to_stored(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Fill every unset field: plain defaults for the structural fields,
    /// luminance-derived contrast for the text colors.
    pub fn resolve(&self) -> ResolvedAppearance {
        let background_color = self
            .background_color
            .clone()
            .unwrap_or_else(|| defaults::BACKGROUND_COLOR.to_string());
        let button_color = self
            .button_color
            .clone()
            .unwrap_or_else(|| defaults::BUTTON_COLOR.to_string());
        let button_hover_color = self
            .button_hover_color
            .clone()
            .unwrap_or_else(|| defaults::BUTTON_HOVER_COLOR.to_string());

        let text_color = self
            .text_color
            .clone()
            .unwrap_or_else(|| color::contrasting_text_color(Some(&background_color)).to_string());
        let button_font_color = self
            .button_font_color
            .clone()
            .unwrap_or_else(|| color::contrasting_text_color(Some(&button_color)).to_string());
        let button_hover_font_color = self
            .button_hover_font_color
            .clone()
            .unwrap_or_else(|| color::contrasting_text_color(Some(&button_hover_color)).to_string());

        ResolvedAppearance {
            theme: self
                .theme
                .clone()
                .unwrap_or_else(|| defaults::THEME.to_string()),
            background_color,
            text_color,
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| defaults::FONT_FAMILY.to_string()),
            button_style: self
                .button_style
                .clone()
                .unwrap_or_else(|| defaults::BUTTON_STYLE.to_string()),
            button_color,
            button_font_color,
            button_hover_color,
            button_hover_font_color,
        }
    }
}
