//! Live preview renderer: a pure function from `(title, links, appearance)`
//! to the mock-phone render model.
//!
//! No network, no storage, no hidden state. The same inputs always produce
//! the same output; the api crate serializes the result as JSON and the
//! public page endpoint reuses it.

use serde::Serialize;

use crate::appearance::AppearanceSettings;
use crate::gateway::LinkRecord;
use crate::types::DbId;

/// One rendered link button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewButton {
    pub id: DbId,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub style: String,
    pub background_color: String,
    pub text_color: String,
    pub hover_background_color: String,
    pub hover_text_color: String,
}

/// The rendered page model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPage {
    pub title: String,
    pub theme: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub buttons: Vec<PreviewButton>,
}

/// Render the preview model.
///
/// Inactive links are dropped; active links keep their current array order.
pub fn render(project_title: &str, links: &[LinkRecord], appearance: &AppearanceSettings) -> PreviewPage {
    let resolved = appearance.resolve();

    let buttons = links
        .iter()
        .filter(|link| link.is_active)
        .map(|link| PreviewButton {
            id: link.id,
            title: link.title.clone(),
            url: link.url.clone(),
            icon: link.icon.clone(),
            style: resolved.button_style.clone(),
            background_color: resolved.button_color.clone(),
            text_color: resolved.button_font_color.clone(),
            hover_background_color: resolved.button_hover_color.clone(),
            hover_text_color: resolved.button_hover_font_color.clone(),
        })
        .collect();

    PreviewPage {
        title: project_title.to_string(),
        theme: resolved.theme,
        background_color: resolved.background_color,
        text_color: resolved.text_color,
        font_family: resolved.font_family,
        buttons,
    }
}
