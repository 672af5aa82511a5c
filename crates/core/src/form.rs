//! Form state and validation for the link dialog and project creation.
//!
//! Validation runs as a single pass producing either the validated input or
//! field-keyed messages, and always before any gateway call.

use url::Url;

/// Maximum length of a link or project title.
pub const TITLE_MAX: usize = 100;

/// Minimum length of a project title.
pub const PROJECT_TITLE_MIN: usize = 3;

/// Maximum length of a link icon (emoji or short identifier).
pub const ICON_MAX: usize = 100;

// ---------------------------------------------------------------------------
// Link form
// ---------------------------------------------------------------------------

/// Raw dialog state for creating or editing a single link.
#[derive(Debug, Clone, Default)]
pub struct LinkForm {
    pub title: String,
    pub url: String,
    pub is_active: bool,
    /// `None` means "not supplied": on edit, the existing icon is preserved.
    pub icon: Option<String>,
}

/// Field-keyed validation messages for [`LinkForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFormErrors {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

impl LinkFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.icon.is_none()
    }
}

/// A link form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInput {
    pub title: String,
    pub url: String,
    pub is_active: bool,
    pub icon: Option<String>,
}

/// Validate a link form in one pass.
///
/// Rules:
/// - `title`: length in `[1, 100]`.
/// - `url`: begins with `http://` or `https://` and parses as an absolute URL.
/// - `icon`: optional, at most 100 characters.
pub fn validate_link_form(form: &LinkForm) -> Result<LinkInput, LinkFormErrors> {
    let mut errors = LinkFormErrors::default();

    let title = form.title.trim();
    if title.is_empty() {
        errors.title = Some("Title is required.".into());
    } else if title.chars().count() > TITLE_MAX {
        errors.title = Some(format!("Title must be {TITLE_MAX} characters or less."));
    }

    if !is_valid_link_url(&form.url) {
        errors.url = Some("Enter a valid URL starting with http:// or https://.".into());
    }

    if let Some(icon) = &form.icon {
        if icon.chars().count() > ICON_MAX {
            errors.icon = Some(format!("Icon must be {ICON_MAX} characters or less."));
        }
    }

    if errors.is_empty() {
        Ok(LinkInput {
            title: title.to_string(),
            url: form.url.trim().to_string(),
            is_active: form.is_active,
            icon: form.icon.clone(),
        })
    } else {
        Err(errors)
    }
}

/// `true` when the string parses as an absolute `http`/`https` URL.
pub fn is_valid_link_url(raw: &str) -> bool {
    let raw = raw.trim();
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return false;
    }
    match Url::parse(raw) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Project form
// ---------------------------------------------------------------------------

/// The two project kinds. Only link pages have an editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    LinkPage,
    Website,
}

impl ProjectType {
    /// Database / wire representation, matching the stored strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::LinkPage => "Link Page",
            ProjectType::Website => "Website",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Link Page" => Some(ProjectType::LinkPage),
            "Website" => Some(ProjectType::Website),
            _ => None,
        }
    }
}

/// Field-keyed validation messages for the project creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFormErrors {
    pub title: Option<String>,
    pub project_type: Option<String>,
}

impl ProjectFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.project_type.is_none()
    }
}

/// A validated project creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub title: String,
    pub project_type: ProjectType,
}

/// Validate a project creation form: trimmed title in `[3, 100]` plus a
/// known project type.
pub fn validate_project_form(title: &str, project_type: &str) -> Result<ProjectInput, ProjectFormErrors> {
    let mut errors = ProjectFormErrors::default();

    let title = title.trim();
    if title.chars().count() < PROJECT_TITLE_MIN {
        errors.title = Some(format!(
            "Project title must be at least {PROJECT_TITLE_MIN} characters."
        ));
    } else if title.chars().count() > TITLE_MAX {
        errors.title = Some(format!(
            "Project title must be {TITLE_MAX} characters or less."
        ));
    }

    let parsed_type = ProjectType::parse(project_type);
    if parsed_type.is_none() {
        errors.project_type = Some("Please select a valid project type.".into());
    }

    match (parsed_type, errors.is_empty()) {
        (Some(project_type), true) => Ok(ProjectInput {
            title: title.to_string(),
            project_type,
        }),
        _ => Err(errors),
    }
}
