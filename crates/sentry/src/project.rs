//! Opaque Sentry project records.
//!
//! Projects are passed through exactly as the server returned them. The
//! accessors below are conveniences for the handful of fields most callers
//! display; they never fail and return `None` for missing or oddly shaped
//! fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single project record as returned by `GET /projects/`.
///
/// # Examples
///
/// ```
/// use lookout_sentry::Project;
///
/// let project: Project = serde_json::from_str(
///     r#"{"id": "2", "slug": "web", "name": "Web", "organization": {"slug": "acme"}}"#,
/// ).unwrap();
///
/// assert_eq!(project.slug(), Some("web"));
/// assert_eq!(project.organization_slug(), Some("acme"));
/// assert_eq!(project.platform(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project(Value);

impl Project {
    /// Wraps a raw JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Returns the URL-friendly project slug.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Returns the platform, e.g. `"javascript"` or `"python"`.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.str_field("platform")
    }

    /// Returns the slug of the owning organization.
    #[must_use]
    pub fn organization_slug(&self) -> Option<&str> {
        self.0.get("organization")?.get("slug")?.as_str()
    }

    /// Returns the raw record.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the project, returning the raw record.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name)?.as_str()
    }
}
