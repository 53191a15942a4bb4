use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::ProjectField;

/// Payload of `POST /projects/submit`. The team is found through the email
/// of one of its members.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewProjectSubmission {
    pub member_email: String,
    pub title: String,
    pub problem_statement: String,
    pub technical_description: String,
    pub scientific_reference: String,
    pub field: ProjectField,
}

/// One of the three optional files attached to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Diagram,
    Design,
}

impl AttachmentKind {
    pub const ALL: [Self; 3] = [Self::Image, Self::Diagram, Self::Design];

    /// Multipart form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Diagram => "diagram",
            Self::Design => "design",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team's project submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectSubmission {
    pub id: i64,
    pub team_id: i64,
    pub title: String,
    pub problem_statement: String,
    pub technical_description: String,
    pub scientific_reference: String,
    pub field: ProjectField,
    pub image_path: Option<String>,
    pub diagram_path: Option<String>,
    pub design_path: Option<String>,
    pub character_count: u32,
    pub is_complete: bool,
    pub is_featured: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectSubmission {
    #[must_use]
    pub fn attachment(&self, kind: AttachmentKind) -> Option<&str> {
        match kind {
            AttachmentKind::Image => self.image_path.as_deref(),
            AttachmentKind::Diagram => self.diagram_path.as_deref(),
            AttachmentKind::Design => self.design_path.as_deref(),
        }
    }

    #[must_use]
    pub fn has_attachments(&self) -> bool {
        AttachmentKind::ALL
            .iter()
            .any(|kind| self.attachment(*kind).is_some())
    }
}
