use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::model::ids::{AssignmentId, LinkId, MaterialId, TechnologyId, TrainingId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrainingError {
    #[error("training name cannot be empty")]
    EmptyName,

    #[error("material title cannot be empty")]
    EmptyMaterialTitle,

    #[error("link title cannot be empty")]
    EmptyLinkTitle,

    #[error("invalid link: {0}")]
    InvalidLink(String),
}

/// Normalizes and validates a user-supplied link.
///
/// The original data contains bare hosts like `docs.example.com`; those get
/// an `https://` prefix before parsing, matching how the material screens
/// open them.
fn parse_link(raw: &str) -> Result<Url, TrainingError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    Url::parse(&candidate).map_err(|e| TrainingError::InvalidLink(e.to_string()))
}

//
// ─── TRAINING ──────────────────────────────────────────────────────────────────
//

/// One technology a training requires, with the level the trainee should
/// reach in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredTechnology {
    pub technology_id: TechnologyId,
    pub name: String,
    pub level: Option<String>,
}

/// A training in the catalog: name, description, and the technologies it
/// covers. Assignments link trainees to these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Training {
    id: TrainingId,
    name: String,
    description: Option<String>,
    technologies: Vec<RequiredTechnology>,
    created_at: DateTime<Utc>,
}

impl Training {
    /// Creates a training.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::EmptyName` if the name is blank.
    pub fn new(
        id: TrainingId,
        name: impl Into<String>,
        description: Option<String>,
        technologies: Vec<RequiredTechnology>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TrainingError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(TrainingError::EmptyName);
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            name,
            description,
            technologies,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> TrainingId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn technologies(&self) -> &[RequiredTechnology] {
        &self.technologies
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── STUDY MATERIAL ────────────────────────────────────────────────────────────
//

/// A study material attached to a training by an instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyMaterial {
    id: MaterialId,
    training_id: TrainingId,
    title: String,
    link: Url,
    description: Option<String>,
}

impl StudyMaterial {
    /// Creates a material, validating its link.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError` for a blank title or an unparseable link.
    pub fn new(
        id: MaterialId,
        training_id: TrainingId,
        title: impl Into<String>,
        link: &str,
        description: Option<String>,
    ) -> Result<Self, TrainingError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(TrainingError::EmptyMaterialTitle);
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            training_id,
            title,
            link: parse_link(link)?,
            description,
        })
    }

    #[must_use]
    pub fn id(&self) -> MaterialId {
        self.id
    }

    #[must_use]
    pub fn training_id(&self) -> TrainingId {
        self.training_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn link(&self) -> &Url {
        &self.link
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

//
// ─── INSTRUCTOR LINK ───────────────────────────────────────────────────────────
//

/// An ad-hoc link an instructor attached to one assignment (not to the
/// training itself). Identified by a derived [`LinkId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorLink {
    id: LinkId,
    title: String,
    link: Url,
    description: Option<String>,
}

impl InstructorLink {
    /// Creates the link at `index` within `assignment_id`'s link list.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError` for a blank title or an unparseable link.
    pub fn new(
        assignment_id: AssignmentId,
        index: usize,
        title: impl Into<String>,
        link: &str,
        description: Option<String>,
    ) -> Result<Self, TrainingError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(TrainingError::EmptyLinkTitle);
        }

        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id: LinkId::derive(assignment_id, index),
            title,
            link: parse_link(link)?,
            description,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LinkId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn link(&self) -> &Url {
        &self.link
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn training_rejects_empty_name() {
        let err =
            Training::new(TrainingId::new(1), "  ", None, Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, TrainingError::EmptyName);
    }

    #[test]
    fn training_trims_and_filters_description() {
        let training = Training::new(
            TrainingId::new(1),
            " Rust Backend ",
            Some("   ".into()),
            Vec::new(),
            fixed_now(),
        )
        .unwrap();
        assert_eq!(training.name(), "Rust Backend");
        assert_eq!(training.description(), None);
    }

    #[test]
    fn material_link_gets_https_prefix() {
        let material = StudyMaterial::new(
            MaterialId::new(1),
            TrainingId::new(1),
            "Ownership chapter",
            "doc.rust-lang.org/book/ch04-00.html",
            None,
        )
        .unwrap();
        assert_eq!(material.link().scheme(), "https");
    }

    #[test]
    fn material_rejects_unparseable_link() {
        let err = StudyMaterial::new(
            MaterialId::new(1),
            TrainingId::new(1),
            "Broken",
            "http://[bad",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TrainingError::InvalidLink(_)));
    }

    #[test]
    fn instructor_link_derives_its_id() {
        let link = InstructorLink::new(
            AssignmentId::new(12),
            2,
            "Session recording",
            "https://meet.example.com/rec/42",
            None,
        )
        .unwrap();
        assert_eq!(link.id().as_str(), "12_url_2");
    }
}
