use crate::difficulty::Difficulty;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Fields a creator may change after a course has been created
pub const UPDATABLE_FIELDS: [&str; 5] = ["title", "description", "topic", "content", "difficulty"];

/// Course fields as submitted by a creator, before validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub topic: Option<String>,
    pub content: Option<String>,
}

/// A course draft with every required field present
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub topic: String,
    pub content: String,
}

impl CourseDraft {
    /// Checks the draft against the required-field schema
    ///
    /// Blank strings count as missing.
    ///
    /// # Returns
    /// * The validated course, or the names of every missing field
    pub fn validate(self) -> Result<NewCourse, Vec<&'static str>> {
        let mut missing = Vec::new();

        let title = required_text(self.title, "title", &mut missing);
        let description = required_text(self.description, "description", &mut missing);
        if self.difficulty.is_none() {
            missing.push("difficulty");
        }
        let topic = required_text(self.topic, "topic", &mut missing);
        let content = required_text(self.content, "content", &mut missing);

        match (title, description, self.difficulty, topic, content) {
            (Some(title), Some(description), Some(difficulty), Some(topic), Some(content)) => {
                Ok(NewCourse {
                    title,
                    description,
                    difficulty,
                    topic,
                    content,
                })
            }
            _ => Err(missing),
        }
    }
}

fn required_text(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            missing.push(name);
            None
        }
    }
}

/// Changes a creator requested for an existing course
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Why a raw update could not be turned into a [`CoursePatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    /// The key is not one of [`UPDATABLE_FIELDS`]
    DisallowedField(String),
    /// The key is allowed but its value has the wrong shape
    InvalidValue(&'static str),
}

impl Display for PatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::DisallowedField(field) => {
                write!(f, "Updating the '{field}' field is not allowed.")
            }
            Self::InvalidValue(field) => write!(f, "Invalid value for the '{field}' field."),
        }
    }
}

impl std::error::Error for PatchError {}

impl CoursePatch {
    /// Builds a patch from the raw JSON object a client sent
    ///
    /// Every key is checked against [`UPDATABLE_FIELDS`] before any value is
    /// looked at, so an unknown key is always reported as disallowed.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, PatchError> {
        if let Some(field) = fields
            .keys()
            .find(|key| !UPDATABLE_FIELDS.contains(&key.as_str()))
        {
            return Err(PatchError::DisallowedField(field.clone()));
        }

        let difficulty = match patch_text(fields, "difficulty")? {
            Some(text) => Some(
                text.parse()
                    .map_err(|_| PatchError::InvalidValue("difficulty"))?,
            ),
            None => None,
        };

        Ok(Self {
            title: patch_text(fields, "title")?,
            description: patch_text(fields, "description")?,
            topic: patch_text(fields, "topic")?,
            content: patch_text(fields, "content")?,
            difficulty,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn patch_text(fields: &Map<String, Value>, name: &'static str) -> Result<Option<String>, PatchError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(Some(text.clone())),
        Some(_) => Err(PatchError::InvalidValue(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_complete_draft_validates() {
        let draft = CourseDraft {
            title: Some("Rust".to_string()),
            description: Some("Systems programming".to_string()),
            difficulty: Some(Difficulty::Beginner),
            topic: Some("programming".to_string()),
            content: Some("Ownership and borrowing".to_string()),
        };

        let course = draft.validate().unwrap();
        assert_eq!(course.title, "Rust");
        assert_eq!(course.difficulty, Difficulty::Beginner);
    }

    #[test]
    fn test_draft_reports_every_missing_field() {
        let draft = CourseDraft {
            title: Some("Rust".to_string()),
            description: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            draft.validate().unwrap_err(),
            vec!["description", "difficulty", "topic", "content"]
        );
    }

    #[test]
    fn test_patch_rejects_unknown_field() {
        let fields = object(json!({ "title": "New", "price": 0 }));
        assert_eq!(
            CoursePatch::from_fields(&fields).unwrap_err(),
            PatchError::DisallowedField("price".to_string())
        );
    }

    #[test]
    fn test_patch_checks_keys_before_values() {
        let fields = object(json!({ "difficulty": "expert", "approved": true }));
        assert_eq!(
            CoursePatch::from_fields(&fields).unwrap_err(),
            PatchError::DisallowedField("approved".to_string())
        );
    }

    #[test]
    fn test_patch_rejects_mistyped_values() {
        let fields = object(json!({ "title": 3 }));
        assert_eq!(
            CoursePatch::from_fields(&fields).unwrap_err(),
            PatchError::InvalidValue("title")
        );

        let fields = object(json!({ "difficulty": "expert" }));
        assert_eq!(
            CoursePatch::from_fields(&fields).unwrap_err(),
            PatchError::InvalidValue("difficulty")
        );
    }

    #[test]
    fn test_partial_patch_leaves_other_fields_unset() {
        let fields = object(json!({ "topic": "databases", "difficulty": "advanced" }));
        let patch = CoursePatch::from_fields(&fields).unwrap();

        assert_eq!(patch.topic.as_deref(), Some("databases"));
        assert_eq!(patch.difficulty, Some(Difficulty::Advanced));
        assert!(patch.title.is_none());
        assert!(patch.content.is_none());
        assert!(!patch.is_empty());
        assert!(CoursePatch::from_fields(&Map::new()).unwrap().is_empty());
    }
}
