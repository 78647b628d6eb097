//! Note record and content variants.
//!
//! # Responsibility
//! - Define `Note`, its two content shapes, and creation defaults.
//! - Map the in-memory types to the persisted JSON wire shape.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - `content` shape always matches the note's declared kind; persisted
//!   records violating this are rejected during deserialization.
//! - `created_at` is set once; `updated_at` moves on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable integer identifier for a note.
///
/// Issued by the store's monotonic counter; never reused, even after deletion.
pub type NoteId = u64;

/// The two note variants, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// Free-form plain text body.
    Text,
    /// Ordered checklist of completable items.
    Checklist,
}

impl NoteKind {
    /// Default title used when creation provides none, and as the fallback
    /// when an edit empties the title.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Text => "Untitled Note",
            Self::Checklist => "Untitled Checklist",
        }
    }

    /// Wire name of this kind (`text` / `checklist`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checklist => "checklist",
        }
    }
}

impl Display for NoteKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for note-kind strings coming from untyped callers (UI payloads).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteKindParseError(pub String);

impl Display for NoteKindParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized note type `{}`; expected text|checklist",
            self.0
        )
    }
}

impl Error for NoteKindParseError {}

impl FromStr for NoteKind {
    type Err = NoteKindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "checklist" => Ok(Self::Checklist),
            other => Err(NoteKindParseError(other.to_string())),
        }
    }
}

/// One entry of a checklist note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates an item in the not-completed state.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// Note content as a sum type: each kind carries its own shape.
///
/// Serialized untagged — a JSON string for text bodies, a JSON array for
/// checklist items — next to the explicit `type` discriminator field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteContent {
    Text(String),
    Checklist(Vec<ChecklistItem>),
}

impl NoteContent {
    /// Empty content of the given kind (`""` / no items).
    pub fn empty(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Text => Self::Text(String::new()),
            NoteKind::Checklist => Self::Checklist(Vec::new()),
        }
    }

    /// The kind this content shape belongs to.
    pub fn kind(&self) -> NoteKind {
        match self {
            Self::Text(_) => NoteKind::Text,
            Self::Checklist(_) => NoteKind::Checklist,
        }
    }
}

/// Validation error for persisted note records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Declared `type` field contradicts the content shape.
    KindContentMismatch { id: NoteId, declared: NoteKind },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KindContentMismatch { id, declared } => write!(
                f,
                "note {id} declares type `{declared}` but carries {} content",
                match declared {
                    NoteKind::Text => NoteKind::Checklist,
                    NoteKind::Checklist => NoteKind::Text,
                }
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// A single note: text or checklist, ordered within the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NoteRepr", into = "NoteRepr")]
pub struct Note {
    /// Stable id, unique across the collection for all time.
    pub id: NoteId,
    pub title: String,
    pub content: NoteContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates an empty note of the given kind with the kind's default title
    /// and `created_at == updated_at == now`.
    pub fn new(id: NoteId, kind: NoteKind) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: kind.default_title().to_string(),
            content: NoteContent::empty(kind),
            created_at: now,
            updated_at: now,
        }
    }

    /// The kind fixed at creation, derived from the content shape.
    pub fn kind(&self) -> NoteKind {
        self.content.kind()
    }

    /// Refreshes `updated_at`. Every content/title mutation goes through this.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// `(completed, total)` item counts for checklist notes, `None` for text.
    ///
    /// Backs the presentation layer's "N/M completed" rendering.
    pub fn checklist_progress(&self) -> Option<(usize, usize)> {
        match &self.content {
            NoteContent::Text(_) => None,
            NoteContent::Checklist(items) => {
                let completed = items.iter().filter(|item| item.completed).count();
                Some((completed, items.len()))
            }
        }
    }
}

/// Wire representation carrying the explicit `type` discriminator.
#[derive(Serialize, Deserialize)]
struct NoteRepr {
    id: NoteId,
    #[serde(rename = "type")]
    kind: NoteKind,
    title: String,
    content: NoteContent,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRepr> for Note {
    type Error = NoteValidationError;

    fn try_from(repr: NoteRepr) -> Result<Self, Self::Error> {
        if repr.content.kind() != repr.kind {
            return Err(NoteValidationError::KindContentMismatch {
                id: repr.id,
                declared: repr.kind,
            });
        }

        Ok(Self {
            id: repr.id,
            title: repr.title,
            content: repr.content,
            created_at: repr.created_at,
            updated_at: repr.updated_at,
        })
    }
}

impl From<Note> for NoteRepr {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            kind: note.kind(),
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistItem, Note, NoteContent, NoteKind};
    use std::str::FromStr;

    #[test]
    fn new_note_uses_kind_default_title_and_empty_content() {
        let text = Note::new(1, NoteKind::Text);
        assert_eq!(text.title, "Untitled Note");
        assert_eq!(text.content, NoteContent::Text(String::new()));
        assert_eq!(text.created_at, text.updated_at);

        let checklist = Note::new(2, NoteKind::Checklist);
        assert_eq!(checklist.title, "Untitled Checklist");
        assert_eq!(checklist.content, NoteContent::Checklist(Vec::new()));
    }

    #[test]
    fn kind_parses_wire_names_and_rejects_unknown() {
        assert_eq!(NoteKind::from_str("text").unwrap(), NoteKind::Text);
        assert_eq!(
            NoteKind::from_str("checklist").unwrap(),
            NoteKind::Checklist
        );
        let err = NoteKind::from_str("voice").unwrap_err();
        assert!(err.to_string().contains("voice"));
    }

    #[test]
    fn serialized_note_matches_wire_shape() {
        let mut note = Note::new(7, NoteKind::Checklist);
        note.content = NoteContent::Checklist(vec![ChecklistItem::new("milk")]);

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["type"], "checklist");
        assert_eq!(value["content"][0]["text"], "milk");
        assert_eq!(value["content"][0]["completed"], false);
        assert!(value["createdAt"].is_string());
        assert!(value["updatedAt"].is_string());
    }

    #[test]
    fn deserialization_roundtrips_both_kinds() {
        let mut text = Note::new(1, NoteKind::Text);
        text.content = NoteContent::Text("body".to_string());
        let back: Note = serde_json::from_str(&serde_json::to_string(&text).unwrap()).unwrap();
        assert_eq!(back, text);

        let mut list = Note::new(2, NoteKind::Checklist);
        list.content = NoteContent::Checklist(vec![ChecklistItem {
            text: "eggs".to_string(),
            completed: true,
        }]);
        let back: Note = serde_json::from_str(&serde_json::to_string(&list).unwrap()).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn deserialization_rejects_kind_content_mismatch() {
        let raw = r#"{
            "id": 3,
            "type": "checklist",
            "title": "broken",
            "content": "a plain string",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }"#;
        let err = serde_json::from_str::<Note>(raw).unwrap_err();
        assert!(err.to_string().contains("checklist"));
    }

    #[test]
    fn checklist_progress_counts_completed_items() {
        let mut note = Note::new(4, NoteKind::Checklist);
        note.content = NoteContent::Checklist(vec![
            ChecklistItem {
                text: "milk".to_string(),
                completed: true,
            },
            ChecklistItem::new("eggs"),
        ]);
        assert_eq!(note.checklist_progress(), Some((1, 2)));
        assert_eq!(Note::new(5, NoteKind::Text).checklist_progress(), None);
    }
}
