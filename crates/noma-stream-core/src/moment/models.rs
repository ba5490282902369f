use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Content tag attached to every moment.
///
/// Only the scheduler looks at this; navigation treats moments as opaque.
/// `Confession` is the emotionally heaviest tag and the one the pacing
/// constraints are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Anonymous unburdening posts (heavy)
    Confession,
    /// "You are seen" affirmation posts
    Validation,
    /// Gentle practical advice
    Guidance,
    /// Writing/reflection prompts
    Prompt,
    /// Calming reassurance posts
    Reassurance,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 5] = [
        Self::Confession,
        Self::Validation,
        Self::Guidance,
        Self::Prompt,
        Self::Reassurance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confession => "confession",
            Self::Validation => "validation",
            Self::Guidance => "guidance",
            Self::Prompt => "prompt",
            Self::Reassurance => "reassurance",
        }
    }

    /// Parse a snake_case category name (used by the pacing template config).
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "confession" => Ok(Self::Confession),
            "validation" => Ok(Self::Validation),
            "guidance" => Ok(Self::Guidance),
            "prompt" => Ok(Self::Prompt),
            "reassurance" => Ok(Self::Reassurance),
            other => Err(Error::UnknownCategory(other.to_string())),
        }
    }

    /// Whether this is the heaviest category the anti-clustering
    /// constraint applies to.
    pub fn is_heavy(&self) -> bool {
        matches!(self, Self::Confession)
    }
}

/// A single unit of stream content.
///
/// The id and category are what the engine cares about; everything else is
/// payload carried through for rendering and local patching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    pub id: String,
    pub category: Category,
    pub body: String,
    /// Anonymous author handle (e.g. "a quiet fox")
    pub alias: String,
    #[serde(default)]
    pub heart_count: u32,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub hearted: bool,
    #[serde(default)]
    pub saved: bool,
    pub created_at: DateTime<Utc>,
}

impl Moment {
    /// Toggle the local heart state, adjusting the counter. Returns the
    /// new state.
    pub fn toggle_heart(&mut self) -> bool {
        if self.hearted {
            self.hearted = false;
            self.heart_count = self.heart_count.saturating_sub(1);
        } else {
            self.hearted = true;
            self.heart_count += 1;
        }
        self.hearted
    }

    /// Toggle the local saved state. Returns the new state.
    pub fn toggle_save(&mut self) -> bool {
        self.saved = !self.saved;
        self.saved
    }

    /// Get a preview of the body (first N characters, char-boundary safe).
    pub fn body_preview(&self, max_len: usize) -> String {
        if max_len == 0 {
            return String::new();
        }

        if self.body.len() <= max_len {
            self.body.clone()
        } else {
            let mut end = 0;
            for (idx, ch) in self.body.char_indices() {
                let next = idx + ch.len_utf8();
                if next > max_len {
                    break;
                }
                end = next;
            }
            format!("{}...", &self.body[..end])
        }
    }
}

/// A non-content interstitial spliced into the stream by the one-shot
/// trigger mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interruption {
    pub id: String,
    pub heading: String,
    pub body: String,
}

impl Interruption {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// One slot of the rendered sequence: a moment or an interstitial.
#[derive(Debug, Clone)]
pub enum StreamEntry {
    Moment(Moment),
    Interruption(Interruption),
}

impl StreamEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Moment(m) => &m.id,
            Self::Interruption(i) => &i.id,
        }
    }

    pub fn as_moment(&self) -> Option<&Moment> {
        match self {
            Self::Moment(m) => Some(m),
            Self::Interruption(_) => None,
        }
    }

    pub fn as_moment_mut(&mut self) -> Option<&mut Moment> {
        match self {
            Self::Moment(m) => Some(m),
            Self::Interruption(_) => None,
        }
    }

    pub fn is_interruption(&self) -> bool {
        matches!(self, Self::Interruption(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(id: &str, category: Category) -> Moment {
        Moment {
            id: id.to_string(),
            category,
            body: "hello".to_string(),
            alias: "a quiet fox".to_string(),
            heart_count: 0,
            reply_count: 0,
            hearted: false,
            saved: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_parse_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()).unwrap(), category);
        }
        assert!(Category::parse("venting").is_err());
    }

    #[test]
    fn test_only_confession_is_heavy() {
        let heavy: Vec<Category> = Category::ALL.iter().copied().filter(Category::is_heavy).collect();
        assert_eq!(heavy, vec![Category::Confession]);
    }

    #[test]
    fn test_toggle_heart_adjusts_count() {
        let mut m = moment("m1", Category::Validation);
        m.heart_count = 3;

        assert!(m.toggle_heart());
        assert_eq!(m.heart_count, 4);

        assert!(!m.toggle_heart());
        assert_eq!(m.heart_count, 3);
    }

    #[test]
    fn test_body_preview_char_boundary() {
        let mut m = moment("m1", Category::Prompt);
        m.body = "déjà vu all over again".to_string();

        let preview = m.body_preview(5);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= 8);
    }

    #[test]
    fn test_entry_accessors() {
        let entry = StreamEntry::Moment(moment("m1", Category::Guidance));
        assert_eq!(entry.id(), "m1");
        assert!(!entry.is_interruption());

        let entry = StreamEntry::Interruption(Interruption::new("A pause", "Breathe."));
        assert!(entry.is_interruption());
        assert!(entry.as_moment().is_none());
    }
}
