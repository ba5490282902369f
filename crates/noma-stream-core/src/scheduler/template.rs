use crate::moment::Category;
use crate::{Error, Result};

/// Default slot order: two heavy slots per cycle, never adjacent.
const DEFAULT_SLOTS: [Category; 6] = [
    Category::Validation,
    Category::Confession,
    Category::Guidance,
    Category::Confession,
    Category::Reassurance,
    Category::Prompt,
];

/// Repeating category pattern the sequencer walks when building a stream.
///
/// Positions wrap around, so a six-slot template paces a pool of any size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingTemplate {
    slots: Vec<Category>,
}

impl PacingTemplate {
    pub fn new(slots: Vec<Category>) -> Result<Self> {
        if slots.is_empty() {
            return Err(Error::Config("pacing template cannot be empty".to_string()));
        }
        Ok(Self { slots })
    }

    /// Parse a template from category names (the config file form).
    pub fn parse(names: &[String]) -> Result<Self> {
        let slots = names
            .iter()
            .map(|name| Category::parse(name.trim()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(slots)
    }

    /// The desired category at a stream position, wrapping past the end.
    pub fn slot(&self, position: usize) -> Category {
        self.slots[position % self.slots.len()]
    }

    pub fn slots(&self) -> &[Category] {
        &self.slots
    }

    /// Light categories to drain when the desired queue is empty: template
    /// order first, then any light category the template never names.
    pub fn fallback_order(&self) -> Vec<Category> {
        let mut order: Vec<Category> = Vec::new();
        for category in self.slots.iter().chain(Category::ALL.iter()) {
            if !category.is_heavy() && !order.contains(category) {
                order.push(*category);
            }
        }
        order
    }
}

impl Default for PacingTemplate {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS.to_vec(),
        }
    }
}
