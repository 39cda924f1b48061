use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::category::EventCategory;
use crate::error::CoreError;

/// Global palette applied to every block. Values are opaque color strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub text_light: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    TextLight,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 6] = [
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Background,
        Self::Text,
        Self::TextLight,
    ];

    /// Key used in persisted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::Text => "text",
            Self::TextLight => "textLight",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| CoreError::UnknownColorSlot(s.to_string()))
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ColorScheme {
    fn from_literals(slots: [&str; 6]) -> Self {
        let [primary, secondary, accent, background, text, text_light] = slots;
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            background: background.to_string(),
            text: text.to_string(),
            text_light: text_light.to_string(),
        }
    }

    /// Fallback palette for categories without a dedicated one.
    pub fn neutral() -> Self {
        Self::from_literals(["#374151", "#9CA3AF", "#6366F1", "#FFFFFF", "#111827", "#6B7280"])
    }

    pub fn get(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Primary => &self.primary,
            ColorSlot::Secondary => &self.secondary,
            ColorSlot::Accent => &self.accent,
            ColorSlot::Background => &self.background,
            ColorSlot::Text => &self.text,
            ColorSlot::TextLight => &self.text_light,
        }
    }

    pub fn set(&mut self, slot: ColorSlot, value: impl Into<String>) {
        let target = match slot {
            ColorSlot::Primary => &mut self.primary,
            ColorSlot::Secondary => &mut self.secondary,
            ColorSlot::Accent => &mut self.accent,
            ColorSlot::Background => &mut self.background,
            ColorSlot::Text => &mut self.text,
            ColorSlot::TextLight => &mut self.text_light,
        };
        *target = value.into();
    }

    /// Copy of this scheme with one slot replaced.
    pub fn with(&self, slot: ColorSlot, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set(slot, value);
        next
    }

    /// Accepts a persisted scheme only when all six slots are strings.
    /// Extra keys are ignored.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut slots = ColorSlot::ALL
            .into_iter()
            .map(|slot| object.get(slot.as_str()).and_then(Value::as_str));
        Some(Self {
            primary: slots.next()??.to_string(),
            secondary: slots.next()??.to_string(),
            accent: slots.next()??.to_string(),
            background: slots.next()??.to_string(),
            text: slots.next()??.to_string(),
            text_light: slots.next()??.to_string(),
        })
    }
}

/// Default palette for a category. Total: unknown categories get
/// [`ColorScheme::neutral`].
pub fn default_scheme_for(category: &EventCategory) -> ColorScheme {
    match category {
        EventCategory::Wedding => ColorScheme::from_literals([
            "#B76E79", "#F4E1D2", "#D4AF37", "#FFFBF7", "#3E2723", "#8D6E63",
        ]),
        EventCategory::Birthday => ColorScheme::from_literals([
            "#EC4899", "#FDE68A", "#8B5CF6", "#FFF7ED", "#1F2937", "#6B7280",
        ]),
        EventCategory::Corporate => ColorScheme::from_literals([
            "#1E3A8A", "#93C5FD", "#0EA5E9", "#F8FAFC", "#0F172A", "#475569",
        ]),
        EventCategory::Custom(_) => ColorScheme::neutral(),
    }
}
