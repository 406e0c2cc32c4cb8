use std::fmt;

use egui::Color32;
use uuid::Uuid;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A person tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub role: Option<String>,
    /// Roster color, premultiplied like every egui color.
    pub color: Color32,
}

impl TeamMember {
    /// Create a member whose color is picked by join order from the roster
    /// palette, wrapping once the palette runs out.
    pub fn new(name: impl Into<String>, role: Option<String>, join_index: usize) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            role,
            color: palette_color(join_index),
        }
    }

    /// Up to two initials for the roster avatar.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

pub fn palette_color(join_index: usize) -> Color32 {
    theme::MEMBER_COLORS[join_index % theme::MEMBER_COLORS.len()]
}
