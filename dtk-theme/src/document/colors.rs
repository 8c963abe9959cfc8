//! Semantic color groups.
//!
//! Semantic colors have a fixed shape: five groups, each with a fixed set of
//! named slots. Every slot is optional so a dark-mode override tree can carry
//! only the slots it changes.

use serde::{Deserialize, Serialize};

use crate::reference::TokenReference;

macro_rules! color_group {
    ($(#[$meta:meta])* $name:ident { $($slot:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                #[doc = concat!("The `", $key, "` slot.")]
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $slot: Option<TokenReference>,
            )+
        }

        impl $name {
            /// Slot names accepted by this group.
            pub const SLOTS: &'static [&'static str] = &[$($key),+];

            /// Get a non-empty slot value by name.
            pub fn get(&self, slot: &str) -> Option<&TokenReference> {
                let value = match slot {
                    $($key => self.$slot.as_ref(),)+
                    _ => None,
                };
                value.filter(|v| !v.is_empty())
            }

            /// Set a slot value by name. Returns `false` for unknown slots.
            pub fn set(&mut self, slot: &str, value: impl Into<TokenReference>) -> bool {
                match slot {
                    $($key => { self.$slot = Some(value.into()); true })+
                    _ => false,
                }
            }

            /// Non-empty slots in declaration order.
            pub fn entries(&self) -> impl Iterator<Item = (&'static str, &TokenReference)> {
                [$(($key, self.$slot.as_ref())),+]
                    .into_iter()
                    .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            }

            /// Whether no slot carries a value.
            pub fn is_empty(&self) -> bool {
                self.entries().next().is_none()
            }
        }
    };
}

color_group! {
    /// Surface colors.
    BackgroundColors {
        default => "default",
        subtle => "subtle",
        emphasis => "emphasis",
        overlay => "overlay",
    }
}

color_group! {
    /// Foreground text colors.
    TextColors {
        default => "default",
        subtle => "subtle",
        emphasis => "emphasis",
        accent => "accent",
    }
}

color_group! {
    /// Border and divider colors.
    BorderColors {
        default => "default",
        subtle => "subtle",
        emphasis => "emphasis",
    }
}

color_group! {
    /// Colors for interactive elements and their states.
    InteractiveColors {
        primary => "primary",
        secondary => "secondary",
        accent => "accent",
        hover => "hover",
        active => "active",
        focus => "focus",
        disabled => "disabled",
    }
}

color_group! {
    /// Status and feedback colors.
    FeedbackColors {
        success => "success",
        warning => "warning",
        error => "error",
        info => "info",
    }
}

/// One of the five semantic color groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    /// `background`
    Background,
    /// `text`
    Text,
    /// `border`
    Border,
    /// `interactive`
    Interactive,
    /// `feedback`
    Feedback,
}

impl ColorGroup {
    /// Every group, in declaration order.
    pub const ALL: [ColorGroup; 5] = [
        Self::Background,
        Self::Text,
        Self::Border,
        Self::Interactive,
        Self::Feedback,
    ];

    /// Parse a path segment into a color group.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "background" => Some(Self::Background),
            "text" => Some(Self::Text),
            "border" => Some(Self::Border),
            "interactive" => Some(Self::Interactive),
            "feedback" => Some(Self::Feedback),
            _ => None,
        }
    }

    /// The path segment for this group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Text => "text",
            Self::Border => "border",
            Self::Interactive => "interactive",
            Self::Feedback => "feedback",
        }
    }

    /// Slot names accepted by this group.
    pub fn slots(&self) -> &'static [&'static str] {
        match self {
            Self::Background => BackgroundColors::SLOTS,
            Self::Text => TextColors::SLOTS,
            Self::Border => BorderColors::SLOTS,
            Self::Interactive => InteractiveColors::SLOTS,
            Self::Feedback => FeedbackColors::SLOTS,
        }
    }

    /// The slot used when a path stops at the group name, if the group has one.
    pub fn default_slot(&self) -> Option<&'static str> {
        match self {
            Self::Background | Self::Text | Self::Border => Some("default"),
            Self::Interactive | Self::Feedback => None,
        }
    }

    /// Whether `slot` names one of this group's slots.
    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots().contains(&slot)
    }
}

/// The semantic color tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticColors {
    /// Surface colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundColors>,
    /// Text colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextColors>,
    /// Border colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderColors>,
    /// Interactive colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<InteractiveColors>,
    /// Feedback colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackColors>,
}

impl SemanticColors {
    /// Whether the group is present and carries at least one value.
    pub fn has_group(&self, group: ColorGroup) -> bool {
        match group {
            ColorGroup::Background => self.background.as_ref().is_some_and(|g| !g.is_empty()),
            ColorGroup::Text => self.text.as_ref().is_some_and(|g| !g.is_empty()),
            ColorGroup::Border => self.border.as_ref().is_some_and(|g| !g.is_empty()),
            ColorGroup::Interactive => self.interactive.as_ref().is_some_and(|g| !g.is_empty()),
            ColorGroup::Feedback => self.feedback.as_ref().is_some_and(|g| !g.is_empty()),
        }
    }

    /// Get a non-empty slot value.
    pub fn get(&self, group: ColorGroup, slot: &str) -> Option<&TokenReference> {
        match group {
            ColorGroup::Background => self.background.as_ref()?.get(slot),
            ColorGroup::Text => self.text.as_ref()?.get(slot),
            ColorGroup::Border => self.border.as_ref()?.get(slot),
            ColorGroup::Interactive => self.interactive.as_ref()?.get(slot),
            ColorGroup::Feedback => self.feedback.as_ref()?.get(slot),
        }
    }

    /// Set a slot value, creating the group if needed. Returns `false` for
    /// unknown slots.
    pub fn set(&mut self, group: ColorGroup, slot: &str, value: impl Into<TokenReference>) -> bool {
        match group {
            ColorGroup::Background => self.background.get_or_insert_with(Default::default).set(slot, value),
            ColorGroup::Text => self.text.get_or_insert_with(Default::default).set(slot, value),
            ColorGroup::Border => self.border.get_or_insert_with(Default::default).set(slot, value),
            ColorGroup::Interactive => self.interactive.get_or_insert_with(Default::default).set(slot, value),
            ColorGroup::Feedback => self.feedback.get_or_insert_with(Default::default).set(slot, value),
        }
    }

    /// Every non-empty slot as `(group, slot, value)` in declaration order.
    pub fn entries(&self) -> Vec<(ColorGroup, &'static str, &TokenReference)> {
        let mut entries = Vec::new();
        if let Some(group) = &self.background {
            entries.extend(group.entries().map(|(k, v)| (ColorGroup::Background, k, v)));
        }
        if let Some(group) = &self.text {
            entries.extend(group.entries().map(|(k, v)| (ColorGroup::Text, k, v)));
        }
        if let Some(group) = &self.border {
            entries.extend(group.entries().map(|(k, v)| (ColorGroup::Border, k, v)));
        }
        if let Some(group) = &self.interactive {
            entries.extend(group.entries().map(|(k, v)| (ColorGroup::Interactive, k, v)));
        }
        if let Some(group) = &self.feedback {
            entries.extend(group.entries().map(|(k, v)| (ColorGroup::Feedback, k, v)));
        }
        entries
    }

    /// Whether no group carries a value.
    pub fn is_empty(&self) -> bool {
        ColorGroup::ALL.iter().all(|group| !self.has_group(*group))
    }
}
