//! Element model: typed ids, positioning modes and the persisted element shape.
//!
//! Elements are addressed by a closed set of ids rather than free strings.
//! Text lines exist twice, once for the current slide and once for the next
//! slide; each copy lives in its own resolution [`Group`], and a flow anchor
//! that names a line is re-homed into the referencing element's group with
//! [`ElementId::rebased`].
//!
//! The wire form of an id is the tag the settings store has always used
//! (`"header"`, `"original"`, `"nextTranslation"`, ...), so payloads round-trip
//! unchanged.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::Rect;

/// Non-line elements placed on the stage canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageElement {
    Header,
    Clock,
    Title,
    Preview,
}

/// Which slide a text line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineGroup {
    Current,
    Next,
}

/// Which text line within a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineSlot {
    Original,
    Translation,
}

/// Identity of a layout element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ElementId {
    Stage(StageElement),
    Line { group: LineGroup, slot: LineSlot },
}

/// A set of elements resolved together. Flow anchors never cross groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Stage,
    Lines(LineGroup),
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage => f.write_str("stage"),
            Self::Lines(LineGroup::Current) => f.write_str("current"),
            Self::Lines(LineGroup::Next) => f.write_str("next"),
        }
    }
}

impl ElementId {
    pub const HEADER: Self = Self::Stage(StageElement::Header);
    pub const CLOCK: Self = Self::Stage(StageElement::Clock);
    pub const TITLE: Self = Self::Stage(StageElement::Title);
    pub const PREVIEW: Self = Self::Stage(StageElement::Preview);
    pub const ORIGINAL: Self = Self::Line { group: LineGroup::Current, slot: LineSlot::Original };
    pub const TRANSLATION: Self = Self::Line { group: LineGroup::Current, slot: LineSlot::Translation };
    pub const NEXT_ORIGINAL: Self = Self::Line { group: LineGroup::Next, slot: LineSlot::Original };
    pub const NEXT_TRANSLATION: Self = Self::Line { group: LineGroup::Next, slot: LineSlot::Translation };

    /// Every id, in store order.
    pub const ALL: [Self; 8] = [
        Self::HEADER,
        Self::CLOCK,
        Self::TITLE,
        Self::PREVIEW,
        Self::ORIGINAL,
        Self::TRANSLATION,
        Self::NEXT_ORIGINAL,
        Self::NEXT_TRANSLATION,
    ];

    /// The resolution group this element belongs to.
    #[must_use]
    pub fn group(self) -> Group {
        match self {
            Self::Stage(_) => Group::Stage,
            Self::Line { group, .. } => Group::Lines(group),
        }
    }

    /// Re-home a line id into `group`; stage ids and non-line groups are unchanged.
    ///
    /// `nextOriginal` referenced from the current slide becomes `original`, and
    /// `original` referenced from the next slide becomes `nextOriginal`.
    #[must_use]
    pub fn rebased(self, group: Group) -> Self {
        match (self, group) {
            (Self::Line { slot, .. }, Group::Lines(target)) => Self::Line { group: target, slot },
            _ => self,
        }
    }

    /// The persisted string tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Stage(StageElement::Header) => "header",
            Self::Stage(StageElement::Clock) => "clock",
            Self::Stage(StageElement::Title) => "title",
            Self::Stage(StageElement::Preview) => "preview",
            Self::Line { group: LineGroup::Current, slot: LineSlot::Original } => "original",
            Self::Line { group: LineGroup::Current, slot: LineSlot::Translation } => "translation",
            Self::Line { group: LineGroup::Next, slot: LineSlot::Original } => "nextOriginal",
            Self::Line { group: LineGroup::Next, slot: LineSlot::Translation } => "nextTranslation",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ElementId {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.tag() == s)
            .ok_or_else(|| LayoutError::UnknownElementTag(s.to_owned()))
    }
}

impl TryFrom<String> for ElementId {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.tag().to_owned()
    }
}

/// How an element's vertical offset is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Stored geometry is authoritative.
    #[default]
    Absolute,
    /// `y` is derived from the flow anchor's resolved geometry.
    Flow,
}

/// Which edge stays put when an auto-height element's measured height differs from its stored height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowDirection {
    /// Top edge fixed; content grows downward.
    #[default]
    Down,
    /// Bottom edge fixed; content grows upward.
    Up,
}

/// Presentation attributes carried through for the renderer.
///
/// The layout engine never reads these. Unrecognized keys are kept in
/// `extra` so a load/save cycle loses nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_visible() -> bool {
    true
}

/// A positioned element as stored by the settings collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutElement {
    pub id: ElementId,
    /// Stored geometry in percent of the canvas.
    pub position: Rect,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub position_mode: PositionMode,
    /// Element to flow relative to (flow mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_anchor: Option<ElementId>,
    /// Spacing below the anchor, in percent.
    #[serde(default)]
    pub flow_gap: f64,
    /// Sit on the anchor's row instead of stacking below it.
    #[serde(default)]
    pub flow_beside: bool,
    /// Stored height is advisory; the measured height wins when present.
    #[serde(default)]
    pub auto_height: bool,
    #[serde(default)]
    pub grow_direction: GrowDirection,
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl LayoutElement {
    /// A visible, absolutely positioned element.
    #[must_use]
    pub fn absolute(id: ElementId, position: Rect) -> Self {
        Self {
            id,
            position,
            visible: true,
            position_mode: PositionMode::Absolute,
            flow_anchor: None,
            flow_gap: 0.0,
            flow_beside: false,
            auto_height: false,
            grow_direction: GrowDirection::Down,
            style: ElementStyle::default(),
        }
    }

    /// Switch to flow mode, stacking `gap` percent below `anchor`.
    #[must_use]
    pub fn flowing_below(mut self, anchor: ElementId, gap: f64) -> Self {
        self.position_mode = PositionMode::Flow;
        self.flow_anchor = Some(anchor);
        self.flow_gap = gap;
        self.flow_beside = false;
        self
    }

    /// Switch to flow mode, sharing `anchor`'s row.
    #[must_use]
    pub fn flowing_beside(mut self, anchor: ElementId) -> Self {
        self.position_mode = PositionMode::Flow;
        self.flow_anchor = Some(anchor);
        self.flow_beside = true;
        self
    }

    /// Let the measured height override the stored height.
    #[must_use]
    pub fn with_auto_height(mut self, grow_direction: GrowDirection) -> Self {
        self.auto_height = true;
        self.grow_direction = grow_direction;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
