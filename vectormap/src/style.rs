//! Styles that decide how polygon borders are drawn.
//!
//! A polygon border is drawn according to what is on the other side of it. A [`PolygonStyle`] carries a list of
//! [`BorderCondition`]s; each condition names either a style class, a shape kind (see [`ShapeKind::name`]),
//! [`ANY_CONDITION`] or [`NONE_CONDITION`], and gives the color and stroke used for the matching borders.

use crate::object::ShapeKind;
use crate::Color;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Condition that matches a border shared with a shape of any class and kind.
pub const ANY_CONDITION: &str = "Any";

/// Condition that matches a border that is not shared with any other shape.
pub const NONE_CONDITION: &str = "None";

/// How a line is stroked.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeType {
    /// Continuous line.
    #[default]
    Solid,
    /// Line of long dashes.
    Dashed,
    /// Line of dots.
    Dotted,
}

/// Color and stroke of a part of an outline.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderPaint {
    /// Line color.
    pub color: Color,
    /// Line stroke.
    #[serde(default)]
    pub stroke: StrokeType,
}

impl BorderPaint {
    /// Creates a new paint.
    pub fn new(color: Color, stroke: StrokeType) -> Self {
        Self { color, stroke }
    }
}

/// Paint used for the borders matching a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderCondition {
    /// Style class, shape kind name, [`ANY_CONDITION`] or [`NONE_CONDITION`].
    pub condition: String,
    /// Line color.
    pub color: Color,
    /// Line stroke.
    #[serde(default)]
    pub stroke: StrokeType,
}

impl BorderCondition {
    /// Creates a new condition.
    pub fn new(condition: impl Into<String>, color: Color, stroke: StrokeType) -> Self {
        Self {
            condition: condition.into(),
            color,
            stroke,
        }
    }

    /// Paint of the borders matching the condition.
    pub fn paint(&self) -> BorderPaint {
        BorderPaint::new(self.color, self.stroke)
    }
}

/// Appearance of a polygon.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Fill color.
    pub fill_color: Color,
    /// Color of the outline where no border condition applies.
    pub outline_color: Color,
    /// Stroke of the outline where no border condition applies.
    #[serde(default)]
    pub outline_stroke: StrokeType,
    /// Border conditions in the order they were configured.
    #[serde(default)]
    pub border_conditions: Vec<BorderCondition>,
}

impl PolygonStyle {
    /// Paint of the polygon's own outline.
    pub fn outline_paint(&self) -> BorderPaint {
        BorderPaint::new(self.outline_color, self.outline_stroke)
    }

    /// Paint of the whole outline if it does not depend on the neighbors of the polygon.
    ///
    /// This is the case when the style has no border conditions (the outline paint is used) or a single
    /// [`ANY_CONDITION`] one.
    pub fn uniform_paint(&self) -> Option<BorderPaint> {
        match self.border_conditions.as_slice() {
            [] => Some(self.outline_paint()),
            [only] if only.condition == ANY_CONDITION => Some(only.paint()),
            _ => None,
        }
    }

    /// Paint of a border, given the class and kind of the shape on the other side of it.
    ///
    /// For a shared border the conditions are checked in priority order: the neighbor's class, then its kind,
    /// then [`ANY_CONDITION`], then [`NONE_CONDITION`]. A border without a neighbor matches only
    /// [`NONE_CONDITION`]. Returns `None` if no condition matches, which means the border is not drawn.
    pub fn border_paint(&self, neighbor: Option<(&str, ShapeKind)>) -> Option<BorderPaint> {
        let find = |condition: &str| {
            self.border_conditions
                .iter()
                .find(|c| c.condition == condition)
                .map(BorderCondition::paint)
        };

        match neighbor {
            Some((class, kind)) => find(class)
                .or_else(|| find(kind.name()))
                .or_else(|| find(ANY_CONDITION))
                .or_else(|| find(NONE_CONDITION)),
            None => find(NONE_CONDITION),
        }
    }
}

/// Source of polygon styles for outline segmentation.
pub trait StyleLookup {
    /// Style of polygons of the given class.
    fn polygon_style(&self, class: &str) -> &PolygonStyle;

    /// Paint of outline parts that run along the antimeridian.
    fn dateline_paint(&self) -> BorderPaint;
}

/// Set of polygon styles by style class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Styles by class.
    #[serde(default)]
    pub styles: AHashMap<String, PolygonStyle>,
    /// Style of the classes not present in `styles`.
    #[serde(default)]
    pub default_style: PolygonStyle,
    /// Paint of outline parts that run along the antimeridian.
    #[serde(default = "default_dateline")]
    pub dateline: BorderPaint,
}

fn default_dateline() -> BorderPaint {
    BorderPaint::new(Color::GRAY, StrokeType::Dashed)
}

impl Theme {
    /// Creates a theme without class styles.
    pub fn new(default_style: PolygonStyle) -> Self {
        Self {
            styles: AHashMap::new(),
            default_style,
            dateline: default_dateline(),
        }
    }

    /// Adds a style for the class, replacing the existing one.
    pub fn with_style(mut self, class: impl Into<String>, style: PolygonStyle) -> Self {
        self.styles.insert(class.into(), style);
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(PolygonStyle::default())
    }
}

impl StyleLookup for Theme {
    fn polygon_style(&self, class: &str) -> &PolygonStyle {
        self.styles.get(class).unwrap_or(&self.default_style)
    }

    fn dateline_paint(&self) -> BorderPaint {
        self.dateline
    }
}
