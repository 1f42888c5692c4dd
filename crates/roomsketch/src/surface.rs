//! Render-list abstraction for the host drawing surface.
//!
//! The capture engine never rasterizes; it tells a `Surface` which preview
//! line and filled outlines to show. `Scene` is the in-memory surface used by
//! headless hosts (CLI replay) and tests.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::geom::{Polygon, Segment};

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const BLACK: Rgba = Rgba(0, 0, 0, 255);
    pub const BLUE: Rgba = Rgba(0, 0, 255, 255);

    #[inline]
    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba(self.0, self.1, self.2, a)
    }
}

/// Stroke/fill used for a rendered item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Style {
    pub stroke: Rgba,
    pub width: f32,
    pub fill: Option<Rgba>,
}

impl Style {
    /// Thin black line for the live preview edge.
    pub fn preview() -> Self {
        Self {
            stroke: Rgba::BLACK,
            width: 2.0,
            fill: None,
        }
    }

    /// Blue outline with translucent blue fill for finished rooms.
    pub fn room() -> Self {
        Self {
            stroke: Rgba::BLUE,
            width: 2.0,
            fill: Some(Rgba::BLUE.with_alpha(40)),
        }
    }
}

/// What the engine asks of a rendering surface.
pub trait Surface {
    /// Replace the preview line (at most one exists).
    fn show_preview(&mut self, seg: Segment, style: &Style);
    fn hide_preview(&mut self);
    fn add_polygon(&mut self, poly: &Polygon, style: &Style);
    /// Drop every filled outline; background imagery stays.
    fn remove_polygons(&mut self);
}

/// Entry of a `Scene` render list, back to front.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Background { path: PathBuf },
    Polygon { poly: Polygon, style: Style },
    Preview { seg: Segment, style: Style },
}

/// Headless surface: an ordered render list.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    items: Vec<Item>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an image underneath everything, replacing any previous one.
    pub fn set_background(&mut self, path: impl AsRef<Path>) {
        self.items.retain(|it| !matches!(it, Item::Background { .. }));
        self.items.insert(
            0,
            Item::Background {
                path: path.as_ref().to_path_buf(),
            },
        );
    }

    pub fn background(&self) -> Option<&Path> {
        self.items.iter().find_map(|it| match it {
            Item::Background { path } => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.items.iter().filter_map(|it| match it {
            Item::Polygon { poly, .. } => Some(poly),
            _ => None,
        })
    }

    pub fn preview(&self) -> Option<&Segment> {
        self.items.iter().find_map(|it| match it {
            Item::Preview { seg, .. } => Some(seg),
            _ => None,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Surface for Scene {
    fn show_preview(&mut self, seg: Segment, style: &Style) {
        self.hide_preview();
        self.items.push(Item::Preview { seg, style: *style });
    }

    fn hide_preview(&mut self) {
        self.items.retain(|it| !matches!(it, Item::Preview { .. }));
    }

    fn add_polygon(&mut self, poly: &Polygon, style: &Style) {
        self.items.push(Item::Polygon {
            poly: poly.clone(),
            style: *style,
        });
    }

    fn remove_polygons(&mut self) {
        self.items.retain(|it| !matches!(it, Item::Polygon { .. }));
    }
}
