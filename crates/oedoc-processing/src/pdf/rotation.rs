//! Where the stamp goes on a rotated page.
//!
//! Coordinates are computed in the page's unrotated user space so that, once
//! the viewer applies `/Rotate`, the text sits in the visual bottom-left corner.

use std::f64::consts::PI;

use oedoc_core::constants::{STAMP_FONT_SIZE, STAMP_MARGIN_X, STAMP_MARGIN_Y};

use super::stamper::StampError;

/// Stamp margins and font size, in PDF user-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampLayout {
    pub margin_x: f64,
    pub margin_y: f64,
    pub font_size: f64,
}

impl Default for StampLayout {
    fn default() -> Self {
        Self {
            margin_x: STAMP_MARGIN_X,
            margin_y: STAMP_MARGIN_Y,
            font_size: STAMP_FONT_SIZE,
        }
    }
}

/// A page's `/Rotate` value, one of the four quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRotation {
    None,
    Quarter,
    Half,
    ThreeQuarters,
}

impl PageRotation {
    /// Normalize a raw `/Rotate` value. Negative values count counter-clockwise.
    pub fn from_degrees(degrees: i64) -> Result<Self, StampError> {
        match degrees.rem_euclid(360) {
            0 => Ok(PageRotation::None),
            90 => Ok(PageRotation::Quarter),
            180 => Ok(PageRotation::Half),
            270 => Ok(PageRotation::ThreeQuarters),
            _ => Err(StampError::UnsupportedRotation(degrees)),
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            PageRotation::None => 0.0,
            PageRotation::Quarter => 90.0,
            PageRotation::Half => 180.0,
            PageRotation::ThreeQuarters => 270.0,
        }
    }

    pub fn radians(self) -> f64 {
        self.degrees() * PI / 180.0
    }

    fn swaps_axes(self) -> bool {
        matches!(self, PageRotation::Quarter | PageRotation::ThreeQuarters)
    }
}

/// Draw origin of the stamp text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampGeometry {
    pub x: f64,
    pub y: f64,
}

/// Compute the stamp's draw origin for a `width` x `height` page.
pub fn stamp_geometry(
    width: f64,
    height: f64,
    rotation: PageRotation,
    layout: &StampLayout,
) -> StampGeometry {
    let anchor_x = layout.margin_x;
    let anchor_y = if rotation.swaps_axes() {
        width - (layout.margin_y + layout.font_size)
    } else {
        height - (layout.margin_y + layout.font_size)
    };

    if rotation == PageRotation::None {
        return StampGeometry {
            x: anchor_x,
            y: anchor_y,
        };
    }

    let radians = rotation.radians();
    let rotated_x = anchor_x * radians.cos() - anchor_y * radians.sin();
    let rotated_y = anchor_x * radians.sin() + anchor_y * radians.cos();

    let (offset_x, offset_y) = match rotation {
        PageRotation::None => (0.0, 0.0),
        PageRotation::Quarter => (width, 0.0),
        PageRotation::Half => (width, height),
        PageRotation::ThreeQuarters => (0.0, height),
    };

    StampGeometry {
        x: rotated_x + offset_x,
        y: rotated_y + offset_y,
    }
}
