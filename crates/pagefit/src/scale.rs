//! Resolution of the document's physical scale.
//!
//! The declared `width`/`height` (millimeters or centimeters, the same unit
//! on both axes) are related to the `viewBox` to obtain how many millimeters
//! one user unit covers. Unequal X/Y scaling is rejected rather than
//! approximated.

use svgtypes::{Length, LengthUnit};

use crate::dom::Element;
use crate::error::{Error, Result};

/// Relative tolerance when comparing the X and Y scale ratios.
const SCALE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleInfo {
    /// Declared physical width in millimeters.
    pub width_mm: f64,
    /// Declared physical height in millimeters.
    pub height_mm: f64,
    /// Millimeters covered by one user unit.
    pub mm_per_unit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Parses the root `viewBox` attribute.
pub fn parse_view_box(root: &Element) -> Result<ViewBox> {
    let raw = root.require_attr("viewBox")?;
    let malformed = || Error::MalformedAttribute {
        tag: root.tag.clone(),
        attribute: "viewBox".to_string(),
        value: raw.to_string(),
    };

    let normalized = raw.replace(',', " ");
    let mut numbers = normalized
        .split_whitespace()
        .map(|part| part.parse::<f64>().map_err(|_| malformed()));

    let mut next = || -> Result<f64> { numbers.next().ok_or_else(malformed)? };
    let view_box = ViewBox {
        min_x: next()?,
        min_y: next()?,
        width: next()?,
        height: next()?,
    };
    if numbers.next().is_some() {
        return Err(malformed());
    }
    Ok(view_box)
}

fn length_mm(raw: &str) -> Option<(f64, LengthUnit)> {
    let length = raw.trim().parse::<Length>().ok()?;
    match length.unit {
        LengthUnit::Mm => Some((length.number, LengthUnit::Mm)),
        LengthUnit::Cm => Some((length.number * 10.0, LengthUnit::Cm)),
        _ => None,
    }
}

/// Resolves the declared physical dimensions into millimeters.
///
/// Only `mm` and `cm` suffixes are recognized, and both axes must carry the
/// same unit.
pub fn resolve_dimensions(root: &Element) -> Result<(f64, f64)> {
    let width_raw = root.require_attr("width")?;
    let height_raw = root.require_attr("height")?;
    let unsupported = || Error::UnsupportedUnit {
        value: format!("width=\"{width_raw}\" height=\"{height_raw}\""),
    };

    let (width_mm, width_unit) = length_mm(width_raw).ok_or_else(unsupported)?;
    let (height_mm, height_unit) = length_mm(height_raw).ok_or_else(unsupported)?;
    if width_unit != height_unit {
        return Err(unsupported());
    }
    Ok((width_mm, height_mm))
}

/// Computes the document scale from its physical dimensions and `viewBox`.
pub fn analyze_scaling(root: &Element) -> Result<ScaleInfo> {
    let (width_mm, height_mm) = resolve_dimensions(root)?;
    let view_box = parse_view_box(root)?;

    let x_scale = width_mm / view_box.width;
    let y_scale = height_mm / view_box.height;

    let tolerance = SCALE_EPSILON * x_scale.abs().max(y_scale.abs()).max(1.0);
    if (x_scale - y_scale).abs() > tolerance {
        return Err(Error::AnisotropicScaling { x_scale, y_scale });
    }

    Ok(ScaleInfo {
        width_mm,
        height_mm,
        mm_per_unit: x_scale,
    })
}
