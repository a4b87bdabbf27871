//! Canvas layout planning.
//!
//! Derives the content offset, the shrunken canvas and the enclosing border
//! frame from the measured bounding box, then rewrites the document root
//! accordingly.

use crate::bounds::Bounds;
use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geom::{Vector, vector};
use crate::scale::ScaleInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct BorderOptions {
    /// Stroke thickness of the enclosing frame, in millimeters.
    pub width_mm: f64,
    /// Distance between the content and the frame, in millimeters.
    pub gap_mm: f64,
    /// Hex stroke color (including `#`).
    pub color: String,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            width_mm: 5.0,
            gap_mm: 1.5,
            color: "#000000".to_string(),
        }
    }
}

/// Geometry of the border frame, in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlan {
    /// Translation applied to every primitive, in user units.
    pub offset: Vector,
    /// New canvas size in user units.
    pub unit_width: f64,
    pub unit_height: f64,
    /// New canvas size in millimeters.
    pub width_mm: f64,
    pub height_mm: f64,
    pub frame: FrameRect,
}

/// Plans the new canvas around the measured content box.
///
/// A zero border width forces the gap to zero. Both axes share the one
/// padding scalar derived from the border settings.
pub fn plan_layout(bounds: &Bounds, border: &BorderOptions, scale: &ScaleInfo) -> Result<LayoutPlan> {
    let (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) =
        (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)
    else {
        return Err(Error::EmptyContent);
    };

    // If there's no frame, there's no padding either.
    let gap_mm = if border.width_mm == 0.0 {
        0.0
    } else {
        border.gap_mm
    };

    let units_per_mm = 1.0 / scale.mm_per_unit;
    let padding_units = units_per_mm * (border.width_mm + gap_mm);

    let offset = vector(-min_x + padding_units, -min_y + padding_units);

    let unit_width = (max_x - min_x) + 2.0 * padding_units;
    let unit_height = (max_y - min_y) + 2.0 * padding_units;
    let width_mm = scale.mm_per_unit * unit_width;
    let height_mm = scale.mm_per_unit * unit_height;

    // Inset by half the stroke so the stroke's outer edge touches the canvas
    // boundary.
    let stroke_units = border.width_mm * units_per_mm;
    let frame = FrameRect {
        x: stroke_units / 2.0,
        y: stroke_units / 2.0,
        width: unit_width - stroke_units,
        height: unit_height - stroke_units,
        stroke_width: stroke_units,
    };

    Ok(LayoutPlan {
        offset,
        unit_width,
        unit_height,
        width_mm,
        height_mm,
        frame,
    })
}

/// Rewrites the root canvas to the planned size and appends the border frame
/// inside a new top-level group.
pub fn apply_layout(root: &mut Element, plan: &LayoutPlan, border_color: &str) {
    root.set_attr("width", format!("{}mm", plan.width_mm));
    root.set_attr("height", format!("{}mm", plan.height_mm));
    root.set_attr(
        "viewBox",
        format!("0 0 {} {}", plan.unit_width, plan.unit_height),
    );

    let mut frame = Element::new("rect");
    frame.set_attr("x", plan.frame.x.to_string());
    frame.set_attr("y", plan.frame.y.to_string());
    frame.set_attr("width", plan.frame.width.to_string());
    frame.set_attr("height", plan.frame.height.to_string());
    frame.set_attr("stroke", border_color);
    frame.set_attr("stroke-width", plan.frame.stroke_width.to_string());
    frame.set_attr("fill", "none");

    let mut container = Element::new("g");
    container.push_element(frame);
    root.push_element(container);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn boxed(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
        Bounds {
            min_x: Some(min_x),
            min_y: Some(min_y),
            max_x: Some(max_x),
            max_y: Some(max_y),
        }
    }

    fn unit_scale() -> ScaleInfo {
        ScaleInfo {
            width_mm: 100.0,
            height_mm: 50.0,
            mm_per_unit: 1.0,
        }
    }

    #[test]
    fn plans_offset_size_and_frame() {
        let border = BorderOptions::default();
        let plan = plan_layout(&boxed(0.0, 0.0, 100.0, 50.0), &border, &unit_scale()).unwrap();

        assert_eq!(plan.offset.x, 6.5);
        assert_eq!(plan.offset.y, 6.5);
        assert_eq!(plan.unit_width, 113.0);
        assert_eq!(plan.unit_height, 63.0);
        assert_eq!(plan.width_mm, 113.0);
        assert_eq!(plan.height_mm, 63.0);
        assert_eq!(plan.frame.x, 2.5);
        assert_eq!(plan.frame.y, 2.5);
        assert_eq!(plan.frame.width, 108.0);
        assert_eq!(plan.frame.height, 58.0);
        assert_eq!(plan.frame.stroke_width, 5.0);
    }

    #[test]
    fn offset_uses_each_axis_minimum() {
        let border = BorderOptions::default();
        let plan = plan_layout(&boxed(-4.0, 10.0, 6.0, 30.0), &border, &unit_scale()).unwrap();
        assert_eq!(plan.offset.x, 4.0 + 6.5);
        assert_eq!(plan.offset.y, -10.0 + 6.5);
    }

    #[test]
    fn zero_border_forces_zero_gap() {
        let border = BorderOptions {
            width_mm: 0.0,
            gap_mm: 1.5,
            color: "#000000".to_string(),
        };
        let plan = plan_layout(&boxed(0.0, 0.0, 10.0, 10.0), &border, &unit_scale()).unwrap();
        assert_eq!(plan.offset.x, 0.0);
        assert_eq!(plan.unit_width, 10.0);
        assert_eq!(plan.unit_height, 10.0);
    }

    #[test]
    fn padding_scales_with_user_units() {
        let scale = ScaleInfo {
            width_mm: 50.0,
            height_mm: 50.0,
            mm_per_unit: 0.5,
        };
        let border = BorderOptions::default();
        let plan = plan_layout(&boxed(0.0, 0.0, 100.0, 100.0), &border, &scale).unwrap();
        // 6.5mm of padding is 13 user units at 0.5mm per unit.
        assert_eq!(plan.offset.x, 13.0);
        assert_eq!(plan.unit_width, 126.0);
        assert_eq!(plan.width_mm, 63.0);
    }

    #[test]
    fn empty_bounds_are_rejected() {
        let err = plan_layout(&Bounds::new(), &BorderOptions::default(), &unit_scale());
        assert!(matches!(err, Err(Error::EmptyContent)));
    }

    #[test]
    fn apply_rewrites_canvas_and_appends_frame_group() {
        let mut root =
            parse_document(r#"<svg width="1mm" height="1mm" viewBox="0 0 1 1"><g/></svg>"#)
                .unwrap();
        let border = BorderOptions::default();
        let plan = plan_layout(&boxed(0.0, 0.0, 100.0, 50.0), &border, &unit_scale()).unwrap();

        apply_layout(&mut root, &plan, &border.color);

        assert_eq!(root.attr("width"), Some("113mm"));
        assert_eq!(root.attr("height"), Some("63mm"));
        assert_eq!(root.attr("viewBox"), Some("0 0 113 63"));

        let container = root.child_elements().last().unwrap();
        assert_eq!(container.tag, "g");
        let frame = container.child_elements().next().unwrap();
        assert_eq!(frame.tag, "rect");
        assert_eq!(frame.attr("x"), Some("2.5"));
        assert_eq!(frame.attr("stroke"), Some("#000000"));
        assert_eq!(frame.attr("stroke-width"), Some("5"));
        assert_eq!(frame.attr("fill"), Some("none"));
    }
}
