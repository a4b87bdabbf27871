//! Placement of the normalized content on the output page.
//!
//! The page is a fixed A4 sheet; content is anchored at one of nine named
//! positions and may be rotated a quarter turn when that lets a tall graphic
//! use the sheet better.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geom::{Point, point};

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::CenterLeft => "center-left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-left" | "tl" => Ok(Anchor::TopLeft),
            "top-center" | "tc" => Ok(Anchor::TopCenter),
            "top-right" | "tr" => Ok(Anchor::TopRight),
            "center-left" | "cl" => Ok(Anchor::CenterLeft),
            "center" | "cc" => Ok(Anchor::Center),
            "center-right" | "cr" => Ok(Anchor::CenterRight),
            "bottom-left" | "bl" => Ok(Anchor::BottomLeft),
            "bottom-center" | "bc" => Ok(Anchor::BottomCenter),
            "bottom-right" | "br" => Ok(Anchor::BottomRight),
            _ => Err(Error::InvalidAnchor {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width_mm: f64,
    pub height_mm: f64,
    pub padding_mm: f64,
}

impl PageSpec {
    pub fn a4(padding_mm: f64) -> Self {
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            padding_mm,
        }
    }
}

/// Decides where the content's top-left corner lands on the page, in
/// millimeters with the page origin at its top-left.
pub fn place(content_width_mm: f64, content_height_mm: f64, page: &PageSpec, anchor: Anchor) -> Point {
    let x = match anchor {
        Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft => page.padding_mm,
        Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => {
            page.width_mm / 2.0 - content_width_mm / 2.0
        }
        Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight => {
            page.width_mm - content_width_mm - page.padding_mm
        }
    };
    let y = match anchor {
        Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => page.padding_mm,
        Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => {
            page.height_mm / 2.0 - content_height_mm / 2.0
        }
        Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => {
            page.height_mm - content_height_mm - page.padding_mm
        }
    };
    point(x, y)
}

/// Rotate when the rendered graphic is taller than wide.
pub fn should_rotate(rendered_width: f64, rendered_height: f64) -> bool {
    rendered_height > rendered_width
}

/// Builds the output page document: an A4 canvas with the normalized
/// content's children placed, optionally rotated a quarter turn, and scaled
/// from user units to millimeters.
///
/// `content_height_mm` is the unrotated physical height; when rotating it
/// supplies the origin correction so the rotated footprint still hangs off
/// the placement point.
pub fn compose_page(
    content: &Element,
    mm_per_unit: f64,
    content_height_mm: f64,
    placement: Point,
    rotate: bool,
    page: &PageSpec,
) -> Element {
    let mut transform = format!("translate({} {})", placement.x, placement.y);
    if rotate {
        let _ = write!(&mut transform, " rotate(90) translate(0 {})", -content_height_mm);
    }
    let _ = write!(&mut transform, " scale({})", mm_per_unit);

    let mut wrapper = Element::new("g");
    wrapper.set_attr("transform", transform);
    wrapper.children = content.children.clone();

    let mut root = Element::new("svg");
    root.set_attr("xmlns", "http://www.w3.org/2000/svg");
    root.set_attr("width", format!("{}mm", page.width_mm));
    root.set_attr("height", format!("{}mm", page.height_mm));
    root.set_attr("viewBox", format!("0 0 {} {}", page.width_mm, page.height_mm));
    root.push_element(wrapper);
    root
}
