#![forbid(unsafe_code)]

//! Geometric normalization and page layout for SVG documents.
//!
//! The pipeline walks the drawing content twice with one traversal shape:
//! a measure pass computes the tight bounding box of every nested primitive,
//! then a transform pass shifts all coordinates so the content starts at a
//! uniform padding from the origin. The canvas is shrunk to exactly fit the
//! content plus an enclosing border frame, and a placement module decides
//! where the result lands on a printed A4 page (including whether to rotate
//! it a quarter turn).
//!
//! Design goals:
//! - deterministic, testable outputs (pure in-memory tree/geometry work)
//! - all-or-nothing runs: every malformed or unsupported input is a hard,
//!   descriptive failure, never a silent approximation

pub mod bounds;
pub mod dom;
pub mod error;
pub mod geom;
pub mod layout;
pub mod page;
pub mod path;
pub mod scale;
pub mod walk;

pub use bounds::Bounds;
pub use error::{Error, Result};
pub use layout::{BorderOptions, LayoutPlan};
pub use page::{Anchor, PageSpec};
pub use scale::ScaleInfo;
pub use walk::TagPolicy;

#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub border: BorderOptions,
    pub tags: TagPolicy,
}

/// The outcome of a normalization run: the mutated document plus everything
/// measured and planned along the way.
#[derive(Debug, Clone)]
pub struct NormalizedDocument {
    pub root: dom::Element,
    /// Content box measured before the shift, in user units.
    pub bounds: Bounds,
    pub scale: ScaleInfo,
    pub plan: LayoutPlan,
}

impl NormalizedDocument {
    /// Serializes the normalized document back to SVG markup.
    pub fn to_svg(&self) -> Result<String> {
        dom::write_document(&self.root)
    }
}

/// Normalizes an SVG document's content bounds.
///
/// Measures the global bounding box, shifts every primitive so the content
/// sits at a uniform border padding from the origin, rewrites the declared
/// canvas to the shrunken size and appends the border frame as a new
/// top-level group.
pub fn normalize_str(svg: &str, options: &NormalizeOptions) -> Result<NormalizedDocument> {
    let mut root = dom::parse_document(svg)?;

    let scale = scale::analyze_scaling(&root)?;
    let bounds = walk::walk_group(&mut root, walk::WalkMode::Measure, &options.tags)?;
    tracing::debug!(?bounds, ?scale, "measured content");

    let plan = layout::plan_layout(&bounds, &options.border, &scale)?;
    walk::walk_group(
        &mut root,
        walk::WalkMode::Translate {
            offset: plan.offset,
        },
        &options.tags,
    )?;
    layout::apply_layout(&mut root, &plan, &options.border.color);
    tracing::debug!(
        width_mm = plan.width_mm,
        height_mm = plan.height_mm,
        "normalized canvas"
    );

    Ok(NormalizedDocument {
        root,
        bounds,
        scale,
        plan,
    })
}
