//! Recursive traversal of the drawing content.
//!
//! One traversal shape serves two modes: measuring the global bounding box
//! and shifting every primitive by a fixed offset. Elements are classified
//! into a closed kind set before dispatch; tags outside it are a hard
//! failure.

use crate::bounds::Bounds;
use crate::dom::{Element, Node};
use crate::error::{Error, Result};
use crate::geom::{Point, Vector, point};
use crate::path::{parse_path_data, write_path_data};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Group,
    Path,
    Circle,
    Ignored,
    Stripped,
    Unknown,
}

/// Which tags are skipped and which are removed during traversal.
#[derive(Debug, Clone)]
pub struct TagPolicy {
    /// Meta-info elements, skipped without contributing bounds.
    pub ignore: Vec<String>,
    /// Elements removed from the tree entirely.
    pub strip: Vec<String>,
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self {
            // Title and desc are meta-info.
            ignore: vec!["title".to_string(), "desc".to_string()],
            // Text is sometimes visible outside of bounds, strip it.
            strip: vec!["text".to_string()],
        }
    }
}

impl TagPolicy {
    pub fn classify(&self, tag: &str) -> ElementKind {
        if self.ignore.iter().any(|t| t == tag) {
            return ElementKind::Ignored;
        }
        if self.strip.iter().any(|t| t == tag) {
            return ElementKind::Stripped;
        }
        match tag {
            "g" => ElementKind::Group,
            "path" => ElementKind::Path,
            "circle" => ElementKind::Circle,
            _ => ElementKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkMode {
    Measure,
    Translate { offset: Vector },
}

/// Walks the children of `group`, recursing into nested groups.
///
/// In measure mode the merged bounding box of all primitives is returned and
/// the tree is left untouched except for stripped elements. In translate mode
/// every primitive is shifted by the offset and the returned box stays empty.
pub fn walk_group(group: &mut Element, mode: WalkMode, policy: &TagPolicy) -> Result<Bounds> {
    // Classify every child first so an unknown tag fails while the group is
    // still unmodified.
    for child in group.child_elements() {
        if policy.classify(&child.tag) == ElementKind::Unknown {
            return Err(Error::UnknownElement {
                tag: child.tag.clone(),
            });
        }
    }

    let mut bounds = Bounds::new();
    let previous_children = std::mem::take(&mut group.children);
    let mut kept = Vec::with_capacity(previous_children.len());

    for node in previous_children {
        let mut element = match node {
            Node::Text(text) => {
                kept.push(Node::Text(text));
                continue;
            }
            Node::Element(element) => element,
        };

        match policy.classify(&element.tag) {
            ElementKind::Ignored => kept.push(Node::Element(element)),
            ElementKind::Stripped => {}
            ElementKind::Group => {
                let group_bounds = walk_group(&mut element, mode, policy)?;
                if let WalkMode::Measure = mode {
                    bounds.merge(&group_bounds);
                }
                kept.push(Node::Element(element));
            }
            ElementKind::Path => {
                let path_bounds = handle_path(&mut element, mode)?;
                if let WalkMode::Measure = mode {
                    bounds.merge(&path_bounds);
                }
                kept.push(Node::Element(element));
            }
            ElementKind::Circle => {
                let center = handle_circle(&mut element, mode)?;
                if let WalkMode::Measure = mode {
                    bounds.update(center);
                }
                kept.push(Node::Element(element));
            }
            ElementKind::Unknown => {
                return Err(Error::UnknownElement {
                    tag: element.tag.clone(),
                });
            }
        }
    }

    group.children = kept;
    Ok(bounds)
}

/// Measures or shifts a path by decoding its `d` attribute.
///
/// Bounds are based on command start and end points only; curve control
/// points are not part of the box.
fn handle_path(element: &mut Element, mode: WalkMode) -> Result<Bounds> {
    let d = element.require_attr("d")?;
    let mut commands = parse_path_data(d)?;

    let mut bounds = Bounds::new();
    match mode {
        WalkMode::Measure => {
            for command in &commands {
                bounds.update(command.start);
                bounds.update(command.end);
            }
        }
        WalkMode::Translate { offset } => {
            for command in &mut commands {
                command.translate(offset);
            }
            let encoded = write_path_data(&commands);
            element.set_attr("d", encoded);
        }
    }
    Ok(bounds)
}

/// Measures or shifts a circle through its center point.
///
/// The radius never contributes to bounds.
fn handle_circle(element: &mut Element, mode: WalkMode) -> Result<Point> {
    let cx = element.require_f64("cx")?;
    let cy = element.require_f64("cy")?;

    if let WalkMode::Translate { offset } = mode {
        element.set_attr("cx", (cx + offset.x).to_string());
        element.set_attr("cy", (cy + offset.y).to_string());
    }
    Ok(point(cx, cy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;
    use crate::geom::vector;

    fn measure(text: &str) -> Result<(Element, Bounds)> {
        let mut root = parse_document(text)?;
        let bounds = walk_group(&mut root, WalkMode::Measure, &TagPolicy::default())?;
        Ok((root, bounds))
    }

    #[test]
    fn measures_a_simple_path() {
        let (_, bounds) =
            measure(r#"<g><path d="M 0 0 L 10 0 L 10 10 Z"/></g>"#).unwrap();
        assert_eq!(bounds.min_x, Some(0.0));
        assert_eq!(bounds.min_y, Some(0.0));
        assert_eq!(bounds.max_x, Some(10.0));
        assert_eq!(bounds.max_y, Some(10.0));
    }

    #[test]
    fn circle_contributes_its_center_regardless_of_radius() {
        let (_, bounds) = measure(r#"<g><circle cx="7" cy="3" r="40"/></g>"#).unwrap();
        assert_eq!(bounds.min_x, Some(7.0));
        assert_eq!(bounds.min_y, Some(3.0));
        assert_eq!(bounds.max_x, Some(7.0));
        assert_eq!(bounds.max_y, Some(3.0));
    }

    #[test]
    fn nested_groups_merge_upward() {
        let (_, bounds) = measure(
            r#"<g><g><circle cx="-5" cy="0" r="1"/></g><g><g><circle cx="5" cy="9" r="1"/></g></g></g>"#,
        )
        .unwrap();
        assert_eq!(bounds.min_x, Some(-5.0));
        assert_eq!(bounds.max_x, Some(5.0));
        assert_eq!(bounds.max_y, Some(9.0));
    }

    #[test]
    fn ignored_tags_are_kept_but_not_measured() {
        let (root, bounds) =
            measure(r#"<g><title>t</title><circle cx="1" cy="1" r="1"/></g>"#).unwrap();
        assert_eq!(bounds.max_x, Some(1.0));
        assert_eq!(root.child_elements().count(), 2);
    }

    #[test]
    fn stripped_tags_are_removed() {
        let (root, _) = measure(
            r#"<g><text x="999" y="999">label</text><circle cx="1" cy="1" r="1"/></g>"#,
        )
        .unwrap();
        let tags: Vec<&str> = root.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["circle"]);
    }

    #[test]
    fn unknown_tags_fail_before_the_group_is_touched() {
        let text = r#"<g><text x="0" y="0">gone?</text><rect width="1" height="1"/></g>"#;
        let mut root = parse_document(text).unwrap();
        let err = walk_group(&mut root, WalkMode::Measure, &TagPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownElement { tag } if tag == "rect"));
        // The strippable text element is still present.
        assert_eq!(root.child_elements().count(), 2);
    }

    #[test]
    fn translate_shifts_paths_and_circles() {
        let mut root = parse_document(
            r#"<g><path d="M 0 0 L 10 0"/><circle cx="7" cy="3" r="2"/></g>"#,
        )
        .unwrap();
        walk_group(
            &mut root,
            WalkMode::Translate {
                offset: vector(2.0, 4.0),
            },
            &TagPolicy::default(),
        )
        .unwrap();

        let mut children = root.child_elements();
        let path = children.next().unwrap();
        assert_eq!(path.attr("d"), Some("M 2 4 L 12 4"));
        let circle = children.next().unwrap();
        assert_eq!(circle.attr("cx"), Some("9"));
        assert_eq!(circle.attr("cy"), Some("7"));
        assert_eq!(circle.attr("r"), Some("2"));
    }
}
