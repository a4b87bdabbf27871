//! Decoding and re-encoding of SVG path data.
//!
//! Only the command kinds the normalizer understands are representable:
//! move, line, cubic curve, elliptical arc and close. Horizontal and vertical
//! line shorthands decode to plain lines, smooth cubics decode to cubics with
//! the reflected first control point, and both quadratic forms are rejected.
//! Relative coordinates are resolved against the current point at decode
//! time, so every stored command is absolute.

use std::fmt::Write as _;

use svgtypes::{PathParser, PathSegment};

use crate::error::{Error, Result};
use crate::geom::{Point, Vector, point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandKind {
    Move,
    Line,
    Close,
    Cubic {
        control1: Point,
        control2: Point,
    },
    Arc {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
}

/// One decoded path command with absolute start and end points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingCommand {
    pub start: Point,
    pub end: Point,
    pub kind: CommandKind,
}

impl DrawingCommand {
    /// Shifts the command by `offset`.
    ///
    /// Only the start and end points move; curve control points and arc radii
    /// are left untouched.
    pub fn translate(&mut self, offset: Vector) {
        self.start += offset;
        self.end += offset;
    }
}

fn resolve(abs: bool, current: Point, x: f64, y: f64) -> Point {
    if abs {
        point(x, y)
    } else {
        point(current.x + x, current.y + y)
    }
}

/// Decodes a `d` attribute into an ordered command sequence.
pub fn parse_path_data(d: &str) -> Result<Vec<DrawingCommand>> {
    let mut commands = Vec::new();
    let mut current = point(0.0, 0.0);
    let mut subpath_start = point(0.0, 0.0);
    // Control point of the previous cubic, for smooth-curve reflection.
    let mut previous_control: Option<Point> = None;

    for segment in PathParser::from(d) {
        let segment = segment?;
        let mut next_control: Option<Point> = None;

        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let end = resolve(abs, current, x, y);
                commands.push(DrawingCommand {
                    start: end,
                    end,
                    kind: CommandKind::Move,
                });
                current = end;
                subpath_start = end;
            }
            PathSegment::LineTo { abs, x, y } => {
                let end = resolve(abs, current, x, y);
                commands.push(DrawingCommand {
                    start: current,
                    end,
                    kind: CommandKind::Line,
                });
                current = end;
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let end = if abs {
                    point(x, current.y)
                } else {
                    point(current.x + x, current.y)
                };
                commands.push(DrawingCommand {
                    start: current,
                    end,
                    kind: CommandKind::Line,
                });
                current = end;
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let end = if abs {
                    point(current.x, y)
                } else {
                    point(current.x, current.y + y)
                };
                commands.push(DrawingCommand {
                    start: current,
                    end,
                    kind: CommandKind::Line,
                });
                current = end;
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let control1 = resolve(abs, current, x1, y1);
                let control2 = resolve(abs, current, x2, y2);
                let end = resolve(abs, current, x, y);
                commands.push(DrawingCommand {
                    start: current,
                    end,
                    kind: CommandKind::Cubic { control1, control2 },
                });
                next_control = Some(control2);
                current = end;
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                // The first control point is the previous cubic's second
                // control point reflected around the current point, or the
                // current point when the previous command was not a cubic.
                let control1 = match previous_control {
                    Some(c) => point(2.0 * current.x - c.x, 2.0 * current.y - c.y),
                    None => current,
                };
                let control2 = resolve(abs, current, x2, y2);
                let end = resolve(abs, current, x, y);
                commands.push(DrawingCommand {
                    start: current,
                    end,
                    kind: CommandKind::Cubic { control1, control2 },
                });
                next_control = Some(control2);
                current = end;
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let end = resolve(abs, current, x, y);
                commands.push(DrawingCommand {
                    start: current,
                    end,
                    kind: CommandKind::Arc {
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                    },
                });
                current = end;
            }
            PathSegment::ClosePath { .. } => {
                commands.push(DrawingCommand {
                    start: current,
                    end: subpath_start,
                    kind: CommandKind::Close,
                });
                current = subpath_start;
            }
            PathSegment::Quadratic { .. } => {
                return Err(Error::UnsupportedPathCommand { command: 'Q' });
            }
            PathSegment::SmoothQuadratic { .. } => {
                return Err(Error::UnsupportedPathCommand { command: 'T' });
            }
        }

        previous_control = next_control;
    }

    Ok(commands)
}

/// Encodes a command sequence back into a `d` attribute, in absolute form.
pub fn write_path_data(commands: &[DrawingCommand]) -> String {
    let mut out = String::with_capacity(commands.len() * 16);
    for (idx, command) in commands.iter().enumerate() {
        if idx != 0 {
            out.push(' ');
        }
        match command.kind {
            CommandKind::Move => {
                let _ = write!(&mut out, "M {} {}", command.end.x, command.end.y);
            }
            CommandKind::Line => {
                let _ = write!(&mut out, "L {} {}", command.end.x, command.end.y);
            }
            CommandKind::Cubic { control1, control2 } => {
                let _ = write!(
                    &mut out,
                    "C {} {} {} {} {} {}",
                    control1.x, control1.y, control2.x, control2.y, command.end.x, command.end.y
                );
            }
            CommandKind::Arc {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
            } => {
                let _ = write!(
                    &mut out,
                    "A {} {} {} {} {} {} {}",
                    rx,
                    ry,
                    x_axis_rotation,
                    u8::from(large_arc),
                    u8::from(sweep),
                    command.end.x,
                    command.end.y
                );
            }
            CommandKind::Close => out.push('Z'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::vector;

    #[test]
    fn decodes_absolute_move_line_close() {
        let commands = parse_path_data("M 0 0 L 10 0 L 10 10 Z").unwrap();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0].kind, CommandKind::Move);
        assert_eq!(commands[1].start, point(0.0, 0.0));
        assert_eq!(commands[1].end, point(10.0, 0.0));
        assert_eq!(commands[3].kind, CommandKind::Close);
        assert_eq!(commands[3].start, point(10.0, 10.0));
        assert_eq!(commands[3].end, point(0.0, 0.0));
    }

    #[test]
    fn lowers_horizontal_and_vertical_shorthands_to_lines() {
        let commands = parse_path_data("M 0 0 H 20 V 5 h -5 v 2").unwrap();
        assert_eq!(commands[1].kind, CommandKind::Line);
        assert_eq!(commands[1].end, point(20.0, 0.0));
        assert_eq!(commands[2].end, point(20.0, 5.0));
        assert_eq!(commands[3].end, point(15.0, 5.0));
        assert_eq!(commands[4].end, point(15.0, 7.0));
    }

    #[test]
    fn resolves_relative_coordinates() {
        let commands = parse_path_data("m 1 2 l 3 4 c 1 1 2 2 3 3").unwrap();
        assert_eq!(commands[0].end, point(1.0, 2.0));
        assert_eq!(commands[1].end, point(4.0, 6.0));
        let CommandKind::Cubic { control1, control2 } = commands[2].kind else {
            panic!("expected cubic");
        };
        assert_eq!(control1, point(5.0, 7.0));
        assert_eq!(control2, point(6.0, 8.0));
        assert_eq!(commands[2].end, point(7.0, 9.0));
    }

    #[test]
    fn smooth_cubic_reflects_previous_control_point() {
        let commands = parse_path_data("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0").unwrap();
        let CommandKind::Cubic { control1, .. } = commands[2].kind else {
            panic!("expected cubic");
        };
        // Reflection of (10, 10) around (10, 0).
        assert_eq!(control1, point(10.0, -10.0));
    }

    #[test]
    fn rejects_quadratic_commands() {
        let err = parse_path_data("M 0 0 Q 5 5 10 0").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedPathCommand { command: 'Q' }
        ));
        let err = parse_path_data("M 0 0 T 10 0").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedPathCommand { command: 'T' }
        ));
    }

    #[test]
    fn translate_moves_endpoints_but_not_control_points() {
        let mut commands = parse_path_data("M 0 0 C 1 1 2 2 3 3").unwrap();
        for command in &mut commands {
            command.translate(vector(10.0, 20.0));
        }
        assert_eq!(commands[0].end, point(10.0, 20.0));
        assert_eq!(commands[1].start, point(10.0, 20.0));
        assert_eq!(commands[1].end, point(13.0, 23.0));
        let CommandKind::Cubic { control1, control2 } = commands[1].kind else {
            panic!("expected cubic");
        };
        assert_eq!(control1, point(1.0, 1.0));
        assert_eq!(control2, point(2.0, 2.0));
    }

    #[test]
    fn encodes_commands_in_absolute_form() {
        let commands = parse_path_data("m 0 0 l 10 0 a 5 5 0 0 1 5 5 z").unwrap();
        assert_eq!(
            write_path_data(&commands),
            "M 0 0 L 10 0 A 5 5 0 0 1 15 5 Z"
        );
    }
}
