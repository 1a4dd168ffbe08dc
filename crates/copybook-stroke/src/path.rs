//! Stroke-path micro-language.
//!
//! A stroke description is a sequence of whitespace-separated tokens: a
//! command letter followed by exactly the number of `x y` coordinate pairs
//! the command takes.
//!
//! | Command | Points | Effect |
//! |---|---|---|
//! | `M` | 1 | start a new subpath |
//! | `L` | 1 | line to the point |
//! | `Q` | 2 | quadratic curve: control, end |
//! | `C` | 3 | cubic curve: control 1, control 2, end |
//! | `Z` / `z` | 0 | close the current subpath |
//!
//! Anything else is a hard error. In particular a stray number where a
//! command letter is expected is reported rather than skipped.

use std::fmt;
use std::str::FromStr;

use copybook_common::{Point, Rect};

/// One segment of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Straight line to the point.
    LineTo(Point),
    /// Quadratic Bézier curve.
    QuadTo {
        /// Control point.
        ctrl: Point,
        /// End point.
        end: Point,
    },
    /// Cubic Bézier curve.
    CubicTo {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// End point.
        end: Point,
    },
    /// Close the current subpath.
    Close,
}

impl PathSegment {
    /// The command letter this segment is written with.
    #[must_use]
    pub const fn command(&self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
            Self::QuadTo { .. } => 'Q',
            Self::CubicTo { .. } => 'C',
            Self::Close => 'Z',
        }
    }

    /// Apply `f` to every point of the segment.
    #[must_use]
    pub fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(f(p)),
            Self::LineTo(p) => Self::LineTo(f(p)),
            Self::QuadTo { ctrl, end } => Self::QuadTo {
                ctrl: f(ctrl),
                end: f(end),
            },
            Self::CubicTo { ctrl1, ctrl2, end } => Self::CubicTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                end: f(end),
            },
            Self::Close => Self::Close,
        }
    }

    fn for_each_point(&self, mut f: impl FnMut(Point)) {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => f(p),
            Self::QuadTo { ctrl, end } => {
                f(ctrl);
                f(end);
            }
            Self::CubicTo { ctrl1, ctrl2, end } => {
                f(ctrl1);
                f(ctrl2);
                f(end);
            }
            Self::Close => {}
        }
    }
}

/// A parsed stroke outline: an ordered, immutable list of segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Build a path from segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of commands (one per segment).
    #[must_use]
    pub const fn command_count(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a copy of the path with every point mapped through `f`.
    ///
    /// Control points are mapped like end points. That keeps curves exact
    /// only under affine maps; [`flatten`](Self::flatten) the path first
    /// before mapping it through a projective one.
    #[must_use]
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            segments: self.segments.iter().map(|s| s.map_points(&f)).collect(),
        }
    }

    /// Replace every curve by `steps` line segments along it.
    ///
    /// Lines and closes are kept as they are. `steps` of 0 counts as 1.
    #[must_use]
    pub fn flatten(&self, steps: usize) -> Self {
        let steps = steps.max(1);
        let mut segments = Vec::with_capacity(self.segments.len());
        let mut start = Point::default();
        let mut current = Point::default();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    start = p;
                    current = p;
                    segments.push(*segment);
                }
                PathSegment::LineTo(p) => {
                    current = p;
                    segments.push(*segment);
                }
                PathSegment::QuadTo { ctrl, end } => {
                    let from = current;
                    segments.extend((1..=steps).map(|i| {
                        PathSegment::LineTo(quad_point(from, ctrl, end, i as f32 / steps as f32))
                    }));
                    current = end;
                }
                PathSegment::CubicTo { ctrl1, ctrl2, end } => {
                    let from = current;
                    segments.extend((1..=steps).map(|i| {
                        PathSegment::LineTo(cubic_point(from, ctrl1, ctrl2, end, i as f32 / steps as f32))
                    }));
                    current = end;
                }
                PathSegment::Close => {
                    current = start;
                    segments.push(*segment);
                }
            }
        }
        Self { segments }
    }

    /// Bounding box of all points, including control points.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        let mut any = false;
        for segment in &self.segments {
            segment.for_each_point(|p| {
                any = true;
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            });
        }
        any.then(|| Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

fn quad_point(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x,
        u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y,
    )
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

impl fmt::Display for Path {
    /// Writes the path back in the micro-language it was parsed from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = Vec::new();
        for segment in &self.segments {
            tokens.push(segment.command().to_string());
            segment.for_each_point(|p| {
                tokens.push(p.x.to_string());
                tokens.push(p.y.to_string());
            });
        }
        f.write_str(&tokens.join(" "))
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// A stroke description that cannot be turned into a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A token in command position is not one of `M L Q C Z z`.
    #[error("unknown path command '{command}' at token {index}")]
    UnknownCommand {
        /// The offending token.
        command: String,
        /// Zero-based token index.
        index: usize,
    },
    /// The description ended before the command got all its coordinates.
    #[error("command '{command}' at token {index} needs {expected} coordinates, found {found}")]
    MissingCoordinates {
        /// The command letter.
        command: char,
        /// Zero-based token index of the command.
        index: usize,
        /// Number of coordinate tokens the command takes.
        expected: usize,
        /// Number of coordinate tokens actually present.
        found: usize,
    },
    /// A number where a command letter was expected, e.g. a coordinate
    /// beyond what the previous command takes.
    #[error("unexpected number '{token}' at token {index}, expected a command")]
    UnexpectedNumber {
        /// The offending token.
        token: String,
        /// Zero-based token index.
        index: usize,
    },
    /// A coordinate token is not a finite number.
    #[error("coordinate '{token}' at token {index} is not a number")]
    InvalidNumber {
        /// The offending token.
        token: String,
        /// Zero-based token index.
        index: usize,
    },
}

/// Parse a stroke description into a [`Path`].
///
/// An empty (or all-whitespace) description yields an empty path.
///
/// # Errors
///
/// Returns a [`PathError`] for an unknown command, a number in command
/// position, a missing coordinate or a coordinate that is not a finite
/// number.
pub fn parse(description: &str) -> Result<Path, PathError> {
    let mut tokens = Tokens {
        inner: description.split_whitespace().enumerate(),
    };
    let mut segments = Vec::new();

    while let Some((index, token)) = tokens.inner.next() {
        let segment = match token {
            "M" => PathSegment::MoveTo(tokens.points::<1>('M', index)?[0]),
            "L" => PathSegment::LineTo(tokens.points::<1>('L', index)?[0]),
            "Q" => {
                let [ctrl, end] = tokens.points::<2>('Q', index)?;
                PathSegment::QuadTo { ctrl, end }
            }
            "C" => {
                let [ctrl1, ctrl2, end] = tokens.points::<3>('C', index)?;
                PathSegment::CubicTo { ctrl1, ctrl2, end }
            }
            "Z" | "z" => PathSegment::Close,
            _ if token.parse::<f32>().is_ok() => {
                return Err(PathError::UnexpectedNumber {
                    token: token.to_string(),
                    index,
                });
            }
            _ => {
                return Err(PathError::UnknownCommand {
                    command: token.to_string(),
                    index,
                });
            }
        };
        segments.push(segment);
    }

    Ok(Path { segments })
}

/// Token cursor used by [`parse`].
struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
}

impl Tokens<'_> {
    /// Read `N` coordinate pairs following the command at `index`.
    fn points<const N: usize>(&mut self, command: char, index: usize) -> Result<[Point; N], PathError> {
        let mut points = [Point::default(); N];
        for (i, point) in points.iter_mut().enumerate() {
            let x = self.coordinate(command, index, 2 * i, N)?;
            let y = self.coordinate(command, index, 2 * i + 1, N)?;
            *point = Point::new(x, y);
        }
        Ok(points)
    }

    fn coordinate(&mut self, command: char, index: usize, read: usize, pairs: usize) -> Result<f32, PathError> {
        let Some((token_index, token)) = self.inner.next() else {
            return Err(PathError::MissingCoordinates {
                command,
                index,
                expected: pairs * 2,
                found: read,
            });
        };
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PathError::InvalidNumber {
                token: token.to_string(),
                index: token_index,
            }),
        }
    }
}
