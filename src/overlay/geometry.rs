//! src/overlay/geometry.rs
//! ============================================================================
//! # Geometry: Points, Rects, and the Screen Probe Seam
//!
//! Minimal geometry types for overlay anchoring, plus the `ScreenProbe`
//! trait through which the platform layer supplies the current pointer
//! location and the work-area rectangle of the screen under it. The core
//! never talks to a windowing system directly.

/// A point in screen coordinates (origin bottom-left, y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle (work area of a screen).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }
}

/// Pointer-location/screen-geometry provider (external collaborator).
///
/// Either accessor may legitimately return `None` (no screens attached,
/// pointer unavailable); the overlay degrades to a no-op in that case.
pub trait ScreenProbe: Send {
    /// Current pointer position in screen coordinates.
    fn pointer(&self) -> Option<Point>;
    /// Work-area rectangle of the screen under the pointer.
    fn work_area(&self) -> Option<Rect>;
}

/// Probe with fixed answers; useful for headless operation and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe {
    pub pointer: Option<Point>,
    pub work_area: Option<Rect>,
}

impl ScreenProbe for FixedProbe {
    fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    fn work_area(&self) -> Option<Rect> {
        self.work_area
    }
}

/// Probe that knows nothing; show requests silently do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl ScreenProbe for NullProbe {
    fn pointer(&self) -> Option<Point> {
        None
    }

    fn work_area(&self) -> Option<Rect> {
        None
    }
}
