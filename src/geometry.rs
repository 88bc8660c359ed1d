//! Pixel-space geometry shared by the engine and its hosts.

/// Signed pixel position relative to the containing viewport origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const ORIGIN: PixelPoint = PixelPoint { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Unsigned pixel extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Signed origin with unsigned size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub origin: PixelPoint,
    pub size: PixelSize,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: PixelPoint::new(x, y),
            size: PixelSize::new(width, height),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.origin.x
            && y >= self.origin.y
            && x < self.origin.x.saturating_add(self.size.width as i32)
            && y < self.origin.y.saturating_add(self.size.height as i32)
    }

    /// Same extent at a different origin.
    pub fn at(&self, origin: PixelPoint) -> Self {
        Self {
            origin,
            size: self.size,
        }
    }
}

/// Clamps a proposed surface origin so the surface stays inside the viewport.
///
/// Each axis is clamped independently to `[0, viewport - surface]`. A surface
/// larger than the viewport on an axis pins to 0 on that axis rather than
/// going negative. Pure and idempotent.
pub fn clamp_to_viewport(
    proposed: PixelPoint,
    surface: PixelSize,
    viewport: PixelSize,
) -> PixelPoint {
    let max_x = viewport.width.saturating_sub(surface.width) as i32;
    let max_y = viewport.height.saturating_sub(surface.height) as i32;
    PixelPoint {
        x: proposed.x.clamp(0, max_x.max(0)),
        y: proposed.y.clamp(0, max_y.max(0)),
    }
}
