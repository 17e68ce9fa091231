//! Grid and pixel value types.
//!
//! `Grid*` types count tiles, `Pixel*` types count pixels.
//!
//! Every operation is total: products and sums wrap on overflow, and a
//! component divided by zero yields zero. Sizes read from a file can be
//! arbitrary, so none of this may panic.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

fn div_or_zero(n: u32, d: u32) -> u32 {
    n.checked_div(d).unwrap_or(0)
}

/// Pixel offset → cell offset. The quotient never exceeds `pixel` in
/// magnitude, so it always fits back into `i32`.
fn cell_of(pixel: i32, cell: u32) -> i32 {
    i64::from(pixel)
        .checked_div(i64::from(cell))
        .and_then(|q| i32::try_from(q).ok())
        .unwrap_or(0)
}

/// Size in pixels, e.g. of one tile or of a whole map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Size in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells, i.e. the length of a row-major flattening.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Zero columns but a non-zero number of rows. Such a grid has no cells
    /// to recover its rows from, so it is never a valid map size.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 && self.height > 0
    }
}

impl Mul<GridSize> for PixelSize {
    type Output = PixelSize;

    fn mul(self, grid: GridSize) -> PixelSize {
        PixelSize::new(
            self.width.wrapping_mul(grid.width),
            self.height.wrapping_mul(grid.height),
        )
    }
}

impl Mul<PixelSize> for GridSize {
    type Output = PixelSize;

    fn mul(self, pixels: PixelSize) -> PixelSize {
        pixels * self
    }
}

/// Pixel size of one cell when `self` is split into `grid`.
impl Div<GridSize> for PixelSize {
    type Output = PixelSize;

    fn div(self, grid: GridSize) -> PixelSize {
        PixelSize::new(
            div_or_zero(self.width, grid.width),
            div_or_zero(self.height, grid.height),
        )
    }
}

/// How many `tile`s fit into `self`.
impl Div<PixelSize> for PixelSize {
    type Output = GridSize;

    fn div(self, tile: PixelSize) -> GridSize {
        GridSize::new(
            div_or_zero(self.width, tile.width),
            div_or_zero(self.height, tile.height),
        )
    }
}

/// A cell in the map grid; the top-left tile is (0,0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when either axis is negative or not below the matching bound.
    pub fn out_of_bounds(self, size: GridSize) -> bool {
        self.x < 0
            || self.y < 0
            || i64::from(self.x) >= i64::from(size.width)
            || i64::from(self.y) >= i64::from(size.height)
    }
}

impl Add for GridCoordinate {
    type Output = GridCoordinate;

    fn add(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x.wrapping_add(other.x), self.y.wrapping_add(other.y))
    }
}

impl Sub for GridCoordinate {
    type Output = GridCoordinate;

    fn sub(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x.wrapping_sub(other.x), self.y.wrapping_sub(other.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelCoordinate {
    pub x: i32,
    pub y: i32,
}

impl PixelCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}

impl Add for PixelCoordinate {
    type Output = PixelCoordinate;

    fn add(self, other: PixelCoordinate) -> PixelCoordinate {
        self.offset(other.x, other.y)
    }
}

impl Sub for PixelCoordinate {
    type Output = PixelCoordinate;

    fn sub(self, other: PixelCoordinate) -> PixelCoordinate {
        PixelCoordinate::new(self.x.wrapping_sub(other.x), self.y.wrapping_sub(other.y))
    }
}

/// The grid cell containing this pixel, for tiles of size `tile`.
impl Div<PixelSize> for PixelCoordinate {
    type Output = GridCoordinate;

    fn div(self, tile: PixelSize) -> GridCoordinate {
        GridCoordinate::new(cell_of(self.x, tile.width), cell_of(self.y, tile.height))
    }
}
