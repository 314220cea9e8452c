//! The [`Grid`] type — a fixed-size 2D map of free and blocked cells.
//!
//! Blocked flags are derived from wall rectangles once, at construction, and
//! never change afterwards. Search annotations (cost, parent, heuristic) are
//! kept out of the grid; see `robonav_search::SearchSpace`.

use crate::error::{MapError, Result};
use crate::geom::{Direction, Point, Range};

/// A `height × width` grid with row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
    blocked_count: usize,
}

impl Grid {
    /// Largest number of cells a grid may hold.
    pub const MAX_CELLS: usize = 1 << 24;

    /// Create a grid of the given size with every cell covered by one of
    /// `walls` marked blocked.
    ///
    /// Wall rectangles are clipped to the grid bounds.
    pub fn new(height: i32, width: i32, walls: &[Range]) -> Result<Self> {
        Self::check_size(height, width)?;
        let bounds = Range::new(0, 0, width, height);
        let mut blocked = vec![false; bounds.len()];
        for wall in walls {
            let clipped = bounds.intersect(*wall);
            if clipped.len() < wall.len() {
                log::debug!("wall {wall} clipped to grid bounds {bounds}");
            }
            for p in clipped {
                blocked[(p.y * width + p.x) as usize] = true;
            }
        }
        let blocked_count = blocked.iter().filter(|&&b| b).count();
        Ok(Self {
            width,
            height,
            blocked,
            blocked_count,
        })
    }

    /// Reject sizes that are not positive or exceed [`Grid::MAX_CELLS`].
    pub fn check_size(height: i32, width: i32) -> Result<()> {
        if height <= 0 || width <= 0 || height as usize * width as usize > Self::MAX_CELLS {
            return Err(MapError::InvalidSize { height, width });
        }
        Ok(())
    }

    /// A grid with no walls.
    pub fn open(height: i32, width: i32) -> Result<Self> {
        Self::new(height, width, &[])
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// The grid rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Whether `p` is a wall cell. Points outside the grid count as blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        match self.index(p) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Number of cells that are not blocked.
    #[inline]
    pub fn net_area(&self) -> usize {
        self.blocked.len() - self.blocked_count
    }

    /// Convert a `Point` to a flat row-major index. Returns `None` if out of
    /// bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Append the in-bounds neighbours of `p` into `buf`, in the fixed order
    /// up, left, down, right.
    ///
    /// Without `allow_jump` there is at most one neighbour per direction. With
    /// it, every in-bounds cell along each direction is emitted, nearest
    /// first. Blocked cells are not filtered out. The caller clears `buf`.
    pub fn neighbors(&self, p: Point, allow_jump: bool, buf: &mut Vec<Point>) {
        for dir in Direction::ALL {
            let mut distance = 1;
            loop {
                let n = p.step(dir, distance);
                if !self.contains(n) {
                    break;
                }
                buf.push(n);
                if !allow_jump {
                    break;
                }
                distance += 1;
            }
        }
    }
}
