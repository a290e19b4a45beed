//! Square-ring tile geometry.
//!
//! Tiles sit on the perimeter of a square, addressed clockwise from the
//! top-left corner: right along the top edge, down the right edge, left along
//! the bottom edge, up the left edge. Positions are integer percentages of
//! the board edge, so front ends can place tiles without accumulating
//! rounding drift.

use tombola_types::ring::side_len;

/// Position of one tile, in percent of the board edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: u16,
    pub y: u16,
}

/// Which edge of the ring the walk is currently on.
#[derive(Clone, Copy, PartialEq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Geometry for a ring of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingLayout {
    side: usize,
    tile_pct: u16,
    positions: Vec<TilePos>,
}

impl RingLayout {
    /// Compute tile positions for a `count`-tile board.
    ///
    /// Emits exactly `count` positions walking the ring clockwise. Each edge
    /// hands over within the same iteration once its coordinate steps past
    /// the far corner, so the overshoot becomes the first step along the
    /// next edge; the corner tile itself was emitted the iteration before.
    /// Counts beyond one full perimeter continue one row inward and are
    /// tolerated, not rejected; catalogs are normally fitted to the ring
    /// first with [`tombola_types::ring::fit_to_ring`].
    pub fn generate(count: usize) -> Self {
        let side = side_len(count);
        let step = (100 / side) as i32;
        let max_off = (side as i32 - 1) * step;

        let mut positions = Vec::with_capacity(count);
        let mut x = 0i32;
        let mut y = 0i32;
        let mut edge = Edge::Top;
        for _ in 0..count {
            positions.push(TilePos {
                x: x as u16,
                y: y as u16,
            });

            if edge == Edge::Top {
                x += step;
                if x > max_off {
                    x = max_off;
                    y = 0;
                    edge = Edge::Right;
                }
            }
            if edge == Edge::Right {
                y += step;
                if y > max_off {
                    x = max_off;
                    edge = Edge::Bottom;
                }
            }
            if edge == Edge::Bottom {
                y = max_off;
                x -= step;
                if x < 0 {
                    x = 0;
                    edge = Edge::Left;
                }
            }
            if edge == Edge::Left {
                y -= step;
                if y == step {
                    edge = Edge::Top;
                }
            }
        }

        Self {
            side,
            tile_pct: step as u16,
            positions,
        }
    }

    /// Cells per board edge.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Tile width/height, in percent of the board edge. Tiles are square and
    /// spaced exactly one tile apart, so edges tile without gaps.
    pub fn tile_pct(&self) -> u16 {
        self.tile_pct
    }

    pub fn positions(&self) -> &[TilePos] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Row and column of a tile on the `side x side` grid. Exact because
    /// every position is a multiple of the tile size. `None` when the tile
    /// size degenerates to zero (rings wider than 100 cells).
    pub fn cell_of(&self, index: usize) -> Option<(usize, usize)> {
        if self.tile_pct == 0 {
            return None;
        }
        self.positions.get(index).map(|p| {
            (
                (p.y / self.tile_pct) as usize,
                (p.x / self.tile_pct) as usize,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn coords(layout: &RingLayout) -> Vec<(u16, u16)> {
        layout.positions().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn eight_prize_ring_walks_clockwise() {
        let layout = RingLayout::generate(8);
        assert_eq!(layout.side(), 3);
        assert_eq!(layout.tile_pct(), 33);
        assert_eq!(
            coords(&layout),
            vec![
                (0, 0),
                (33, 0),
                (66, 0),
                (66, 33),
                (66, 66),
                (33, 66),
                (0, 66),
                (0, 33),
            ]
        );
    }

    #[test]
    fn twelve_prize_ring_covers_four_edges() {
        let layout = RingLayout::generate(12);
        assert_eq!(layout.side(), 4);
        assert_eq!(layout.tile_pct(), 25);
        assert_eq!(
            coords(&layout),
            vec![
                (0, 0),
                (25, 0),
                (50, 0),
                (75, 0),
                (75, 25),
                (75, 50),
                (75, 75),
                (50, 75),
                (25, 75),
                (0, 75),
                (0, 50),
                (0, 25),
            ]
        );
    }

    #[test]
    fn corner_tiles_land_exactly_on_the_far_offset() {
        let layout = RingLayout::generate(8);
        let p = layout.positions();
        // Top-right, bottom-right, bottom-left: emitted on the step that
        // lands on max offset, one iteration before the edge hands over.
        assert_eq!((p[2].x, p[2].y), (66, 0));
        assert_eq!((p[4].x, p[4].y), (66, 66));
        assert_eq!((p[6].x, p[6].y), (0, 66));
    }

    #[test]
    fn partial_ring_counts_stay_on_the_perimeter() {
        // 9, 10, and 11 entries share the 12-cell ring and walk the same
        // prefix of it.
        let full = coords(&RingLayout::generate(12));
        for count in [9usize, 10, 11] {
            let partial = coords(&RingLayout::generate(count));
            assert_eq!(partial.len(), count);
            assert_eq!(partial[..], full[..count]);
        }
    }

    #[test]
    fn positions_are_in_range_and_distinct_for_all_counts() {
        for count in 8..=40 {
            let layout = RingLayout::generate(count);
            assert_eq!(layout.len(), count, "count={count}");

            let mut seen = HashSet::new();
            for p in layout.positions() {
                assert!(p.x <= 100 && p.y <= 100, "count={count} pos={p:?}");
                assert!(seen.insert((p.x, p.y)), "count={count} dup={p:?}");
            }
        }
    }

    #[test]
    fn tile_size_follows_side_length() {
        assert_eq!(RingLayout::generate(8).tile_pct(), 33);
        assert_eq!(RingLayout::generate(12).tile_pct(), 25);
        assert_eq!(RingLayout::generate(16).tile_pct(), 20);
        assert_eq!(RingLayout::generate(20).tile_pct(), 16);
    }

    #[test]
    fn cell_mapping_matches_the_grid() {
        let layout = RingLayout::generate(8);
        assert_eq!(layout.cell_of(0), Some((0, 0)));
        assert_eq!(layout.cell_of(2), Some((0, 2)));
        assert_eq!(layout.cell_of(3), Some((1, 2)));
        assert_eq!(layout.cell_of(4), Some((2, 2)));
        assert_eq!(layout.cell_of(7), Some((1, 0)));
        assert_eq!(layout.cell_of(8), None);
    }
}
