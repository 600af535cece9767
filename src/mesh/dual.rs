//! Dual mesh navigation structure.

use nalgebra::Point2;

use crate::error::{GeomError, Result};

/// A triangle/region dual mesh over a ghost-closed triangulation.
///
/// Constructed once from flattened triangulation buffers (laid out in
/// triangle-major order, three consecutive sides per triangle, already closed
/// with ghost sides and a ghost region by the triangulation step) and
/// read-only thereafter. All navigation operations are O(1) or O(degree).
///
/// A side is directed: if two triangles are adjacent, two sides represent
/// their shared boundary, one per triangle, and each is the other's
/// [`opposite_side`](DualMesh::opposite_side). The same pair of sides also
/// separates the two regions given by [`begin_region`](DualMesh::begin_region)
/// and [`end_region`](DualMesh::end_region).
#[derive(Debug, Clone)]
pub struct DualMesh {
    num_boundary_regions: usize,
    num_solid_sides: usize,

    /// Region sample positions; the ghost region's entry is arbitrary.
    region_points: Vec<Point2<f64>>,

    /// Region each side starts from.
    side_start_region: Vec<usize>,

    /// Paired side of each side (an involution).
    side_opposite_side: Vec<usize>,

    /// One side starting at each region, for circulation entry.
    region_any_side: Vec<usize>,

    /// Precomputed triangle centers; centroids for solid triangles, offset
    /// points outside the unpaired boundary edge for ghost triangles.
    triangle_centers: Vec<Point2<f64>>,
}

impl DualMesh {
    /// Build a dual mesh from flattened triangulation buffers.
    ///
    /// `region_vertices` holds interleaved x, y coordinates for every region
    /// including the ghost region (whose position is arbitrary);
    /// `side_start_region[s]` is the region side `s` starts from, and
    /// `side_opposite_side[s]` is its paired side.
    ///
    /// # Errors
    ///
    /// Fails with [`GeomError::InvalidMesh`] if the buffers are structurally
    /// inconsistent: side count not a multiple of 3, mismatched or odd buffer
    /// lengths, more solid sides than sides, no room for the ghost region,
    /// out-of-range region or side references, a broken opposite-side
    /// involution, or a region no side starts from (which would make
    /// circulation impossible).
    pub fn new(
        num_boundary_regions: usize,
        num_solid_sides: usize,
        region_vertices: Vec<f64>,
        side_start_region: Vec<usize>,
        side_opposite_side: Vec<usize>,
    ) -> Result<Self> {
        let num_sides = side_start_region.len();
        if side_opposite_side.len() != num_sides {
            return Err(GeomError::invalid_mesh(format!(
                "side buffers disagree: {} start regions, {} opposites",
                num_sides,
                side_opposite_side.len()
            )));
        }
        if num_sides % 3 != 0 {
            return Err(GeomError::invalid_mesh(format!(
                "side count {} is not a multiple of 3",
                num_sides
            )));
        }
        if num_solid_sides % 3 != 0 || num_solid_sides > num_sides {
            return Err(GeomError::invalid_mesh(format!(
                "solid side count {} inconsistent with {} sides",
                num_solid_sides, num_sides
            )));
        }
        if region_vertices.len() % 2 != 0 {
            return Err(GeomError::invalid_mesh(format!(
                "region vertex buffer has odd length {}",
                region_vertices.len()
            )));
        }
        let num_regions = region_vertices.len() / 2;
        if num_regions < num_boundary_regions + 1 {
            return Err(GeomError::invalid_mesh(format!(
                "{} regions cannot hold {} boundary regions plus the ghost region",
                num_regions, num_boundary_regions
            )));
        }

        for (s, &r) in side_start_region.iter().enumerate() {
            if r >= num_regions {
                return Err(GeomError::invalid_mesh(format!(
                    "side {} starts at out-of-range region {}",
                    s, r
                )));
            }
        }
        for (s, &o) in side_opposite_side.iter().enumerate() {
            if o >= num_sides {
                return Err(GeomError::invalid_mesh(format!(
                    "side {} pairs with out-of-range side {}",
                    s, o
                )));
            }
            if side_opposite_side[o] != s {
                return Err(GeomError::invalid_mesh(format!(
                    "opposite of side {} is {}, but the opposite of {} is {}",
                    s, o, o, side_opposite_side[o]
                )));
            }
        }

        let region_points: Vec<Point2<f64>> = region_vertices
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect();

        // A representative outgoing side per region, for circulation entry.
        let mut region_any_side = vec![usize::MAX; num_regions];
        for (s, &r) in side_start_region.iter().enumerate() {
            if region_any_side[r] == usize::MAX {
                region_any_side[r] = s;
            }
        }
        if let Some(r) = region_any_side.iter().position(|&s| s == usize::MAX) {
            return Err(GeomError::invalid_mesh(format!(
                "region {} has no incident side",
                r
            )));
        }

        let mut mesh = Self {
            num_boundary_regions,
            num_solid_sides,
            region_points,
            side_start_region,
            side_opposite_side,
            region_any_side,
            triangle_centers: Vec::new(),
        };
        let centers = mesh.compute_triangle_centers();
        mesh.triangle_centers = centers;
        Ok(mesh)
    }

    fn compute_triangle_centers(&self) -> Vec<Point2<f64>> {
        let mut centers = Vec::with_capacity(self.num_triangles());
        for s in (0..self.num_sides()).step_by(3) {
            let a = self.region_points[self.side_start_region[s]];
            let b = self.region_points[self.side_start_region[s + 1]];
            let c = self.region_points[self.side_start_region[s + 2]];
            if self.is_ghost_side(s) {
                // Ghost triangle center sits just outside the one unpaired
                // boundary edge, offset perpendicular by half its length.
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                centers.push(Point2::new(a.x + 0.5 * (dx + dy), a.y + 0.5 * (dy - dx)));
            } else {
                centers.push(Point2::new(
                    (a.x + b.x + c.x) / 3.0,
                    (a.y + b.y + c.y) / 3.0,
                ));
            }
        }
        centers
    }

    // ==================== Counts ====================

    /// Total number of sides, ghost sides included.
    #[inline]
    pub fn num_sides(&self) -> usize {
        self.side_start_region.len()
    }

    /// Number of solid (non-ghost) sides.
    #[inline]
    pub fn num_solid_sides(&self) -> usize {
        self.num_solid_sides
    }

    /// Total number of regions, ghost region included.
    #[inline]
    pub fn num_regions(&self) -> usize {
        self.region_points.len()
    }

    /// Number of solid regions (every region except the ghost).
    #[inline]
    pub fn num_solid_regions(&self) -> usize {
        self.num_regions() - 1
    }

    /// Number of boundary regions.
    #[inline]
    pub fn num_boundary_regions(&self) -> usize {
        self.num_boundary_regions
    }

    /// Total number of triangles, ghost triangles included.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.num_sides() / 3
    }

    /// Number of solid (non-ghost) triangles.
    #[inline]
    pub fn num_solid_triangles(&self) -> usize {
        self.num_solid_sides / 3
    }

    // ==================== Side navigation ====================

    /// The triangle a side belongs to.
    #[inline]
    pub fn side_to_triangle(&self, s: usize) -> usize {
        s / 3
    }

    /// The next side around the owning triangle.
    #[inline]
    pub fn next_side_in_triangle(&self, s: usize) -> usize {
        if s % 3 == 2 {
            s - 2
        } else {
            s + 1
        }
    }

    /// The previous side around the owning triangle.
    #[inline]
    pub fn prev_side_in_triangle(&self, s: usize) -> usize {
        if s % 3 == 0 {
            s + 2
        } else {
            s - 1
        }
    }

    /// The paired side pointing in the reverse direction.
    ///
    /// Satisfies `opposite_side(opposite_side(s)) == s` for every side.
    #[inline]
    pub fn opposite_side(&self, s: usize) -> usize {
        self.side_opposite_side[s]
    }

    /// The region a side starts from.
    #[inline]
    pub fn begin_region(&self, s: usize) -> usize {
        self.side_start_region[s]
    }

    /// The region a side points to.
    #[inline]
    pub fn end_region(&self, s: usize) -> usize {
        self.side_start_region[self.next_side_in_triangle(s)]
    }

    /// The triangle on the side's own half of the edge.
    #[inline]
    pub fn inner_triangle(&self, s: usize) -> usize {
        self.side_to_triangle(s)
    }

    /// The triangle on the far half of the edge.
    #[inline]
    pub fn outer_triangle(&self, s: usize) -> usize {
        self.side_to_triangle(self.side_opposite_side[s])
    }

    // ==================== Geometry ====================

    /// Position of a region's sample point.
    ///
    /// The ghost region's position is whatever the input buffer carried; it
    /// does not represent real geometry.
    #[inline]
    pub fn region_point(&self, r: usize) -> Point2<f64> {
        self.region_points[r]
    }

    /// Precomputed center of a triangle.
    ///
    /// Solid triangles use the centroid of their three region points. Ghost
    /// triangles use a point perpendicular to their unpaired boundary edge,
    /// offset by half the edge length; for clockwise-wound (screen
    /// coordinate) triangulations that places the center outside the solid
    /// mesh, which keeps ghost elements visually separable when rendered.
    #[inline]
    pub fn triangle_center(&self, t: usize) -> Point2<f64> {
        self.triangle_centers[t]
    }

    // ==================== Triangle circulation ====================

    /// The three sides of a triangle.
    pub fn triangle_sides(&self, t: usize) -> [usize; 3] {
        [3 * t, 3 * t + 1, 3 * t + 2]
    }

    /// The three corner regions of a triangle.
    pub fn triangle_regions(&self, t: usize) -> [usize; 3] {
        [
            self.side_start_region[3 * t],
            self.side_start_region[3 * t + 1],
            self.side_start_region[3 * t + 2],
        ]
    }

    /// The three triangles adjacent to a triangle.
    pub fn triangle_neighbors(&self, t: usize) -> [usize; 3] {
        [
            self.outer_triangle(3 * t),
            self.outer_triangle(3 * t + 1),
            self.outer_triangle(3 * t + 2),
        ]
    }

    // ==================== Region circulation ====================

    /// All sides starting at a region, in fan order.
    ///
    /// Starts from the region's representative side and repeatedly steps to
    /// `next_side_in_triangle(opposite_side(s))` until the fan closes, which
    /// the ghost closure guarantees.
    pub fn sides_around_region(&self, r: usize) -> Vec<usize> {
        let s0 = self.region_any_side[r];
        let mut out = Vec::new();
        let mut s = s0;
        loop {
            out.push(s);
            s = self.next_side_in_triangle(self.side_opposite_side[s]);
            if s == s0 {
                break;
            }
        }
        out
    }

    /// All regions adjacent to a region, in fan order.
    pub fn regions_around_region(&self, r: usize) -> Vec<usize> {
        self.sides_around_region(r)
            .into_iter()
            .map(|s| self.end_region(s))
            .collect()
    }

    /// All triangles incident to a region, in fan order.
    pub fn triangles_around_region(&self, r: usize) -> Vec<usize> {
        self.sides_around_region(r)
            .into_iter()
            .map(|s| self.side_to_triangle(s))
            .collect()
    }

    // ==================== Classification ====================

    /// The single ghost region's id (always the last region).
    #[inline]
    pub fn ghost_region(&self) -> usize {
        self.num_regions() - 1
    }

    /// Whether a side is a ghost side.
    #[inline]
    pub fn is_ghost_side(&self, s: usize) -> bool {
        s >= self.num_solid_sides
    }

    /// Whether a region is the ghost region.
    #[inline]
    pub fn is_ghost_region(&self, r: usize) -> bool {
        r == self.ghost_region()
    }

    /// Whether a triangle is a ghost triangle.
    #[inline]
    pub fn is_ghost_triangle(&self, t: usize) -> bool {
        self.is_ghost_side(3 * t)
    }

    /// Whether a side is the ghost pairing of a boundary edge (the first
    /// side of its ghost triangle).
    #[inline]
    pub fn is_boundary_side(&self, s: usize) -> bool {
        self.is_ghost_side(s) && s % 3 == 0
    }

    /// Whether a region lies on the mesh boundary.
    #[inline]
    pub fn is_boundary_region(&self, r: usize) -> bool {
        r < self.num_boundary_regions
    }
}
