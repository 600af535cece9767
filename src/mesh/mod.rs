//! Triangle/region dual mesh.
//!
//! This module provides [`DualMesh`], a read-only navigation structure over a
//! finished triangulation. It supports both the "primal" view (regions, i.e.
//! the triangulated sample points) and the "dual" view (triangles), connected
//! by directed sides.
//!
//! # Elements
//!
//! Every element is a plain `usize` id:
//! - *Regions* `r` in `[0, num_regions)`; the last id is the single ghost
//!   region, and ids below `num_boundary_regions` are boundary regions.
//! - *Sides* `s` in `[0, num_sides)`, directed; side `s` belongs to triangle
//!   `s / 3`, and ids at or past `num_solid_sides` are ghost sides.
//! - *Triangles* `t` in `[0, num_triangles)`, each owning the three
//!   consecutive sides `[3t, 3t + 2]`.
//!
//! # Ghost elements
//!
//! The mesh has no free boundary: every boundary edge of the triangulation is
//! paired with a ghost side belonging to a ghost triangle that connects the
//! boundary regions to the single ghost region. Navigation therefore never
//! has to special-case the mesh edge; elements that are not ghosts are called
//! solid.

mod dual;

pub use dual::DualMesh;
