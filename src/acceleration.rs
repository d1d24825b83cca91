use super::error::*;
use super::fp::*;
use super::hittable::*;
use super::types::*;
use itertools::iproduct;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub minimum: Point3,
    pub maximum: Point3,
}

fn partial_min(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

fn partial_max(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

impl Aabb {
    /// Builds the box spanned by two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Aabb {
        Aabb {
            minimum: partial_min(a, b),
            maximum: partial_max(a, b),
        }
    }

    pub fn surrounding(a: Aabb, b: Aabb) -> Aabb {
        Aabb {
            minimum: partial_min(a.minimum, b.minimum),
            maximum: partial_max(a.maximum, b.maximum),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I) -> Option<Aabb> {
        points.into_iter().fold(None, |bb, p| match bb {
            None => Some(Aabb::new(p, p)),
            Some(bb) => Some(Aabb::surrounding(bb, Aabb::new(p, p))),
        })
    }

    pub fn padded(&self, margin: f64) -> Aabb {
        Aabb {
            minimum: self.minimum - Vec3::broadcast(margin),
            maximum: self.maximum + Vec3::broadcast(margin),
        }
    }

    pub fn extent(&self) -> Vec3 {
        self.maximum - self.minimum
    }

    /// contains reports whether `p` lies in the box grown by `slack`.
    pub fn contains(&self, p: Point3, slack: f64) -> bool {
        Axis::ALL.iter().all(|&a| {
            let v = component(p, a);
            v >= component(self.minimum, a) - slack && v <= component(self.maximum, a) + slack
        })
    }

    /// Slab test. Returns the parameters at which the ray enters and leaves
    /// the box, the entry clamped to 0 when the origin is inside.
    pub fn hit(&self, r: &Ray) -> Option<(f64, f64)> {
        let mut t_min = 0_f64;
        let mut t_max = f64::INFINITY;
        for &axis in Axis::ALL.iter() {
            let o = component(r.origin, axis);
            let d = component(*r.direction, axis);
            let lo = component(self.minimum, axis);
            let hi = component(self.maximum, axis);
            if d == 0. {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv_d = 1. / d;
            let mut t0 = (lo - o) * inv_d;
            let mut t1 = (hi - o) * inv_d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some((t_min, t_max))
    }
}

/// A uniform partition of the bounded part of a scene into
/// `resolution³` cells. Each cell lists the indices of the geometries whose
/// bounding box overlaps it; geometries without a bounding box (planes,
/// tubes) are kept aside and tested against every ray.
pub struct Grid {
    resolution: usize,
    bounds: Option<Aabb>,
    cell_size: Vec3,
    cells: Vec<Vec<usize>>,
    unbounded: Vec<usize>,
}

/// Cells per geometry targeted by [`Grid::auto_resolution`].
const DENSITY: f64 = 3.;
const MAX_AUTO_RESOLUTION: usize = 128;
/// Largest resolution [`Grid::build`] accepts, about 16.7M cells.
pub const MAX_RESOLUTION: usize = 256;

impl Grid {
    pub fn build(geometries: &[Geometry], resolution: usize) -> Result<Grid> {
        if resolution == 0 {
            return invalid("grid resolution must be at least 1");
        }
        let cell_count = match resolution
            .checked_mul(resolution)
            .and_then(|r2| r2.checked_mul(resolution))
        {
            Some(n) if resolution <= MAX_RESOLUTION => n,
            _ => {
                return invalid(format!(
                    "grid resolution {} exceeds the maximum of {}",
                    resolution, MAX_RESOLUTION
                ))
            }
        };

        let mut unbounded = vec![];
        let mut boxes = Vec::with_capacity(geometries.len());
        for (i, g) in geometries.iter().enumerate() {
            match g.aabb() {
                Some(bb) => boxes.push((i, bb)),
                None => unbounded.push(i),
            }
        }

        let bounds = boxes
            .iter()
            .map(|(_, bb)| *bb)
            .reduce(Aabb::surrounding)
            .map(|bb| {
                let e = bb.extent();
                bb.padded(1e-6 * (1. + e.x.max(e.y).max(e.z)))
            });

        let mut grid = Grid {
            resolution,
            bounds,
            cell_size: Vec3::zero(),
            cells: vec![],
            unbounded,
        };
        if let Some(b) = bounds {
            grid.cell_size = b.extent() / resolution as f64;
            grid.cells = vec![vec![]; cell_count];
            for (i, bb) in boxes {
                let lo = grid.cell_coords(bb.minimum, -GRID_EPSILON);
                let hi = grid.cell_coords(bb.maximum, GRID_EPSILON);
                for (ix, iy, iz) in iproduct!(lo[0]..=hi[0], lo[1]..=hi[1], lo[2]..=hi[2]) {
                    let c = grid.flat_index([ix, iy, iz]);
                    grid.cells[c].push(i);
                }
            }
        }

        debug!(
            "built {0}x{0}x{0} grid over {1} geometries ({2} unbounded, {3} cell references)",
            resolution,
            geometries.len(),
            grid.unbounded.len(),
            grid.cells.iter().map(Vec::len).sum::<usize>()
        );
        Ok(grid)
    }

    /// A resolution giving a few cells per geometry, for scenes whose
    /// geometries are roughly evenly spread.
    pub fn auto_resolution(geometry_count: usize) -> usize {
        let r = (geometry_count as f64 * DENSITY).cbrt().ceil() as usize;
        r.max(1).min(MAX_AUTO_RESOLUTION)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The box covered by the cells, `None` when every geometry is
    /// unbounded.
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    /// Geometry indices referenced by cell `(ix, iy, iz)`.
    pub fn cell(&self, ix: usize, iy: usize, iz: usize) -> &[usize] {
        match self.cells.get(self.flat_index([ix, iy, iz])) {
            Some(c) => c,
            None => &[],
        }
    }

    fn flat_index(&self, idx: [usize; 3]) -> usize {
        idx[0] + self.resolution * (idx[1] + self.resolution * idx[2])
    }

    /// Cell containing `p` (shifted by `slack` cell widths), clamped to the
    /// grid.
    fn cell_coords(&self, p: Point3, slack: f64) -> [usize; 3] {
        let mut idx = [0; 3];
        if let Some(b) = self.bounds {
            for &axis in Axis::ALL.iter() {
                let offset = component(p - b.minimum, axis) / component(self.cell_size, axis);
                idx[axis as usize] = self.clamp_index((offset + slack).floor());
            }
        }
        idx
    }

    fn clamp_index(&self, i: f64) -> usize {
        if i <= 0. {
            0
        } else {
            (i as usize).min(self.resolution - 1)
        }
    }

    fn cell_bounds(&self, b: &Aabb, idx: [usize; 3]) -> Aabb {
        let lo = b.minimum
            + Vec3::new(idx[0] as f64, idx[1] as f64, idx[2] as f64) * self.cell_size;
        Aabb {
            minimum: lo,
            maximum: lo + self.cell_size,
        }
    }

    /// Walks the cells pierced by `r`, nearest first, calling `visit` with
    /// each cell's contents and bounds until it returns `true`, the ray
    /// leaves the grid, or the next cell starts past `max_distance`.
    fn walk<F>(&self, r: &Ray, max_distance: f64, mut visit: F)
    where
        F: FnMut(&[usize], &Aabb) -> bool,
    {
        let b = match self.bounds {
            Some(b) => b,
            None => return,
        };
        let t_enter = match b.hit(r) {
            Some((t_enter, _)) if t_enter <= max_distance => t_enter,
            _ => return,
        };

        let entry = r.point_at(t_enter + GRID_EPSILON);
        let mut idx = self.cell_coords(entry, 0.);
        let mut step = [0_isize; 3];
        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];
        for &axis in Axis::ALL.iter() {
            let a = axis as usize;
            let d = component(*r.direction, axis);
            let o = component(r.origin, axis);
            let lo = component(b.minimum, axis);
            let size = component(self.cell_size, axis);
            if d > 0. {
                step[a] = 1;
                t_max[a] = (lo + (idx[a] + 1) as f64 * size - o) / d;
                t_delta[a] = size / d;
            } else if d < 0. {
                step[a] = -1;
                t_max[a] = (lo + idx[a] as f64 * size - o) / d;
                t_delta[a] = -size / d;
            }
        }

        loop {
            let cell = &self.cells[self.flat_index(idx)];
            if visit(cell, &self.cell_bounds(&b, idx)) {
                return;
            }

            // Smallest boundary crossing first; ties go X, then Z, then Y.
            let a = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
                0
            } else if t_max[2] <= t_max[1] {
                2
            } else {
                1
            };
            if step[a] == 0 || t_max[a] > max_distance {
                return;
            }
            let next = idx[a] as isize + step[a];
            if next < 0 || next >= self.resolution as isize {
                return;
            }
            idx[a] = next as usize;
            t_max[a] += t_delta[a];
        }
    }

    /// The nearest intersection of `r` within `max_distance`. Matches a
    /// brute-force scan of `geometries`, which must be the slice the grid
    /// was built from.
    pub fn find_closest<'scene>(
        &self,
        geometries: &'scene [Geometry],
        r: &Ray,
        max_distance: f64,
    ) -> Option<GeoPoint<'scene>> {
        let mut closest: Option<GeoPoint<'scene>> = None;
        self.walk(r, max_distance, |cell, cell_box| {
            for &i in cell {
                for gp in geometries[i].intersect(r, max_distance) {
                    // The hit may belong to a cell further along the ray;
                    // that cell will be visited later.
                    if !cell_box.contains(gp.point, GRID_EPSILON) {
                        continue;
                    }
                    if closest.map_or(true, |c| gp.t < c.t) {
                        closest = Some(gp);
                    }
                }
            }
            closest.is_some()
        });

        let limit = closest.map_or(max_distance, |c| c.t);
        for &i in &self.unbounded {
            if let Some(gp) = geometries[i].intersect_closest(r, limit) {
                if closest.map_or(true, |c| gp.t < c.t) {
                    closest = Some(gp);
                }
            }
        }
        closest
    }

    /// Every intersection of `r` within `max_distance`, nearest first. Each
    /// geometry met in the traversed cells is tested once.
    pub fn find_all<'scene>(
        &self,
        geometries: &'scene [Geometry],
        r: &Ray,
        max_distance: f64,
    ) -> Vec<GeoPoint<'scene>> {
        let mut seen = vec![false; geometries.len()];
        let mut candidates = self.unbounded.clone();
        self.walk(r, max_distance, |cell, _| {
            for &i in cell {
                if !seen[i] {
                    seen[i] = true;
                    candidates.push(i);
                }
            }
            false
        });

        let mut hits: Vec<GeoPoint<'scene>> = candidates
            .into_iter()
            .flat_map(|i| geometries[i].intersect(r, max_distance))
            .collect();
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }
}
