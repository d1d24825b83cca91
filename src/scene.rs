use super::acceleration::*;
use super::color::*;
use super::error::*;
use super::hittable::*;
use super::lights::*;
use super::types::*;
use log::debug;

/// The geometries of a scene, owned in one arena. Queries scan every
/// geometry unless a grid was built, in which case they walk the grid.
#[derive(Default)]
pub struct Geometries {
    items: Vec<Geometry>,
    grid: Option<Grid>,
}

impl Geometries {
    pub fn new() -> Geometries {
        Geometries::default()
    }

    /// Adds a geometry. Adding drops a previously built grid, which must be
    /// rebuilt before tracing.
    pub fn add(&mut self, geometry: Geometry) {
        self.grid = None;
        self.items.push(geometry);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Geometry] {
        &self.items
    }

    pub fn build_grid(&mut self, resolution: usize) -> Result<()> {
        self.grid = Some(Grid::build(&self.items, resolution)?);
        Ok(())
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn find_closest(&self, r: &Ray, max_distance: f64) -> Option<GeoPoint> {
        match &self.grid {
            Some(grid) => grid.find_closest(&self.items, r, max_distance),
            None => self.find_closest_brute_force(r, max_distance),
        }
    }

    pub fn find_all(&self, r: &Ray, max_distance: f64) -> Vec<GeoPoint> {
        match &self.grid {
            Some(grid) => grid.find_all(&self.items, r, max_distance),
            None => self.find_all_brute_force(r, max_distance),
        }
    }

    pub fn find_closest_brute_force(&self, r: &Ray, max_distance: f64) -> Option<GeoPoint> {
        let mut closest_t = max_distance;
        let mut closest_hit: Option<GeoPoint> = None;
        for g in &self.items {
            if let Some(hit) = g.intersect_closest(r, closest_t) {
                closest_t = hit.t;
                closest_hit = Some(hit);
            }
        }
        closest_hit
    }

    pub fn find_all_brute_force(&self, r: &Ray, max_distance: f64) -> Vec<GeoPoint> {
        let mut hits: Vec<GeoPoint> = self
            .items
            .iter()
            .flat_map(|g| g.intersect(r, max_distance))
            .collect();
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }
}

pub type Light = Box<dyn LightSource + Send + Sync>;

pub struct Scene {
    pub name: String,
    pub background: Color,
    pub ambient: AmbientLight,
    pub geometries: Geometries,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn builder(name: &str) -> SceneBuilder {
        SceneBuilder::new(name)
    }
}

/// Assembles a [`Scene`]. The grid, if requested, is built once in
/// [`SceneBuilder::build`] after every geometry was added.
pub struct SceneBuilder {
    name: String,
    background: Color,
    ambient: AmbientLight,
    geometries: Geometries,
    lights: Vec<Light>,
    grid: Option<GridResolution>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridResolution {
    Fixed(usize),
    Auto,
}

impl SceneBuilder {
    pub fn new(name: &str) -> SceneBuilder {
        SceneBuilder {
            name: name.to_string(),
            background: Color::BLACK,
            ambient: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: vec![],
            grid: None,
        }
    }

    pub fn background(mut self, background: Color) -> SceneBuilder {
        self.background = background;
        self
    }

    pub fn ambient(mut self, ambient: AmbientLight) -> SceneBuilder {
        self.ambient = ambient;
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> SceneBuilder {
        self.geometries.add(geometry);
        self
    }

    pub fn light<L: LightSource + Send + Sync + 'static>(mut self, light: L) -> SceneBuilder {
        self.lights.push(Box::new(light));
        self
    }

    pub fn grid(mut self, resolution: Option<GridResolution>) -> SceneBuilder {
        self.grid = resolution;
        self
    }

    pub fn build(self) -> Result<Scene> {
        if self.geometries.is_empty() {
            return Err(Error::MissingResource("geometries"));
        }
        let mut geometries = self.geometries;
        if let Some(resolution) = self.grid {
            let r = match resolution {
                GridResolution::Fixed(r) => r,
                GridResolution::Auto => Grid::auto_resolution(geometries.len()),
            };
            geometries.build_grid(r)?;
        }
        debug!(
            "scene '{}': {} geometries, {} lights, grid {:?}",
            self.name,
            geometries.len(),
            self.lights.len(),
            geometries.grid().map(Grid::resolution)
        );
        Ok(Scene {
            name: self.name,
            background: self.background,
            ambient: self.ambient,
            geometries,
            lights: self.lights,
        })
    }
}
