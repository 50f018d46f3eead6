use std::{cell::Cell, fmt, rc::Rc};

use itertools::Itertools;
use nalgebra::Point3;

use crate::{
    curve::{CubicPath, ObserverId},
    extrude::{PathExtruderOption, MIN_LOOP_SUBDIVISIONS},
    frame::{FrameField, FrameFieldOption},
    misc::FloatingPoint,
    polygon_mesh::PolygonMesh,
    profile::{Circle, Profile},
};

/// Sweeps a profile along a path and keeps the resulting tube mesh in sync with it.
///
/// While enabled, the extruder listens to the path's change notifications and
/// only marks itself dirty; the mesh is rebuilt on the next [`update`](Self::update).
///
/// # Example
/// ```
/// use tubular::prelude::*;
/// use nalgebra::Point3;
///
/// let mut path = CubicPath::from_points(
///     [Point3::new(0., 0., 0.), Point3::new(1., 0., 0.), Point3::new(2., 1., 0.)],
///     Continuity::C1,
///     false,
/// );
/// let mut extruder = PathExtruder::new(
///     PathExtruderOption::default()
///         .with_resolution(8)
///         .with_subdivisions(16),
/// );
/// extruder.enable(&mut path).unwrap();
/// assert_eq!(extruder.mesh().vertices().len(), 17 * 8);
/// assert_eq!(extruder.mesh().faces().len(), 2 * 16 * 8);
///
/// path.try_change_point(2, Point3::new(2., 2., 0.)).unwrap();
/// assert!(extruder.update(&path).unwrap());
/// assert!(!extruder.update(&path).unwrap());
/// ```
pub struct PathExtruder<T: FloatingPoint> {
    option: PathExtruderOption<T>,
    frame_option: FrameFieldOption<T>,
    profile: Box<dyn Profile<T>>,
    mesh: PolygonMesh<T>,
    dirty: Rc<Cell<bool>>,
    subscription: Option<ObserverId>,
}

impl<T: FloatingPoint> Default for PathExtruder<T> {
    fn default() -> Self {
        Self::new(PathExtruderOption::default())
    }
}

impl<T: FloatingPoint> fmt::Debug for PathExtruder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathExtruder")
            .field("option", &self.option)
            .field("frame_option", &self.frame_option)
            .field("closed_profile", &self.profile.is_closed())
            .field("vertices", &self.mesh.vertices().len())
            .field("dirty", &self.dirty.get())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl<T: FloatingPoint> PathExtruder<T> {
    /// Create a disabled extruder sweeping a unit circle.
    /// Looped paths have their frames rolled so the tube closes without a seam.
    pub fn new(option: PathExtruderOption<T>) -> Self {
        Self {
            option: option.clamped(),
            frame_option: FrameFieldOption::default().with_close_loop(true),
            profile: Box::new(Circle::unit()),
            mesh: PolygonMesh::default(),
            dirty: Rc::new(Cell::new(true)),
            subscription: None,
        }
    }

    pub fn with_profile(mut self, profile: impl Profile<T> + 'static) -> Self {
        self.set_profile(profile);
        self
    }

    pub fn with_frame_option(mut self, option: FrameFieldOption<T>) -> Self {
        self.set_frame_option(option);
        self
    }

    pub fn option(&self) -> &PathExtruderOption<T> {
        &self.option
    }

    pub fn frame_option(&self) -> &FrameFieldOption<T> {
        &self.frame_option
    }

    pub fn profile(&self) -> &dyn Profile<T> {
        self.profile.as_ref()
    }

    pub fn mesh(&self) -> &PolygonMesh<T> {
        &self.mesh
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Whether the next update rebuilds the mesh
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn set_resolution(&mut self, resolution: usize) {
        self.set_option(self.option.clone().with_resolution(resolution));
    }

    pub fn set_subdivisions(&mut self, subdivisions: usize) {
        self.set_option(self.option.clone().with_subdivisions(subdivisions));
    }

    pub fn set_uniform_scale(&mut self, scale: T) {
        self.set_option(self.option.clone().with_uniform_scale(scale));
    }

    /// Replace every sweep parameter at once, values below their minimum are clamped
    pub fn set_option(&mut self, option: PathExtruderOption<T>) {
        self.option = option.clamped();
        self.dirty.set(true);
    }

    pub fn set_profile(&mut self, profile: impl Profile<T> + 'static) {
        self.profile = Box::new(profile);
        self.dirty.set(true);
    }

    pub fn set_frame_option(&mut self, option: FrameFieldOption<T>) {
        self.frame_option = option;
        self.dirty.set(true);
    }

    /// Start listening to the path's changes and build the mesh.
    /// The extruder stays enabled even if the path cannot be swept yet,
    /// a later [`update`](Self::update) retries once the path changes.
    pub fn enable(&mut self, path: &mut CubicPath<T>) -> anyhow::Result<()> {
        if self.subscription.is_none() {
            let dirty = self.dirty.clone();
            self.subscription = Some(path.subscribe(move |_| dirty.set(true)));
        }
        self.dirty.set(true);
        self.try_rebuild(path)
    }

    /// Stop listening to the path and release the mesh buffers
    pub fn disable(&mut self, path: &mut CubicPath<T>) {
        if let Some(id) = self.subscription.take() {
            path.unsubscribe(id);
        }
        self.mesh.clear();
        self.dirty.set(true);
    }

    /// Rebuild the mesh if a parameter or the path changed since the last build.
    /// Returns whether a rebuild happened.
    pub fn update(&mut self, path: &CubicPath<T>) -> anyhow::Result<bool> {
        if !self.is_enabled() {
            log::warn!("update requested on a disabled extruder");
            return Ok(false);
        }
        if !self.dirty.get() {
            return Ok(false);
        }
        self.try_rebuild(path)?;
        Ok(true)
    }

    /// Sweep the profile along the path unconditionally.
    /// A looped path is swept with at least [`MIN_LOOP_SUBDIVISIONS`] rings.
    /// # Failures
    /// - if the path has fewer than 2 pass points
    /// - if no sample of the path has a usable tangent
    pub fn try_rebuild(&mut self, path: &CubicPath<T>) -> anyhow::Result<()> {
        let resolution = self.option.resolution();
        let subdivisions = if path.is_loop() && self.option.subdivisions() < MIN_LOOP_SUBDIVISIONS {
            // fewer rings fold the tube back onto itself
            log::warn!(
                "subdivisions {} is too few for a looped path, sweeping with {}",
                self.option.subdivisions(),
                MIN_LOOP_SUBDIVISIONS
            );
            MIN_LOOP_SUBDIVISIONS
        } else {
            self.option.subdivisions()
        };
        let scale = self.option.uniform_scale();

        let field = FrameField::try_with_option(path, subdivisions, self.frame_option.clone())?;

        // the last frame of a loop coincides with the first one
        let rings = subdivisions + usize::from(!path.is_loop());
        let samples = self.profile.sample(resolution);
        let stride = samples.len();

        let vertices = field
            .iter()
            .take(rings)
            .flat_map(|frame| {
                let matrix = frame.matrix();
                samples.iter().map(move |p| {
                    matrix.transform_point(&Point3::new(p.x * scale, p.y * scale, T::zero()))
                })
            })
            .collect_vec();

        let edges = resolution - usize::from(!self.profile.is_closed());
        let faces = (0..rings)
            .chain(path.is_loop().then_some(0))
            .tuple_windows()
            .flat_map(|(start, end)| {
                let (s, e) = (start * stride, end * stride);
                (0..edges).flat_map(move |i| {
                    let v = (i + 1) % stride;
                    [[s + v, s + i, e + i], [e + i, e + v, s + v]]
                })
            })
            .collect_vec();

        log::debug!(
            "rebuilt tube mesh with {} rings, {} vertices and {} triangles",
            rings,
            vertices.len(),
            faces.len()
        );

        self.mesh.replace(vertices, faces);
        self.dirty.set(false);
        Ok(())
    }
}
