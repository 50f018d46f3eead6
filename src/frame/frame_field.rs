use nalgebra::{convert, Point3, Vector3};

use crate::{
    curve::CubicPath,
    error::PathError,
    frame::{FrameFieldOption, PathFrame},
    misc::FloatingPoint,
};

/// Rotation minimizing frames sampled at uniform parameter steps along a path.
///
/// Frames are propagated with the double reflection method
/// (Wang et al., "Computation of rotation minimizing frames", 2008):
/// each step reflects the previous frame through the plane bisecting the chord
/// between samples, then through the plane bisecting the reflected and actual tangents.
/// The field is a snapshot and has to be rebuilt after the path changes.
#[derive(Debug, Clone)]
pub struct FrameField<T: FloatingPoint> {
    frames: Vec<PathFrame<T>>,
}

impl<T: FloatingPoint> FrameField<T> {
    /// Sample `steps + 1` frames at `t = 0, 1 / steps, .., 1` with default options
    /// # Failures
    /// - if the path has fewer than 2 pass points
    /// - if no sample of the path has a non-zero velocity
    ///
    /// # Example
    /// ```
    /// use tubular::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let path: CubicPath<f64> = CubicPath::from_points(
    ///     [Point3::new(0., 0., 0.), Point3::new(1., 1., 0.), Point3::new(2., 0., 1.)],
    ///     Continuity::C1,
    ///     false,
    /// );
    /// let field = FrameField::try_new(&path, 16).unwrap();
    /// assert_eq!(field.len(), 17);
    /// for frame in field.iter() {
    ///     assert!(frame.tangent().dot(frame.reference()).abs() < 1e-9);
    /// }
    /// ```
    pub fn try_new(path: &CubicPath<T>, steps: usize) -> anyhow::Result<Self> {
        Self::try_with_option(path, steps, FrameFieldOption::default())
    }

    /// Sample frames with explicit options. `steps == 0` yields a single frame at `t = 0`.
    pub fn try_with_option(
        path: &CubicPath<T>,
        steps: usize,
        option: FrameFieldOption<T>,
    ) -> anyhow::Result<Self> {
        let tolerance = option.tolerance();
        let samples = sample_parameters::<T>(steps)
            .map(|t| {
                let position = path.try_point_at(t)?;
                let velocity = path.try_velocity_at(t)?;
                let norm_squared = velocity.norm_squared();
                let tangent = (norm_squared > tolerance).then(|| velocity / norm_squared.sqrt());
                Ok::<_, anyhow::Error>((t, position, tangent))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        // a zero velocity at the start borrows the first usable tangent further along
        let seed_tangent = samples
            .iter()
            .find_map(|(_, _, tangent)| *tangent)
            .ok_or(PathError::DegenerateGeometry)?;
        let seed_reference = option.seed().reference_for(&seed_tangent, tolerance);

        let mut frames = Vec::with_capacity(samples.len());
        let (t0, p0, _) = samples[0];
        frames.push(PathFrame::new(t0, p0, seed_tangent, seed_reference));

        for (i, (t, position, tangent)) in samples.into_iter().enumerate().skip(1) {
            let previous = &frames[i - 1];
            let frame = match tangent {
                Some(tangent) => propagate(previous, t, position, tangent, tolerance),
                None => None,
            };
            let frame = frame.unwrap_or_else(|| {
                log::trace!("frame {} carried over a degenerate step", i);
                previous.carried_to(t, position)
            });
            frames.push(frame);
        }

        if option.close_loop() && path.is_loop() {
            close_loop(&mut frames, tolerance);
        }

        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[PathFrame<T>] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathFrame<T>> {
        self.frames.iter()
    }

    /// Reference vectors of every frame, the "right" axis of a sweep
    pub fn references(&self) -> Vec<Vector3<T>> {
        self.frames.iter().map(|f| *f.reference()).collect()
    }
}

impl<'a, T: FloatingPoint> IntoIterator for &'a FrameField<T> {
    type Item = &'a PathFrame<T>;
    type IntoIter = std::slice::Iter<'a, PathFrame<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

fn sample_parameters<T: FloatingPoint>(steps: usize) -> impl Iterator<Item = T> {
    let inv = if steps == 0 {
        T::zero()
    } else {
        T::one() / convert::<f64, T>(steps as f64)
    };
    (0..=steps).map(move |i| convert::<f64, T>(i as f64) * inv)
}

/// One double reflection step from `previous` to the sample `(position, tangent)`.
/// Returns `None` when the chord between samples is too short to reflect through.
fn propagate<T: FloatingPoint>(
    previous: &PathFrame<T>,
    t: T,
    position: Point3<T>,
    tangent: Vector3<T>,
    tolerance: T,
) -> Option<PathFrame<T>> {
    let two = convert::<f64, T>(2.);

    let v1 = position - previous.position();
    let c1 = v1.norm_squared();
    if c1 <= tolerance {
        return None;
    }
    let reference_l = previous.reference() - v1 * (two / c1 * v1.dot(previous.reference()));
    let tangent_l = previous.tangent() - v1 * (two / c1 * v1.dot(previous.tangent()));

    let v2 = tangent - tangent_l;
    let c2 = v2.norm_squared();
    // reflected tangent already matches, the first reflection is the answer
    let reference = if c2 <= tolerance {
        reference_l
    } else {
        reference_l - v2 * (two / c2 * v2.dot(&reference_l))
    };

    // strip accumulated drift out of the tangent direction
    let reference = reference - tangent * tangent.dot(&reference);
    let norm_squared = reference.norm_squared();
    if norm_squared <= tolerance {
        return None;
    }

    Some(PathFrame::new(t, position, tangent, reference / norm_squared.sqrt()))
}

/// Roll every frame about its tangent by a share of the angle separating
/// the last reference from the first, so both ends of a loop agree.
fn close_loop<T: FloatingPoint>(frames: &mut [PathFrame<T>], tolerance: T) {
    let n = frames.len();
    if n < 3 {
        return;
    }
    let (first, last) = (&frames[0], &frames[n - 1]);
    let target = first.reference() - last.tangent() * last.tangent().dot(first.reference());
    if target.norm_squared() <= tolerance {
        return;
    }
    let angle = last.normal().dot(&target).atan2(last.reference().dot(&target));
    let inv = T::one() / convert::<f64, T>((n - 1) as f64);
    for (i, frame) in frames.iter_mut().enumerate() {
        *frame = frame.rolled(angle * convert::<f64, T>(i as f64) * inv);
    }
}
