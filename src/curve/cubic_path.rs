use nalgebra::{convert, Point3, Vector3};
use simba::scalar::SupersetOf;

use crate::{
    curve::{observer::PathObservers, Continuity, ObserverId, PassPoint},
    error::PathError,
    misc::{FloatingPoint, SpaceTransform},
};

/// Piecewise cubic Bezier path through an ordered list of pass points.
///
/// An open path with `n` points has `n - 1` segments, a looped one has `n`,
/// the last segment wrapping back to the first point.
/// The global parameter `t` in `[0, 1]` is split uniformly across segments.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicPath<T: FloatingPoint> {
    points: Vec<PassPoint<T>>,
    is_loop: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    observers: PathObservers<T>,
}

impl<T: FloatingPoint> Default for CubicPath<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatingPoint> PartialEq for CubicPath<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_loop == other.is_loop && self.points == other.points
    }
}

impl<T: FloatingPoint> CubicPath<T> {
    /// Create an empty open path
    pub fn new() -> Self {
        Self {
            points: vec![],
            is_loop: false,
            observers: Default::default(),
        }
    }

    /// Create a path passing through the given local points with a single continuity
    /// # Example
    /// ```
    /// use tubular::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let path = CubicPath::from_points(
    ///     [Point3::new(0., 0., 0.), Point3::new(1., 0., 0.), Point3::new(1., 1., 0.)],
    ///     Continuity::C1,
    ///     true,
    /// );
    /// assert_eq!(path.segment_count(), 3);
    /// assert_eq!(path.try_point_at(1.).unwrap(), Point3::origin());
    /// ```
    pub fn from_points(
        points: impl IntoIterator<Item = Point3<T>>,
        continuity: Continuity,
        is_loop: bool,
    ) -> Self {
        Self {
            points: points
                .into_iter()
                .map(|p| PassPoint::new(p, continuity))
                .collect(),
            is_loop,
            observers: Default::default(),
        }
    }

    /// Create a path from local points paired with their continuities.
    /// Extra items on either side are ignored.
    pub fn from_points_with_continuities(
        points: impl IntoIterator<Item = Point3<T>>,
        continuities: impl IntoIterator<Item = Continuity>,
        is_loop: bool,
    ) -> Self {
        Self {
            points: points
                .into_iter()
                .zip(continuities)
                .map(|(p, c)| PassPoint::new(p, c))
                .collect(),
            is_loop,
            observers: Default::default(),
        }
    }

    /// Create a path from world space points, stored in the local space of `transform`
    pub fn from_world_points(
        points: impl IntoIterator<Item = Point3<T>>,
        continuity: Continuity,
        is_loop: bool,
        transform: &impl SpaceTransform<T>,
    ) -> Self {
        Self::from_points(
            points
                .into_iter()
                .map(|p| transform.inverse_transform_point(&p)),
            continuity,
            is_loop,
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    pub fn set_loop(&mut self, is_loop: bool) {
        self.is_loop = is_loop;
        self.notify();
    }

    /// Number of evaluable segments, zero when the path has fewer than 2 points
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.is_loop => n,
            n => n - 1,
        }
    }

    pub fn pass_points(&self) -> &[PassPoint<T>] {
        &self.points
    }

    /// Iterate over the anchors in local space
    pub fn iter(&self) -> impl Iterator<Item = &Point3<T>> {
        self.points.iter().map(|p| p.point())
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.notify();
    }

    /// Register a callback invoked after every mutation of this path
    pub fn subscribe(&mut self, callback: impl FnMut(&CubicPath<T>) + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(callback))
    }

    /// Remove a callback, returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        observers.notify(self);
        self.observers = observers;
    }

    /// Get the pass point at the index
    /// # Failures
    /// - if the index is out of range
    pub fn try_pass_point(&self, index: usize) -> anyhow::Result<&PassPoint<T>> {
        let count = self.points.len();
        self.points
            .get(index)
            .ok_or_else(|| PathError::IndexOutOfRange { index, count }.into())
    }

    fn try_mutate(
        &mut self,
        index: usize,
        mutation: impl FnOnce(&mut PassPoint<T>),
    ) -> anyhow::Result<()> {
        let count = self.points.len();
        let pass_point = self
            .points
            .get_mut(index)
            .ok_or(PathError::IndexOutOfRange { index, count })?;
        mutation(pass_point);
        self.notify();
        Ok(())
    }

    pub fn try_point(&self, index: usize) -> anyhow::Result<Point3<T>> {
        self.try_pass_point(index).map(|p| *p.point())
    }

    pub fn try_point_world(
        &self,
        index: usize,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<Point3<T>> {
        self.try_point(index)
            .map(|p| transform.transform_point(&p))
    }

    pub fn try_left_interpolant(&self, index: usize) -> anyhow::Result<Point3<T>> {
        self.try_pass_point(index).map(|p| *p.left_interpolant())
    }

    pub fn try_left_interpolant_world(
        &self,
        index: usize,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<Point3<T>> {
        self.try_left_interpolant(index)
            .map(|p| transform.transform_point(&p))
    }

    pub fn try_right_interpolant(&self, index: usize) -> anyhow::Result<Point3<T>> {
        self.try_pass_point(index).map(|p| *p.right_interpolant())
    }

    pub fn try_right_interpolant_world(
        &self,
        index: usize,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<Point3<T>> {
        self.try_right_interpolant(index)
            .map(|p| transform.transform_point(&p))
    }

    pub fn try_continuity(&self, index: usize) -> anyhow::Result<Continuity> {
        self.try_pass_point(index).map(|p| p.continuity())
    }

    /// Append a C1 pass point at a local position
    pub fn add_point(&mut self, value: Point3<T>) {
        self.points.push(PassPoint::new(value, Continuity::C1));
        self.notify();
    }

    /// Append a C1 pass point at a world position
    pub fn add_point_world(&mut self, value: Point3<T>, transform: &impl SpaceTransform<T>) {
        self.add_point(transform.inverse_transform_point(&value));
    }

    /// Move the anchor at the index, its interpolants follow by the same offset
    pub fn try_change_point(&mut self, index: usize, value: Point3<T>) -> anyhow::Result<()> {
        self.try_mutate(index, |p| p.set_point(value))
    }

    pub fn try_change_point_world(
        &mut self,
        index: usize,
        value: Point3<T>,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<()> {
        self.try_change_point(index, transform.inverse_transform_point(&value))
    }

    /// Move the left interpolant at the index, the right one is re-derived per continuity
    pub fn try_change_left_interpolant(
        &mut self,
        index: usize,
        value: Point3<T>,
    ) -> anyhow::Result<()> {
        self.try_mutate(index, |p| p.set_left_interpolant(value))
    }

    pub fn try_change_left_interpolant_world(
        &mut self,
        index: usize,
        value: Point3<T>,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<()> {
        self.try_change_left_interpolant(index, transform.inverse_transform_point(&value))
    }

    /// Move the right interpolant at the index, the left one is re-derived per continuity
    pub fn try_change_right_interpolant(
        &mut self,
        index: usize,
        value: Point3<T>,
    ) -> anyhow::Result<()> {
        self.try_mutate(index, |p| p.set_right_interpolant(value))
    }

    pub fn try_change_right_interpolant_world(
        &mut self,
        index: usize,
        value: Point3<T>,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<()> {
        self.try_change_right_interpolant(index, transform.inverse_transform_point(&value))
    }

    /// Change the continuity at the index and re-project its interpolants
    /// # Failures
    /// - if the index is out of range
    /// - if the value is not a recognized continuity tag, in which case nothing changes
    ///
    /// # Example
    /// ```
    /// use tubular::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let mut path = CubicPath::from_points(
    ///     [Point3::new(0., 0., 0.), Point3::new(1., 0., 0.)],
    ///     Continuity::C1,
    ///     false,
    /// );
    /// assert!(path.try_change_continuity(0, Continuity::C2).is_ok());
    /// assert!(path.try_change_continuity(0, 2u8).is_ok());
    /// let err = path.try_change_continuity(0, 99u8).unwrap_err();
    /// assert_eq!(err.downcast_ref::<PathError>(), Some(&PathError::InvalidContinuity(99)));
    /// ```
    pub fn try_change_continuity<C>(&mut self, index: usize, continuity: C) -> anyhow::Result<()>
    where
        C: TryInto<Continuity>,
        C::Error: Into<anyhow::Error>,
    {
        self.try_pass_point(index)?;
        let continuity: Continuity = continuity
            .try_into()
            .map_err(Into::<anyhow::Error>::into)?;
        self.try_mutate(index, |p| p.set_continuity(continuity))
    }

    /// Change the continuity of every pass point, notifying once
    pub fn try_change_continuity_for_all<C>(&mut self, continuity: C) -> anyhow::Result<()>
    where
        C: TryInto<Continuity>,
        C::Error: Into<anyhow::Error>,
    {
        let continuity: Continuity = continuity
            .try_into()
            .map_err(Into::<anyhow::Error>::into)?;
        self.points
            .iter_mut()
            .for_each(|p| p.set_continuity(continuity));
        self.notify();
        Ok(())
    }

    /// Remove the pass point at the index and return it
    pub fn try_remove(&mut self, index: usize) -> anyhow::Result<PassPoint<T>> {
        self.try_pass_point(index)?;
        let removed = self.points.remove(index);
        self.notify();
        Ok(removed)
    }

    /// Map a global parameter to the `(start, end, local t)` of the segment containing it
    fn try_segment(&self, t: T) -> anyhow::Result<(usize, usize, T)> {
        let count = self.points.len();
        anyhow::ensure!(count >= 2, PathError::InsufficientPoints { count });
        // NaN slips through the clamp below
        anyhow::ensure!(
            t.is_finite(),
            PathError::NonFiniteParameter {
                t: t.to_f64().unwrap_or(f64::NAN)
            }
        );

        let segments = self.segment_count();
        let scaled = t.clamp(T::zero(), T::one()) * convert::<f64, T>(segments as f64);
        let start = scaled.floor().to_usize().unwrap_or(0).min(segments - 1);
        let end = (start + 1) % count;
        let local = scaled - convert::<f64, T>(start as f64);
        Ok((start, end, local))
    }

    /// Control points of the Bezier segment containing `t`, and the local parameter
    fn try_bezier(&self, t: T) -> anyhow::Result<([Point3<T>; 4], T)> {
        let (start, end, local) = self.try_segment(t)?;
        let (s, e) = (&self.points[start], &self.points[end]);
        Ok((
            [
                *s.point(),
                *s.right_interpolant(),
                *e.left_interpolant(),
                *e.point(),
            ],
            local,
        ))
    }

    /// Evaluate the path at a global parameter in local space
    /// # Failures
    /// - if the path has fewer than 2 pass points
    /// - if `t` is NaN or infinite
    pub fn try_point_at(&self, t: T) -> anyhow::Result<Point3<T>> {
        let ([p0, p1, p2, p3], t) = self.try_bezier(t)?;
        let three = convert::<f64, T>(3.);
        let u = T::one() - t;
        let coords = p0.coords * (u * u * u)
            + p1.coords * (three * u * u * t)
            + p2.coords * (three * u * t * t)
            + p3.coords * (t * t * t);
        Ok(coords.into())
    }

    pub fn try_point_at_world(
        &self,
        t: T,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<Point3<T>> {
        self.try_point_at(t)
            .map(|p| transform.transform_point(&p))
    }

    /// First derivative of the segment containing `t` with respect to its local parameter
    pub fn try_velocity_at(&self, t: T) -> anyhow::Result<Vector3<T>> {
        let ([p0, p1, p2, p3], t) = self.try_bezier(t)?;
        let three = convert::<f64, T>(3.);
        let six = convert::<f64, T>(6.);
        let u = T::one() - t;
        Ok((p1 - p0) * (three * u * u) + (p2 - p1) * (six * u * t) + (p3 - p2) * (three * t * t))
    }

    /// Velocity transformed as a direction, translation does not apply
    pub fn try_velocity_at_world(
        &self,
        t: T,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<Vector3<T>> {
        self.try_velocity_at(t)
            .map(|v| transform.transform_vector(&v))
    }

    /// Unit tangent at `t`
    /// # Failures
    /// - if the path has fewer than 2 pass points
    /// - if `t` is NaN or infinite
    /// - if the velocity has zero length, e.g. when an interpolant sits on its anchor
    pub fn try_direction_at(&self, t: T) -> anyhow::Result<Vector3<T>> {
        normalize_velocity(self.try_velocity_at(t)?, t)
    }

    pub fn try_direction_at_world(
        &self,
        t: T,
        transform: &impl SpaceTransform<T>,
    ) -> anyhow::Result<Vector3<T>> {
        normalize_velocity(self.try_velocity_at_world(t, transform)?, t)
    }

    /// Cast the path to another floating point type, observers are not carried over
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> CubicPath<F> {
        CubicPath {
            points: self.points.iter().map(|p| p.cast()).collect(),
            is_loop: self.is_loop,
            observers: Default::default(),
        }
    }
}

fn normalize_velocity<T: FloatingPoint>(velocity: Vector3<T>, t: T) -> anyhow::Result<Vector3<T>> {
    let norm_squared = velocity.norm_squared();
    anyhow::ensure!(
        norm_squared > T::degenerate_tolerance(),
        PathError::DegenerateVelocity {
            t: t.to_f64().unwrap_or(f64::NAN)
        }
    );
    Ok(velocity / norm_squared.sqrt())
}
