use std::fmt;

use crate::{curve::CubicPath, misc::FloatingPoint};

/// Handle returned by [`CubicPath::subscribe`], used to unsubscribe later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type PathCallback<T> = Box<dyn FnMut(&CubicPath<T>)>;

/// Callbacks notified synchronously after every mutation of a path.
/// Cloning a registry yields an empty one: observers belong to a single path instance.
pub(crate) struct PathObservers<T: FloatingPoint> {
    next_id: u64,
    callbacks: Vec<(ObserverId, PathCallback<T>)>,
}

impl<T: FloatingPoint> PathObservers<T> {
    pub fn subscribe(&mut self, callback: PathCallback<T>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(other, _)| *other != id);
        self.callbacks.len() != before
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn notify(&mut self, path: &CubicPath<T>) {
        self.callbacks
            .iter_mut()
            .for_each(|(_, callback)| callback(path));
    }
}

impl<T: FloatingPoint> Default for PathObservers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: vec![],
        }
    }
}

impl<T: FloatingPoint> Clone for PathObservers<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: FloatingPoint> fmt::Debug for PathObservers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathObservers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
