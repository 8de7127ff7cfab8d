use crate::core::geometry::site::Site;

/// Handles for bezier curves.
#[derive(Debug, Clone, Copy)]
pub enum PathBezierHandle {
    Linear,
    Quadratic(Site),
}

impl PartialEq for PathBezierHandle {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathBezierHandle::Linear, PathBezierHandle::Linear) => true,
            (PathBezierHandle::Quadratic(handle0), PathBezierHandle::Quadratic(handle1)) => {
                handle0 == handle1
            }
            _ => false,
        }
    }
}

impl Eq for PathBezierHandle {}
