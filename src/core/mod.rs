pub mod geometry;
pub mod random;

/// Recursion depth of a generated segment; roots are at depth zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Depth(usize);

impl Depth {
    pub fn new(depth: usize) -> Self {
        Self(depth)
    }

    pub fn as_num(&self) -> usize {
        self.0
    }

    pub fn incremented(self) -> Self {
        Self(self.0 + 1)
    }
}
