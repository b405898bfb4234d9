// src/rendering_lib/frame_geometry.rs

use super::vertex::Vertex;

/// Fixed-capacity triangle list rebuilt every frame.
///
/// Geometry arrives in groups (a wall quad, a floor/ceiling triangle pair). A group
/// that does not fit is dropped whole and counted in `dropped()`; the sink never grows
/// past its capacity.
#[derive(Debug, Clone)]
pub struct FrameGeometry {
    vertices: Vec<Vertex>,
    capacity: usize,
    dropped: usize,
}

impl FrameGeometry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.dropped = 0;
    }

    /// Appends the whole group or nothing. Returns whether it was stored.
    pub fn push_group(&mut self, group: &[Vertex]) -> bool {
        if self.vertices.len() + group.len() > self.capacity {
            self.dropped += group.len();
            return false;
        }
        self.vertices.extend_from_slice(group);
        true
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Vertices rejected since the last `clear`.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(n: usize) -> Vec<Vertex> {
        vec![Vertex::new([0.0; 3], [0.0; 2], [1.0; 4]); n]
    }

    #[test]
    fn groups_are_all_or_nothing() {
        let mut geometry = FrameGeometry::with_capacity(10);
        assert!(geometry.push_group(&group(6)));
        assert!(!geometry.push_group(&group(6)));
        assert!(geometry.push_group(&group(3)));
        assert_eq!(geometry.len(), 9);
        assert_eq!(geometry.dropped(), 6);
        assert!(geometry.is_truncated());

        geometry.clear();
        assert!(geometry.is_empty());
        assert!(!geometry.is_truncated());
        assert_eq!(geometry.capacity(), 10);
    }
}
