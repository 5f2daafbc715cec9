use std::marker::Copy;
use std::vec::Vec;


/// One element of the decoded polyline stream. A path break marks the
/// start of a new sub-path; the degenerate entry lets a renderer draw
/// the whole buffer as a single line strip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexElement {
    PathBreak,
    Vertex {
        x: i32,
        y: i32,
    },
}

/// Append-only vertex sequence owned by one tile. Appended by the
/// parsing thread only and read once the tile is ready.
#[derive(Debug, PartialEq)]
pub struct VertexBuffer {
    elements: Vec<VertexElement>,
}

impl VertexBuffer {
    pub fn new() -> VertexBuffer {
        VertexBuffer {
            elements: Vec::new(),
        }
    }

    pub fn add_path_break(&mut self) -> () {
        self.elements.push(VertexElement::PathBreak);
    }

    pub fn add_vertex(&mut self, x: i32, y: i32) -> () {
        self.elements.push(VertexElement::Vertex { x, y });
    }

    pub fn elements(&self) -> &[VertexElement] {
        self.elements.as_slice()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) -> () {
        self.elements.clear();
    }
}
