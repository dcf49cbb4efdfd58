use std::ops::Range;

use glium::backend::Facade;
use glium::index::{NoIndices, PrimitiveType};
use glium::uniforms::Uniforms;
use glium::{DrawError, DrawParameters, IndexBuffer, Program, Surface, Vertex, VertexBuffer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to upload vertex buffer: {0}")]
    VertexUpload(#[from] glium::vertex::BufferCreationError),
    #[error("failed to upload index buffer: {0}")]
    IndexUpload(#[from] glium::index::BufferCreationError),
    #[error("draw range {range:?} is outside of a mesh with {len} elements")]
    InvalidRange { range: Range<usize>, len: usize },
    #[error(transparent)]
    Draw(#[from] DrawError),
}

/// Vertex data uploaded once, with an optional index buffer, drawn as a triangle list.
pub struct Mesh<V: Vertex> {
    vertex_buffer: VertexBuffer<V>,
    index_buffer: Option<IndexBuffer<u32>>,
}

impl<V: Vertex> Mesh<V> {
    pub fn new<F: Facade + ?Sized>(facade: &F, vertices: &[V]) -> Result<Self, MeshError> {
        Ok(Self {
            vertex_buffer: VertexBuffer::new(facade, vertices)?,
            index_buffer: None,
        })
    }

    pub fn indexed<F: Facade + ?Sized>(
        facade: &F,
        vertices: &[V],
        indices: &[u32],
    ) -> Result<Self, MeshError> {
        Ok(Self {
            vertex_buffer: VertexBuffer::new(facade, vertices)?,
            index_buffer: Some(IndexBuffer::new(
                facade,
                PrimitiveType::TrianglesList,
                indices,
            )?),
        })
    }

    /// Number of drawable elements: indices when indexed, vertices otherwise.
    pub fn len(&self) -> usize {
        match &self.index_buffer {
            Some(index_buffer) => index_buffer.len(),
            None => self.vertex_buffer.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn draw<S: Surface, U: Uniforms>(
        &self,
        target: &mut S,
        program: &Program,
        uniforms: &U,
        range: Range<usize>,
        parameters: &DrawParameters<'_>,
    ) -> Result<(), MeshError> {
        let invalid_range = || MeshError::InvalidRange {
            range: range.clone(),
            len: self.len(),
        };

        match &self.index_buffer {
            Some(index_buffer) => {
                let indices = index_buffer.slice(range.clone()).ok_or_else(invalid_range)?;

                target.draw(&self.vertex_buffer, indices, program, uniforms, parameters)?;
            }
            None => {
                let vertices = self
                    .vertex_buffer
                    .slice(range.clone())
                    .ok_or_else(invalid_range)?;

                target.draw(
                    vertices,
                    NoIndices(PrimitiveType::TrianglesList),
                    program,
                    uniforms,
                    parameters,
                )?;
            }
        }

        Ok(())
    }
}
