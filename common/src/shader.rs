use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::path::Path;

use glium::backend::Facade;
use glium::program::{ProgramCreationError, ShaderType};
use glium::uniforms::{UniformValue, Uniforms};
use glium::{DrawParameters, Program, Surface, Vertex};
use log::{debug, error, info};
use nalgebra::Matrix4;
use thiserror::Error;

use crate::geometry::{Mesh, MeshError};
use crate::import::{self, AssetError};
use crate::maths;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    Other,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Other => "unknown",
        };

        f.write_str(name)
    }
}

impl From<ShaderType> for ShaderStage {
    fn from(shader_type: ShaderType) -> Self {
        match shader_type {
            ShaderType::Vertex => ShaderStage::Vertex,
            ShaderType::Fragment => ShaderStage::Fragment,
            ShaderType::Geometry => ShaderStage::Geometry,
            _ => ShaderStage::Other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link program: {log}")]
    Link { log: String },
    #[error("driver cannot build program: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl From<ProgramCreationError> for ShaderError {
    fn from(error: ProgramCreationError) -> Self {
        match error {
            ProgramCreationError::CompilationError(log, shader_type) => ShaderError::Compile {
                stage: shader_type.into(),
                log,
            },
            ProgramCreationError::LinkingError(log) => ShaderError::Link { log },
            other => ShaderError::Unsupported(other.to_string()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformData {
    Float(f32),
    Vec3([f32; 3]),
    Mat4([[f32; 4]; 4]),
}

impl UniformData {
    fn as_uniform_value(&self) -> UniformValue<'_> {
        match *self {
            UniformData::Float(value) => UniformValue::Float(value),
            UniformData::Vec3(value) => UniformValue::Vec3(value),
            UniformData::Mat4(value) => UniformValue::Mat4(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MatrixSlot {
    location: i32,
    value: Option<[[f32; 4]; 4]>,
}

/// Values staged for a program's next draw.
///
/// The `model`, `view` and `projection` slots are resolved once when the state is built;
/// a slot the program does not declare stays `None` and ignores writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformState {
    model: Option<MatrixSlot>,
    view: Option<MatrixSlot>,
    projection: Option<MatrixSlot>,
    values: HashMap<String, UniformData>,
}

impl UniformState {
    pub fn new(resolve: impl Fn(&str) -> Option<i32>) -> Self {
        let slot = |name: &str| {
            resolve(name).map(|location| MatrixSlot {
                location,
                value: None,
            })
        };

        Self {
            model: slot("model"),
            view: slot("view"),
            projection: slot("projection"),
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, data: UniformData) {
        match self.values.get_mut(name) {
            Some(value) => *value = data,
            None => {
                self.values.insert(name.to_owned(), data);
            }
        }
    }

    pub fn set_mvp(
        &mut self,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        for (slot, matrix) in [
            (&mut self.model, model),
            (&mut self.view, view),
            (&mut self.projection, projection),
        ] {
            if let Some(slot) = slot {
                slot.value = Some(maths::raw_matrix(*matrix));
            }
        }
    }

    pub fn location(&self, name: &str) -> Option<i32> {
        self.matrix_slot(name).map(|slot| slot.location)
    }

    pub fn get(&self, name: &str) -> Option<UniformData> {
        match self.matrix_slot(name) {
            Some(slot) => slot.value.map(UniformData::Mat4),
            None => self.values.get(name).copied(),
        }
    }

    fn matrix_slot(&self, name: &str) -> Option<&MatrixSlot> {
        match name {
            "model" => self.model.as_ref(),
            "view" => self.view.as_ref(),
            "projection" => self.projection.as_ref(),
            _ => None,
        }
    }

    fn matrix_slots(&self) -> [(&'static str, Option<&MatrixSlot>); 3] {
        [
            ("model", self.model.as_ref()),
            ("view", self.view.as_ref()),
            ("projection", self.projection.as_ref()),
        ]
    }
}

impl Uniforms for UniformState {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        for (name, slot) in self.matrix_slots() {
            if let Some(matrix) = slot.and_then(|slot| slot.value) {
                output(name, UniformValue::Mat4(matrix));
            }
        }

        for (name, value) in &self.values {
            output(name, value.as_uniform_value());
        }
    }
}

/// A linked GPU program together with the uniforms staged for it.
pub struct ShaderProgram {
    program: Program,
    uniforms: UniformState,
}

impl ShaderProgram {
    pub fn compile_and_link<F: Facade + ?Sized>(
        facade: &F,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let program = Program::from_source(facade, vertex_source, fragment_source, None)
            .map_err(ShaderError::from)
            .inspect_err(|error| match error {
                ShaderError::Compile { stage, log } => {
                    error!("Failed to compile {} shader\n{}", stage, log)
                }
                ShaderError::Link { log } => error!("Failed to link program\n{}", log),
                other => error!("{}", other),
            })?;

        let uniforms =
            UniformState::new(|name| program.get_uniform(name).map(|uniform| uniform.location));

        Ok(Self { program, uniforms })
    }

    pub fn from_files<F: Facade + ?Sized>(
        facade: &F,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let (vertex_path, fragment_path) = (vertex_path.as_ref(), fragment_path.as_ref());

        let vertex_source = import::read_text(vertex_path)?;
        let fragment_source = import::read_text(fragment_path)?;

        let program = Self::compile_and_link(facade, &vertex_source, &fragment_source)?;

        info!(
            "Linked program from {} and {}",
            vertex_path.display(),
            fragment_path.display()
        );

        Ok(program)
    }

    /// Makes this program the target of the following uniform writes and draw calls.
    pub fn use_program(&mut self) -> ActiveProgram<'_> {
        ActiveProgram { shader: self }
    }

    pub fn set_uniform_vec3(&mut self, name: &str, value: impl Into<[f32; 3]>) {
        self.set_uniform(name, UniformData::Vec3(value.into()));
    }

    pub fn set_uniform_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformData::Float(value));
    }

    pub fn set_mvp(
        &mut self,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        self.uniforms.set_mvp(model, view, projection);
    }

    pub fn uniform(&self, name: &str) -> Option<UniformData> {
        self.uniforms.get(name)
    }

    fn set_uniform(&mut self, name: &str, data: UniformData) {
        if self.program.get_uniform(name).is_none() {
            debug!("Uniform {} is not used by the program, ignoring", name);
            return;
        }

        self.uniforms.set(name, data);
    }
}

pub struct ActiveProgram<'a> {
    shader: &'a mut ShaderProgram,
}

impl ActiveProgram<'_> {
    pub fn set_uniform_vec3(&mut self, name: &str, value: impl Into<[f32; 3]>) {
        self.shader.set_uniform_vec3(name, value);
    }

    pub fn set_uniform_float(&mut self, name: &str, value: f32) {
        self.shader.set_uniform_float(name, value);
    }

    pub fn set_mvp(
        &mut self,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        self.shader.set_mvp(model, view, projection);
    }

    pub fn draw<S: Surface, V: Vertex>(
        &self,
        target: &mut S,
        mesh: &Mesh<V>,
        parameters: &DrawParameters<'_>,
    ) -> Result<(), MeshError> {
        self.draw_range(target, mesh, 0..mesh.len(), parameters)
    }

    pub fn draw_range<S: Surface, V: Vertex>(
        &self,
        target: &mut S,
        mesh: &Mesh<V>,
        range: Range<usize>,
        parameters: &DrawParameters<'_>,
    ) -> Result<(), MeshError> {
        mesh.draw(
            target,
            &self.shader.program,
            &self.shader.uniforms,
            range,
            parameters,
        )
    }
}
