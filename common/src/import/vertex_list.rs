use std::path::Path;

use itertools::Itertools;
use log::{info, warn};
use nalgebra::Vector3;

use crate::geometry::LitVertex;
use crate::import::{self, AssetError};

/// Triangle soup read from a whitespace separated text file.
///
/// The first token is the declared triangle count, every following line holds one `x y z`
/// position and every three positions form a triangle. The declared count is informational
/// only, the positions buffer grows with whatever the file actually contains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexList {
    pub declared_triangles: usize,
    pub positions: Vec<[f32; 3]>,
    /// 1-based numbers of the lines that were not a position.
    pub skipped_lines: Vec<usize>,
}

impl VertexList {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[[f32; 3]]> {
        self.positions.chunks_exact(3)
    }

    /// Expands every triangle into three vertices sharing the triangle's face normal.
    pub fn to_lit_vertices(&self) -> Vec<LitVertex> {
        self.triangles()
            .flat_map(|triangle| {
                let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(Vector3::from);
                let normal = (b - a)
                    .cross(&(c - a))
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros);

                triangle.iter().map(move |position| LitVertex {
                    position: *position,
                    normal: normal.into(),
                })
            })
            .collect()
    }
}

pub fn parse_vertex_list(text: &str) -> Result<VertexList, AssetError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let count_token = lines
        .next()
        .and_then(|(_, header)| header.split_whitespace().next())
        .ok_or(AssetError::MissingTriangleCount)?;

    let declared_triangles = count_token
        .parse::<usize>()
        .map_err(|_| AssetError::InvalidTriangleCount(count_token.to_owned()))?;

    let mut list = VertexList {
        declared_triangles,
        ..VertexList::default()
    };

    for (line_number, line) in lines {
        match parse_position(line) {
            Some(position) => list.positions.push(position),
            None => {
                warn!("Skipping unrecognized vertex list line {}: {:?}", line_number, line);
                list.skipped_lines.push(line_number);
            }
        }
    }

    let leftover = list.positions.len() % 3;
    if leftover != 0 {
        warn!("Dropping {} trailing positions that do not form a triangle", leftover);
        list.positions.truncate(list.positions.len() - leftover);
    }

    if list.triangle_count() != declared_triangles {
        warn!(
            "Vertex list declares {} triangles but contains {}",
            declared_triangles,
            list.triangle_count()
        );
    }

    Ok(list)
}

pub fn load_vertex_list(path: impl AsRef<Path>) -> Result<VertexList, AssetError> {
    let path = path.as_ref();
    let list = parse_vertex_list(&import::read_text(path)?)?;

    info!("Loaded {} triangles from {}", list.triangle_count(), path.display());

    Ok(list)
}

fn parse_position(line: &str) -> Option<[f32; 3]> {
    let (x, y, z) = line
        .split_whitespace()
        .map(str::parse::<f32>)
        .collect_tuple()?;

    let position = [x.ok()?, y.ok()?, z.ok()?];

    position
        .iter()
        .all(|component| component.is_finite())
        .then_some(position)
}
