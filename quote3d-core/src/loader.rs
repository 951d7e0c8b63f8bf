/// Format dispatch from a file name to a mesh parser
use std::fmt;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::{obj, stl};

/// Mesh formats with a built-in loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Binary or ASCII stereolithography
    Stl,
    /// Wavefront OBJ, geometry records only
    Obj,
}

impl MeshFormat {
    /// Detect the format from a file name's extension, ignoring case
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "stl" => Ok(Self::Stl),
            "obj" => Ok(Self::Obj),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }

    pub fn loader(&self) -> &'static dyn MeshLoader {
        match self {
            Self::Stl => &StlLoader,
            Self::Obj => &ObjLoader,
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parses raw file bytes into a triangle mesh
pub trait MeshLoader {
    fn format(&self) -> MeshFormat;

    fn parse(&self, bytes: &[u8]) -> Result<Mesh>;
}

pub struct StlLoader;

impl MeshLoader for StlLoader {
    fn format(&self) -> MeshFormat {
        MeshFormat::Stl
    }

    fn parse(&self, bytes: &[u8]) -> Result<Mesh> {
        stl::parse_stl(bytes)
    }
}

pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn format(&self) -> MeshFormat {
        MeshFormat::Obj
    }

    fn parse(&self, bytes: &[u8]) -> Result<Mesh> {
        obj::parse_obj_bytes(bytes)
    }
}

/// Pick a loader by file name and parse `bytes` with it
pub fn load_mesh(file_name: &str, bytes: &[u8]) -> Result<Mesh> {
    let format = MeshFormat::from_file_name(file_name)?;
    debug!("loading {file_name} ({} bytes) as {format}", bytes.len());

    let mesh = format.loader().parse(bytes)?;
    info!("loaded {} triangles from {file_name}", mesh.triangle_count());
    Ok(mesh)
}
