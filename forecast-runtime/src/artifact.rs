//! On-disk model artifact.
//!
//! Layout, little-endian throughout:
//!
//! ```text
//! header  magic "FCST" | version u32 | kind u32 | n_features u32 | n_targets u32
//! payload coefficients f64 * n_targets * n_features (row-major, one row per target)
//!         intercepts   f64 * n_targets
//! ```

use bytemuck::{Pod, Zeroable};
use forecast_model::{LinearModel, ModelError, Predict};
use memmap2::MmapOptions;
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const MAGIC: [u8; 4] = *b"FCST";
pub const FORMAT_VERSION: u32 = 1;
const KIND_LINEAR: u32 = 1;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a model artifact (bad magic {0:?})")]
    BadMagic([u8; 4]),

    #[error("unsupported artifact version {found}, expected {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("unknown model kind {0}")]
    UnknownKind(u32),

    #[error("artifact truncated: need {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("dimension {0} does not fit the artifact header")]
    DimensionTooLarge(usize),

    #[error("artifact has {0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ArtifactError>;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Header {
    magic: [u8; 4],
    version: u32,
    kind: u32,
    n_features: u32,
    n_targets: u32,
}

const HEADER_LEN: usize = std::mem::size_of::<Header>();

fn header_dim(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| ArtifactError::DimensionTooLarge(n))
}

/// A model read from (or about to be written to) an artifact file.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelArtifact {
    pub model: LinearModel,
}

impl ModelArtifact {
    pub fn new(model: LinearModel) -> Self {
        Self { model }
    }

    /// Serialize into the artifact byte layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let header = Header {
            magic: MAGIC,
            version: FORMAT_VERSION.to_le(),
            kind: KIND_LINEAR.to_le(),
            n_features: header_dim(self.model.n_features())?.to_le(),
            n_targets: header_dim(self.model.n_targets())?.to_le(),
        };
        let n_values = self.model.coefficients().len() + self.model.intercepts().len();
        let mut buf = Vec::with_capacity(HEADER_LEN + n_values * 8);
        buf.extend_from_slice(bytemuck::bytes_of(&header));
        for v in self.model.coefficients().iter() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        for v in self.model.intercepts().iter() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Ok(buf)
    }

    /// Parse an artifact, rejecting anything that is not exactly one
    /// well-formed model.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(ArtifactError::Truncated { expected: HEADER_LEN, found: buf.len() });
        }
        let header: Header = bytemuck::pod_read_unaligned(&buf[..HEADER_LEN]);
        if header.magic != MAGIC {
            return Err(ArtifactError::BadMagic(header.magic));
        }
        let version = u32::from_le(header.version);
        if version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: version,
                supported: FORMAT_VERSION,
            });
        }
        let kind = u32::from_le(header.kind);
        if kind != KIND_LINEAR {
            return Err(ArtifactError::UnknownKind(kind));
        }
        let n_features = u32::from_le(header.n_features) as usize;
        let n_targets = u32::from_le(header.n_targets) as usize;

        let n_values = n_targets
            .checked_mul(n_features)
            .and_then(|n| n.checked_add(n_targets))
            .ok_or_else(|| {
                ModelError::InvalidModel(format!("{}x{} model is too large", n_targets, n_features))
            })?;
        let payload = &buf[HEADER_LEN..];
        let expected = n_values.saturating_mul(8);
        if payload.len() < expected {
            return Err(ArtifactError::Truncated {
                expected: HEADER_LEN.saturating_add(expected),
                found: buf.len(),
            });
        }
        if payload.len() > expected {
            return Err(ArtifactError::TrailingBytes(payload.len() - expected));
        }

        let mut values = payload.chunks_exact(8).map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        });
        let coefficients: Vec<f64> = values.by_ref().take(n_targets * n_features).collect();
        let intercepts: Vec<f64> = values.collect();

        let coefficients = Array2::from_shape_vec((n_targets, n_features), coefficients)
            .map_err(ModelError::from)?;
        let model = LinearModel::new(coefficients, Array1::from(intercepts))?;
        Ok(Self { model })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        log::info!(
            "saved {}x{} model artifact to {}",
            self.model.n_targets(),
            self.model.n_features(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn load_mmap(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        // The file is only read for the duration of this call.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Self::from_bytes(&mmap[..])
    }
}
