//! Uniform block layout for uploading [`PaletteSettings`] to a GPU.
//!
//! The palette swap itself does not care how its configuration is laid out in
//! memory. This module is the serialization contract with the host: each
//! colour occupies a 16-byte slot (vec3 plus a pad lane, the array stride
//! shaders expect) followed by the darkness bias. Backends that require every
//! uniform block to be a multiple of 16 bytes select
//! [`UniformLayout::Aligned16`], which appends explicit padding.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::color::LinearRgb;
use crate::palette::{PaletteSettings, PALETTE_SIZE};

/// Memory layout capability of the target backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniformLayout {
    /// Colours then darkness, no trailing padding (68 bytes).
    #[default]
    Native,
    /// Block size rounded up to 16 bytes (80 bytes), e.g. WebGL2.
    Aligned16,
}

impl UniformLayout {
    /// Size in bytes of the uniform block in this layout.
    pub const fn size(self) -> usize {
        match self {
            UniformLayout::Native => std::mem::size_of::<PaletteUniform>(),
            UniformLayout::Aligned16 => std::mem::size_of::<PaletteUniformAligned>(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PaletteUniform {
    pub colours: [[f32; 4]; PALETTE_SIZE],
    pub darkness: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PaletteUniformAligned {
    pub colours: [[f32; 4]; PALETTE_SIZE],
    pub darkness: i32,
    pub _padding: [u32; 3],
}

/// Error returned when a byte buffer is not a uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniformError {
    InvalidSize { len: usize },
}

impl fmt::Display for UniformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformError::InvalidSize { len } => write!(
                f,
                "uniform block must be {} or {} bytes, got {len}",
                UniformLayout::Native.size(),
                UniformLayout::Aligned16.size()
            ),
        }
    }
}

impl std::error::Error for UniformError {}

impl From<&PaletteSettings> for PaletteUniform {
    fn from(settings: &PaletteSettings) -> Self {
        Self {
            colours: settings.colours.map(|c| [c.r, c.g, c.b, 0.0]),
            darkness: settings.darkness,
        }
    }
}

impl From<&PaletteSettings> for PaletteUniformAligned {
    fn from(settings: &PaletteSettings) -> Self {
        let PaletteUniform { colours, darkness } = PaletteUniform::from(settings);
        Self {
            colours,
            darkness,
            _padding: [0; 3],
        }
    }
}

fn settings_from_parts(colours: [[f32; 4]; PALETTE_SIZE], darkness: i32) -> PaletteSettings {
    PaletteSettings::new(colours.map(|[r, g, b, _]| LinearRgb::new(r, g, b)), darkness)
}

impl PaletteSettings {
    /// Byte image of the uniform block in the host's native byte order.
    pub fn to_uniform_bytes(&self, layout: UniformLayout) -> Vec<u8> {
        match layout {
            UniformLayout::Native => bytemuck::bytes_of(&PaletteUniform::from(self)).to_vec(),
            UniformLayout::Aligned16 => {
                bytemuck::bytes_of(&PaletteUniformAligned::from(self)).to_vec()
            }
        }
    }

    /// Read settings back from a uniform block in either layout. The layout
    /// is inferred from the buffer length.
    pub fn from_uniform_bytes(bytes: &[u8]) -> Result<Self, UniformError> {
        let invalid = || UniformError::InvalidSize { len: bytes.len() };
        if bytes.len() == UniformLayout::Native.size() {
            let block: PaletteUniform =
                bytemuck::try_pod_read_unaligned(bytes).map_err(|_| invalid())?;
            Ok(settings_from_parts(block.colours, block.darkness))
        } else if bytes.len() == UniformLayout::Aligned16.size() {
            let block: PaletteUniformAligned =
                bytemuck::try_pod_read_unaligned(bytes).map_err(|_| invalid())?;
            Ok(settings_from_parts(block.colours, block.darkness))
        } else {
            Err(invalid())
        }
    }
}
