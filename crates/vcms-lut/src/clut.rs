//! 16-bit color lookup table cube.
//!
//! The grid handed to the video renderer. Files loaded from disk and grids
//! sampled from an ICC transform share this exact layout, so the renderer
//! cannot tell them apart.

use crate::{LutError, LutResult};

/// Smallest supported cube resolution.
pub const MIN_SIZE: usize = 2;

/// Largest supported cube resolution.
pub const MAX_SIZE: usize = 256;

/// A 3-dimensional lookup table with 16-bit RGB entries.
///
/// # Structure
///
/// - `size^3` entries of three `u16` channels (R, G, B)
/// - Stored in R-major order: R varies fastest, then G, then B
/// - Grid coordinate `i` on any axis stands for input `i * 65535 / (size - 1)`
///
/// The value is move-only: ownership passes to whoever receives it.
///
/// # Example
///
/// ```rust
/// use vcms_lut::Clut3D;
///
/// let lut = Clut3D::identity(17).unwrap();
/// assert_eq!(lut.entry_count(), 17 * 17 * 17);
/// assert_eq!(lut.get(16, 0, 0), [65535, 0, 0]);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Clut3D {
    size: usize,
    data: Vec<u16>,
}

impl Clut3D {
    /// Creates an identity (pass-through) cube.
    pub fn identity(size: usize) -> LutResult<Self> {
        check_size(size)?;
        let mut data = Vec::with_capacity(size * size * size * 3);

        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(grid_value(r, size));
                    data.push(grid_value(g, size));
                    data.push(grid_value(b, size));
                }
            }
        }

        Ok(Self { size, data })
    }

    /// Creates a cube from flat R, G, B values in R-major order.
    ///
    /// `data` must hold exactly `size^3 * 3` values.
    pub fn from_data(data: Vec<u16>, size: usize) -> LutResult<Self> {
        check_size(size)?;
        let expected = size * size * size * 3;
        if data.len() != expected {
            return Err(LutError::Size {
                expected: expected as u64,
                actual: data.len() as u64,
            });
        }
        Ok(Self { size, data })
    }

    /// Creates a cube from RGB entries in R-major order.
    pub fn from_entries(entries: Vec<[u16; 3]>, size: usize) -> LutResult<Self> {
        let data = entries.into_iter().flatten().collect();
        Self::from_data(data, size)
    }

    /// Cube resolution along each axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of entries in the cube.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Flat channel values, `entry_count() * 3` long.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Returns the entry index for a given (r, g, b) grid position.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        b * self.size * self.size + g * self.size + r
    }

    /// Gets the entry at grid position (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [u16; 3] {
        let i = self.index(r, g, b) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Iterates over the entries in storage order.
    pub fn entries(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}

/// Input value of grid coordinate `i` for a cube of resolution `size`.
///
/// Spans `0..=65535` in uniform integer steps; exact at both ends.
#[inline]
pub fn grid_value(i: usize, size: usize) -> u16 {
    (i * 65535 / (size - 1)) as u16
}

fn check_size(size: usize) -> LutResult<()> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(LutError::Format(format!(
            "cube resolution {} outside {}..={}",
            size, MIN_SIZE, MAX_SIZE
        )));
    }
    Ok(())
}
