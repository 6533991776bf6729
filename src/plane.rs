use std::io::{Read, Write};

use byteorder::ReadBytesExt;
use rayon::{iter::ParallelIterator, slice::ParallelSlice};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::format::PixelFormat;

/// A width×height grid of pixels, stored row-major.
///
/// The pixel count always equals `width * height`; constructors taking
/// an existing buffer enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Plane {
    /// A plane of transparent black pixels.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::default(); (width * height) as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != (width * height) as usize {
            return Err(Error::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a plane from an external bitmap's raw RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, bitmap: &[u8]) -> Result<Self> {
        if bitmap.len() != (width * height) as usize * 4 {
            return Err(Error::DimensionMismatch {
                width,
                height,
                len: bitmap.len() / 4,
            });
        }

        let pixels = bitmap
            .chunks_exact(4)
            .map(|c| Color::new(c[0], c[1], c[2], c[3]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Flatten back out to raw RGBA bytes for an external image library.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bitmap = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bitmap.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }

        bitmap
    }

    /// Decode `width * height` pixels from `input` in row-major order.
    ///
    /// The first pixel that fails to decode aborts the whole plane.
    pub fn read_from<T: Read + ReadBytesExt>(
        input: &mut T,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for _y in 0..height {
            for _x in 0..width {
                pixels.push(Color::read_from(input, format)?);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Encode every pixel into `output` in row-major order.
    ///
    /// Rows are encoded in parallel, then written out in one pass.
    pub fn write_into<T: Write>(&self, output: &mut T, format: PixelFormat) -> Result<()> {
        let bytes_per_pixel = format
            .bytes_per_pixel()
            .ok_or_else(|| Error::unsupported(format))?;

        if self.pixels.is_empty() {
            return Ok(());
        }

        let rows = self
            .pixels
            .par_chunks(self.width as usize)
            .map(|row| {
                let mut buf = Vec::with_capacity(row.len() * bytes_per_pixel);
                for pixel in row {
                    pixel.write_into(&mut buf, format)?;
                }

                Ok(buf)
            })
            .collect::<Result<Vec<_>>>()?;

        for row in rows {
            output.write_all(&row)?;
        }

        Ok(())
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Set one channel (0=R, 1=G, 2=B, 3=A) on every pixel.
    ///
    /// An index outside the four channels leaves the plane untouched.
    pub fn fill_channel(&mut self, channel: usize, value: u8) {
        if channel > 3 {
            return;
        }

        for pixel in &mut self.pixels {
            match channel {
                0 => pixel.r = value,
                1 => pixel.g = value,
                2 => pixel.b = value,
                _ => pixel.a = value,
            }
        }
    }

    /// Produce the next mipmap level at half width and half height.
    ///
    /// Pixels are sampled from the flattened source at stride 2 from
    /// index 0. This is a straight decimation, not a box filter.
    pub fn halved(&self) -> Plane {
        let width = self.width / 2;
        let height = self.height / 2;
        let pixels = (0..(width * height) as usize)
            .map(|i| self.pixels[i * 2])
            .collect();

        Plane {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}
