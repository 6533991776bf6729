use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};
use crate::format::{Channel, PixelFormat};

/// One pixel in canonical RGBA order, 8 bits per channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Decode one pixel from `input`, consuming exactly the format's
    /// byte width.
    ///
    /// Formats without a stored alpha channel decode with alpha 255.
    pub fn read_from<T: Read + ReadBytesExt>(input: &mut T, format: PixelFormat) -> Result<Self> {
        let channels = format.channels().ok_or_else(|| Error::unsupported(format))?;

        let mut color = Color::new(0, 0, 0, 255);
        for channel in channels {
            let value = input.read_u8()?;

            match channel {
                Channel::R => color.r = value,
                Channel::G => color.g = value,
                Channel::B => color.b = value,
                Channel::A => color.a = value,
            }
        }

        Ok(color)
    }

    /// Encode one pixel into `output` in the format's byte order,
    /// emitting exactly its byte width. Alpha is dropped for
    /// three-channel formats.
    pub fn write_into<T: Write + WriteBytesExt>(
        &self,
        output: &mut T,
        format: PixelFormat,
    ) -> Result<()> {
        let channels = format.channels().ok_or_else(|| Error::unsupported(format))?;

        for channel in channels {
            let value = match channel {
                Channel::R => self.r,
                Channel::G => self.g,
                Channel::B => self.b,
                Channel::A => self.a,
            };

            output.write_u8(value)?;
        }

        Ok(())
    }
}
