use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::error::{Error, Result};
use crate::format::PixelFormat;

/// Identifier at the start of every container.
pub(crate) const MAGIC: [u8; 4] = *b"VTF\0";

/// A VTF file header. The fixed portion is always 80 bytes on disk,
/// little-endian, with reserved spans written as zeroes.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub version_major: u32,
    pub version_minor: u32,

    /// Declared size of the header region. The resource directory
    /// starts this many bytes past the header copy it follows.
    pub header_size: u32,

    /// Width of the body in pixels. Producers keep this a power of
    /// two; the decoder accepts whatever is in the file.
    pub width: u16,

    /// Height of the body in pixels, same convention as `width`.
    pub height: u16,

    /// Raw flag bitfield. Only touched through [`flag`](Self::flag)
    /// and [`set_flag`](Self::set_flag).
    pub(crate) flags: u32,

    pub frame_count: u16,
    pub first_frame: u16,

    pub reflectivity: [f32; 3],
    pub bumpmap_scale: f32,

    /// Format of the body plane.
    pub high_res_format: PixelFormat,

    pub mipmap_count: u8,

    /// Format of the thumbnail plane. Conventionally DXT1, never
    /// validated.
    pub low_res_format: PixelFormat,

    pub low_res_width: u8,
    pub low_res_height: u8,

    pub depth: u16,

    /// Number of entries in the resource directory.
    pub resource_count: u32,
}

impl Header {
    /// Byte length of the fixed header portion.
    pub const SIZE: u32 = 80;

    pub fn flag(&self, flag: TextureFlag) -> bool {
        self.flags & flag as u32 != 0
    }

    pub fn set_flag(&mut self, flag: TextureFlag, enabled: bool) {
        if enabled {
            self.flags |= flag as u32;
        } else {
            self.flags &= !(flag as u32);
        }
    }

    pub fn read_from<T: Read + ReadBytesExt>(input: &mut T) -> Result<Self> {
        let mut magic = [0u8; 4];
        input.read_exact(&mut magic)?;

        if magic != MAGIC {
            return Err(Error::InvalidSignature(magic));
        }

        let mut reserved = [0u8; 8];

        let version_major = input.read_u32::<LE>()?;
        let version_minor = input.read_u32::<LE>()?;
        let header_size = input.read_u32::<LE>()?;
        let width = input.read_u16::<LE>()?;
        let height = input.read_u16::<LE>()?;
        let flags = input.read_u32::<LE>()?;
        let frame_count = input.read_u16::<LE>()?;
        let first_frame = input.read_u16::<LE>()?;

        input.read_exact(&mut reserved[..4])?;

        let reflectivity = [
            input.read_f32::<LE>()?,
            input.read_f32::<LE>()?,
            input.read_f32::<LE>()?,
        ];

        input.read_exact(&mut reserved[..4])?;

        let bumpmap_scale = input.read_f32::<LE>()?;
        let high_res_format = PixelFormat::from_raw(input.read_i32::<LE>()?);
        let mipmap_count = input.read_u8()?;
        let low_res_format = PixelFormat::from_raw(input.read_i32::<LE>()?);
        let low_res_width = input.read_u8()?;
        let low_res_height = input.read_u8()?;
        let depth = input.read_u16::<LE>()?;

        input.read_exact(&mut reserved[..3])?;

        let resource_count = input.read_u32::<LE>()?;

        input.read_exact(&mut reserved[..8])?;

        Ok(Header {
            version_major,
            version_minor,
            header_size,
            width,
            height,
            flags,
            frame_count,
            first_frame,
            reflectivity,
            bumpmap_scale,
            high_res_format,
            mipmap_count,
            low_res_format,
            low_res_width,
            low_res_height,
            depth,
            resource_count,
        })
    }

    pub fn write_into<T: Write + WriteBytesExt>(&self, output: &mut T) -> Result<()> {
        output.write_all(&MAGIC)?;
        output.write_u32::<LE>(self.version_major)?;
        output.write_u32::<LE>(self.version_minor)?;
        output.write_u32::<LE>(self.header_size)?;
        output.write_u16::<LE>(self.width)?;
        output.write_u16::<LE>(self.height)?;
        output.write_u32::<LE>(self.flags)?;
        output.write_u16::<LE>(self.frame_count)?;
        output.write_u16::<LE>(self.first_frame)?;

        output.write_all(&[0u8; 4])?;

        for component in self.reflectivity {
            output.write_f32::<LE>(component)?;
        }

        output.write_all(&[0u8; 4])?;

        output.write_f32::<LE>(self.bumpmap_scale)?;
        output.write_i32::<LE>(self.high_res_format as i32)?;
        output.write_u8(self.mipmap_count)?;
        output.write_i32::<LE>(self.low_res_format as i32)?;
        output.write_u8(self.low_res_width)?;
        output.write_u8(self.low_res_height)?;
        output.write_u16::<LE>(self.depth)?;

        output.write_all(&[0u8; 3])?;

        output.write_u32::<LE>(self.resource_count)?;

        output.write_all(&[0u8; 8])?;

        Ok(())
    }
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version_major: 7,
            version_minor: 2,
            header_size: Header::SIZE,
            width: 0,
            height: 0,
            flags: 0,
            frame_count: 1,
            first_frame: 0,
            reflectivity: [1.0, 0.0, 0.0],
            bumpmap_scale: 1.0,
            high_res_format: PixelFormat::Rgba8888,
            mipmap_count: 0,
            low_res_format: PixelFormat::Dxt1,
            low_res_width: 16,
            low_res_height: 16,
            depth: 1,
            resource_count: 0,
        }
    }
}

/// Texture option flags stored in the header bitfield.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFlag {
    PointSample = 0x0000_0001,
    Trilinear = 0x0000_0002,
    ClampS = 0x0000_0004,
    ClampT = 0x0000_0008,
    Anisotropic = 0x0000_0010,
    HintDxt5 = 0x0000_0020,
    NoCompress = 0x0000_0040,
    Normal = 0x0000_0080,
    NoMip = 0x0000_0100,
    NoLod = 0x0000_0200,
    MinMip = 0x0000_0400,
    Procedural = 0x0000_0800,
    OneBitAlpha = 0x0000_1000,
    EightBitAlpha = 0x0000_2000,
    EnvMap = 0x0000_4000,
    RenderTarget = 0x0000_8000,
    DepthRenderTarget = 0x0001_0000,
    NoDebugOverride = 0x0002_0000,
    SingleCopy = 0x0004_0000,
    NoDepthBuffer = 0x0080_0000,
    ClampU = 0x0200_0000,
    VertexTexture = 0x0400_0000,
    SsBump = 0x0800_0000,
    Border = 0x2000_0000,
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn sample_header() -> Header {
        let mut header = Header {
            width: 256,
            height: 128,
            mipmap_count: 8,
            low_res_format: PixelFormat::Bgr888,
            reflectivity: [0.25, 0.5, 0.75],
            bumpmap_scale: 2.0,
            resource_count: 3,
            ..Default::default()
        };
        header.set_flag(TextureFlag::ClampS, true);
        header.set_flag(TextureFlag::ClampT, true);

        header
    }

    #[test]
    fn fixed_length_is_80_bytes() {
        let mut bytes = Vec::new();
        sample_header().write_into(&mut bytes).unwrap();

        assert_eq!(bytes.len(), Header::SIZE as usize);
    }

    #[test]
    fn encode_decode_preserves_every_field() {
        let header = sample_header();

        let mut bytes = Vec::new();
        header.write_into(&mut bytes).unwrap();

        let decoded = Header::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn field_offsets() {
        let mut bytes = Vec::new();
        sample_header().write_into(&mut bytes).unwrap();

        assert_eq!(&bytes[0..4], b"VTF\0");
        // width, height
        assert_eq!(&bytes[16..20], [0, 1, 128, 0]);
        // flags (ClampS | ClampT)
        assert_eq!(&bytes[20..24], [0x0C, 0, 0, 0]);
        // high-res format
        assert_eq!(&bytes[52..56], [0, 0, 0, 0]);
        // mipmap count, then low-res format (BGR888 = 3)
        assert_eq!(bytes[56], 8);
        assert_eq!(&bytes[57..61], [3, 0, 0, 0]);
        // depth
        assert_eq!(&bytes[63..65], [1, 0]);
        // resource count
        assert_eq!(&bytes[68..72], [3, 0, 0, 0]);
        // trailing reserved span
        assert_eq!(&bytes[72..80], [0u8; 8]);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = Vec::new();
        sample_header().write_into(&mut bytes).unwrap();
        bytes[..4].copy_from_slice(&[1, 2, 3, 4]);

        let err = Header::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature([1, 2, 3, 4])));
    }

    #[test]
    fn flags_set_and_clear() {
        let mut header = Header::default();
        assert!(!header.flag(TextureFlag::NoMip));

        header.set_flag(TextureFlag::NoMip, true);
        header.set_flag(TextureFlag::EnvMap, true);
        assert!(header.flag(TextureFlag::NoMip));
        assert!(header.flag(TextureFlag::EnvMap));
        assert!(!header.flag(TextureFlag::PointSample));

        header.set_flag(TextureFlag::NoMip, false);
        assert!(!header.flag(TextureFlag::NoMip));
        assert!(header.flag(TextureFlag::EnvMap));
    }

    #[test]
    fn none_format_survives_a_round_trip() {
        let header = Header {
            high_res_format: PixelFormat::None,
            ..Default::default()
        };

        let mut bytes = Vec::new();
        header.write_into(&mut bytes).unwrap();
        // -1 on the wire
        assert_eq!(&bytes[52..56], [0xFF, 0xFF, 0xFF, 0xFF]);

        let decoded = Header::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.high_res_format, PixelFormat::None);
    }
}
