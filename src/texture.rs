use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::error::{Error, ReadStage, Result};
use crate::header::Header;
use crate::plane::Plane;

/// Edge length of the thumbnail plane. The header carries its own
/// low-res dimensions, but the plane itself is always 16×16.
const THUMBNAIL_EDGE: u32 = 16;

/// A fully decoded texture container: header, resource directory,
/// thumbnail plane and body plane.
#[derive(Debug)]
pub struct VtfTexture {
    pub header: Header,
    pub resources: Vec<ResourceEntry>,
    pub thumbnail: Plane,
    pub body: Plane,
}

/// One record of the resource directory: a 3-byte tag, a flag byte
/// and a file offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEntry {
    pub tag: [u8; 3],
    pub flags: u8,
    pub offset: u32,
}

impl ResourceEntry {
    pub fn read_from<T: Read + ReadBytesExt>(input: &mut T) -> Result<Self> {
        let mut tag = [0u8; 3];
        input.read_exact(&mut tag)?;

        Ok(ResourceEntry {
            tag,
            flags: input.read_u8()?,
            offset: input.read_u32::<LE>()?,
        })
    }

    pub fn write_into<T: Write + WriteBytesExt>(&self, output: &mut T) -> Result<()> {
        output.write_all(&self.tag)?;
        output.write_u8(self.flags)?;
        output.write_u32::<LE>(self.offset)?;

        Ok(())
    }
}

/// Number of times `size` halves before reaching 1.
pub fn mipmap_level_count(size: u32) -> u32 {
    let mut size = size;
    let mut count = 0;

    while size > 1 {
        size /= 2;
        count += 1;
    }

    count
}

/// Byte length of the stored mipmap chain for a texture `size` pixels
/// wide. Only used to advance the cursor past the chain; the levels
/// themselves are never materialized.
pub fn mipmap_block_size(size: u32) -> u64 {
    let mut total: u64 = 0;
    for level in 0..=mipmap_level_count(size) {
        total += 1 << (2 * level);
    }

    total - 1
}

fn staged<E: Into<Error>>(stage: ReadStage) -> impl FnOnce(E) -> Error {
    move |source| Error::ReadFailed {
        stage,
        source: Box::new(source.into()),
    }
}

impl VtfTexture {
    /// A fresh container for a `width`×`height` body: defaulted
    /// header, no resources, blank thumbnail and body.
    ///
    /// The default low-res format is DXT1, which is declared only and
    /// has no codec here. Set [`Header::low_res_format`] to a
    /// supported format before encoding.
    pub fn new(width: u16, height: u16) -> Self {
        let header = Header {
            width,
            height,
            mipmap_count: mipmap_level_count(width as u32) as u8,
            ..Default::default()
        };

        VtfTexture {
            header,
            resources: Vec::new(),
            thumbnail: Plane::blank(THUMBNAIL_EDGE, THUMBNAIL_EDGE),
            body: Plane::blank(width as u32, height as u32),
        }
    }

    /// A fresh container whose body is filled from an external
    /// bitmap's raw RGBA bytes.
    pub fn from_raw(width: u16, height: u16, bitmap: &[u8]) -> Result<Self> {
        let mut texture = VtfTexture::new(width, height);
        texture.body = Plane::from_rgba(width as u32, height as u32, bitmap)?;

        Ok(texture)
    }

    /// Decode a container from anything seekable that implements
    /// [Read]. The stream must start at the container's first byte.
    pub fn decode<T: Read + Seek>(input: &mut T) -> Result<Self> {
        let header = Header::read_from(input).map_err(staged(ReadStage::Header))?;

        let thumbnail =
            Plane::read_from(input, THUMBNAIL_EDGE, THUMBNAIL_EDGE, header.low_res_format)
                .map_err(staged(ReadStage::Thumbnail))?;

        // The stored mipmap chain sits between the thumbnail and the
        // body; it is skipped, not decoded.
        input
            .seek(SeekFrom::Current(mipmap_block_size(header.width as u32) as i64))
            .map_err(staged(ReadStage::Mipmaps))?;

        let body_position = input.stream_position().map_err(staged(ReadStage::Resources))?;
        let resources = read_resource_directory(input).map_err(staged(ReadStage::Resources))?;
        input
            .seek(SeekFrom::Start(body_position))
            .map_err(staged(ReadStage::Resources))?;

        let body = Plane::read_from(
            input,
            header.width as u32,
            header.height as u32,
            header.high_res_format,
        )
        .map_err(staged(ReadStage::Body))?;

        Ok(VtfTexture {
            header,
            resources,
            thumbnail,
            body,
        })
    }

    /// Encode the container into anything that implements [Write]:
    /// header, resource records in order, thumbnail, body. No mipmap
    /// chain is emitted.
    pub fn encode<T: Write + WriteBytesExt>(&self, output: &mut T) -> Result<()> {
        let header = Header {
            resource_count: self.resources.len() as u32,
            ..self.header.clone()
        };
        header.write_into(output)?;

        for entry in &self.resources {
            entry.write_into(output)?;
        }

        self.thumbnail.write_into(output, header.low_res_format)?;
        self.body.write_into(output, header.high_res_format)?;

        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut output = BufWriter::new(File::create(path)?);
        self.encode(&mut output)?;
        output.flush()?;

        Ok(())
    }
}

/// Decode a container from a file on disk.
pub fn open<P: AsRef<Path>>(path: P) -> Result<VtfTexture> {
    let file = File::open(path)?;

    VtfTexture::decode(&mut BufReader::new(file))
}

/// Read the resource directory from the stream it shares with the
/// header. The directory sits `header_size` bytes past a full header
/// copy, so this pass re-parses the header from the start of the
/// stream and advances that much further before reading entries.
fn read_resource_directory<T: Read + Seek>(input: &mut T) -> Result<Vec<ResourceEntry>> {
    input.seek(SeekFrom::Start(0))?;

    let header = Header::read_from(input)?;
    input.seek(SeekFrom::Current(header.header_size as i64))?;

    let mut entries = Vec::with_capacity(header.resource_count as usize);
    for _ in 0..header.resource_count {
        entries.push(ResourceEntry::read_from(input)?);
    }

    Ok(entries)
}
