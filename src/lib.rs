//! Codec for the VTF texture container format: a fixed binary header,
//! an optional resource directory, a 16×16 thumbnail plane and a
//! full-resolution body plane, with the on-disk mipmap chain skipped
//! rather than decoded.
//!
//! Only the plain 3- and 4-channel byte formats have a pixel codec;
//! block-compressed and paletted formats are recognized in headers but
//! rejected when their pixel data is touched.
//!
//! # Example
//! ## Creating and writing a texture
//! ```no_run
//! use vtf::{Color, PixelFormat, VtfTexture};
//!
//! let mut texture = VtfTexture::new(64, 64);
//!
//! // The default low-res format is DXT1, which has no codec here.
//! // Switch the thumbnail to something writable before saving.
//! texture.header.low_res_format = PixelFormat::Bgr888;
//! texture.body.fill(Color::new(128, 64, 255, 255));
//!
//! texture.save("gradient.vtf").expect("Could not save the texture");
//! ```
//!
//! ## Reading a texture from a file
//! ```no_run
//! let texture = vtf::open("gradient.vtf").expect("Could not open file");
//!
//! println!(
//!     "{}x{}, {:?}",
//!     texture.header.width,
//!     texture.header.height,
//!     texture.header.high_res_format,
//! );
//! ```

mod color;
mod error;
mod format;
mod plane;

pub mod header;
pub mod texture;

// ----------------------- //
// INLINED USEFUL FEATURES //
// ----------------------- //
#[doc(inline)]
pub use texture::VtfTexture;

#[doc(inline)]
pub use texture::open;

#[doc(inline)]
pub use header::{Header, TextureFlag};

#[doc(inline)]
pub use format::PixelFormat;

#[doc(inline)]
pub use color::Color;

#[doc(inline)]
pub use plane::Plane;

#[doc(inline)]
pub use error::{Error, ReadStage, Result, UnsupportedReason};
