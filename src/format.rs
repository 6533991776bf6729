/// The storage format of pixel data in either image plane.
///
/// Every format a container can declare is listed here, but only the
/// plain 3- and 4-channel byte formats have a codec. Everything else
/// (block-compressed, 16-bit packed, paletted, bump formats) is
/// recognized so headers parse, and rejected the moment pixel data in
/// that format is touched.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8888 = 0,
    Abgr8888 = 1,
    Rgb888 = 2,
    Bgr888 = 3,
    Rgb565 = 4,
    I8 = 5,
    Ia88 = 6,
    P8 = 7,
    A8 = 8,

    /// Historically a colorkeyed variant of [`Rgb888`](Self::Rgb888);
    /// decoded identically, the key color is left to the consumer.
    Rgb888Bluescreen = 9,

    /// Colorkeyed variant of [`Bgr888`](Self::Bgr888), same handling.
    Bgr888Bluescreen = 10,

    Argb8888 = 11,
    Bgra8888 = 12,
    Dxt1 = 13,
    Dxt3 = 14,
    Dxt5 = 15,
    Bgrx8888 = 16,
    Bgr565 = 17,
    Bgrx5551 = 18,
    Bgra4444 = 19,
    Dxt1OneBitAlpha = 20,
    Bgra5551 = 21,
    Uv88 = 22,
    Uvwq8888 = 23,
    Rgba16161616F = 24,
    Rgba16161616 = 25,
    Uvlx8888 = 26,

    /// Sentinel for "no format".
    None = -1,
}

/// One canonical color channel, used to spell out byte order per format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    R,
    G,
    B,
    A,
}

impl PixelFormat {
    /// Interpret a raw format field from a header.
    ///
    /// Values outside the known set collapse to [`None`](Self::None),
    /// so a header with a bogus format still parses; the failure
    /// surfaces later when pixel data in that format is dispatched.
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => Self::Rgba8888,
            1 => Self::Abgr8888,
            2 => Self::Rgb888,
            3 => Self::Bgr888,
            4 => Self::Rgb565,
            5 => Self::I8,
            6 => Self::Ia88,
            7 => Self::P8,
            8 => Self::A8,
            9 => Self::Rgb888Bluescreen,
            10 => Self::Bgr888Bluescreen,
            11 => Self::Argb8888,
            12 => Self::Bgra8888,
            13 => Self::Dxt1,
            14 => Self::Dxt3,
            15 => Self::Dxt5,
            16 => Self::Bgrx8888,
            17 => Self::Bgr565,
            18 => Self::Bgrx5551,
            19 => Self::Bgra4444,
            20 => Self::Dxt1OneBitAlpha,
            21 => Self::Bgra5551,
            22 => Self::Uv88,
            23 => Self::Uvwq8888,
            24 => Self::Rgba16161616F,
            25 => Self::Rgba16161616,
            26 => Self::Uvlx8888,
            _ => Self::None,
        }
    }

    /// Whether this codec can encode and decode pixels in this format.
    pub fn is_supported(&self) -> bool {
        self.channels().is_some()
    }

    /// Formats that store palette indices rather than color values.
    pub fn is_paletted(&self) -> bool {
        matches!(self, Self::Rgb565 | Self::I8 | Self::Ia88 | Self::P8)
    }

    /// Encoded byte width of one pixel, for formats with a codec.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        self.channels().map(|order| order.len())
    }

    /// The channel occupying each encoded byte position, in order.
    ///
    /// Three-channel layouts have no stored alpha; it is implied 255
    /// on decode and omitted on encode.
    pub(crate) fn channels(&self) -> Option<&'static [Channel]> {
        use Channel::{A, B, G, R};

        Some(match self {
            Self::Rgba8888 => &[R, G, B, A],
            Self::Bgra8888 => &[B, G, R, A],
            Self::Abgr8888 => &[A, B, G, R],
            Self::Argb8888 => &[A, R, G, B],
            Self::Rgb888 | Self::Rgb888Bluescreen => &[R, G, B],
            Self::Bgr888 | Self::Bgr888Bluescreen => &[B, G, R],
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_formats() {
        let supported = [
            PixelFormat::Rgba8888,
            PixelFormat::Bgra8888,
            PixelFormat::Abgr8888,
            PixelFormat::Argb8888,
            PixelFormat::Rgb888,
            PixelFormat::Bgr888,
            PixelFormat::Rgb888Bluescreen,
            PixelFormat::Bgr888Bluescreen,
        ];

        for format in supported {
            assert!(format.is_supported(), "{format:?} should have a codec");
        }

        for format in [
            PixelFormat::Dxt1,
            PixelFormat::Dxt5,
            PixelFormat::A8,
            PixelFormat::Bgr565,
            PixelFormat::Rgba16161616,
            PixelFormat::None,
        ] {
            assert!(!format.is_supported(), "{format:?} should not have a codec");
        }
    }

    #[test]
    fn paletted_formats() {
        for format in [
            PixelFormat::Rgb565,
            PixelFormat::I8,
            PixelFormat::Ia88,
            PixelFormat::P8,
        ] {
            assert!(format.is_paletted());
        }

        assert!(!PixelFormat::Dxt1.is_paletted());
        assert!(!PixelFormat::Rgba8888.is_paletted());
    }

    #[test]
    fn pixel_widths() {
        assert_eq!(PixelFormat::Rgba8888.bytes_per_pixel(), Some(4));
        assert_eq!(PixelFormat::Argb8888.bytes_per_pixel(), Some(4));
        assert_eq!(PixelFormat::Rgb888.bytes_per_pixel(), Some(3));
        assert_eq!(PixelFormat::Bgr888Bluescreen.bytes_per_pixel(), Some(3));
        assert_eq!(PixelFormat::Dxt1.bytes_per_pixel(), None);
    }

    #[test]
    fn raw_format_values() {
        assert_eq!(PixelFormat::from_raw(0), PixelFormat::Rgba8888);
        assert_eq!(PixelFormat::from_raw(12), PixelFormat::Bgra8888);
        assert_eq!(PixelFormat::from_raw(13), PixelFormat::Dxt1);
        assert_eq!(PixelFormat::from_raw(-1), PixelFormat::None);

        // Unknown values fall back to the sentinel instead of failing
        // the header parse.
        assert_eq!(PixelFormat::from_raw(27), PixelFormat::None);
        assert_eq!(PixelFormat::from_raw(9999), PixelFormat::None);
    }

    #[test]
    fn raw_values_round_trip() {
        for raw in -1..27 {
            let format = PixelFormat::from_raw(raw);
            assert_eq!(format as i32, raw);
        }
    }
}
