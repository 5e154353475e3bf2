//! Minimal PNG encoder for 8-bit RGBA images
//!
//! Produces a signature followed by `IHDR`, a single `IDAT` and `IEND`
//! chunks. Scanlines are not filtered (filter type 0) and compressed with
//! zlib at the best compression level.
use crate::{Error, PixelBuffer};
use flate2::{Compression, write::ZlibEncoder};
use std::io::{self, Write};

/// Eight bytes every PNG file starts with
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// `IHDR` bit depth, 8 bits per channel
const BIT_DEPTH: u8 = 8;
/// `IHDR` color type, truecolor with alpha
const COLOR_TYPE_RGBA: u8 = 6;
/// Scanline filter type "None"
const FILTER_NONE: u8 = 0;

/// Type tagged block of a PNG file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub tag: [u8; 4],
    pub payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    pub fn new(tag: &[u8; 4], payload: &'a [u8]) -> Self {
        Self { tag: *tag, payload }
    }

    /// CRC-32 of the tag followed by the payload
    pub fn crc(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.tag);
        hasher.update(self.payload);
        hasher.finalize()
    }

    /// Serialized size: length, tag, payload and checksum
    pub fn len(&self) -> usize {
        12 + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn write(&self, mut out: impl Write) -> io::Result<()> {
        let len = u32::try_from(self.payload.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "chunk payload is too large")
        })?;
        out.write_all(&len.to_be_bytes())?;
        out.write_all(&self.tag)?;
        out.write_all(self.payload)?;
        out.write_all(&self.crc().to_be_bytes())?;
        Ok(())
    }
}

/// Payload of the `IHDR` chunk: non-interlaced 8-bit RGBA
pub fn header(width: u32, height: u32) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&width.to_be_bytes());
    ihdr[4..8].copy_from_slice(&height.to_be_bytes());
    ihdr[8] = BIT_DEPTH;
    ihdr[9] = COLOR_TYPE_RGBA;
    // compression, filter and interlace methods are all zero
    ihdr
}

/// Raw scanline stream, every row is prefixed with the "None" filter byte
pub fn scanlines(width: usize, data: &[u8]) -> Vec<u8> {
    let stride = width * 4;
    if stride == 0 {
        return Vec::new();
    }
    let mut raw = Vec::with_capacity(data.len() + data.len() / stride);
    for row in data.chunks(stride) {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row);
    }
    raw
}

/// Zlib stream of `raw` at the best compression level
pub fn compress(raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(raw)?;
    encoder.finish()
}

/// Encode raw RGBA pixels as a PNG file.
///
/// Fails with [`Error::BufferMismatch`] if `data` is not exactly
/// `width * height * 4` bytes long.
pub fn encode_rgba(width: usize, height: usize, data: &[u8]) -> Result<Vec<u8>, Error> {
    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| Error::geometry(format!("image {}x{} is too large", width, height)))?;
    if data.len() != expected {
        return Err(Error::BufferMismatch {
            expected,
            actual: data.len(),
        });
    }
    let (Ok(png_width), Ok(png_height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(Error::geometry(format!(
            "image {}x{} does not fit PNG header",
            width, height
        )));
    };

    let _span = tracing::debug_span!("[encode]", width, height).entered();
    let compressed = compress(&scanlines(width, data))?;
    tracing::debug!(raw = data.len(), compressed = compressed.len(), "[encode:idat]");

    let ihdr = header(png_width, png_height);
    let chunks = [
        Chunk::new(b"IHDR", &ihdr),
        Chunk::new(b"IDAT", &compressed),
        Chunk::new(b"IEND", &[]),
    ];
    let mut output =
        Vec::with_capacity(PNG_SIGNATURE.len() + chunks.iter().map(Chunk::len).sum::<usize>());
    output.extend_from_slice(&PNG_SIGNATURE);
    for chunk in chunks.iter() {
        chunk.write(&mut output)?;
    }
    Ok(output)
}

/// Encode pixel buffer as a PNG file
pub fn encode(img: &PixelBuffer) -> Result<Vec<u8>, Error> {
    encode_rgba(img.width(), img.height(), img.data())
}

impl PixelBuffer {
    /// Write image in the PNG format
    pub fn write_png(&self, mut w: impl Write) -> io::Result<()> {
        w.write_all(&encode(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGBA;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    type Error = Box<dyn std::error::Error>;

    struct Decoded {
        width: u32,
        height: u32,
        data: Vec<u8>,
    }

    fn decode(bytes: &[u8]) -> Result<Decoded, Error> {
        let decoder = png::Decoder::new(io::Cursor::new(bytes));
        let mut reader = decoder.read_info()?;
        let mut data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut data)?;
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        data.truncate(info.buffer_size());
        Ok(Decoded {
            width: info.width,
            height: info.height,
            data,
        })
    }

    /// Split file into `(tag, payload)` pairs verifying checksums
    fn chunks(bytes: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
        let mut result = Vec::new();
        let mut rest = &bytes[8..];
        while !rest.is_empty() {
            let len = u32::from_be_bytes(rest[0..4].try_into().unwrap()) as usize;
            let tag: [u8; 4] = rest[4..8].try_into().unwrap();
            let payload = rest[8..8 + len].to_vec();
            let crc = u32::from_be_bytes(rest[8 + len..12 + len].try_into().unwrap());
            assert_eq!(crc, Chunk::new(&tag, &payload).crc());
            result.push((tag, payload));
            rest = &rest[12 + len..];
        }
        result
    }

    fn sample(size: usize) -> PixelBuffer {
        let mut img = PixelBuffer::new(size);
        for y in 0..size as i64 {
            for x in 0..size as i64 {
                if (x + y) % 3 != 0 {
                    img.blend(x, y, RGBA::rgb((x * 7) as u8, (y * 11) as u8, 200));
                }
            }
        }
        img
    }

    #[test]
    fn test_chunk_layout() -> Result<(), Error> {
        let mut out = Vec::new();
        Chunk::new(b"IEND", &[]).write(&mut out)?;
        assert_eq!(
            out,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xae, 0x42, 0x60, 0x82]
        );

        let payload = [1, 2, 3];
        let chunk = Chunk::new(b"tEXt", &payload);
        let mut out = Vec::new();
        chunk.write(&mut out)?;
        assert_eq!(out.len(), chunk.len());
        assert_eq!(&out[0..4], &[0, 0, 0, 3]);
        assert_eq!(&out[4..11], b"tEXt\x01\x02\x03");
        Ok(())
    }

    #[test]
    fn test_header() {
        assert_eq!(
            header(48, 0x0102_0304),
            [0, 0, 0, 48, 1, 2, 3, 4, 8, 6, 0, 0, 0]
        );
    }

    #[test]
    fn test_scanlines() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        assert_eq!(
            scanlines(2, &data),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 0, 9, 10, 11, 12, 13, 14, 15, 16]
        );
    }

    #[test]
    fn test_structure() -> Result<(), Error> {
        let img = sample(9);
        let bytes = encode(&img)?;
        let chunks = chunks(&bytes);
        let tags: Vec<_> = chunks.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, [b"IHDR", b"IDAT", b"IEND"]);
        assert_eq!(chunks[0].1, header(9, 9));
        assert!(chunks[2].1.is_empty());

        let mut raw = Vec::new();
        ZlibDecoder::new(chunks[1].1.as_slice()).read_to_end(&mut raw)?;
        assert_eq!(raw, scanlines(9, img.data()));
        assert_eq!(raw.len(), 9 * (9 * 4 + 1));
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), Error> {
        for size in [1, 2, 17, 64] {
            let img = sample(size);
            let decoded = decode(&encode(&img)?)?;
            assert_eq!(decoded.width as usize, size);
            assert_eq!(decoded.height as usize, size);
            assert_eq!(decoded.data, img.data());
        }
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), Error> {
        let img = sample(33);
        assert_eq!(encode(&img)?, encode(&img.clone())?);
        Ok(())
    }

    #[test]
    fn test_buffer_mismatch() {
        let result = encode_rgba(4, 4, &[0; 63]);
        assert!(matches!(
            result,
            Err(crate::Error::BufferMismatch {
                expected: 64,
                actual: 63
            })
        ));
        assert!(matches!(
            encode_rgba(usize::MAX, 2, &[]),
            Err(crate::Error::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_write_png() -> Result<(), Error> {
        let img = sample(5);
        let mut out = Vec::new();
        img.write_png(&mut out)?;
        assert_eq!(out, encode(&img)?);
        Ok(())
    }
}
