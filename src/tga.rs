use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::raster::Raster;

const HEADER_LEN: usize = 18;

/// 18-byte header for an uncompressed 24-bit true-color image: no image ID,
/// no color map, type 2, zero origins, little-endian dimensions.
fn header(width: u16, height: u16) -> [u8; HEADER_LEN] {
    let [w_lo, w_hi] = width.to_le_bytes();
    let [h_lo, h_hi] = height.to_le_bytes();
    [
        0, // image-ID length
        0, // color-map type
        2, // image type: uncompressed true-color
        0, 0, 0, 0, 0, // color-map specification
        0, 0, // X origin
        0, 0, // Y origin
        w_lo, w_hi, // width
        h_lo, h_hi, // height
        24, // bits per pixel
        0,  // image descriptor
    ]
}

/// Serializes the raster as an uncompressed TGA stream: header, then
/// row-major (B, G, R) triples unpacked from the 0xRRGGBB cells.
pub fn write<W: Write>(raster: &Raster, out: &mut W) -> io::Result<()> {
    let width: u16 = raster.width().try_into().expect("width exceeds TGA limit");
    let height: u16 = raster
        .height()
        .try_into()
        .expect("height exceeds TGA limit");
    out.write_all(&header(width, height))?;

    let mut row = Vec::with_capacity(raster.width() * 3);
    for y in 0..raster.height() {
        row.clear();
        for x in 0..raster.width() {
            let color = raster.get(x, y);
            row.push((color & 0xFF) as u8); // blue
            row.push(((color >> 8) & 0xFF) as u8); // green
            row.push(((color >> 16) & 0xFF) as u8); // red
        }
        out.write_all(&row)?;
    }
    Ok(())
}

/// Writes the raster to a TGA file, reporting any open/write/flush failure.
pub fn save<P: AsRef<Path>>(raster: &Raster, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write(raster, &mut out)?;
    out.flush()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header_layout() {
        let h = header(1920, 1200);
        assert_eq!(h[0], 0);
        assert_eq!(h[1], 0);
        assert_eq!(h[2], 2);
        assert_eq!(&h[3..8], &[0, 0, 0, 0, 0]);
        assert_eq!(&h[8..12], &[0, 0, 0, 0]);
        assert_eq!(&h[12..14], &1920u16.to_le_bytes());
        assert_eq!(&h[14..16], &1200u16.to_le_bytes());
        assert_eq!(h[16], 24);
        assert_eq!(h[17], 0);
    }

    #[test]
    fn test_pixel_bytes_are_bgr() {
        let mut raster = Raster::new(1, 1);
        raster.set(0, 0, 0xAABBCC);
        let mut out = Vec::new();
        write(&raster, &mut out).unwrap();
        assert_eq!(&out[HEADER_LEN..], &[0xCC, 0xBB, 0xAA]);
    }

    #[test]
    fn test_rows_are_written_in_order() {
        let mut raster = Raster::new(2, 2);
        raster.set(0, 0, 0x000001);
        raster.set(1, 0, 0x000002);
        raster.set(0, 1, 0x000003);
        raster.set(1, 1, 0x000004);
        let mut out = Vec::new();
        write(&raster, &mut out).unwrap();
        let blues: Vec<u8> = out[HEADER_LEN..].iter().step_by(3).copied().collect();
        assert_eq!(blues, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stream_size() {
        let raster = Raster::new(4, 2);
        let mut out = Vec::new();
        write(&raster, &mut out).unwrap();
        assert_eq!(out.len(), HEADER_LEN + 3 * 4 * 2);
    }
}
