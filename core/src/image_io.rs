//! Image I/O

use crate::base::clamp;
use crate::film::Film;
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::Write;

/// Writes the film to `<path>.tga` as an uncompressed 24-bit TGA with the
/// origin in the upper left, gamma-encoding each channel with 1/2.2.
///
/// * `path`   - Output path without extension.
/// * `film`   - The film to encode.
/// * `libgdk` - Writes a one-byte image id; works around a libgdk loader bug
///              with zero-length ids.
pub fn write_tga(path: &str, film: &Film, libgdk: bool) -> Result<(), String> {
    let file_name = format!("{path}.tga");
    let mut file = File::create(&file_name).map_err(|e| format!("Unable to create '{file_name}': {e}"))?;

    let mut header = [0u8; 18];
    // Image id length.
    header[0] = u8::from(libgdk);
    // No colourmap.
    header[1] = 0;
    // Datatype 2, uncompressed true colour.
    header[2] = 2;
    // Colourmap origin, length and depth stay zero, as do the image origins.
    LittleEndian::write_u16(&mut header[12..14], film.width());
    LittleEndian::write_u16(&mut header[14..16], film.height());
    // Bits per pixel.
    header[16] = 24;
    // Image descriptor; bit 5 selects an upper-left screen origin.
    header[17] = 32;

    file.write_all(&header)
        .map_err(|e| format!("Unable to write '{file_name}': {e}"))?;
    if libgdk {
        // The image id itself, a single zero byte.
        file.write_all(&[0])
            .map_err(|e| format!("Unable to write '{file_name}': {e}"))?;
    }

    let mut data = Vec::with_capacity(film.width() as usize * film.height() as usize * 3);
    for y in 0..film.height() {
        for x in 0..film.width() {
            let colour = film.colour(x, y);
            // TGA uses BGR colour order.
            data.push(encode_channel(colour.b));
            data.push(encode_channel(colour.g));
            data.push(encode_channel(colour.r));
        }
    }

    file.write_all(&data)
        .map_err(|e| format!("Unable to write '{file_name}': {e}"))
}

/// Gamma-encodes a linear channel value to 8 bits.
///
/// * `value` - Linear channel value.
fn encode_channel(value: f32) -> u8 {
    (clamp(value, 0.0, 1.0).powf(1.0 / 2.2) * 255.0).round() as u8
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use crate::config::Config;

    fn temp_path(name: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(name);
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn encode_is_gamma_2_2() {
        assert_eq!(encode_channel(0.0), 0);
        assert_eq!(encode_channel(1.0), 255);
        assert_eq!(encode_channel(2.0), 255);
        assert_eq!(encode_channel(-1.0), 0);
        assert_eq!(encode_channel(0.5), (0.5f32.powf(1.0 / 2.2) * 255.0).round() as u8);
    }

    #[test]
    fn header_and_pixel_layout() {
        let config = Config::new(3, 2, 1, 3);
        let film = Film::new(&config);
        film.set_pixel(0, 0, Colour::new(1.0, 0.0, 0.0));

        let path = temp_path("lumen_tga_header");
        write_tga(&path, &film, false).unwrap();
        let bytes = std::fs::read(format!("{path}.tga")).unwrap();

        assert_eq!(bytes.len(), 18 + 3 * 2 * 3);
        assert_eq!(bytes[0], 0); // no image id
        assert_eq!(bytes[2], 2); // uncompressed true colour
        assert_eq!(&bytes[12..16], &[3, 0, 2, 0]); // little-endian extents
        assert_eq!(bytes[16], 24);
        assert_eq!(bytes[17], 32); // upper-left origin

        // First pixel is red, stored as BGR.
        assert_eq!(&bytes[18..21], &[0, 0, 255]);
        // Remaining pixels are black.
        assert!(bytes[21..].iter().all(|&b| b == 0));
    }

    #[test]
    fn libgdk_workaround_adds_one_byte_id() {
        let config = Config::new(2, 2, 1, 3);
        let film = Film::new(&config);

        let path = temp_path("lumen_tga_libgdk");
        write_tga(&path, &film, true).unwrap();
        let bytes = std::fs::read(format!("{path}.tga")).unwrap();

        assert_eq!(bytes.len(), 19 + 2 * 2 * 3);
        assert_eq!(bytes[0], 1); // one-byte image id
        assert_eq!(bytes[18], 0); // the id itself
    }

    #[test]
    fn unwritable_path_reports_an_error() {
        let config = Config::new(2, 2, 1, 3);
        let film = Film::new(&config);
        let result = write_tga("/nonexistent-dir/result", &film, false);
        assert!(result.is_err());
    }
}
