use byteorder::{ByteOrder, LittleEndian};

use crate::config::Config;

/// 3x little-endian i16 dimensions, samples follow immediately
pub const HEADER_LEN: usize = 3 * 2;

pub fn generate_header(cfg: &Config) -> Vec<u8> {
    let mut vec = vec![0; HEADER_LEN];
    let slice = &mut vec[..];

    // Dims went through the CLI validator, the casts cannot truncate
    LittleEndian::write_i16(&mut slice[0..2], cfg.dims.x as i16);
    LittleEndian::write_i16(&mut slice[2..4], cfg.dims.y as i16);
    LittleEndian::write_i16(&mut slice[4..6], cfg.dims.z as i16);

    vec
}

#[cfg(test)]
mod test {
    use std::ffi::OsString;

    use nalgebra::vector;

    use super::*;
    use crate::config::GeneratorConfig;

    #[test]
    fn header_is_three_le_dims() {
        let cfg = Config {
            dims: vector![2, 300, 7],
            generator: GeneratorConfig::Solid { sample: 1 },
            file_name: OsString::from("x"),
            seed: None,
        };

        let header = generate_header(&cfg);
        assert_eq!(header, [2, 0, 44, 1, 7, 0]);
    }
}
