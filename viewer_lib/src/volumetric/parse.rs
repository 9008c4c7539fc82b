use nalgebra::vector;
use nom::{number::complete::le_i16, sequence::tuple, IResult};

use crate::DataError;

use super::vol_builder::VolumeMetadata;

/// Three little-endian i16 dimensions
pub const HEADER_LEN: usize = 6;

/// Parse the raw stream header: `width, height, depth` as
/// little-endian i16, followed by `width*height*depth` i16 samples.
pub fn stream_header(slice: &[u8]) -> Result<VolumeMetadata, DataError> {
    let mut header = tuple((le_i16, le_i16, le_i16));
    let parse_res: IResult<_, _> = header(slice);

    let (_rest, dims) = match parse_res {
        Ok(r) => r,
        Err(_) => return Err(DataError::TruncatedHeader),
    };

    if dims.0 <= 0 || dims.1 <= 0 || dims.2 <= 0 {
        return Err(DataError::BadDimensions(dims.0, dims.1, dims.2));
    }

    let size = vector![dims.0 as usize, dims.1 as usize, dims.2 as usize];

    Ok(VolumeMetadata::new(size, HEADER_LEN))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::stream_from_samples;

    #[test]
    fn parses_dimensions() {
        let stream = stream_from_samples(vector![2, 3, 4], &[0; 24]);
        let meta = stream_header(&stream).unwrap();

        assert_eq!(meta.size, vector![2, 3, 4]);
        assert_eq!(meta.data_offset, HEADER_LEN);
    }

    #[test]
    fn short_header_is_error() {
        let res = stream_header(&[1, 0, 1, 0]);
        assert!(matches!(res, Err(DataError::TruncatedHeader)));
    }

    #[test]
    fn nonpositive_dimension_is_error() {
        let stream = stream_from_samples(vector![2, 0, 2], &[]);
        let res = stream_header(&stream);
        assert!(matches!(res, Err(DataError::BadDimensions(2, 0, 2))));
    }
}
