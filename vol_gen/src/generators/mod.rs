use std::{
    error::Error,
    io::{BufWriter, Read, Write},
};

use byteorder::{LittleEndian, WriteBytesExt};
use nalgebra::Vector3;

use viewer_lib::volumetric::parse;

use crate::{
    config::{Config, GeneratorConfig},
    coords::LinearCoordIterator,
    file::open_create_file,
    header::{generate_header, HEADER_LEN},
};

mod noise;
mod shapes;
mod solid;

/// Generates one sample at a time, at any location
pub trait SampleGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> i16;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Shapes { .. } => Box::new(shapes::ShapesGenerator::from_config(config)),
        GeneratorConfig::Noise => Box::new(noise::NoiseGenerator::from_config(config)),
        GeneratorConfig::Solid { .. } => Box::new(solid::SolidGenerator::from_config(config)),
    }
}

pub fn generate_vol(config: Config) -> Result<(), Box<dyn Error>> {
    let gen = get_sample_generator(&config);

    let file = open_create_file(&config.file_name)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&generate_header(&config))?;

    let coords = LinearCoordIterator::from_dims(config.dims);
    let mut written = 0u64;
    for pos in coords {
        writer.write_i16::<LittleEndian>(gen.sample_at(pos))?;
        written += 1;
    }
    writer.flush()?;
    log::info!("wrote {written} samples");

    verify_header(&config)?;

    println!("Generating finished, result in {:#?}", config.file_name);
    Ok(())
}

// Reads the written header back through the viewer's parser
fn verify_header(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut file = std::fs::File::open(&config.file_name)?;
    let mut header = [0; HEADER_LEN];
    file.read_exact(&mut header)?;

    let metadata = parse::stream_header(&header)?;
    let dims = config.dims.map(|v| v as usize);
    if metadata.size != dims {
        return Err(format!("Header mismatch: wrote {dims:?}, read {:?}", metadata.size).into());
    }
    Ok(())
}
