use std::ffi::OsString;

use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<u32>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let dims = dims_from_args(&args)?;
        let generator = GeneratorConfig::from_args(&args)?;

        // Unwrap safe, has default value
        let file_name = args.value_of_os("output-file").unwrap().into();

        let seed = match args.value_of("seed") {
            Some(s) => Some(s.parse().map_err(|_| "Bad seed".to_string())?),
            None => None,
        };

        Ok(Config {
            dims,
            generator,
            file_name,
            seed,
        })
    }
}

fn dims_from_args(args: &ArgMatches) -> Result<Vector3<u32>, String> {
    let vals: Vec<u32> = args
        .values_of("dims")
        .ok_or("Missing dims")?
        .map(|v| v.parse::<u32>().map_err(|_| "Bad dimension".to_string()))
        .collect::<Result<_, _>>()?;
    Ok(vector![vals[0], vals[1], vals[2]])
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy)]
pub enum GeneratorConfig {
    /// A number of randomly placed shapes
    Shapes {
        n_of_shapes: usize,
        sample: i16,
        obj_size: u32,
    },
    /// Random data
    Noise,
    /// Solid volume with a zero border
    Solid { sample: i16 },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        // Safe to unwrap, arg is required
        let s = args.value_of("generator").unwrap();

        let sample = args.value_of("sample");
        let n_of_shapes = args.value_of("n-of-shapes");
        let obj_size = args.value_of("object-size");

        // Parses are safe, values went through validators
        let cfg = match s {
            "shapes" => GeneratorConfig::Shapes {
                n_of_shapes: n_of_shapes.ok_or("Missing n-of-shapes")?.parse().unwrap(),
                sample: sample.ok_or("Missing sample")?.parse().unwrap(),
                obj_size: obj_size.ok_or("Missing object-size")?.parse().unwrap(),
            },
            "noise" => GeneratorConfig::Noise,
            "solid" => GeneratorConfig::Solid {
                sample: sample.ok_or("Missing sample")?.parse().unwrap(),
            },
            _ => return Err(format!("Unknown generator {s}")),
        };
        Ok(cfg)
    }
}
