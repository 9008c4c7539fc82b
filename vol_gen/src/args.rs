//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

pub fn is_positive_number(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n > 0 {
                Ok(())
            } else {
                Err("Number must be greater than 0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

// Each dimension gets encoded as a signed 16bit integer
pub fn fits_dimension(num: &str) -> Result<(), String> {
    is_positive_number(num)?;
    match num.parse::<i16>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Dimension does not fit in range <1;32767>".into()),
    }
}

pub fn fits_i16(num: &str) -> Result<(), String> {
    match num.parse::<i16>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <-32768;32767>".into()),
    }
}

const GENERATOR_NAMES: &[&str] = &["shapes", "noise", "solid"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-gen")
        .version("0.1.0")
        .about("Synthetic volume generator for the raw i16 stream format")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(fits_dimension),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .requires_ifs(&[
                    ("solid", "sample"),
                    ("shapes", "n-of-shapes"),
                    ("shapes", "sample"),
                    ("shapes", "object-size"),
                ])
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("sample")
                .help("Value of generated objects")
                .long("sample")
                .value_name("VALUE")
                .validator(fits_i16),
        )
        .arg(
            Arg::new("object-size")
                .help("Size of individual generated objects")
                .long("object-size")
                .value_name("SIDE")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in volume")
                .long("n-of-shapes")
                .value_name("N")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.i16vol")),
        )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimension_limits() {
        assert!(fits_dimension("1").is_ok());
        assert!(fits_dimension("32767").is_ok());
        assert!(fits_dimension("32768").is_err());
        assert!(fits_dimension("0").is_err());
        assert!(fits_dimension("-4").is_err());
    }

    #[test]
    fn sample_accepts_negative() {
        assert!(fits_i16("-1000").is_ok());
        assert!(fits_i16("40000").is_err());
    }
}
