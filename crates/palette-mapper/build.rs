use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Entries in the linear -> sRGB encode table.
const ENCODE_ENTRIES: usize = 4096;

/// IEC 61966-2-1 decode curve
fn decode(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 encode curve
fn encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(
    out: &mut impl Write,
    name: &str,
    doc: &str,
    values: impl ExactSizeIterator<Item = f64>,
) -> std::io::Result<()> {
    writeln!(out, "/// {doc}")?;
    writeln!(out, "pub static {name}: [f32; {}] = [", values.len())?;
    for (i, value) in values.enumerate() {
        if i > 0 && i % 8 == 0 {
            writeln!(out)?;
        }
        write!(out, "    {:.9},", value as f32)?;
    }
    writeln!(out, "\n];\n")
}

fn main() -> std::io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("gamma_lut.rs");
    let mut out = BufWriter::new(File::create(dest)?);

    // 8-bit samples decode exactly, one entry per code value.
    write_table(
        &mut out,
        "SRGB8_TO_LINEAR",
        "Linear value for every 8-bit sRGB code value",
        (0..256).map(|i| decode(i as f64 / 255.0)),
    )?;

    write_table(
        &mut out,
        "LINEAR_TO_SRGB",
        "Index: linear value * 4095.0, Value: sRGB value",
        (0..ENCODE_ENTRIES).map(|i| encode(i as f64 / (ENCODE_ENTRIES - 1) as f64)),
    )?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
