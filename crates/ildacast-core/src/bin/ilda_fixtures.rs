use std::env;
use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ildacast_core::{Format, IldaWriter, PointRecord, Rgb};

const RADIUS: f64 = 20_000.0;

fn main() -> ExitCode {
    let root = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests").join("golden"));
    if let Err(err) = run(&root) {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(root: &Path) -> Result<(), String> {
    write_fixture(&root.join("square_indexed"), square_indexed())?;
    write_fixture(&root.join("circle_true_color"), circle_true_color())?;
    write_fixture(&root.join("palette_swap"), palette_swap())?;
    Ok(())
}

fn write_fixture(dir: &Path, bytes: Vec<u8>) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.ild");
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn square_corners() -> [(i16, i16); 4] {
    let r = RADIUS as i16;
    [(-r, -r), (r, -r), (r, r), (-r, r)]
}

/// One 3D indexed frame tracing a square, with a blanked move to the start.
fn square_indexed() -> Vec<u8> {
    let corners = square_corners();
    let mut records = vec![PointRecord::indexed(corners[0].0, corners[0].1, 0).blanked()];
    for (x, y) in corners.iter().chain(std::iter::once(&corners[0])) {
        records.push(PointRecord::indexed(*x, *y, 0));
    }

    let mut writer = IldaWriter::new();
    writer
        .names("square", "ildacast")
        .frame(Format::Indexed3d, &records)
        .terminator();
    writer.finish()
}

/// Twelve 2D true-color frames of a circle cycling through hues.
fn circle_true_color() -> Vec<u8> {
    const FRAMES: usize = 12;
    const POINTS: usize = 120;

    let mut writer = IldaWriter::new();
    writer.names("circle", "ildacast");
    for frame in 0..FRAMES {
        let records: Vec<PointRecord> = (0..=POINTS)
            .map(|i| {
                let angle = TAU * i as f64 / POINTS as f64;
                let hue = (i + frame * POINTS / FRAMES) % POINTS;
                PointRecord::rgb(
                    (RADIUS * angle.cos()) as i16,
                    (RADIUS * angle.sin()) as i16,
                    hue_color(hue as f64 / POINTS as f64),
                )
            })
            .collect();
        writer.frame(Format::TrueColor2d, &records);
    }
    writer.terminator();
    writer.finish()
}

/// The same 2D indexed square twice, with a palette change in between.
fn palette_swap() -> Vec<u8> {
    let records: Vec<PointRecord> = square_corners()
        .iter()
        .map(|(x, y)| PointRecord::indexed(*x, *y, 1))
        .collect();

    let mut writer = IldaWriter::new();
    writer
        .names("swap", "ildacast")
        .frame(Format::Indexed2d, &records)
        .palette(&[Rgb::BLACK, Rgb::new(255, 0, 0)])
        .frame(Format::Indexed2d, &records)
        .terminator();
    writer.finish()
}

fn hue_color(hue: f64) -> Rgb {
    let sector = hue * 6.0;
    let fraction = sector.fract();
    let rising = (fraction * 255.0) as u8;
    let falling = 255 - rising;
    match sector as u32 % 6 {
        0 => Rgb::new(255, rising, 0),
        1 => Rgb::new(falling, 255, 0),
        2 => Rgb::new(0, 255, rising),
        3 => Rgb::new(0, falling, 255),
        4 => Rgb::new(rising, 0, 255),
        _ => Rgb::new(255, 0, falling),
    }
}
