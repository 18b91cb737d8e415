use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ildacast_core::{
    AnimationSource, FileSource, Format, IldaWriter, PointRecord, SourceError, inspect_file,
    load_animation_file,
};

fn temp_path(name: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("ildacast_{name}_{unique}.ild"))
}

#[test]
fn file_source_reads_whole_file() {
    let mut writer = IldaWriter::new();
    writer.frame(Format::Indexed3d, &[PointRecord::indexed(1, 2, 3).with_z(4)]);
    let bytes = writer.finish();
    let path = temp_path("read");
    fs::write(&path, &bytes).unwrap();

    let mut source = FileSource::open(&path).unwrap();
    assert_eq!(source.path(), path.as_path());
    let read = source.read_bytes().unwrap();
    let animation = load_animation_file(&path).unwrap();
    let report = inspect_file(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(read, bytes);
    assert_eq!(animation.frames[0].points[0].z, 4);
    assert_eq!(report.frames.len(), 1);
    assert_eq!(report.input.bytes, bytes.len() as u64);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = temp_path("missing");
    let err = match FileSource::open(&path) {
        Ok(_) => panic!("expected missing file to be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}

#[test]
fn non_ilda_file_decodes_to_nothing() {
    let path = temp_path("garbage");
    fs::write(&path, b"this is not an ILDA file, just some text bytes").unwrap();
    let animation = load_animation_file(&path).unwrap();
    let _ = fs::remove_file(&path);
    assert!(animation.frames.is_empty());
}
