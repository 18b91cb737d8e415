use std::path::Path;

use thiserror::Error;

use crate::animation::Frame;
use crate::formats::ilda::decode;
use crate::source::{AnimationSource, FileSource, SourceError};
use crate::{AnimationReport, FrameSummary, make_stub_report};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn inspect_file(path: &Path) -> Result<AnimationReport, InspectError> {
    let source = FileSource::open(path)?;
    inspect_source(path, source)
}

pub fn inspect_source<S: AnimationSource>(
    path: &Path,
    mut source: S,
) -> Result<AnimationReport, InspectError> {
    let bytes = source.read_bytes()?;
    let animation = decode(&bytes);

    let mut report = make_stub_report(&path.display().to_string(), bytes.len() as u64);
    report.scan_end = animation.end.to_string();
    report.scan_complete = animation.end.is_complete();
    report.palette_sections = animation.palette_sections as u64;
    report.points_total = animation.points_total() as u64;
    report.frames = animation
        .frames
        .iter()
        .enumerate()
        .map(|(index, frame)| summarize_frame(index, frame))
        .collect();
    Ok(report)
}

fn summarize_frame(index: usize, frame: &Frame) -> FrameSummary {
    let company = &frame.header.company_name;
    FrameSummary {
        index: index as u64,
        format: frame.format.label().to_string(),
        name: frame.header.frame_name.clone(),
        company: (!company.is_empty()).then(|| company.clone()),
        frame_number: frame.header.frame_index,
        total_frames: frame.header.total_frames,
        projector: frame.header.projector,
        declared_records: frame.header.records,
        points: frame.points.len() as u64,
        blanked_points: frame.blanked_points() as u64,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::inspect_source;
    use crate::animation::Rgb;
    use crate::formats::ilda::{Format, IldaWriter, PointRecord};
    use crate::source::MemorySource;

    #[test]
    fn report_summarizes_frames() {
        let mut writer = IldaWriter::new();
        writer
            .names("intro", "acme")
            .palette(&[Rgb::new(0, 255, 0)])
            .frame(
                Format::Indexed3d,
                &[
                    PointRecord::indexed(0, 0, 0),
                    PointRecord::indexed(10, 10, 0).blanked(),
                ],
            )
            .names("outro", "")
            .frame(Format::TrueColor2d, &[PointRecord::rgb(5, 5, Rgb::WHITE)]);
        let bytes = writer.finish();
        let len = bytes.len() as u64;

        let report = inspect_source(Path::new("show.ild"), MemorySource::from(bytes)).unwrap();
        assert_eq!(report.input.bytes, len);
        assert!(report.scan_complete);
        assert_eq!(report.palette_sections, 1);
        assert_eq!(report.points_total, 3);
        assert_eq!(report.frames.len(), 2);

        let intro = &report.frames[0];
        assert_eq!(intro.format, "indexed-3d");
        assert_eq!(intro.name, "intro");
        assert_eq!(intro.company.as_deref(), Some("acme"));
        assert_eq!(intro.blanked_points, 1);
        assert_eq!(intro.total_frames, 2);

        let outro = &report.frames[1];
        assert_eq!(outro.index, 1);
        assert_eq!(outro.frame_number, 1);
        assert!(outro.company.is_none());
    }

    #[test]
    fn truncated_input_is_reported_not_failed() {
        let mut writer = IldaWriter::new();
        writer.frame(Format::Indexed2d, &[PointRecord::indexed(0, 0, 0); 4]);
        let mut bytes = writer.finish();
        bytes.truncate(bytes.len() - 3);

        let report = inspect_source(Path::new("cut.ild"), MemorySource::from(bytes)).unwrap();
        assert!(!report.scan_complete);
        assert_eq!(report.frames[0].points, 3);
        assert!(report.frames[0].is_partial());
        assert!(report.scan_end.contains("3 of 4"));
    }
}
