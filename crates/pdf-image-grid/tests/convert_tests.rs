mod common;

use common::{write_garbage, write_png, write_svg};
use pdf_image_grid::layout::{GridPosition, Rect, cell_bounds, create_grid_layout};
use pdf_image_grid::render::{DrawCommand, RecordingCanvas};
use pdf_image_grid::*;
use std::path::Path;
use tempfile::tempdir;

fn recording_writer(dir: &Path) -> DocumentWriter<RecordingCanvas> {
    DocumentWriter::new(RecordingCanvas::new(), dir.join("out.pdf"), true)
}

fn statuses(events: &[ConversionEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            ConversionEvent::Status(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

fn progress(events: &[ConversionEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            ConversionEvent::Progress(p) => Some(*p),
            _ => None,
        })
        .collect()
}

fn contains(outer: &Rect, inner: &Rect) -> bool {
    let eps = 1e-2;
    inner.x >= outer.x - eps
        && inner.y >= outer.y - eps
        && inner.right() <= outer.right() + eps
        && inner.top() <= outer.top() + eps
}

#[test]
fn test_ten_images_span_two_pages() {
    let dir = tempdir().unwrap();
    let entries: Vec<ImageEntry> = (0..10)
        .map(|i| ImageEntry::new(write_svg(dir.path(), &format!("icon{:02}.svg", i), 100, 50)))
        .collect();
    let options = ConversionOptions::default();
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &options, &mut events);

    assert!(result.success, "{}", result.message);
    assert_eq!(result.message, "Conversion completed successfully!");
    assert_eq!(result.statistics.drawn, 10);
    assert_eq!(result.statistics.pages, 2);

    let pages = writer.canvas().pages();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 9);
    assert_eq!(pages[1].len(), 1);
    assert_eq!(pages[1][0].name(), "icon09.svg");

    // The lone image on page 2 sits in the top-left cell
    let grid = create_grid_layout(&options);
    let cell = cell_bounds(&grid, GridPosition::new(0, 0));
    match &pages[1][0] {
        DrawCommand::Vector { origin, .. } => {
            assert!(origin.0 >= cell.x - 1e-3 && origin.0 < cell.right());
            assert!(origin.1 >= cell.y - 1e-3 && origin.1 < cell.top());
        }
        other => panic!("Expected vector draw, got {:?}", other),
    }

    let statuses = statuses(&events);
    assert!(statuses.contains(&"Processing page 1..."));
    assert!(statuses.contains(&"Processing page 2..."));
    assert_eq!(progress(&events).last(), Some(&100));
    assert!(matches!(events.last(), Some(ConversionEvent::Complete(r)) if r.success));
}

#[test]
fn test_empty_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.pdf");
    let mut events = Vec::new();

    let result = convert(&[], &output, &ConversionOptions::default(), &mut events);

    assert!(!result.success);
    assert!(result.message.contains("No files selected"));
    assert!(!output.exists());
    assert_eq!(events, vec![ConversionEvent::Complete(result)]);
}

#[test]
fn test_invalid_options_fail_before_drawing() {
    let dir = tempdir().unwrap();
    let entries = vec![ImageEntry::new(write_svg(dir.path(), "a.svg", 10, 10))];
    let options = ConversionOptions {
        images_per_page: 0,
        ..Default::default()
    };
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &options, &mut events);

    assert!(!result.success);
    assert_eq!(writer.state(), WriterState::Empty);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_convert_with_invalid_options_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.pdf");
    let entries = vec![ImageEntry::new(write_svg(dir.path(), "a.svg", 10, 10))];
    let options = ConversionOptions {
        images_per_page: 13,
        ..Default::default()
    };
    let mut events = Vec::new();

    let result = convert(&entries, &output, &options, &mut events);

    assert!(!result.success);
    assert!(result.message.starts_with("Conversion failed: Invalid configuration"));
    assert!(!output.exists());
    assert_eq!(events, vec![ConversionEvent::Complete(result)]);
}

#[test]
fn test_corrupt_image_is_reported_and_skipped() {
    let dir = tempdir().unwrap();
    let mut entries: Vec<ImageEntry> = (0..4)
        .map(|i| ImageEntry::new(write_svg(dir.path(), &format!("ok{}.svg", i), 60, 60)))
        .collect();
    entries.insert(2, ImageEntry::new(write_garbage(dir.path(), "broken.svg")));
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &ConversionOptions::default(), &mut events);

    assert!(result.success);
    assert_eq!(result.statistics.drawn, 4);
    assert_eq!(result.statistics.failed, 1);
    assert_eq!(writer.canvas().draw_count(), 4);

    let errors: Vec<_> = statuses(&events)
        .into_iter()
        .filter(|s| s.starts_with("Error processing broken.svg"))
        .collect();
    assert_eq!(errors.len(), 1);

    let progress = progress(&events);
    assert_eq!(progress.len(), 5);
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100));
}

#[test]
fn test_mixed_images_fit_inside_their_cells() {
    let dir = tempdir().unwrap();
    // (name, width, height) for a full page of vectors and rasters
    let fixtures = [
        ("wide.svg", 400, 100),
        ("tall.png", 30, 90),
        ("huge.png", 2000, 1000),
        ("square.svg", 50, 50),
        ("thin.png", 300, 4),
        ("portrait.svg", 90, 400),
        ("tiny.png", 2, 3),
        ("banner.svg", 1000, 60),
        ("photo.png", 640, 480),
    ];
    let entries: Vec<ImageEntry> = fixtures
        .iter()
        .map(|&(name, w, h)| {
            let path = if name.ends_with(".svg") {
                write_svg(dir.path(), name, w, h)
            } else {
                write_png(dir.path(), name, w, h)
            };
            ImageEntry::new(path)
        })
        .collect();
    let options = ConversionOptions::default();
    let grid = create_grid_layout(&options);
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &options, &mut events);
    assert!(result.success);
    assert_eq!(result.statistics.drawn, 9);

    let pages = writer.canvas().pages();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].len(), 9);

    for (slot, (command, &(name, w, h))) in pages[0].iter().zip(&fixtures).enumerate() {
        assert_eq!(command.name(), name);
        let cell = cell_bounds(&grid, GridPosition::new(slot / 3, slot % 3));
        let drawn = match command {
            DrawCommand::Raster { dest, .. } => *dest,
            DrawCommand::Vector { origin, scale, .. } => {
                Rect::new(origin.0, origin.1, w as f32 * scale, h as f32 * scale)
            }
        };

        assert!(contains(&cell, &drawn), "{} {:?} outside {:?}", name, drawn, cell);
        assert!((drawn.center_x() - cell.center_x()).abs() < 1e-2, "{}", name);
        assert!((drawn.center_y() - cell.center_y()).abs() < 1e-2, "{}", name);
        // Aspect ratio preserved and one side fills the cell
        let skew = drawn.width / w as f32 - drawn.height / h as f32;
        assert!(skew.abs() < 1e-3, "{} skewed by {}", name, skew);
        assert!(
            (drawn.width - cell.width).abs() < 1e-2 || (drawn.height - cell.height).abs() < 1e-2,
            "{}",
            name
        );
    }

    assert!(
        statuses(&events)
            .iter()
            .any(|s| s.starts_with("Processed: tall.png (raster scale:"))
    );
    assert!(
        statuses(&events)
            .iter()
            .any(|s| s.starts_with("Processed: wide.svg (SVG scale:"))
    );
}

#[test]
fn test_unsupported_file_is_skipped_but_counted() {
    let dir = tempdir().unwrap();
    let gif = dir.path().join("anim.gif");
    std::fs::write(&gif, b"GIF89a").unwrap();
    let entries = vec![
        ImageEntry::new(write_svg(dir.path(), "a.svg", 10, 10)),
        ImageEntry::new(gif),
    ];
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &ConversionOptions::default(), &mut events);

    assert!(result.success);
    assert_eq!(result.statistics.skipped, 1);
    assert!(statuses(&events).contains(&"Skipped: anim.gif (unsupported format)"));
    assert_eq!(progress(&events), vec![50, 100]);
}

#[test]
fn test_framed_layout_draws_only_vectors() {
    let dir = tempdir().unwrap();
    let entries = vec![
        ImageEntry::new(write_png(dir.path(), "photo.png", 20, 20)),
        ImageEntry::new(write_svg(dir.path(), "logo.svg", 50, 50)),
    ];
    let options = ConversionOptions {
        layout: LayoutStyle::Framed,
        ..Default::default()
    };
    let grid = create_grid_layout(&options);
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &options, &mut events);

    assert!(result.success);
    assert!(statuses(&events).contains(&"Skipped: photo.png (unsupported format)"));

    let page = &writer.canvas().pages()[0];
    assert_eq!(page.len(), 1);
    match &page[0] {
        DrawCommand::Vector { name, origin, scale } => {
            assert_eq!(name, "logo.svg");
            // Small drawings are enlarged at most twice in high quality mode
            assert!((scale - 2.0).abs() < 1e-4);
            let cell = cell_bounds(&grid, GridPosition::new(0, 1));
            assert!((origin.0 + 50.0 - cell.center_x()).abs() < 1e-2);
        }
        other => panic!("Expected vector draw, got {:?}", other),
    }
}

#[test]
fn test_draft_mode_skips_upscale_cap() {
    let dir = tempdir().unwrap();
    let entries = vec![ImageEntry::new(write_svg(dir.path(), "logo.svg", 50, 50))];
    let options = ConversionOptions {
        layout: LayoutStyle::Framed,
        high_quality: false,
        ..Default::default()
    };
    let mut writer = recording_writer(dir.path());

    convert_with(&entries, &mut writer, &options, &mut Vec::new());

    assert_eq!(writer.canvas().compressed(), Some(false));
    match &writer.canvas().pages()[0][0] {
        DrawCommand::Vector { scale, .. } => assert!(*scale > 2.0),
        other => panic!("Expected vector draw, got {:?}", other),
    }
}

#[test]
fn test_slots_past_the_grid_are_skipped() {
    let dir = tempdir().unwrap();
    let entries: Vec<ImageEntry> = (0..12)
        .map(|i| ImageEntry::new(write_svg(dir.path(), &format!("s{:02}.svg", i), 20, 20)))
        .collect();
    let options = ConversionOptions {
        images_per_page: 12,
        ..Default::default()
    };
    let mut writer = recording_writer(dir.path());
    let mut events = Vec::new();

    let result = convert_with(&entries, &mut writer, &options, &mut events);

    assert!(result.success);
    assert_eq!(result.statistics.drawn, 9);
    assert_eq!(result.statistics.skipped, 3);
    assert_eq!(result.statistics.pages, 1);

    let statuses = statuses(&events);
    assert_eq!(
        statuses[0],
        "Warning: images per page is not 9. Layout may be unexpected."
    );
    assert!(statuses.contains(&"Skipped: s11.svg (no free cell on page 1)"));
    assert_eq!(progress(&events).last(), Some(&100));
}

#[test]
fn test_small_batches_use_more_pages() {
    let dir = tempdir().unwrap();
    let entries: Vec<ImageEntry> = (0..5)
        .map(|i| ImageEntry::new(write_svg(dir.path(), &format!("p{}.svg", i), 20, 20)))
        .collect();
    let options = ConversionOptions {
        images_per_page: 2,
        ..Default::default()
    };
    let mut writer = recording_writer(dir.path());

    let result = convert_with(&entries, &mut writer, &options, &mut Vec::new());

    assert!(result.success);
    let sizes: Vec<usize> = writer.canvas().pages().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn test_convert_writes_pdf() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("grid.pdf");
    let entries = vec![
        ImageEntry::new(write_svg(dir.path(), "a.svg", 80, 40)),
        ImageEntry::new(write_png(dir.path(), "b.png", 16, 16)),
        ImageEntry::new(write_svg(dir.path(), "c.svg", 40, 80)),
    ];
    let options = ConversionOptions {
        images_per_page: 2,
        page_size: PageSize::Letter,
        ..Default::default()
    };

    let result = convert(&entries, &output, &options, &mut Vec::new());

    assert!(result.success, "{}", result.message);
    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_convert_reports_unwritable_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("grid.pdf");
    let entries = vec![ImageEntry::new(write_svg(dir.path(), "a.svg", 10, 10))];
    let mut events = Vec::new();

    let result = convert(&entries, &output, &ConversionOptions::default(), &mut events);

    assert!(!result.success);
    assert!(result.message.starts_with("Conversion failed: Failed to write"));
    assert!(matches!(events.last(), Some(ConversionEvent::Complete(r)) if !r.success));
}

#[tokio::test]
async fn test_spawn_conversion_streams_events() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("bg.pdf");
    let entries = ImageEntry::collect_unique([
        write_svg(dir.path(), "a.svg", 30, 30),
        write_png(dir.path(), "b.png", 30, 30),
    ]);

    let mut handle = spawn_conversion(entries, output.clone(), ConversionOptions::default());

    let mut events = Vec::new();
    while let Some(event) = handle.events.recv().await {
        events.push(event);
    }
    let result = handle.wait().await;

    assert!(result.success, "{}", result.message);
    assert!(output.exists());
    assert_eq!(events.last(), Some(&ConversionEvent::Complete(result)));
    assert_eq!(progress(&events), vec![50, 100]);
}
