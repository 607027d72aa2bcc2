//! Batch driver.
//!
//! Processes every map definition in the maps directory, one file and one
//! declaration at a time. Failures are reported and isolated to the file or
//! declaration they occur in; a run never aborts part way.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::scan_directory;
use crate::document::{self, parse_declaration, Declaration, Node};
use crate::error::Result;
use crate::naming::PathAllocator;
use crate::output::{display_path, plural, Printer};
use crate::render::{TileCompositor, TileCopier, TileSource};
use crate::settings::Settings;

/// Counts of what a batch run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Definition files read and parsed.
    pub files: usize,
    /// Definition files that could not be read or parsed.
    pub failed_files: usize,
    /// Grid images written.
    pub composed: usize,
    /// Tiles listed in written grids that were missing, unreadable or outside the grid.
    pub blank_tiles: usize,
    /// Single tiles copied.
    pub copied: usize,
    /// Declarations skipped as invalid, or single tiles whose source is missing.
    pub skipped: usize,
    /// Declarations whose output could not be written.
    pub errors: usize,
    /// Every file written, in order.
    pub outputs: Vec<PathBuf>,
}

impl BatchReport {
    /// Whether every file and declaration went through cleanly.
    pub fn is_clean(&self) -> bool {
        self.failed_files == 0 && self.skipped == 0 && self.errors == 0 && self.blank_tiles == 0
    }
}

/// One batch run over a maps directory.
pub struct Batch<'a> {
    settings: Settings,
    compositor: TileCompositor,
    copier: TileCopier,
    printer: &'a Printer,
}

impl<'a> Batch<'a> {
    pub fn new(settings: Settings, printer: &'a Printer) -> Self {
        let tiles = TileSource::from_settings(&settings);
        // Grids are re-encoded; copies keep the source bytes and so its extension
        let grid_names = PathAllocator::new(&settings.output_dir, settings.output_extension.as_str());
        let copy_names = PathAllocator::new(&settings.output_dir, settings.tile_extension.as_str());

        Self {
            compositor: TileCompositor::new(tiles.clone(), grid_names, settings.tile_size)
                .with_pixel_limit(settings.max_canvas_pixels),
            copier: TileCopier::new(tiles, copy_names),
            settings,
            printer,
        }
    }

    /// Process every map definition file.
    pub fn run(&self) -> BatchReport {
        let mut report = BatchReport::default();
        let maps_dir = &self.settings.maps_dir;

        if !maps_dir.is_dir() {
            self.printer.error(
                "Missing",
                &format!("maps folder not found: {}", display_path(maps_dir)),
            );
            return report;
        }

        let output_dir = &self.settings.output_dir;
        if let Err(e) = fs::create_dir_all(output_dir) {
            self.printer.error(
                "Failed",
                &format!("cannot create {}: {}", display_path(output_dir), e),
            );
            return report;
        }

        let scan = scan_directory(maps_dir, &self.settings.config_extension);
        if scan.is_empty() {
            self.printer.warning(
                "Empty",
                &format!(
                    "no .{} files found in {}",
                    self.settings.config_extension,
                    display_path(maps_dir)
                ),
            );
            return report;
        }

        for path in &scan.files {
            if let Err(e) = self.process_file(path, &mut report) {
                self.printer.error("Failed", &format!("{}: {}", file_label(path), e));
                report.failed_files += 1;
            }
        }

        self.printer.success(
            "Finished",
            &format!(
                "{}, {} from {}",
                plural(report.composed, "image composed", "images composed"),
                plural(report.copied, "tile copied", "tiles copied"),
                plural(report.files, "file", "files"),
            ),
        );

        report
    }

    /// Load one definition file and process all of its declarations.
    ///
    /// Only loading can fail; declaration problems are reported and counted.
    pub fn process_file(&self, path: &Path, report: &mut BatchReport) -> Result<()> {
        self.printer.file("Processing", &file_label(path));

        let doc = document::load(path)?;
        report.files += 1;

        for entry in doc.entries() {
            self.process_entry(entry, report);
        }

        Ok(())
    }

    /// Dispatch one map list entry to the compositor or the copier.
    pub fn process_entry(&self, entry: &Node, report: &mut BatchReport) {
        let declaration = match parse_declaration(entry) {
            Ok(declaration) => declaration,
            Err(e) => {
                self.printer.warning("Skipping", &e.to_string());
                report.skipped += 1;
                return;
            }
        };

        match &declaration {
            Declaration::Grid(grid) => match self.compositor.compose(grid, self.printer) {
                Ok(composed) => {
                    report.composed += 1;
                    report.blank_tiles += composed.placement.skipped();
                    report.outputs.push(composed.output);
                }
                Err(e) => {
                    self.printer.error("Failed", &format!("{}: {}", grid.name, e));
                    report.errors += 1;
                }
            },
            Declaration::Single(single) => match self.copier.copy_single(single, self.printer) {
                Ok(Some(output)) => {
                    report.copied += 1;
                    report.outputs.push(output);
                }
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    self.printer.error("Failed", &format!("{}: {}", single.name, e));
                    report.errors += 1;
                }
            },
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn workspace() -> (TempDir, Settings) {
        let dir = tempdir().unwrap();
        let settings = Settings::default().rooted_at(dir.path());
        fs::create_dir_all(&settings.tiles_dir).unwrap();
        fs::create_dir_all(&settings.maps_dir).unwrap();
        (dir, settings)
    }

    fn write_tile(settings: &Settings, id: &str, colour: Rgba<u8>) {
        RgbaImage::from_pixel(128, 128, colour)
            .save(settings.tiles_dir.join(format!("map{}.png", id)))
            .unwrap();
    }

    fn write_maps(settings: &Settings, file: &str, source: &str) {
        fs::write(settings.maps_dir.join(file), source).unwrap();
    }

    fn run(settings: &Settings) -> BatchReport {
        let printer = Printer::silent();
        Batch::new(settings.clone(), &printer).run()
    }

    #[test]
    fn test_world_and_solo() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_tile(&settings, "2", BLUE);
        write_tile(&settings, "7", RED);
        write_maps(
            &settings,
            "world.yml",
            r#"
PlayerMapStore:
  mapList:
    - name: World1
      columns: 2
      rows: 1
      mapIDs: [1, 2]
    - name: Solo
      mapID: 7
"#,
        );

        let report = run(&settings);

        assert_eq!(report.files, 1);
        assert_eq!(report.composed, 1);
        assert_eq!(report.copied, 1);
        assert!(report.is_clean());

        let world = image::open(settings.output_dir.join("World1.png")).unwrap().to_rgba8();
        assert_eq!(world.dimensions(), (256, 128));
        assert_eq!(*world.get_pixel(10, 10), RED);
        assert_eq!(*world.get_pixel(200, 100), BLUE);

        assert_eq!(
            fs::read(settings.output_dir.join("Solo.png")).unwrap(),
            fs::read(settings.tiles_dir.join("map7.png")).unwrap()
        );
    }

    #[test]
    fn test_second_run_never_overwrites() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_tile(&settings, "7", BLUE);
        write_maps(
            &settings,
            "world.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Grid, mapIDs: [1]}\n    - {name: Solo, mapID: 7}\n",
        );

        run(&settings);
        let grid_before = fs::read(settings.output_dir.join("Grid.png")).unwrap();
        let solo_before = fs::read(settings.output_dir.join("Solo.png")).unwrap();

        let second = run(&settings);

        assert_eq!(
            second.outputs,
            vec![
                settings.output_dir.join("Grid_1.png"),
                settings.output_dir.join("Solo_1.png"),
            ]
        );
        assert_eq!(fs::read(settings.output_dir.join("Grid.png")).unwrap(), grid_before);
        assert_eq!(fs::read(settings.output_dir.join("Solo.png")).unwrap(), solo_before);
    }

    #[test]
    fn test_same_name_within_one_run() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_maps(
            &settings,
            "dupes.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Dup, mapID: 1}\n    - {name: Dup, mapID: 1}\n",
        );

        let report = run(&settings);

        assert_eq!(
            report.outputs,
            vec![
                settings.output_dir.join("Dup.png"),
                settings.output_dir.join("Dup_1.png"),
            ]
        );
    }

    #[test]
    fn test_invalid_entries_do_not_stop_processing() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_maps(
            &settings,
            "mixed.yml",
            r#"
PlayerMapStore:
  mapList:
    - name: NoTiles
    - just a string
    - name: After
      mapID: 1
"#,
        );

        let report = run(&settings);

        assert_eq!(report.skipped, 2);
        assert_eq!(report.copied, 1);
        assert!(!settings.output_dir.join("NoTiles.png").exists());
        assert!(settings.output_dir.join("After.png").exists());
    }

    #[test]
    fn test_malformed_file_is_isolated() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_maps(&settings, "a_broken.yml", "PlayerMapStore: [unclosed");
        write_maps(
            &settings,
            "b_good.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Good, mapID: 1}\n",
        );

        let report = run(&settings);

        assert_eq!(report.failed_files, 1);
        assert_eq!(report.files, 1);
        assert_eq!(report.copied, 1);
        assert!(settings.output_dir.join("Good.png").exists());
    }

    #[test]
    fn test_missing_tile_still_produces_grid() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_maps(
            &settings,
            "gap.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Gap, columns: 2, mapIDs: [1, 99]}\n",
        );

        let report = run(&settings);

        assert_eq!(report.composed, 1);
        assert_eq!(report.blank_tiles, 1);
        assert!(!report.is_clean());
        let img = image::open(settings.output_dir.join("Gap.png")).unwrap().to_rgba8();
        assert_eq!(*img.get_pixel(0, 0), RED);
        assert_eq!(img.get_pixel(200, 64).0[3], 0);
    }

    #[test]
    fn test_oversized_grid_does_not_stop_later_entries() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_maps(
            &settings,
            "huge.yml",
            r#"
PlayerMapStore:
  mapList:
    - name: Vast
      columns: 30000
      rows: 30000
      mapIDs: [1]
    - name: After
      mapID: 1
"#,
        );

        let report = run(&settings);

        assert_eq!(report.errors, 1);
        assert_eq!(report.composed, 0);
        assert_eq!(report.copied, 1);
        assert!(!settings.output_dir.join("Vast.png").exists());
        assert!(settings.output_dir.join("After.png").exists());
    }

    #[test]
    fn test_jpeg_tiles_stitch_to_png() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            tile_size: 8,
            tile_extension: "jpg".to_string(),
            ..Settings::default()
        }
        .rooted_at(dir.path());
        fs::create_dir_all(&settings.tiles_dir).unwrap();
        fs::create_dir_all(&settings.maps_dir).unwrap();
        image::RgbImage::from_pixel(8, 8, image::Rgb([0, 0, 255]))
            .save(settings.tiles_dir.join("map1.jpg"))
            .unwrap();
        write_maps(
            &settings,
            "jpeg.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Grid, columns: 2, mapIDs: [1, 1]}\n    - {name: Solo, mapID: 1}\n",
        );

        let report = run(&settings);

        assert_eq!(report.errors, 0);
        assert_eq!(
            report.outputs,
            vec![
                settings.output_dir.join("Grid.png"),
                settings.output_dir.join("Solo.jpg"),
            ]
        );
        let img = image::open(settings.output_dir.join("Grid.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (16, 8));
        assert_eq!(img.get_pixel(12, 4).0[3], 255);
        assert_eq!(
            fs::read(settings.output_dir.join("Solo.jpg")).unwrap(),
            fs::read(settings.tiles_dir.join("map1.jpg")).unwrap()
        );
    }

    #[test]
    fn test_missing_single_tile_is_skipped() {
        let (_dir, settings) = workspace();
        write_maps(
            &settings,
            "solo.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Solo, mapID: 404}\n",
        );

        let report = run(&settings);

        assert_eq!(report.copied, 0);
        assert_eq!(report.skipped, 1);
        assert!(report.outputs.is_empty());
    }

    #[test]
    fn test_name_falls_back_to_id_then_unnamed() {
        let (_dir, settings) = workspace();
        write_tile(&settings, "1", RED);
        write_maps(
            &settings,
            "names.yml",
            "PlayerMapStore:\n  mapList:\n    - {id: Ident, mapID: 1}\n    - {mapID: 1}\n",
        );

        run(&settings);

        assert!(settings.output_dir.join("Ident.png").exists());
        assert!(settings.output_dir.join("Unnamed.png").exists());
    }

    #[test]
    fn test_missing_maps_dir() {
        let dir = tempdir().unwrap();
        let settings = Settings::default().rooted_at(dir.path());

        let report = run(&settings);

        assert_eq!(report, BatchReport::default());
        assert!(!settings.output_dir.exists());
    }

    #[test]
    fn test_no_definition_files() {
        let (_dir, settings) = workspace();
        write_maps(&settings, "readme.txt", "nothing here");

        let report = run(&settings);

        assert_eq!(report.files, 0);
        assert!(settings.output_dir.is_dir());
    }

    #[test]
    fn test_document_without_store_has_no_outputs() {
        let (_dir, settings) = workspace();
        write_maps(&settings, "other.yml", "SomethingElse:\n  mapList: []\n");

        let report = run(&settings);

        assert_eq!(report.files, 1);
        assert!(report.outputs.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_custom_prefix_and_tile_size() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            tile_size: 8,
            tile_prefix: "tile_".to_string(),
            ..Settings::default()
        }
        .rooted_at(dir.path());
        fs::create_dir_all(&settings.tiles_dir).unwrap();
        fs::create_dir_all(&settings.maps_dir).unwrap();
        RgbaImage::from_pixel(8, 8, RED)
            .save(settings.tiles_dir.join("tile_a.png"))
            .unwrap();
        write_maps(
            &settings,
            "small.yml",
            "PlayerMapStore:\n  mapList:\n    - {name: Small, columns: 1, rows: 2, mapIDs: [a]}\n",
        );

        run(&settings);

        let img = image::open(settings.output_dir.join("Small.png")).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 16));
        assert_eq!(*img.get_pixel(0, 0), RED);
        assert_eq!(img.get_pixel(0, 8).0[3], 0);
    }
}
