use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const SUPPORTED_DPI: [u32; 3] = [150, 300, 600];
pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_COMBINED_FILE: &str = "Report.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Pages are rendered to images and placed on full pages.
    #[default]
    Raster,
    /// Accepted in settings files but refused by the exporter.
    Vector,
}

impl ExportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportMode::Raster => "raster",
            ExportMode::Vector => "vector",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_folder: PathBuf,
    pub start_sheet: i32,
    pub dpi: u32,
    /// One combined document instead of one document per sheet.
    pub combined: bool,
    pub combined_file_name: String,
    pub mode: ExportMode,
    pub show_mesh: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_folder: PathBuf::from("."),
            start_sheet: 1,
            dpi: DEFAULT_DPI,
            combined: true,
            combined_file_name: DEFAULT_COMBINED_FILE.to_string(),
            mode: ExportMode::Raster,
            show_mesh: true,
        }
    }
}

impl ExportSettings {
    /// Start sheet clamped to 1 and above, unsupported DPI replaced by 300,
    /// blank combined file name replaced by the default.
    pub fn normalized(&self) -> Self {
        let mut settings = self.clone();
        settings.start_sheet = settings.start_sheet.max(1);
        if !SUPPORTED_DPI.contains(&settings.dpi) {
            log::debug!("unsupported dpi {}, using {DEFAULT_DPI}", settings.dpi);
            settings.dpi = DEFAULT_DPI;
        }
        if settings.combined_file_name.trim().is_empty() {
            settings.combined_file_name = DEFAULT_COMBINED_FILE.to_string();
        }
        settings
    }

    pub fn first_sheet(&self) -> u32 {
        self.start_sheet.max(1).unsigned_abs()
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_folder.join(&self.combined_file_name)
    }
}

pub fn save_settings(path: impl AsRef<Path>, settings: &ExportSettings) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let bytes = serde_json::to_vec_pretty(settings)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    fs::write(path, bytes)
}

pub fn load_settings(path: impl AsRef<Path>) -> io::Result<ExportSettings> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_rules() {
        let settings = ExportSettings {
            start_sheet: -3,
            dpi: 72,
            combined_file_name: "  ".to_string(),
            ..ExportSettings::default()
        }
        .normalized();
        assert_eq!(settings.start_sheet, 1);
        assert_eq!(settings.first_sheet(), 1);
        assert_eq!(settings.dpi, DEFAULT_DPI);
        assert_eq!(settings.combined_file_name, DEFAULT_COMBINED_FILE);

        let keep = ExportSettings {
            start_sheet: 7,
            dpi: 600,
            ..ExportSettings::default()
        };
        assert_eq!(keep.normalized(), keep);
    }

    #[test]
    fn settings_roundtrip_and_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("export.json");
        let settings = ExportSettings {
            output_folder: PathBuf::from("out"),
            combined: false,
            mode: ExportMode::Vector,
            ..ExportSettings::default()
        };
        save_settings(&path, &settings).expect("save should succeed");
        assert_eq!(load_settings(&path).expect("load should succeed"), settings);

        fs::write(&path, r#"{"dpi": 150}"#).expect("write partial");
        let partial = load_settings(&path).expect("partial load");
        assert_eq!(partial.dpi, 150);
        assert_eq!(partial.start_sheet, 1);
        assert!(partial.combined);
        assert_eq!(partial.combined_file_name, "Report.pdf");
        assert_eq!(partial.mode, ExportMode::Raster);
    }

    #[test]
    fn invalid_payload_is_invalid_data() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{invalid json").expect("write invalid payload");
        let err = load_settings(&path).expect_err("invalid JSON should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = load_settings(dir.path().join("missing.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
