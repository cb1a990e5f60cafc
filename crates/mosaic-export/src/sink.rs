//! Document sink contract: raster pages in, documents on disk out.

use std::io;
use std::path::Path;

const MM_PER_INCH: f64 = 25.4;

/// Physical page format every exported page is stretched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    #[default]
    A4,
}

impl PageFormat {
    /// Portrait width and height in millimetres.
    pub fn size_mm(self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (210.0, 297.0),
        }
    }

    /// Raster size in pixels at `dpi`, so renderers and sinks agree on the image size.
    pub fn pixel_size(self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.size_mm();
        let px = |mm: f64| (mm / MM_PER_INCH * f64::from(dpi)).round_ties_even() as u32;
        (px(w), px(h))
    }
}

/// Builds documents out of full-page raster images.
///
/// Implementations own the document encoding; the orchestrator only decides
/// when documents start, which pages they get and where they are saved.
pub trait DocumentSink {
    type Document;

    fn create(&mut self) -> Self::Document;

    /// Appends one full page showing `image`.
    fn add_page(&mut self, doc: &mut Self::Document, image: &[u8], format: PageFormat) -> io::Result<()>;

    fn save(&mut self, doc: Self::Document, path: &Path) -> io::Result<()>;
}
