//! The single table of file formats understood by load and save.
use std::path::Path;

/// Supported raster file formats, keyed by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Ppm,
    Png,
    Jpg,
    Jpeg,
    Bmp,
}

const FORMAT_TABLE: [(&str, FileFormat); 5] = [
    ("ppm", FileFormat::Ppm),
    ("png", FileFormat::Png),
    ("jpg", FileFormat::Jpg),
    ("jpeg", FileFormat::Jpeg),
    ("bmp", FileFormat::Bmp),
];

impl FileFormat {
    /// Look up a format by extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        FORMAT_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(ext))
            .map(|&(_, format)| format)
    }

    /// Format implied by the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        FORMAT_TABLE
            .iter()
            .find(|(_, format)| *format == self)
            .map_or("", |&(name, _)| name)
    }

    pub fn is_ppm(self) -> bool {
        self == FileFormat::Ppm
    }

    /// Codec used by the `image` crate, or `None` for the native PPM codec.
    pub fn image_format(self) -> Option<::image::ImageFormat> {
        match self {
            FileFormat::Ppm => None,
            FileFormat::Png => Some(::image::ImageFormat::Png),
            FileFormat::Jpg | FileFormat::Jpeg => Some(::image::ImageFormat::Jpeg),
            FileFormat::Bmp => Some(::image::ImageFormat::Bmp),
        }
    }

    /// Every format in the table.
    pub fn all() -> impl Iterator<Item = FileFormat> {
        FORMAT_TABLE.iter().map(|&(_, format)| format)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
