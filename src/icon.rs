//! Stash It application icon: composition and batch generation
use crate::{Arrow, Bookmark, Error, Fill, PixelBuffer, RGBA, RoundedRect, Scalar, Shape, encode};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Size of the canvas all icon dimensions are designed for
pub const REFERENCE_SIZE: Scalar = 1024.0;

/// Colors used to draw the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    /// Background of the icon
    pub primary: RGBA,
    /// Bookmark silhouette
    pub bookmark: RGBA,
    /// Translucent overlay for the line and the arrow
    pub accent: RGBA,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: RGBA::rgb(103, 80, 164),
            bookmark: RGBA::rgb(255, 255, 255),
            accent: RGBA::new(103, 80, 164, 80),
        }
    }
}

/// Shapes of the icon of the given size in the order they must be drawn
pub fn icon_layers(size: usize, palette: &Palette) -> Vec<Shape> {
    let side = size as i64;
    let scale = size as Scalar / REFERENCE_SIZE;
    let radius = (size as Scalar * 0.22).round() as i64;
    let (cx, cy) = (side / 2, side / 2);
    let (fcx, fcy) = (cx as Scalar, cy as Scalar);
    vec![
        RoundedRect::new(0, 0, side, side, radius, palette.primary).into(),
        Bookmark::new(cx, cy, scale, palette.bookmark).into(),
        RoundedRect::new(
            (fcx - 80.0 * scale) as i64,
            (fcy - 120.0 * scale) as i64,
            (fcx + 80.0 * scale) as i64,
            (fcy - 80.0 * scale) as i64,
            (6.0 * scale) as i64,
            palette.accent,
        )
        .into(),
        Arrow::new(cx, (fcy + 20.0 * scale) as i64, scale * 0.6, palette.accent).into(),
    ]
}

/// Render the icon with a custom palette
pub fn render_icon_with(size: usize, palette: &Palette) -> Result<PixelBuffer, Error> {
    let _span = tracing::debug_span!("[render]", size).entered();
    if size > i32::MAX as usize {
        return Err(Error::geometry(format!("icon size {} is too large", size)));
    }
    let mut img = PixelBuffer::try_new(size)?;
    for layer in icon_layers(size, palette) {
        layer.fill(&mut img)?;
    }
    Ok(img)
}

/// Render the icon with the product palette
pub fn render_icon(size: usize) -> Result<PixelBuffer, Error> {
    render_icon_with(size, &Palette::default())
}

/// Single output file of an icon set
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconSpec {
    pub size: usize,
    pub file_name: String,
}

impl IconSpec {
    pub fn new(size: usize, file_name: impl Into<String>) -> Self {
        Self {
            size,
            file_name: file_name.into(),
        }
    }
}

impl std::str::FromStr for IconSpec {
    type Err = Error;

    /// Parse `SIZE:FILE`, file name defaults to `icon-SIZE.png`
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (size, file_name) = match spec.split_once(':') {
            Some((size, file_name)) => (size, Some(file_name)),
            None => (spec, None),
        };
        let size: usize = size
            .trim()
            .parse()
            .map_err(|_| Error::geometry(format!("invalid icon size: {:?}", size)))?;
        let file_name = match file_name {
            Some(file_name) if !file_name.is_empty() => file_name.to_owned(),
            Some(_) => return Err(Error::geometry(format!("empty file name in {:?}", spec))),
            None => format!("icon-{}.png", size),
        };
        Ok(Self { size, file_name })
    }
}

/// Icons to generate and the directory to put them in
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconSet {
    pub output_dir: PathBuf,
    pub icons: Vec<IconSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub palette: Palette,
}

impl Default for IconSet {
    /// Launcher icons for the mobile app
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("assets/icon"),
            icons: vec![
                IconSpec::new(1024, "icon.png"),
                IconSpec::new(1024, "icon_foreground.png"),
                IconSpec::new(48, "icon-48.png"),
                IconSpec::new(72, "icon-72.png"),
                IconSpec::new(96, "icon-96.png"),
                IconSpec::new(144, "icon-144.png"),
                IconSpec::new(192, "icon-192.png"),
                IconSpec::new(512, "icon-512.png"),
            ],
            palette: Palette::default(),
        }
    }
}

/// Outcome of generating a single icon file
#[derive(Debug)]
pub struct Generated {
    pub spec: IconSpec,
    pub path: PathBuf,
    pub result: Result<usize, Error>,
}

impl IconSet {
    pub fn new(output_dir: impl Into<PathBuf>, icons: Vec<IconSpec>) -> Self {
        Self {
            output_dir: output_dir.into(),
            icons,
            palette: Palette::default(),
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render, encode and write every icon of the set.
    ///
    /// A failing icon does not stop the rest of the set, the outcome of each
    /// icon is returned in the same order as `icons`.
    pub fn generate(&self) -> Result<Vec<Generated>, Error> {
        fs::create_dir_all(&self.output_dir).map_err(|source| Error::Io {
            path: Some(self.output_dir.clone()),
            source,
        })?;
        let generated = self
            .icons
            .iter()
            .map(|spec| {
                let path = self.output_dir.join(&spec.file_name);
                let result = write_icon(spec.size, &self.palette, &path);
                match &result {
                    Ok(len) => tracing::info!(size = spec.size, bytes = len, path = %path.display(), "[generate]"),
                    Err(error) => tracing::error!(size = spec.size, path = %path.display(), %error, "[generate]"),
                }
                Generated {
                    spec: spec.clone(),
                    path,
                    result,
                }
            })
            .collect();
        Ok(generated)
    }
}

/// Render and encode an icon, then write it to `path`.
///
/// Parent directories are created as needed. Returns the file size in bytes.
pub fn write_icon(size: usize, palette: &Palette, path: &Path) -> Result<usize, Error> {
    let bytes = encode(&render_icon_with(size, palette)?)?;
    let io_error = |source| Error::Io {
        path: Some(path.to_owned()),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, &bytes).map_err(io_error)?;
    Ok(bytes.len())
}
