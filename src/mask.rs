//! Binary ink masks and the image preprocessor.

use std::fmt;
use std::path::Path;

use image::{GrayImage, Luma};

use crate::Error;

const INK_LUMA: u8 = 0;
const BACKGROUND_LUMA: u8 = 255;

/// A grid of ink/background cells.
///
/// Cells are stored row-major; `(0, 0)` is the top-left pixel. A mask is
/// never mutated once it leaves the function that built it, so it can be
/// shared freely between threads.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BinaryMask {
    /// Returns an all-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        BinaryMask { width, height, cells: vec![false; width as usize * height as usize] }
    }

    /// Builds a mask by asking `f(x, y)` whether each cell is ink.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        BinaryMask { width, height, cells }
    }

    /// Thresholds a grayscale image.
    ///
    /// Intensities are normalized to `[0, 1]`; a pixel is ink if its
    /// normalized intensity is at or below `threshold`.
    pub fn threshold(image: &GrayImage, threshold: f64) -> Self {
        BinaryMask::from_fn(image.width(), image.height(), |x, y| {
            f64::from(image.get_pixel(x, y).0[0]) / 255.0 <= threshold
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns `true` if the cell at `(x, y)` is ink.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside of mask");
        self.cells[self.index(x, y)]
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, ink: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = ink;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// The number of ink cells.
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|ink| **ink).count()
    }

    /// The fraction of ink cells, in `[0, 1]`. An empty mask has ratio 0.
    pub fn ink_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.ink_count() as f64 / self.cells.len() as f64
    }

    /// The smallest rectangle `(x0, y0, x1, y1)` (exclusive max) holding all ink.
    pub fn ink_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.cells[self.index(x, y)] {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x + 1, y + 1),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
                });
            }
        }
        bounds
    }

    /// Copies out the `width`×`height` window whose top-left cell is `(x0, y0)`.
    ///
    /// Returns `None` if the window does not fit.
    pub fn window(&self, x0: u32, y0: u32, width: u32, height: u32) -> Option<BinaryMask> {
        let fits_x = x0.checked_add(width).is_some_and(|x1| x1 <= self.width);
        let fits_y = y0.checked_add(height).is_some_and(|y1| y1 <= self.height);
        if !(fits_x && fits_y) {
            return None;
        }
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in y0..y0 + height {
            let row = self.index(x0, y);
            cells.extend_from_slice(&self.cells[row..row + width as usize]);
        }
        Some(BinaryMask { width, height, cells })
    }

    /// Iterates over the cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }

    /// Renders the mask with black ink on a white background.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_ink(x, y) { INK_LUMA } else { BACKGROUND_LUMA }])
        })
    }

    /// Writes the mask as an image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        self.to_image()
            .save(path)
            .map_err(|source| Error::ImageSave { path: path.to_owned(), source })
    }
}

impl fmt::Debug for BinaryMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BinaryMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("ink", &self.ink_count())
            .finish()
    }
}

/// Loads the source raster at `path` and thresholds it into a mask.
///
/// Color images are converted to luma first.
pub fn preprocess(path: impl AsRef<Path>, threshold: f64) -> Result<BinaryMask, Error> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| Error::ImageLoad { path: path.to_owned(), source })?
        .into_luma8();
    let mask = BinaryMask::threshold(&image, threshold);
    log::info!(
        "thresholded '{}' at {threshold}: {}x{}, ink ratio {:.3}",
        path.display(),
        mask.width(),
        mask.height(),
        mask.ink_ratio()
    );
    Ok(mask)
}
