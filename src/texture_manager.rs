use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::canvas::Canvas;

/// Errors that can occur while uploading the canvas
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextureGenerationError {
    #[error("Invalid texture dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Keeps the canvas texture on the GPU, re-uploading only when the pixels changed
#[derive(Default)]
pub struct TextureManager {
    texture: Option<TextureHandle>,
    /// Canvas version the texture was last uploaded from
    uploaded_version: Option<u64>,
    uploads: u64,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for `canvas`, uploading it first if it is stale
    pub fn texture_for(
        &mut self,
        canvas: &Canvas,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError> {
        let (width, height) = (canvas.width(), canvas.height());
        if width == 0 || height == 0 {
            return Err(TextureGenerationError::InvalidDimensions(width, height));
        }

        if let Some(handle) = &self.texture {
            if self.uploaded_version == Some(canvas.version()) {
                return Ok(handle.id());
            }
        }

        let image = color_image(canvas);
        let id = if let Some(handle) = &mut self.texture {
            handle.set(image, TextureOptions::NEAREST);
            handle.id()
        } else {
            let handle = ctx.load_texture("canvas", image, TextureOptions::NEAREST);
            let id = handle.id();
            self.texture = Some(handle);
            id
        };
        self.uploaded_version = Some(canvas.version());
        self.uploads += 1;
        log::trace!("Uploaded canvas version {}", canvas.version());
        Ok(id)
    }

    /// Number of uploads so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

fn color_image(canvas: &Canvas) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [canvas.width() as usize, canvas.height() as usize],
        canvas.image().as_raw(),
    )
}
