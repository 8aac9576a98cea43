use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

use crate::canvas::Canvas;

/// Base name of every exported file
pub const EXPORT_STEM: &str = "masterpiece";

/// Errors that can occur while exporting the canvas
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser download failed: {0}")]
    Download(String),
}

/// Image format used for exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless WebP
    #[default]
    Webp,
    Png,
}

impl ExportFormat {
    pub fn image_format(&self) -> ImageFormat {
        match self {
            ExportFormat::Webp => ImageFormat::WebP,
            ExportFormat::Png => ImageFormat::Png,
        }
    }

    pub fn file_name(&self) -> String {
        let extension = match self {
            ExportFormat::Webp => "webp",
            ExportFormat::Png => "png",
        };
        format!("{EXPORT_STEM}.{extension}")
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Webp => "image/webp",
            ExportFormat::Png => "image/png",
        }
    }
}

/// Encodes the full canvas, transparency included
pub fn encode_canvas(canvas: &Canvas, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    canvas.image().write_to(&mut bytes, format.image_format())?;
    Ok(bytes.into_inner())
}

/// Saves canvas exports: a file on native targets, a browser download on the web
#[derive(Debug, Clone, Default)]
pub struct FileHandler {
    format: ExportFormat,
    export_dir: Option<PathBuf>,
}

impl FileHandler {
    pub fn new(format: ExportFormat, export_dir: Option<PathBuf>) -> Self {
        Self { format, export_dir }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Where the next export lands; only meaningful for native targets
    pub fn target_path(&self) -> PathBuf {
        let file_name = self.format.file_name();
        match &self.export_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Encodes and saves the canvas, returning where it went
    pub fn export(&self, canvas: &Canvas) -> Result<PathBuf, ExportError> {
        let bytes = encode_canvas(canvas, self.format)?;
        log::info!(
            "Encoded {}x{} canvas as {:?} ({} bytes)",
            canvas.width(),
            canvas.height(),
            self.format,
            bytes.len()
        );
        self.save(&bytes)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let path = self.target_path();
        let write = |path: &PathBuf| -> std::io::Result<()> {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(path, bytes)
        };
        write(&path).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Exported canvas to {}", path.display());
        Ok(path)
    }

    #[cfg(target_arch = "wasm32")]
    fn save(&self, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        use eframe::wasm_bindgen::JsCast;

        let download_error =
            |err: eframe::wasm_bindgen::JsValue| ExportError::Download(format!("{err:?}"));
        let file_name = self.format.file_name();

        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(self.format.mime_type());
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(download_error)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(download_error)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(download_error)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Download("not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(&file_name);
        anchor.click();
        web_sys::Url::revoke_object_url(&url).map_err(download_error)?;

        log::info!("Downloaded canvas as {}", file_name);
        Ok(PathBuf::from(file_name))
    }
}
