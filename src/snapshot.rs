use image::RgbaImage;
use std::sync::Arc;
use uuid::Uuid;

/// Immutable capture of the whole canvas pixel buffer.
///
/// Cloning a snapshot shares the pixels, so moving one between the undo and
/// redo stacks never copies the buffer.
#[derive(Clone)]
pub struct Snapshot {
    id: Uuid,
    pixels: Arc<RgbaImage>,
}

// Custom Debug implementation since the pixel buffer is too large to print
impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl Snapshot {
    pub(crate) fn capture(image: &RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            pixels: Arc::new(image.clone()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
