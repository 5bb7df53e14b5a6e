//! Writing generated images to disk

use docchat_kernel::llm::GeneratedImage;
use std::path::{Path, PathBuf};

/// File name used for every generated image.
pub const IMAGE_FILE_NAME: &str = "generated-img.png";

/// Write `image` to `output_dir/generated-img.png`.
///
/// The directory is created if absent; an existing file is overwritten.
pub fn write_image(output_dir: &Path, image: &GeneratedImage) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(IMAGE_FILE_NAME);
    std::fs::write(&path, &image.bytes)?;

    tracing::info!(path = %path.display(), bytes = image.bytes.len(), "image written");
    Ok(path)
}
