use std::io;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Write image bytes to a fresh temp file. The file is removed when the returned handle
/// is dropped or closed, so the caller owns its whole lifetime.
pub async fn stage_image(bytes: &[u8], folder: Option<&Path>) -> io::Result<NamedTempFile> {
    let extension = infer::get(bytes).map_or("bin", |kind| kind.extension());
    let suffix = format!(".{extension}");
    let mut builder = Builder::new();
    builder.prefix("eyewear-").suffix(&suffix);
    let staged = match folder {
        Some(folder) => {
            tokio::fs::create_dir_all(folder).await?;
            builder.tempfile_in(folder)?
        }
        None => builder.tempfile()?,
    };
    tokio::fs::write(staged.path(), bytes).await?;
    Ok(staged)
}
