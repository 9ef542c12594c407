use crate::{
    error::{Result, VibeWallError},
    export::{file_name_stem, sink::DownloadSink},
    models::GeneratedImage,
};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

pub fn archive_base_name(prompt: &str) -> String {
    format!("vibewall-{}", file_name_stem(prompt))
}

/// Builds the ZIP in memory: `{base}/{base}-{n}.jpg` for each image, 1-based.
pub fn build_archive(images: &[GeneratedImage], base_name: &str) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (index, image) in images.iter().enumerate() {
        let entry = format!("{}/{}-{}.jpg", base_name, base_name, index + 1);
        writer.start_file(entry, options)?;
        writer.write_all(&image.image_data)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Bundles every image into `{base_name}.zip` and hands it to the sink.
///
/// Empty input is a no-op. Failures are logged and swallowed; nothing is saved
/// unless the whole archive was built.
pub async fn export_all(
    images: &[GeneratedImage],
    base_name: &str,
    sink: &dyn DownloadSink,
) -> Option<PathBuf> {
    if images.is_empty() {
        return None;
    }

    let owned = images.to_vec();
    let base = base_name.to_string();
    let built = tokio::task::spawn_blocking(move || build_archive(&owned, &base))
        .await
        .map_err(|e| VibeWallError::ArchiveError(e.to_string()))
        .and_then(|result| result);

    let bytes = match built {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Error creating zip: {}", e);
            return None;
        }
    };

    match sink.save(&format!("{}.zip", base_name), &bytes) {
        Ok(path) => Some(path),
        Err(e) => {
            log::error!("Error saving zip: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn base_name_follows_prompt() {
        assert_eq!(archive_base_name("rainy  cyberpunk lo-fi"), "vibewall-rainy_cyberpunk_lo-fi");
    }

    #[test]
    fn archive_holds_one_entry_per_image() {
        let images = vec![
            GeneratedImage::new(vec![0xFF, 0xD8, 0x00, 0x01]),
            GeneratedImage::new(vec![0xFF, 0xD8, 0x00, 0x02]),
        ];

        let bytes = build_archive(&images, "vibewall-moss").unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), 2);
        for (index, image) in images.iter().enumerate() {
            let name = format!("vibewall-moss/vibewall-moss-{}.jpg", index + 1);
            let mut entry = archive.by_name(&name).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            assert_eq!(content, image.image_data);
        }
    }
}
