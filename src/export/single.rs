use crate::{
    error::Result,
    export::{file_name_stem, sink::DownloadSink},
    models::GeneratedImage,
};
use std::path::PathBuf;

pub fn image_file_name(image: &GeneratedImage, prompt: &str) -> String {
    format!("vibewall-{}-{}.jpeg", file_name_stem(prompt), image.id)
}

pub fn export_one(image: &GeneratedImage, prompt: &str, sink: &dyn DownloadSink) -> Result<PathBuf> {
    sink.save(&image_file_name(image, prompt), &image.image_data)
}
