pub mod archive;
pub mod single;
pub mod sink;

pub use archive::{archive_base_name, build_archive, export_all};
pub use single::{export_one, image_file_name};
pub use sink::{DirectorySink, DownloadSink};

/// Collapses every whitespace run in the prompt into a single `_`.
pub fn sanitize_prompt(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    let mut in_whitespace = false;

    for c in prompt.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}

/// Prompt as it appears in download file names: whitespace runs become `_`,
/// and so does every character a filesystem would reject or read as a path.
pub fn file_name_stem(prompt: &str) -> String {
    sanitize_prompt(prompt)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
