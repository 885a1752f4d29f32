use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_SUFFIX: &str = "_transparent";

/// Default output location for a pair: `<white_stem><suffix>.png`, next to the
/// white render unless `output_dir` is given.
pub fn suggest_output_path(white: &Path, suffix: &str, output_dir: Option<&Path>) -> PathBuf {
    let stem = white
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{}{}.png", stem, suffix);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => white.with_file_name(file_name),
    }
}
