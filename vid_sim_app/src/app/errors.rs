use thiserror::Error;
use vid_sim_lib::CompareErrorKind;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Compare(#[from] CompareErrorKind),

    #[error("Failed to scan directory {dir}: {error}")]
    DirScan { dir: String, error: String },
}
