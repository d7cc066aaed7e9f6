use std::path::PathBuf;

use vid_sim_lib::{OverlapParams, ScoreMethod};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportVerbosity {
    Quiet,
    Default,
    Verbose,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFormat {
    Normal,
    Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(super) enum MethodArg {
    Ssim,
    PixelDiff,
}

impl From<MethodArg> for ScoreMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Ssim => ScoreMethod::Ssim,
            MethodArg::PixelDiff => ScoreMethod::PixelDiff,
        }
    }
}

// Which comparison the user asked for.
#[derive(Debug, Clone)]
pub enum CompareJob {
    ImagePair {
        source: PathBuf,
        modified: PathBuf,
    },
    ImageDir {
        source: PathBuf,
        dir: PathBuf,
    },
    VideoPair {
        first: PathBuf,
        second: PathBuf,
        find_overlap: bool,
    },
    Stability {
        target: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub job: CompareJob,
    pub method: ScoreMethod,
    pub overlap_params: OverlapParams,
    pub output_format: OutputFormat,
    pub verbosity: ReportVerbosity,
}
