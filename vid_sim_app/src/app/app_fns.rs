use std::path::Path;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use vid_sim_lib::*;
use walkdir::WalkDir;

use crate::app::*;

use super::{arg_parse, report};

pub fn run_app() -> i32 {
    let cfg = arg_parse::parse_args();
    init_logging(cfg.verbosity);
    debug!("configuration: {cfg:?}");

    match run_app_inner(&cfg) {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            1
        }
    }
}

fn init_logging(verbosity: ReportVerbosity) {
    let level = match verbosity {
        ReportVerbosity::Quiet => LevelFilter::Error,
        ReportVerbosity::Default => LevelFilter::Info,
        ReportVerbosity::Verbose => LevelFilter::Debug,
    };

    //failure to initialize logging is not fatal
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run_app_inner(cfg: &AppCfg) -> Result<(), AppError> {
    match &cfg.job {
        CompareJob::ImagePair { source, modified } => run_image_pair(cfg, source, modified),
        CompareJob::ImageDir { source, dir } => run_image_dir(cfg, source, dir),
        CompareJob::VideoPair {
            first,
            second,
            find_overlap,
        } => run_video_pair(cfg, first, second, *find_overlap),
        CompareJob::Stability { target } => run_stability(cfg, target),
    }
}

fn run_image_pair(cfg: &AppCfg, source: &Path, modified: &Path) -> Result<(), AppError> {
    let source_img = load_image(source)?;
    let modified_img = load_image(modified)?;

    let score = score_images(&source_img, &modified_img, cfg.method)?;
    report::image_pair_report(cfg.output_format, source, modified, score);

    Ok(())
}

fn run_image_dir(cfg: &AppCfg, source: &Path, dir: &Path) -> Result<(), AppError> {
    let source_img = load_image(source)?;
    let canonical_source = source.canonicalize().ok();

    let mut results = vec![];
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::DirScan {
            dir: dir.display().to_string(),
            error: e.to_string(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !has_image_extension(path) {
            continue;
        }

        //when the source image lives inside the candidate directory, don't
        //score it against itself
        if path.canonicalize().ok() == canonical_source {
            debug!("skipping source image {}", path.display());
            continue;
        }

        match load_image(path).and_then(|img| score_images(&source_img, &img, cfg.method)) {
            Ok(score) => results.push(report::ScoreRow {
                name: entry.file_name().to_string_lossy().to_string(),
                score,
            }),
            Err(e) => warn!("skipping {}: {e}", path.display()),
        }
    }

    info!("scored {} candidate images", results.len());
    report::image_dir_report(cfg.output_format, source, dir, results);

    Ok(())
}

fn run_video_pair(
    cfg: &AppCfg,
    first: &Path,
    second: &Path,
    find_common_section: bool,
) -> Result<(), AppError> {
    let first_frames = VideoFrames::load(first)?;
    let second_frames = VideoFrames::load(second)?;
    info!(
        "loaded {} frames from {} and {} frames from {}",
        first_frames.len(),
        first.display(),
        second_frames.len(),
        second.display()
    );

    if !find_common_section {
        let score = score_sequences(first_frames.frames(), second_frames.frames(), cfg.method)?;
        report::video_report(cfg.output_format, first, second, None, score);
        return Ok(());
    }

    match find_overlap_in_frames(
        first_frames.frames(),
        second_frames.frames(),
        cfg.overlap_params,
    ) {
        //absence of an overlap is an answer, not a failure
        None => {
            report::no_overlap_report(cfg.output_format, first, second);
            Ok(())
        }

        Some(overlap) => {
            debug!(
                "aligned: frames {}..={} against frames {}..={}",
                overlap.first().start(),
                overlap.first().end(),
                overlap.second().start(),
                overlap.second().end()
            );

            let common_first =
                &first_frames.frames()[overlap.first().start()..=overlap.first().end()];
            let common_second =
                &second_frames.frames()[overlap.second().start()..=overlap.second().end()];

            let score = score_sequences(common_first, common_second, cfg.method)?;
            report::video_report(cfg.output_format, first, second, Some(&overlap), score);
            Ok(())
        }
    }
}

fn run_stability(cfg: &AppCfg, target: &Path) -> Result<(), AppError> {
    let frames = if target.is_dir() {
        VideoFrames::from_image_dir(target)?
    } else {
        VideoFrames::load(target)?
    };
    info!("loaded {} frames from {}", frames.len(), target.display());

    //score frame n against frame n+1 across the whole sequence
    let all = frames.frames();
    if all.len() < 2 {
        return Err(CompareErrorKind::NothingToCompare.into());
    }
    let score = score_sequences(&all[..all.len() - 1], &all[1..], cfg.method)?;

    report::stability_report(cfg.output_format, target, frames.len(), score);
    Ok(())
}
