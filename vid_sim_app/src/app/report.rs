//All report printing lives here. Keeping console concerns out of the
//library means embedding callers decide their own presentation.
#![allow(clippy::print_stdout)]

use std::path::Path;

use serde::Serialize;
use vid_sim_lib::OverlapMatch;

use super::app_cfg::OutputFormat;

#[derive(Serialize)]
pub struct ScoreRow {
    pub name: String,
    pub score: f64,
}

#[derive(Serialize)]
struct ImagePairReport<'a> {
    source: &'a Path,
    modified: &'a Path,
    score: f64,
}

#[derive(Serialize)]
struct ImageDirReport<'a> {
    source: &'a Path,
    directory: &'a Path,
    results: &'a [ScoreRow],
}

#[derive(Serialize)]
struct VideoReport<'a> {
    first: &'a Path,
    second: &'a Path,
    overlap: Option<OverlapSection>,
    score: Option<f64>,
}

#[derive(Serialize)]
struct OverlapSection {
    first_start: usize,
    first_end: usize,
    second_start: usize,
    second_end: usize,
    length: usize,
}

#[derive(Serialize)]
struct StabilityReport<'a> {
    target: &'a Path,
    num_frames: usize,
    score: f64,
}

impl From<&OverlapMatch> for OverlapSection {
    fn from(overlap: &OverlapMatch) -> Self {
        Self {
            first_start: overlap.first().start(),
            first_end: overlap.first().end(),
            second_start: overlap.second().start(),
            second_end: overlap.second().end(),
            length: overlap.len(),
        }
    }
}

fn print_json(report: &impl Serialize) {
    //serializing these plain structs cannot fail
    println!("{}", serde_json::to_string_pretty(report).unwrap());
}

pub fn image_pair_report(format: OutputFormat, source: &Path, modified: &Path, score: f64) {
    match format {
        OutputFormat::Json => print_json(&ImagePairReport {
            source,
            modified,
            score,
        }),
        OutputFormat::Normal => {
            println!("Image Comparison Report");
            println!("Source:   {}", source.display());
            println!("Modified: {}", modified.display());
            println!("Score:    {score:.2}");
        }
    }
}

pub fn image_dir_report(
    format: OutputFormat,
    source: &Path,
    directory: &Path,
    mut results: Vec<ScoreRow>,
) {
    //most similar first
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    match format {
        OutputFormat::Json => print_json(&ImageDirReport {
            source,
            directory,
            results: &results,
        }),
        OutputFormat::Normal => {
            println!("Image Comparison Report (sorted by similarity)");
            println!("Source: {}", source.display());
            println!("{:<40}{:>12}", "Image name", "Score");
            println!("{}", "=".repeat(52));
            for row in &results {
                println!("{:<40}{:>12.2}", row.name, row.score);
            }
        }
    }
}

pub fn video_report(
    format: OutputFormat,
    first: &Path,
    second: &Path,
    overlap: Option<&OverlapMatch>,
    score: f64,
) {
    match format {
        OutputFormat::Json => print_json(&VideoReport {
            first,
            second,
            overlap: overlap.map(Into::into),
            score: Some(score),
        }),
        OutputFormat::Normal => {
            println!("Video Comparison Report");
            match overlap {
                Some(overlap) => {
                    println!(
                        "Video 1: {} (frames {} to {})",
                        first.display(),
                        overlap.first().start(),
                        overlap.first().end()
                    );
                    println!(
                        "Video 2: {} (frames {} to {})",
                        second.display(),
                        overlap.second().start(),
                        overlap.second().end()
                    );
                    println!("Overlap length: {} frames", overlap.len());
                }
                None => {
                    println!("Video 1: {}", first.display());
                    println!("Video 2: {}", second.display());
                }
            }
            println!("Score: {score:.2}");
        }
    }
}

pub fn no_overlap_report(format: OutputFormat, first: &Path, second: &Path) {
    match format {
        OutputFormat::Json => print_json(&VideoReport {
            first,
            second,
            overlap: None,
            score: None,
        }),
        OutputFormat::Normal => {
            println!("Video Comparison Report");
            println!("Video 1: {}", first.display());
            println!("Video 2: {}", second.display());
            println!("No overlap found.");
        }
    }
}

pub fn stability_report(format: OutputFormat, target: &Path, num_frames: usize, score: f64) {
    match format {
        OutputFormat::Json => print_json(&StabilityReport {
            target,
            num_frames,
            score,
        }),
        OutputFormat::Normal => {
            println!("Stability Report");
            println!("Target: {} ({num_frames} frames)", target.display());
            println!("Mean consecutive-frame score: {score:.2}");
        }
    }
}
