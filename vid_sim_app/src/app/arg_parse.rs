use std::path::PathBuf;

use clap::{value_parser, ArgAction::*};
use vid_sim_lib::{HashTolerance, OverlapParams};

use crate::app::*;

// comparison selection
const IMAGES: &str = "Image pair";
const IMAGE: &str = "Source image";
const AGAINST_DIR: &str = "Candidate directory";
const VIDEOS: &str = "Video pair";
const STABILITY: &str = "Stability target";

// comparison modifiers
const FIND_OVERLAP: &str = "Find overlap";
const METHOD: &str = "Method";
const TOLERANCE: &str = "Fingerprint tolerance";
const MIN_OVERLAP: &str = "Minimum overlap length";

// output settings
const OUTPUT_FORMAT: &str = "Format";

// verbosity
const VERBOSITY_QUIET: &str = "Quiet";
const VERBOSITY_VERBOSE: &str = "Verbose";

const DISPLAY_ORDERING: [&str; 12] = [
    //
    // comparison selection
    IMAGES,
    IMAGE,
    AGAINST_DIR,
    VIDEOS,
    STABILITY,
    //
    // comparison modifiers
    FIND_OVERLAP,
    METHOD,
    TOLERANCE,
    MIN_OVERLAP,
    //
    // outputs
    OUTPUT_FORMAT,
    //
    // verbosity
    VERBOSITY_QUIET,
    VERBOSITY_VERBOSE,
];

fn build_app() -> clap::Command {
    let get_ordering = |arg_name: &str| -> usize {
        match DISPLAY_ORDERING.iter().position(|x| *x == arg_name) {
            Some(idx) => idx,
            None => {
                panic!("argument not assigned a display order: {arg_name:?}");
            }
        }
    };

    //clap requires all default values to be &'_ str, so the defaults from
    //the library constants are restated here as string literals.
    let default_tolerance_string = "5";
    let default_min_overlap_string = "3";

    //args are not added through method chaining because rustfmt struggles with very long expressions.
    let mut clap_app = clap::Command::new("Video similarity")
        .version(clap::crate_version!())
        .about("Compare images and videos for similarity, and align overlapping video sections");

    clap_app = clap_app.arg(
        clap::Arg::new(IMAGES)
            .long("images")
            .num_args(2)
            .value_names(["SOURCE", "MODIFIED"])
            .value_parser(value_parser!(PathBuf))
            .help("Compare a source image against a modified version of it, and report a similarity score.")
            .display_order(get_ordering(IMAGES)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(IMAGE)
            .long("image")
            .num_args(1)
            .value_parser(value_parser!(PathBuf))
            .requires(AGAINST_DIR)
            .help("A source image to compare against every candidate image in the directory given by --against-dir.")
            .display_order(get_ordering(IMAGE)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(AGAINST_DIR)
            .long("against-dir")
            .num_args(1)
            .value_parser(value_parser!(PathBuf))
            .requires(IMAGE)
            .help("A directory of candidate images. Each candidate is scored against the source image and the results are reported sorted by similarity.")
            .display_order(get_ordering(AGAINST_DIR)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(VIDEOS)
            .long("videos")
            .num_args(2)
            .value_names(["FIRST", "SECOND"])
            .value_parser(value_parser!(PathBuf))
            .help("Compare two videos frame by frame and report the mean similarity score.")
            .display_order(get_ordering(VIDEOS)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(STABILITY)
            .long("stability")
            .num_args(1)
            .value_parser(value_parser!(PathBuf))
            .help("Measure the self-stability of a single video (or directory of numbered frame images) by scoring each consecutive frame pair.")
            .display_order(get_ordering(STABILITY)),
    );

    clap_app = clap_app.group(
        clap::ArgGroup::new("comparison")
            .args([IMAGES, IMAGE, VIDEOS, STABILITY])
            .required(true),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(FIND_OVERLAP)
            .long("find-overlap")
            .requires(VIDEOS)
            .num_args(0)
            .action(SetTrue)
            .help("Before scoring, search both videos for their longest shared run of frames and truncate each to that section. When no overlap exists this is reported instead of a score.")
            .display_order(get_ordering(FIND_OVERLAP)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(METHOD)
            .long("method")
            .num_args(1)
            .value_parser(value_parser!(MethodArg))
            .default_value("ssim")
            .help("The per-frame similarity method: structural similarity, or raw pixel difference.")
            .display_order(get_ordering(METHOD)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(TOLERANCE)
            .long("tolerance")
            .num_args(1)
            .value_parser(value_parser!(u32))
            .default_value(default_tolerance_string)
            .help("Maximum fingerprint distance at which two frames still count as the same moment during overlap alignment. 0 requires bit-identical fingerprints.")
            .display_order(get_ordering(TOLERANCE)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(MIN_OVERLAP)
            .long("min-overlap")
            .num_args(1)
            .value_parser(value_parser!(usize))
            .default_value(default_min_overlap_string)
            .help("Shortest run of matching frames that counts as an overlap. Values below 2 accept single-frame coincidences.")
            .display_order(get_ordering(MIN_OVERLAP)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(OUTPUT_FORMAT)
            .long("output-format")
            .num_args(1)
            .value_parser(value_parser!(OutputFormat))
            .default_value("normal")
            .help("Print reports as human readable text, or as json.")
            .display_order(get_ordering(OUTPUT_FORMAT)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(VERBOSITY_QUIET)
            .long("quiet")
            .short('q')
            .num_args(0)
            .action(SetTrue)
            .conflicts_with(VERBOSITY_VERBOSE)
            .help("Only log errors.")
            .display_order(get_ordering(VERBOSITY_QUIET)),
    );

    clap_app = clap_app.arg(
        clap::Arg::new(VERBOSITY_VERBOSE)
            .long("verbose")
            .short('v')
            .num_args(0)
            .action(SetTrue)
            .help("Log extra detail about loading and alignment.")
            .display_order(get_ordering(VERBOSITY_VERBOSE)),
    );

    clap_app
}

pub fn parse_args() -> AppCfg {
    let matches = build_app().get_matches();
    args_to_cfg(&matches)
}

fn args_to_cfg(matches: &clap::ArgMatches) -> AppCfg {
    let two_paths = |name: &str| -> (PathBuf, PathBuf) {
        let mut vals = matches.get_many::<PathBuf>(name).unwrap().cloned();
        //num_args(2) guarantees both values are present
        (vals.next().unwrap(), vals.next().unwrap())
    };

    let job = if matches.contains_id(IMAGES) {
        let (source, modified) = two_paths(IMAGES);
        CompareJob::ImagePair { source, modified }
    } else if matches.contains_id(IMAGE) {
        CompareJob::ImageDir {
            source: matches.get_one::<PathBuf>(IMAGE).unwrap().clone(),
            dir: matches.get_one::<PathBuf>(AGAINST_DIR).unwrap().clone(),
        }
    } else if matches.contains_id(VIDEOS) {
        let (first, second) = two_paths(VIDEOS);
        CompareJob::VideoPair {
            first,
            second,
            find_overlap: matches.get_flag(FIND_OVERLAP),
        }
    } else {
        CompareJob::Stability {
            target: matches.get_one::<PathBuf>(STABILITY).unwrap().clone(),
        }
    };

    let overlap_params = OverlapParams {
        min_match_len: *matches.get_one::<usize>(MIN_OVERLAP).unwrap(),
        tolerance: HashTolerance::new(*matches.get_one::<u32>(TOLERANCE).unwrap()),
    };

    let verbosity = if matches.get_flag(VERBOSITY_QUIET) {
        ReportVerbosity::Quiet
    } else if matches.get_flag(VERBOSITY_VERBOSE) {
        ReportVerbosity::Verbose
    } else {
        ReportVerbosity::Default
    };

    AppCfg {
        job,
        method: (*matches.get_one::<MethodArg>(METHOD).unwrap()).into(),
        overlap_params,
        output_format: *matches.get_one::<OutputFormat>(OUTPUT_FORMAT).unwrap(),
        verbosity,
    }
}
