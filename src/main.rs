// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, Level};

use bgm_timeline::bgm::{Segment, VARIATION_COUNT};
use bgm_timeline::config::{DocumentFile, EditorSettings};
use bgm_timeline::timeline::{
    orphaned_markers, pair_loops, segment_lengths, segment_starts, total_length, BgmAction, VariationAction,
};
use bgm_timeline::DocumentError;

const SETTINGS_FILE: &str = "bgm-timeline.toml";

fn print_usage() {
    println!("BGM Timeline - segment and loop editor");
    println!();
    println!("Usage: bgm-timeline [--verbose] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --show <FILE> [VAR]                 Print the timeline of variation VAR (default: all)");
    println!("  --move <FILE> <VAR> <ID> <TO>       Move segment ID to index TO");
    println!("  --toggle-loop <FILE> <VAR> <ID>     Wrap segment ID in a loop, or remove its loop");
    println!("  --set-iter <FILE> <VAR> <ID> <N>    Set the repeat count of EndLoop ID (0 = forever)");
    println!("  --apply <FILE> <SCRIPT>             Apply a YAML list of actions");
    println!("  --help                              Show this help message");
    println!();
    println!("Settings are read from ./{} when present.", SETTINGS_FILE);
}

fn load_settings() -> Result<EditorSettings> {
    if Path::new(SETTINGS_FILE).exists() {
        EditorSettings::load(SETTINGS_FILE).with_context(|| format!("Failed to load {}", SETTINGS_FILE))
    } else {
        Ok(EditorSettings::default())
    }
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, what: &str) -> Result<T> {
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("Missing {} argument (see --help)", what))?;
    raw.parse().map_err(|_| anyhow!("Invalid {}: {}", what, raw))
}

fn parse_variation(args: &[String], index: usize) -> Result<usize> {
    let variation: usize = parse_arg(args, index, "variation index")?;
    if variation >= VARIATION_COUNT {
        return Err(DocumentError::VariationOutOfRange(variation).into());
    }
    Ok(variation)
}

fn describe(segment: &Segment) -> String {
    match segment {
        Segment::Subseg { track_list, .. } => format!("Subseg    track list {}", track_list),
        Segment::StartLoop { label_index, .. } => format!("StartLoop label {}", label_index),
        Segment::EndLoop {
            label_index,
            iter_count,
            ..
        } => match *iter_count {
            0 => format!("EndLoop   label {} (forever)", label_index),
            n => format!("EndLoop   label {} (x{})", label_index, n as u32 + 1),
        },
    }
}

fn show(doc: &DocumentFile, settings: &EditorSettings, only: Option<usize>) {
    let bgm = &doc.bgm;
    let signature = settings.time_signature();

    println!("{}", bgm.name);
    for (index, variation) in bgm.variations.iter().enumerate() {
        if only.is_some_and(|v| v != index) {
            continue;
        }

        let total = total_length(variation, bgm);
        println!();
        println!(
            "Variation {}: {} segments, {} ticks ({} bars)",
            index,
            variation.len(),
            total,
            signature.bars(total)
        );

        let lengths = segment_lengths(variation, bgm);
        let starts = segment_starts(variation, bgm);
        for (i, segment) in variation.segments.iter().enumerate() {
            println!(
                "  [{:>3}] id {:<6} @{:<7} {:>6} ticks  {}",
                i,
                segment.id(),
                starts[i],
                lengths[i],
                describe(segment)
            );
        }

        for l in pair_loops(&variation.segments) {
            let plays = l
                .play_count()
                .map(|n| format!("{} times", n))
                .unwrap_or_else(|| "forever".to_string());
            println!(
                "  loop label {}: segments {}..={} ({} in body), plays {}",
                l.label_index,
                l.start_index,
                l.end_index,
                l.body_len(),
                plays
            );
        }

        let orphans = orphaned_markers(&variation.segments);
        if !orphans.is_empty() {
            println!("  orphaned markers: {:?}", orphans);
        }
    }
}

fn edit(path: &str, settings: &EditorSettings, actions: &[BgmAction]) -> Result<()> {
    let mut doc = DocumentFile::load(path).with_context(|| format!("Failed to open {}", path))?;
    let mut ids = settings.id_generator(&doc.bgm);

    for action in actions {
        doc.bgm = action.apply(&doc.bgm, ids.as_mut());
    }

    doc.save(path).with_context(|| format!("Failed to save {}", path))?;
    info!(path, actions = actions.len(), "applied edits");
    Ok(())
}

fn single_edit(
    args: &[String],
    settings: &EditorSettings,
    build: impl FnOnce(&[String]) -> Result<VariationAction>,
) -> Result<()> {
    let path: String = parse_arg(args, 2, "file")?;
    let index = parse_variation(args, 3)?;
    let action = BgmAction::Variation {
        index,
        action: build(args)?,
    };

    edit(&path, settings, &[action])?;
    let doc = DocumentFile::load(&path)?;
    show(&doc, settings, Some(index));
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    args.retain(|a| a != "--verbose" && a != "-v");

    let settings = load_settings()?;
    let level = if verbose { Level::DEBUG } else { settings.log_level()? };
    init_logging(level);

    if args.len() < 2 {
        println!("BGM Timeline - segment and loop editor");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--show" => {
            let path: String = parse_arg(&args, 2, "file")?;
            let only = if args.len() > 3 { Some(parse_variation(&args, 3)?) } else { None };
            let doc = DocumentFile::load(&path).with_context(|| format!("Failed to open {}", path))?;
            show(&doc, &settings, only);
        }
        "--move" => {
            single_edit(&args, &settings, |args| {
                Ok(VariationAction::MoveSegment {
                    id: parse_arg(args, 4, "segment id")?,
                    to_index: parse_arg(args, 5, "target index")?,
                })
            })?;
        }
        "--toggle-loop" => {
            single_edit(&args, &settings, |args| {
                Ok(VariationAction::ToggleSegmentLoop {
                    id: parse_arg(args, 4, "segment id")?,
                })
            })?;
        }
        "--set-iter" => {
            single_edit(&args, &settings, |args| {
                Ok(VariationAction::SetLoopIterCount {
                    id: parse_arg(args, 4, "segment id")?,
                    iter_count: parse_arg(args, 5, "iteration count (0-255)")?,
                })
            })?;
        }
        "--apply" => {
            let path: String = parse_arg(&args, 2, "file")?;
            let script: String = parse_arg(&args, 3, "script")?;
            let contents =
                fs::read_to_string(&script).with_context(|| format!("Failed to read script {}", script))?;
            let actions: Vec<BgmAction> =
                serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse script {}", script))?;
            edit(&path, &settings, &actions)?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            print_usage();
            bail!("Unknown option: {}", other);
        }
    }

    Ok(())
}
