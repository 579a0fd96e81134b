use lane_detector::config::{self, LaneToolConfig};
use lane_detector::diagnostics::TimingBreakdown;
use lane_detector::image::io::{load_rgb_image, save_mask, save_rgb_frame, write_json_file};
use lane_detector::image::RgbFrame;
use lane_detector::{Direction, DirectionAdvisor, FrameAnalyzer, LineSegment, TurnAssessment};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;

    let frame = load_rgb_image(&config.input)?;
    let report = analyze(&config, &frame)?;

    println!("{}", report.direction.narration());
    println!(
        "Detected {} segments in {:.3} ms",
        report.segments.len(),
        report.timings.total_ms
    );
    println!(
        "Saved annotated frame to {}",
        config.output.annotated_image.display()
    );
    println!("Saved report to {}", config.output.report_json.display());
    Ok(())
}

fn analyze(config: &LaneToolConfig, frame: &RgbFrame) -> Result<LaneReportFile, String> {
    let mut analyzer = FrameAnalyzer::new(config.analyzer);
    let advisor = DirectionAdvisor::new(config.advisor);

    let report = analyzer
        .process(frame.as_view())
        .map_err(|e| format!("Analysis failed: {e}"))?;
    let direction = advisor
        .decide(&report.segments, frame.w as u32)
        .map_err(|e| format!("Advice failed: {e}"))?;
    let turns = advisor
        .classify_turns(&report.segments)
        .map_err(|e| format!("Turn classification failed: {e}"))?;

    save_rgb_frame(&report.annotated, &config.output.annotated_image)?;
    if let Some(edge_path) = &config.output.edge_map {
        save_mask(&report.edge_map, edge_path)?;
    }

    let file = LaneReportFile {
        direction,
        segments: report.segments,
        turns,
        timings: report.timings,
    };
    write_json_file(&config.output.report_json, &file)?;
    Ok(file)
}

fn usage() -> String {
    "Usage: lane_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LaneReportFile {
    direction: Direction,
    segments: Vec<LineSegment>,
    turns: Vec<TurnAssessment>,
    timings: TimingBreakdown,
}
