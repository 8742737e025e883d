//! Command implementations

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use crate::adapters::{tool_version, AppConfig};
use crate::app::{
    AnalyzeReport, AppContainer, MergeRequest, MergeResponse, SplitRequest, SplitResponse,
};
use crate::cli::args::{AnalyzeArgs, MergeArgs, PlanLayoutArgs, PlanSegmentsArgs, SplitArgs};
use crate::domain::model::{Canvas, Geometry, StreamDescriptor, TextPlacement};
use crate::planner::overlay::{vertical_filter, OverlayStyle};
use crate::planner::{GeometryPlanner, SegmentPlanner};
use crate::utils::Utils;

/// Execute the merge command
pub async fn merge(container: &dyn AppContainer, args: MergeArgs) -> Result<()> {
    info!("Starting merge operation");

    let request = MergeRequest {
        sources: args.inputs,
        output: args.output,
        force_reencode: args.force_reencode,
    };
    let response = container
        .merge_interactor()
        .execute(request)
        .await
        .context("Merge failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize merge result to JSON")?;
        println!("{}", json);
    } else {
        display_merge_response(&response);
    }
    Ok(())
}

/// Execute the split command
pub async fn split(container: &dyn AppContainer, config: &AppConfig, args: SplitArgs) -> Result<()> {
    info!("Starting split operation");

    let request = SplitRequest {
        source: args.source,
        parts: config.split.parts,
        title: args.title,
        subtitle: args.subtitle,
        out_dir: args.out_dir,
        canvas: config.split.canvas()?,
    };
    let response = container
        .split_interactor()
        .execute(request)
        .await
        .context("Split failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize split result to JSON")?;
        println!("{}", json);
    } else {
        display_split_response(&response);
    }
    Ok(())
}

/// Execute the analyze command
pub async fn analyze(container: &dyn AppContainer, args: AnalyzeArgs) -> Result<()> {
    info!("Starting analyze operation");

    let report = container
        .analyze_interactor()
        .execute(&args.files)
        .await
        .context("Failed to analyze input files")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize analysis to JSON")?;
        println!("{}", json);
    } else {
        display_analyze_report(&report);
    }
    Ok(())
}

/// Execute the plan-segments command
pub fn plan_segments(args: PlanSegmentsArgs) -> Result<()> {
    let ranges = SegmentPlanner::split(args.duration, args.parts)
        .context("Failed to plan segments")?;

    if args.json {
        let json = serde_json::to_string_pretty(&ranges)
            .context("Failed to serialize segments to JSON")?;
        println!("{}", json);
    } else {
        println!("Segments");
        println!("========");
        for (i, range) in ranges.iter().enumerate() {
            println!(
                "  part_{}: {:.3}s -> {:.3}s ({:.3}s)",
                i + 1,
                range.start_seconds,
                range.end_seconds(),
                range.duration_seconds
            );
        }
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct LayoutReport<'a> {
    canvas: Canvas,
    geometry: &'a Geometry,
    placement: &'a TextPlacement,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
}

/// Execute the plan-layout command
pub fn plan_layout(args: PlanLayoutArgs, style: &OverlayStyle) -> Result<()> {
    let canvas = Canvas::parse(&args.canvas)
        .ok_or_else(|| anyhow!("Canvas must look like 1080x1920, got '{}'", args.canvas))?;
    let geometry = GeometryPlanner::fit_center(args.width, args.height, canvas)
        .context("Failed to plan layout")?;
    let placement = GeometryPlanner::place_text(
        &geometry,
        canvas,
        args.title.as_deref(),
        args.subtitle.as_deref(),
    );
    let filter = args
        .filter
        .then(|| vertical_filter(&geometry, canvas, &placement, style));

    if args.json {
        let report = LayoutReport {
            canvas,
            geometry: &geometry,
            placement: &placement,
            filter,
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize layout to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Layout");
    println!("======");
    println!("Canvas: {}", canvas);
    println!("Scale: {:.4}", geometry.scale);
    println!("Scaled: {}x{}", geometry.scaled_width, geometry.scaled_height);
    println!("Offset: {},{}", geometry.offset_x, geometry.offset_y);
    println!("Margin: {}", placement.margin_px);
    if let Some(title) = &placement.title {
        println!("Title: y={} size={} \"{}\"", title.y, title.font_size, title.text);
    }
    if let Some(subtitle) = &placement.subtitle {
        println!(
            "Subtitle: y={} size={} \"{}\"",
            subtitle.y, subtitle.font_size, subtitle.text
        );
    }
    if let Some(filter) = filter {
        println!("Filter: {}", filter);
    }
    Ok(())
}

/// Execute the check command
pub async fn check(config: &AppConfig) -> Result<()> {
    let tools = [
        ("ffmpeg", &config.tools.ffmpeg, "-version", true),
        ("ffprobe", &config.tools.ffprobe, "-version", true),
        ("yt-dlp", &config.tools.ytdlp, "--version", false),
    ];

    let mut missing_required = Vec::new();
    println!("Tools");
    println!("=====");
    for (name, path, flag, required) in tools {
        match tool_version(path, flag).await {
            Ok(version) => println!("  {:<8} OK       {}", name, version),
            Err(e) => {
                warn!("{} is unavailable: {}", name, e);
                println!("  {:<8} MISSING  {}", name, path.display());
                if required {
                    missing_required.push(name);
                }
            }
        }
    }

    if missing_required.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Required tools unavailable: {}",
            missing_required.join(", ")
        ))
    }
}

fn display_merge_response(response: &MergeResponse) {
    println!("Merge Result");
    println!("============");
    println!("Output: {}", response.output.display());
    println!("Method: {}", response.plan.method_name());
    if response.fell_back {
        println!("Note: direct concat failed, output was re-encoded");
    }
    for reason in response.verdict.reasons() {
        println!("  - {}", reason);
    }
}

fn display_split_response(response: &SplitResponse) {
    println!("Split Result");
    println!("============");
    println!("Source: {}", response.source.display());
    println!("Duration: {}", Utils::format_seconds(response.duration_seconds));
    for (path, range) in response.parts.iter().zip(&response.ranges) {
        println!("  {} ({})", path.display(), range);
    }
}

fn display_analyze_report(report: &AnalyzeReport) {
    for descriptor in &report.files {
        display_descriptor(descriptor);
    }

    println!("Recommendation: {}", report.recommendation.method);
    for note in &report.recommendation.notes {
        println!("  - {}", note);
    }
}

fn display_descriptor(descriptor: &StreamDescriptor) {
    println!("File: {}", descriptor.path.display());
    println!("  Format: {}", descriptor.container_format);
    println!("  Duration: {}", Utils::format_seconds(descriptor.duration_seconds));
    if let Ok(metadata) = std::fs::metadata(&descriptor.path) {
        println!("  Size: {}", Utils::format_file_size(metadata.len()));
    }
    match &descriptor.video {
        Some(video) => {
            println!(
                "  Video: {} {} @ {:.2} fps",
                video.codec,
                video.resolution(),
                video.fps
            );
            println!(
                "    Pixel format: {}",
                video.pixel_format.as_deref().unwrap_or("unknown")
            );
        }
        None => println!("  Video: none"),
    }
    match &descriptor.audio {
        Some(audio) => println!(
            "  Audio: {} {} Hz, {} channels",
            audio.codec, audio.sample_rate, audio.channels
        ),
        None => println!("  Audio: none"),
    }
    println!();
}
