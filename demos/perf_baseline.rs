//! Performance baseline for document conversion and preview rewriting
//!
//! Runs both hot paths over synthetic articles of increasing size and
//! prints a JSON summary, so regressions show up as numbers instead of
//! anecdotes.

use std::time::Instant;

use cms_richtext_converter::blob::MemoryBlobRegistry;
use cms_richtext_converter::converter::DocumentConverter;
use cms_richtext_converter::image::ImageFile;
use cms_richtext_converter::preview::PreviewRewriter;
use cms_richtext_converter::slate::{SlateKind, SlateNode};
use serde_json::json;

#[derive(Clone, Copy)]
struct RunConfig {
    warmup: usize,
    iterations: usize,
}

#[derive(Default, Clone)]
struct Stats {
    avg_ms: f64,
    p50_ms: f64,
    p95_ms: f64,
    runs_per_s: f64,
}

fn percentile_ms(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx]
}

fn summarize(durations_s: &[f64]) -> Stats {
    let mut ms: Vec<f64> = durations_s.iter().map(|d| d * 1000.0).collect();
    ms.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let total_s: f64 = durations_s.iter().sum();
    let avg_ms = if durations_s.is_empty() {
        0.0
    } else {
        total_s * 1000.0 / durations_s.len() as f64
    };
    let runs_per_s = if total_s > 0.0 {
        durations_s.len() as f64 / total_s
    } else {
        0.0
    };

    Stats {
        avg_ms,
        p50_ms: percentile_ms(&ms, 0.50),
        p95_ms: percentile_ms(&ms, 0.95),
        runs_per_s,
    }
}

fn bench<F: FnMut()>(config: RunConfig, mut op: F) -> Stats {
    for _ in 0..config.warmup {
        op();
    }
    let mut durations = Vec::with_capacity(config.iterations);
    for _ in 0..config.iterations {
        let start = Instant::now();
        op();
        durations.push(start.elapsed().as_secs_f64());
    }
    summarize(&durations)
}

/// A legacy article cycling through paragraphs, headings, lists and images
fn synthetic_article(blocks: usize) -> Vec<SlateNode> {
    let mut nodes = Vec::with_capacity(blocks);
    for index in 0..blocks {
        let node = match index % 4 {
            0 => SlateNode {
                kind: Some(SlateKind::Paragraph),
                children: vec![
                    SlateNode {
                        text: Some(format!("Plain run {index} ")),
                        ..SlateNode::default()
                    },
                    SlateNode {
                        text: Some("with styling".to_string()),
                        bold: true,
                        italic: index % 8 == 0,
                        ..SlateNode::default()
                    },
                ],
                ..SlateNode::default()
            },
            1 => SlateNode {
                kind: Some(SlateKind::HeadingTwo),
                children: vec![SlateNode {
                    text: Some(format!("Section {index}")),
                    ..SlateNode::default()
                }],
                ..SlateNode::default()
            },
            2 => SlateNode {
                kind: Some(SlateKind::BulletedList),
                children: (0..3)
                    .map(|item| SlateNode {
                        kind: Some(SlateKind::ListItem),
                        children: vec![SlateNode {
                            kind: Some(SlateKind::Paragraph),
                            children: vec![SlateNode {
                                text: Some(format!("entry {index}.{item}")),
                                ..SlateNode::default()
                            }],
                            ..SlateNode::default()
                        }],
                        ..SlateNode::default()
                    })
                    .collect(),
                ..SlateNode::default()
            },
            _ => SlateNode {
                kind: Some(SlateKind::Image),
                url: Some(format!("uploads/figure-{index}.png")),
                ..SlateNode::default()
            },
        };
        nodes.push(node);
    }
    nodes
}

/// An exported document plus its picked image files
fn synthetic_export(image_count: usize, paragraphs: usize) -> (String, Vec<ImageFile>) {
    let mut html = String::with_capacity(paragraphs * 80);
    html.push_str("<html><head><base href=\"https://export.example/doc/\"></head><body>\n");
    for index in 0..paragraphs {
        html.push_str(&format!("<p>Paragraph {index} with some running text.</p>\n"));
        if index % 5 == 0 {
            html.push_str(&format!(
                "<img src=\"images/pic{}.png\" alt=\"figure\">\n",
                index % image_count.max(1)
            ));
        }
    }
    html.push_str("</body></html>\n");

    let images = (0..image_count)
        .map(|index| {
            ImageFile::new(
                format!("pic{index}.PNG"),
                "image/png",
                vec![0u8; 4 * 1024],
            )
        })
        .collect();
    (html, images)
}

fn main() {
    let config = RunConfig {
        warmup: 5,
        iterations: 50,
    };
    let converter = DocumentConverter::new();
    let rewriter = PreviewRewriter::new();

    let mut conversion_runs = Vec::new();
    for blocks in [100usize, 1_000, 5_000] {
        let nodes = synthetic_article(blocks);
        let stats = bench(config, || {
            let document = converter.convert(&nodes);
            std::hint::black_box(document);
        });
        conversion_runs.push(json!({
            "blocks": blocks,
            "avg_ms": stats.avg_ms,
            "p50_ms": stats.p50_ms,
            "p95_ms": stats.p95_ms,
            "runs_per_s": stats.runs_per_s,
        }));
    }

    let mut preview_runs = Vec::new();
    for (image_count, paragraphs) in [(5usize, 50usize), (25, 500), (50, 2_000)] {
        let (html, images) = synthetic_export(image_count, paragraphs);
        let stats = bench(config, || {
            let mut registry = MemoryBlobRegistry::new();
            let preview = rewriter
                .rewrite(&html, &images, &mut registry)
                .expect("in-memory registration cannot fail");
            std::hint::black_box(preview);
        });
        preview_runs.push(json!({
            "images": image_count,
            "paragraphs": paragraphs,
            "html_bytes": html.len(),
            "avg_ms": stats.avg_ms,
            "p50_ms": stats.p50_ms,
            "p95_ms": stats.p95_ms,
            "runs_per_s": stats.runs_per_s,
        }));
    }

    let summary = json!({
        "config": {"warmup": config.warmup, "iterations": config.iterations},
        "conversion": conversion_runs,
        "preview": preview_runs,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("serialize summary")
    );
}
