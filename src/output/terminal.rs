// Colored terminal output for split summaries, score details, feature
// inspection, and evaluation reports.
//
// All terminal-specific formatting lives here; main.rs delegates.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::corpus::record::{Partition, Record};
use crate::corpus::Corpus;
use crate::eval::EvalReport;
use crate::features::table::FeatureTable;
use crate::split::SplitAssignment;

/// Display partition counts overall and per task.
pub fn display_split_summary(corpus: &Corpus, split: &SplitAssignment) {
    println!(
        "\n{}",
        format!("=== Partition Summary ({} records) ===", corpus.len()).bold()
    );
    println!();
    println!(
        "  {} train, {} test, {} orig",
        split.count(Partition::Train).to_string().bright_green(),
        split.count(Partition::Test).to_string().bright_yellow(),
        split.count(Partition::Orig).to_string().dimmed(),
    );
    println!();

    // Per-task breakdown, tasks in name order.
    let mut per_task: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
    for record in corpus.records() {
        let entry = per_task.entry(record.task.as_str()).or_default();
        match split.partition(&record.file) {
            Some(Partition::Train) => entry.0 += 1,
            Some(Partition::Test) => entry.1 += 1,
            Some(Partition::Orig) => entry.2 += 1,
            None => {}
        }
    }

    println!(
        "  {:<12} {:>6} {:>6} {:>6}",
        "Task".dimmed(),
        "train".dimmed(),
        "test".dimmed(),
        "orig".dimmed(),
    );
    for (task, (train, test, orig)) in per_task {
        println!("  {task:<12} {train:>6} {test:>6} {orig:>6}");
    }
    println!();
}

/// Display every similarity score for one answer file.
pub fn display_score_detail(record: &Record, scores: &[(String, f64)]) {
    println!("\n{}", format!("=== Scores for {} ===", record.file).bold());
    println!("  Task: {}", record.task);
    println!("  Category: {}", record.category);
    println!("  Class: {}", record.class());
    println!();

    for (column, score) in scores {
        let rendered = format!("{score:.4}");
        let colored_score = if *score >= 0.8 {
            rendered.bright_red()
        } else if *score >= 0.4 {
            rendered.bright_yellow()
        } else {
            rendered.bright_green()
        };
        println!("  {column:<10} {colored_score}");
    }
    println!();
}

/// Display per-column summary statistics over non-source rows, then the
/// absolute correlation matrix between columns.
pub fn display_feature_summary(table: &FeatureTable, corpus: &Corpus, correlation: &[Vec<f64>]) {
    let scored: Vec<&[f64]> = table
        .rows()
        .iter()
        .filter(|row| {
            corpus
                .get(&row.file)
                .map(|r| !r.is_source())
                .unwrap_or(false)
        })
        .map(|row| row.values.as_slice())
        .collect();

    println!(
        "\n{}",
        format!(
            "=== Feature Summary ({} scored rows, {} columns) ===",
            scored.len(),
            table.columns().len()
        )
        .bold()
    );
    println!();
    println!(
        "  {:<10} {:>8} {:>8} {:>8}",
        "Column".dimmed(),
        "mean".dimmed(),
        "min".dimmed(),
        "max".dimmed(),
    );

    for (index, column) in table.columns().iter().enumerate() {
        let values: Vec<f64> = scored.iter().map(|row| row[index]).collect();
        if let Some((mean, min, max)) = summarize(&values) {
            println!("  {column:<10} {mean:>8.4} {min:>8.4} {max:>8.4}");
        } else {
            println!("  {column:<10} {:>8} {:>8} {:>8}", "-", "-", "-");
        }
    }

    println!();
    println!("{}", "=== Feature Correlation (abs) ===".bold());
    println!();
    print!("  {:<10}", "");
    for column in table.columns() {
        print!(" {:>8}", column.dimmed());
    }
    println!();
    for (column, row) in table.columns().iter().zip(correlation) {
        print!("  {column:<10}");
        for value in row {
            print!(" {value:>8.2}");
        }
        println!();
    }
    println!();
}

/// Display the accuracy report for external predictions.
pub fn display_evaluation(report: &EvalReport) {
    println!("\n{}", "=== Evaluation ===".bold());
    println!();

    let accuracy_pct = report.accuracy() * 100.0;
    let rendered = format!("{accuracy_pct:.1}%");
    let colored_accuracy = if report.accuracy() >= 0.9 {
        rendered.bright_green()
    } else if report.accuracy() >= 0.7 {
        rendered.bright_yellow()
    } else {
        rendered.bright_red()
    };
    println!(
        "  Accuracy: {} ({}/{} correct)",
        colored_accuracy, report.correct, report.total
    );
    println!();
    println!(
        "  {:<16} {:>6}",
        "true positive".dimmed(),
        report.true_positive
    );
    println!(
        "  {:<16} {:>6}",
        "true negative".dimmed(),
        report.true_negative
    );
    println!(
        "  {:<16} {:>6}",
        "false positive".dimmed(),
        report.false_positive
    );
    println!(
        "  {:<16} {:>6}",
        "false negative".dimmed(),
        report.false_negative
    );
    println!();
}

fn summarize(values: &[f64]) -> Option<(f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((mean, min, max))
}
