use crate::pipeline::BusFactorReport;
use crate::report_helpers::{format_date, max_display_width, pad_right, separator};

fn print_footer(report: &BusFactorReport) {
    if let Some(window) = report.window {
        println!(
            "Window: {} .. {}  ({} commits analyzed, {} bot commits skipped)",
            format_date(window.start),
            format_date(window.end),
            report.commits_analyzed,
            report.bot_commits_skipped
        );
    }
    if !report.anomalies.is_empty() {
        println!(
            "{} record(s) skipped; run with -v or --json for details",
            report.anomalies.len()
        );
    }
}

pub fn print_keys(report: &BusFactorReport, top: usize) {
    if report.contributors.is_empty() {
        println!("No contributors found in the analysis window.");
        print_footer(report);
        return;
    }

    let shown = &report.contributors[..top.min(report.contributors.len())];
    let labels: Vec<String> = shown
        .iter()
        .map(|c| {
            if c.is_activity_only {
                format!("{} (activity)", c.name)
            } else {
                c.name.clone()
            }
        })
        .collect();
    let name_width = max_display_width(labels.iter().map(String::as_str), 4);

    // rank(4) + name + key(4) + score(8) + degree(7) + loc(9) + files(7) + activity(9) + gaps
    let header_width = name_width + 56;
    let sep = separator(header_width.max(72));

    println!("Bus Factor: {}", report.bus_factor);
    println!("{sep}");
    println!(
        " {:>3}  {}  {:>3} {:>8} {:>7} {:>9} {:>7} {:>9}",
        "#",
        pad_right("Name", name_width),
        "Key",
        "Score",
        "Degree",
        "LOC",
        "Files",
        "Activity",
    );
    println!("{sep}");

    for (i, (c, label)) in shown.iter().zip(&labels).enumerate() {
        let marker = if c.is_key { "*" } else { "" };
        println!(
            " {:>3}  {}  {:>3} {:>8.3} {:>7} {:>9} {:>7} {:>9}",
            i + 1,
            pad_right(label, name_width),
            marker,
            c.score,
            c.degree,
            c.loc,
            c.files,
            c.activity,
        );
    }

    println!("{sep}");
    if shown.len() < report.contributors.len() {
        println!(
            "Showing {} of {} contributors (use --top to change)",
            shown.len(),
            report.contributors.len()
        );
    }
    println!("Key contributors: {}", report.key_contributors.join(", "));
    print_footer(report);
}

pub fn print_shares(report: &BusFactorReport, top: usize) {
    if report.key_contributors.is_empty() {
        println!("No key contributors found in the analysis window.");
        print_footer(report);
        return;
    }

    for name in &report.key_contributors {
        let Some(files) = report.files_per_contributor_with_percentages.get(name) else {
            continue;
        };
        let sizes = report.key_file_sizes.get(name);

        let mut rows: Vec<(&str, f64)> = files.iter().map(|(p, &pct)| (p.as_str(), pct)).collect();
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        let total = rows.len();
        rows.truncate(top);

        let path_width = max_display_width(rows.iter().map(|(p, _)| *p), 4);
        let sep = separator((path_width + 30).max(60));

        println!("{name} ({total} files)");
        println!("{sep}");
        println!(" {}  {:>8} {:>10} {:>8}", pad_right("File", path_width), "Share", "Changed", "Lines");
        println!("{sep}");
        for (path, pct) in &rows {
            let changed = report.all_files_with_sizes.get(*path).copied().unwrap_or(0);
            let lines = sizes
                .and_then(|s| s.get(*path).copied().flatten())
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            println!(
                " {}  {:>7.2}% {:>10} {:>8}",
                pad_right(path, path_width),
                pct,
                changed,
                lines
            );
        }
        println!("{sep}");
        if rows.len() < total {
            println!("Showing {} of {total} files (use --top to change)", rows.len());
        }
        println!();
    }
    print_footer(report);
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
