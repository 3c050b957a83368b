use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};
use strum::EnumCount;

use crate::counters::{CounterKind, StatsSnapshot};

pub const CSV_TITLE: &str = "Ray Intersection Statistics";

/// Returns `part` as a percentage of `total`, 0 when `total` is 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total > 0 {
        100.0 * (part as f64) / (total as f64)
    } else {
        0.0
    }
}

fn per_ray(value: u64, rays: u64) -> f64 {
    if rays > 0 {
        (value as f64) / (rays as f64)
    } else {
        0.0
    }
}

/// Per-ray averages derived from a snapshot. All zero when no rays were traced.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Efficiency {
    pub avg_box_tests_per_ray: f64,
    pub avg_triangle_tests_per_ray: f64,
    pub avg_nodes_visited_per_ray: f64,
}

impl From<&StatsSnapshot> for Efficiency {
    fn from(snapshot: &StatsSnapshot) -> Self {
        let rays = snapshot.get(CounterKind::RaysTracedTotal);
        Self {
            avg_box_tests_per_ray: per_ray(snapshot.get(CounterKind::RayBoxTestsTotal), rays),
            avg_triangle_tests_per_ray: per_ray(
                snapshot.get(CounterKind::RayTriangleTestsTotal),
                rays,
            ),
            avg_nodes_visited_per_ray: per_ray(snapshot.get(CounterKind::BvhNodesVisited), rays),
        }
    }
}

// Labels are pre-padded so that the values line up within each section
fn write_section<W: Write>(
    w: &mut W,
    heading: &str,
    labels: [&str; 3],
    kinds: [CounterKind; 3],
    snapshot: &StatsSnapshot,
) -> io::Result<()> {
    let total = snapshot.get(kinds[0]);
    writeln!(w, "{}:", heading)?;
    writeln!(w, "  {}{}", labels[0], total)?;
    for (label, &kind) in labels[1..].iter().zip(&kinds[1..]) {
        let value = snapshot.get(kind);
        writeln!(w, "  {}{} ({:.2}%)", label, value, percentage(value, total))?;
    }
    Ok(())
}

/// Writes the human-readable summary of `snapshot` into `w`.
pub fn write_summary<W: Write>(
    w: &mut W,
    prefix: &str,
    snapshot: &StatsSnapshot,
) -> io::Result<()> {
    writeln!(w, "=== {}{} ===", prefix, CSV_TITLE)?;
    write_section(
        w,
        "Ray-Box Tests",
        ["Total:  ", "Hits:   ", "Misses: "],
        [
            CounterKind::RayBoxTestsTotal,
            CounterKind::RayBoxHits,
            CounterKind::RayBoxMisses,
        ],
        snapshot,
    )?;
    write_section(
        w,
        "Ray-Triangle Tests",
        ["Total:  ", "Hits:   ", "Misses: "],
        [
            CounterKind::RayTriangleTestsTotal,
            CounterKind::RayTriangleHits,
            CounterKind::RayTriangleMisses,
        ],
        snapshot,
    )?;
    write_section(
        w,
        "BVH Traversal",
        ["Nodes Visited: ", "Leaf Nodes:    ", "Inner Nodes:   "],
        [
            CounterKind::BvhNodesVisited,
            CounterKind::LeafNodesVisited,
            CounterKind::InnerNodesVisited,
        ],
        snapshot,
    )?;
    write_section(
        w,
        "Ray Tracing",
        ["Rays Traced:   ", "Rays Hit:      ", "Rays Miss:     "],
        [
            CounterKind::RaysTracedTotal,
            CounterKind::RaysWithHits,
            CounterKind::RaysWithoutHits,
        ],
        snapshot,
    )?;

    let efficiency = Efficiency::from(snapshot);
    writeln!(w, "Efficiency Metrics:")?;
    writeln!(
        w,
        "  Avg Box Tests/Ray:      {:.2}",
        efficiency.avg_box_tests_per_ray
    )?;
    writeln!(
        w,
        "  Avg Triangle Tests/Ray: {:.2}",
        efficiency.avg_triangle_tests_per_ray
    )?;
    writeln!(
        w,
        "  Avg Nodes Visited/Ray:  {:.2}",
        efficiency.avg_nodes_visited_per_ray
    )?;

    writeln!(w, "========================================")
}

/// Prints the summary to stdout. Never fails, write errors are only logged.
pub fn print_stats(prefix: &str, snapshot: &StatsSnapshot) {
    if cfg!(debug_assertions) {
        for issue in snapshot.consistency_issues() {
            stats_warn!("Inconsistent counters: {}", issue);
        }
    }

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    if let Err(why) = write_summary(&mut lock, prefix, snapshot).and_then(|_| lock.flush()) {
        stats_error!("Failed to print statistics: {}", why);
    }
}

/// Writes the CSV export: a `#` title line followed by one `name,value` line per counter.
pub fn write_csv<W: Write>(w: &mut W, snapshot: &StatsSnapshot) -> io::Result<()> {
    writeln!(w, "# {}", CSV_TITLE)?;
    for (kind, value) in snapshot.iter() {
        writeln!(w, "{},{}", kind.name(), value)?;
    }
    Ok(())
}

/// Creates or truncates `path` and writes the CSV export into it.
pub fn try_save_to_file(path: &Path, snapshot: &StatsSnapshot) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_csv(&mut w, snapshot)?;
    w.flush()
}

/// Like [try_save_to_file] but only logs failures. Losing the export must not take
/// the host down with it.
pub fn save_to_file(path: &Path, snapshot: &StatsSnapshot) {
    match try_save_to_file(path, snapshot) {
        Ok(()) => stats_info!("Statistics saved to {}", path.to_string_lossy()),
        Err(why) => stats_error!(
            "Cannot write statistics to '{}': {}",
            path.to_string_lossy(),
            why
        ),
    }
}

/// Parses a CSV export back into a snapshot.
///
/// Comment and empty lines are skipped. Every counter must appear exactly once.
pub fn parse_csv<R: BufRead>(reader: R) -> Result<StatsSnapshot, String> {
    let mut snapshot = StatsSnapshot::default();
    let mut seen = [false; CounterKind::COUNT];

    for (i, line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = line.map_err(|why| format!("Line {}: Read failed: {}", line_number, why))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, value) = line
            .split_once(',')
            .ok_or_else(|| format!("Line {}: Expected 'name,value'", line_number))?;
        let kind = CounterKind::from_str(name.trim())
            .map_err(|_| format!("Line {}: Unknown counter '{}'", line_number, name))?;
        let value = value.trim().parse::<u64>().map_err(|why| {
            format!(
                "Line {}: Invalid value '{}' for '{}': {}",
                line_number,
                value,
                kind.name(),
                why
            )
        })?;

        let seen_kind = &mut seen[kind as usize];
        if *seen_kind {
            return Err(format!(
                "Line {}: Duplicate counter '{}'",
                line_number,
                kind.name()
            ));
        }
        *seen_kind = true;
        snapshot.set(kind, value);
    }

    let missing: Vec<&str> = snapshot
        .iter()
        .filter(|(kind, _)| !seen[*kind as usize])
        .map(|(kind, _)| kind.name())
        .collect();
    if !missing.is_empty() {
        return Err(format!("Missing counters: {}", missing.join(", ")));
    }

    Ok(snapshot)
}

pub fn load_from_file(path: &Path) -> Result<StatsSnapshot, String> {
    let file = File::open(path)
        .map_err(|why| format!("Could not open '{}': {}", path.to_string_lossy(), why))?;
    parse_csv(BufReader::new(file))
        .map_err(|why| format!("Invalid statistics in '{}': {}", path.to_string_lossy(), why))
}
