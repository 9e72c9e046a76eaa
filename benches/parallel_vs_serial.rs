//! Benchmark: one worker vs the full pool
//!
//! Generates a tree of XML files, then runs every built-in rule over it with
//! a single-threaded engine and with one worker per core.
//!
//! Run with:
//!   cargo bench --bench parallel_vs_serial

use jxlint::{Linter, RuleSelection, builtin_registry, select_rules};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

const FILES_PER_DIR: usize = 200;
const DIRS: usize = 10;
const ITERATIONS: u32 = 20;

fn document(i: usize) -> String {
    let mut doc = String::new();
    if i % 3 != 0 {
        doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    doc.push_str("<project>\n");
    if i % 5 != 0 {
        doc.push_str("  <author>bench</author>\n");
    }
    for n in 0..50 {
        if n == 25 && i % 7 == 0 {
            doc.push_str("  <item id=\"1\" id=\"2\"/>\n");
        } else {
            doc.push_str(&format!("  <item id=\"{n}\" name=\"item-{n}\"/>\n"));
        }
    }
    doc.push_str("</project>\n");
    doc
}

fn generate_tree(root: &Path) {
    for d in 0..DIRS {
        let dir = root.join(format!("module-{d}"));
        fs::create_dir_all(&dir).expect("Failed to create directory");
        for f in 0..FILES_PER_DIR {
            fs::write(dir.join(format!("file-{f}.xml")), document(d * FILES_PER_DIR + f))
                .expect("Failed to write file");
        }
    }
}

fn bench(linter: &Linter, root: &Path) -> (Duration, usize) {
    let registry = builtin_registry();
    let selection = RuleSelection {
        all_warnings: true,
        ..Default::default()
    };
    let rules = select_rules(&registry, &selection).expect("Failed to select rules");

    let start = Instant::now();
    let mut violations = 0;
    for _ in 0..ITERATIONS {
        violations = linter.lint(&rules, root).violations.len();
    }
    (start.elapsed() / ITERATIONS, violations)
}

fn main() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    generate_tree(dir.path());

    let serial = Linter::with_jobs(1).expect("Failed to build serial engine");
    let parallel = Linter::new().expect("Failed to build parallel engine");

    let (serial_time, serial_count) = bench(&serial, dir.path());
    let (parallel_time, parallel_count) = bench(&parallel, dir.path());
    assert_eq!(serial_count, parallel_count, "engines disagree");

    println!("{} files, {} iterations", DIRS * FILES_PER_DIR, ITERATIONS);
    println!("  serial   (1 job):  {:?} per run", serial_time);
    println!(
        "  parallel ({} jobs): {:?} per run ({:.2}x)",
        parallel.jobs(),
        parallel_time,
        serial_time.as_secs_f64() / parallel_time.as_secs_f64().max(f64::EPSILON)
    );
    println!("  violations: {}", serial_count);
}
