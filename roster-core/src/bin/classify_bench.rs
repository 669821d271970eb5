//! Classification Benchmarking Tool
//!
//! Measures throughput of the casing and classification stages on a large
//! contact dump, to get realistic numbers for bulk list cleaning.
//!
//! ## Input
//!
//! A text file with one `first,last,email` row per line (no header, no
//! quoting). Optional reference lists, one name per line, can be supplied to
//! exercise the dictionary rules; without them every lookup misses.
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/classify_bench contacts.txt
//! ./target/release/classify_bench contacts.txt given.txt surnames.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Classify ===
//! --------------------------------
//! Mode        : Classify
//! Elapsed     : 0.215 s
//! Records     : 1_000_000
//! Records/sec : 4_651_162
//! --------------------------------
//! ```
//!
//! Build with `--release`; use a few hundred thousand rows or more.

use std::env;
use std::fs;
use std::io;
use std::time::{Duration, Instant};

use roster_core::casing::case_full_name_into;
use roster_core::dictionary::{parse_name_lines, NameDictionary};
use roster_core::{ClassificationTally, RawRecord, RecordClassifier};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: classify_bench <contacts> [given-names] [surnames]");
        std::process::exit(1);
    }

    println!("Loading file...");
    let input = fs::read_to_string(&args[1])?;
    let records = parse_rows(&input);

    let mut dictionary = NameDictionary::new();
    if let Some(path) = args.get(2) {
        dictionary.extend_given_names(parse_name_lines(&fs::read_to_string(path)?));
    }
    if let Some(path) = args.get(3) {
        dictionary.extend_surnames(parse_name_lines(&fs::read_to_string(path)?));
    }

    println!("Records:    {}", fmt_count(records.len() as u64));
    println!("Dictionary: {}\n", dictionary);

    bench_casing(&records);
    bench_classify(&records, &dictionary);

    Ok(())
}

fn parse_rows(input: &str) -> Vec<RawRecord> {
    input
        .lines()
        .map(|line| {
            let mut fields = line.splitn(3, ',');
            RawRecord::new(
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
                fields.next().unwrap_or_default(),
            )
        })
        .collect()
}

fn bench_casing(records: &[RawRecord]) {
    let mut buf = String::with_capacity(64);

    println!("=== Casing ===");

    let mut run = || {
        let mut bytes = 0usize;
        for r in records {
            case_full_name_into(&r.first_name, &mut buf);
            bytes += buf.len();
            case_full_name_into(&r.last_name, &mut buf);
            bytes += buf.len();
        }
        std::hint::black_box(bytes);
    };

    warmup(&mut run);
    let elapsed = measure(&mut run);

    print_perf("Casing", records.len() as u64, elapsed);
}

fn bench_classify(records: &[RawRecord], dictionary: &NameDictionary) {
    let classifier = RecordClassifier::new(dictionary);
    let mut tally = ClassificationTally::default();

    println!("=== Classify ===");

    warmup(|| {
        std::hint::black_box(classifier.classify_batch(records));
    });

    let elapsed = measure(|| {
        let out = classifier.classify_batch(records);
        tally = ClassificationTally::from_records(&out);
        std::hint::black_box(out);
    });

    print_perf("Classify", records.len() as u64, elapsed);
    println!("Outcome     : {}\n", tally);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, records: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Records     : {}", fmt_count(records));
    if secs > 0.0 {
        println!("Records/sec : {}", fmt_count((records as f64 / secs) as u64));
    }
    println!("--------------------------------\n");
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
