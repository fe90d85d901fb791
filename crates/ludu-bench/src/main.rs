use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{ArgAction, Parser};
use serde::Serialize;

use ludu_interpreter::Interpreter;
use ludu_lexer::Lexer;
use ludu_parser::Parser as LuduParser;

#[derive(Parser, Debug)]
#[command(name = "ludu-bench", about = "Run LuduScript benchmarks")]
struct Cli {
    /// Specific test(s) to run (by name, e.g. objects). If omitted, runs all discovered scripts.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per test (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 2)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// List discovered tests and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_lex_ms: f64,
    avg_parse_ms: f64,
    avg_exec_ms: f64,
    records: usize,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    ludu_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ScriptCase {
    name: String,
    path: PathBuf,
}

/// Per-iteration timings of one script, in milliseconds.
#[derive(Debug, Default)]
struct Samples {
    totals: Vec<f64>,
    lexes: Vec<f64>,
    parses: Vec<f64>,
    execs: Vec<f64>,
    records: usize,
}

fn workspace_root() -> PathBuf {
    // crates/ludu-bench -> crates -> root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn discover_scripts(dir: &Path) -> Vec<ScriptCase> {
    let mut out = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.extension().and_then(|s| s.to_str()) == Some("ludu") {
                let name = p.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_string();
                out.push(ScriptCase { name, path: p });
            }
        }
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Runs `src` once through every stage, returning the stage timings and the
/// number of records emitted.
fn run_once(src: &str) -> Result<(f64, f64, f64, usize), String> {
    let mut t = Instant::now();
    let tokens = Lexer::new(src).tokenize();
    let t_lex = dur_ms(t.elapsed());

    t = Instant::now();
    let mut parser = LuduParser::new(tokens);
    let program = parser.parse_program().map_err(|e| format!("Parse error: {}", e))?;
    let t_parse = dur_ms(t.elapsed());

    t = Instant::now();
    let mut interp = Interpreter::new();
    interp.run(&program).map_err(|e| format!("Runtime error: {}", e))?;
    let t_exec = dur_ms(t.elapsed());

    Ok((t_lex, t_parse, t_exec, interp.output().len()))
}

fn measure_script(src: &str, iterations: u32, warmup: u32) -> Result<Samples, String> {
    for _ in 0..warmup {
        run_once(src)?;
    }

    let mut samples = Samples::default();
    for _ in 0..iterations {
        let t0 = Instant::now();
        let (lex, parse, exec, records) = run_once(src)?;
        samples.totals.push(dur_ms(t0.elapsed()));
        samples.lexes.push(lex);
        samples.parses.push(parse);
        samples.execs.push(exec);
        samples.records = records;
    }
    Ok(samples)
}

fn dur_ms(d: std::time::Duration) -> f64 { d.as_secs_f64() * 1000.0 }

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    if vals.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = vals.iter().sum::<f64>() / (vals.len() as f64);
    (avg, min, max)
}

fn main() {
    let cli = Cli::parse();

    let root = workspace_root();
    let mut scripts = discover_scripts(&root.join("benchmark/scripts"));

    if cli.list {
        println!("Discovered tests:");
        for s in &scripts { println!("- {} ({})", s.name, s.path.display()); }
        return;
    }

    if !cli.tests.is_empty() {
        let wanted: std::collections::HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        scripts.retain(|s| wanted.contains(&s.name.to_lowercase()));
        if scripts.is_empty() {
            eprintln!("No matching tests. Use --list to see available.");
            std::process::exit(2);
        }
    }

    if scripts.is_empty() {
        eprintln!("No .ludu scripts found in benchmark/scripts.");
        std::process::exit(2);
    }

    let mut results = Vec::new();

    for case in &scripts {
        let src = match fs::read_to_string(&case.path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{:>12}: skipped, failed to read {}: {}", case.name, case.path.display(), e);
                continue;
            }
        };
        let samples = match measure_script(&src, cli.iterations, cli.warmup) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{:>12}: skipped, {}", case.name, e);
                continue;
            }
        };
        let (avg_t, min_t, max_t) = stats(&samples.totals);
        let (avg_l, _, _) = stats(&samples.lexes);
        let (avg_p, _, _) = stats(&samples.parses);
        let (avg_e, _, _) = stats(&samples.execs);

        println!(
            "{:>12}: total avg={:.3}ms min={:.3}ms max={:.3}ms | lex={:.3}ms parse={:.3}ms exec={:.3}ms | records={}",
            case.name, avg_t, min_t, max_t, avg_l, avg_p, avg_e, samples.records
        );

        results.push(BenchResult {
            name: case.name.clone(),
            iterations: cli.iterations,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_lex_ms: avg_l,
            avg_parse_ms: avg_p,
            avg_exec_ms: avg_e,
            records: samples.records,
        });
    }

    let out_path = match cli.output.clone() {
        Some(p) => p,
        None => {
            // Filesystem-safe timestamp
            let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
            root.join("benchmark/results").join(format!("{}.json", ts_file))
        }
    };

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        ludu_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let json = match serde_json::to_string_pretty(&doc) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to serialize results: {}", e);
            std::process::exit(3);
        }
    };
    if let Some(parent) = out_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {}", parent.display(), e);
            std::process::exit(3);
        }
    }
    if let Err(e) = fs::write(&out_path, json) {
        eprintln!("Failed to write {}: {}", out_path.display(), e);
        std::process::exit(3);
    }

    println!("\nSaved results to {}", out_path.display());
}
