//! Basic resonad example
//!
//! Parses a list of numbers, divides a total by each one, and reports
//! which steps succeeded. Division panics on zero; `rescuing_from` turns
//! that panic into a Failure instead of aborting the run.
//!
//! # Environment Variables
//!
//! - `RESONAD_DEMO_INPUTS=21,0,abc` - Comma-separated inputs
//! - `RESONAD_DEMO_TOTAL=84` - Dividend
//! - `RESONAD_LOG_LEVEL=debug` - Show adapter decisions
// RESONAD_LOG_LEVEL=debug cargo run -p resonad-basic

use resonad::{env_get, kerror, kinfo, kwarn, metrics, rescuing_from, success, ErrorKind, Resonad};

#[derive(Debug)]
enum Step {
    Parse(String),
    Divide(String),
}

fn parse(input: &str) -> Resonad<i64, Step> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|e| Step::Parse(format!("{input:?}: {e}")))
        .into()
}

fn divide(total: i64, n: i64) -> Resonad<i64, Step> {
    rescuing_from(&[ErrorKind::message()], move || total / n)
        .map_error(|raised| Step::Divide(raised.to_string()))
}

fn main() {
    println!("=== resonad Basic Example ===\n");

    resonad::init_logging();

    let inputs: String = env_get("RESONAD_DEMO_INPUTS", "21,0,abc".to_string());
    let total: i64 = env_get("RESONAD_DEMO_TOTAL", 84);
    metrics::reset_all();

    // A rescued panic still runs the panic hook; silence it for the loop only.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));

    let mut succeeded = 0;
    for input in inputs.split(',') {
        let outcome = parse(input)
            .on_success(|n| kinfo!("parsed {}", n))
            .chain(|n| divide(total, n))
            .on_failure(|step| kwarn!("step failed: {:?}", step));

        match &outcome {
            Resonad::Success(q) => {
                succeeded += 1;
                println!("{total} / {} = {q}", input.trim());
            }
            Resonad::Failure(step) => println!("{:<6} -> {} ({:?})", input.trim(), outcome.tag(), step),
        }
    }

    std::panic::set_hook(default_hook);
    if succeeded == 0 {
        kerror!("no input in {:?} produced a quotient", inputs);
    }

    let fallback = parse("not a number").chain_error(|_| success::<_, Step>(1));
    println!("\nfallback after a parse failure: {:?}", fallback.value());

    println!("\n{}", metrics::dump_prometheus());
}
