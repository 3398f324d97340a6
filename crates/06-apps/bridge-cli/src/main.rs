//! Command-line driver that exercises the bridge end to end.

use anyhow::{bail, Context, Result};
use bridge::prelude::*;
use bridge::OpaqueType;
use bridge_abi::symbol::{c_declarations_for_opaque_vec, c_declarations_for_primitive_vec};
use bridge_abi::Primitive;
use clap::{Parser, Subcommand};
use core_runtime::{ledger, LedgerSnapshot, RuntimeConfig};

/// Text rendering helpers used by the CLI commands.
mod render {
    use core_runtime::LedgerSnapshot;
    use std::fmt::Write;

    /// Format the length and the pop order of a LIFO run.
    pub fn lifo(len: usize, popped: &[String]) -> String {
        let mut out = format!("len: {len}\n");
        for value in popped {
            writeln!(out, "pop: {value}").expect("write pop");
        }
        out.push_str("pop: <empty>\n");
        out
    }

    /// Format one trimmed element per line, indexed.
    pub fn trimmed(values: &[String]) -> String {
        let mut out = String::new();
        for (index, value) in values.iter().enumerate() {
            writeln!(out, "[{index}] {value:?}").expect("write element");
        }
        out
    }

    /// Format the slice view and sum of a numeric vector.
    pub fn numbers(slice: &[i64], sum: i64) -> String {
        format!("slice: {slice:?}\nsum: {sum}\n")
    }

    /// Format ledger counters as aligned text.
    pub fn ledger(snap: &LedgerSnapshot) -> String {
        let mut out = String::from("ledger:\n");
        for (label, value) in [
            ("string allocs", snap.string_allocs),
            ("string frees", snap.string_frees),
            ("string transfers", snap.string_transfers),
            ("vec allocs", snap.vec_allocs),
            ("vec frees", snap.vec_frees),
            ("elements dropped", snap.elements_dropped),
            ("live strings", snap.live_strings()),
            ("live vecs", snap.live_vecs()),
        ] {
            writeln!(out, "  {label:<17}{value}").expect("write counter");
        }
        out
    }
}

/// Drive the opaque-handle bridge from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about = "Exercise the opaque-handle bridge", long_about = None)]
struct Cli {
    /// Trace every boundary call at `trace` level.
    #[arg(long, global = true)]
    trace: bool,

    /// Initial capacity of vectors created by the runtime.
    #[arg(long, global = true, default_value_t = 0, value_name = "N")]
    capacity: usize,

    /// Print the allocation ledger as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Push values into a string vector, then pop them all back.
    Lifo {
        #[arg(required = true, value_name = "VALUES")]
        values: Vec<String>,
    },
    /// Print each value trimmed, read back through the vector iterator.
    Trim {
        #[arg(required = true, value_name = "VALUES")]
        values: Vec<String>,
    },
    /// Collect integers into a vector and print its slice view and sum.
    Numbers {
        #[arg(required = true, allow_negative_numbers = true, value_name = "VALUES")]
        values: Vec<i64>,
    },
    /// Print the C declarations of a type's vector ABI.
    Abi {
        /// `RustString` or a primitive name such as `u32`.
        #[arg(value_name = "TYPE")]
        type_name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.trace);
    core_runtime::configure(RuntimeConfig {
        trace_boundary_calls: cli.trace,
        vec_capacity_hint: cli.capacity,
    });
    ledger::reset();

    let report = match &cli.command {
        Command::Lifo { values } => {
            let (len, popped) = run_lifo(values);
            render::lifo(len, &popped)
        }
        Command::Trim { values } => render::trimmed(&run_trim(values)),
        Command::Numbers { values } => {
            let (slice, sum) = run_numbers(values)?;
            render::numbers(&slice, sum)
        }
        Command::Abi { type_name } => {
            print!("{}", abi_declarations(type_name)?);
            return Ok(());
        }
    };
    print!("{report}");
    print_ledger(&ledger::snapshot(), cli.json)?;
    Ok(())
}

fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}

fn run_lifo(values: &[String]) -> (usize, Vec<String>) {
    let mut vec: RustVec<RustString> =
        values.iter().map(|v| RustString::from(v.as_str())).collect();
    let len = vec.len();
    log::debug!("pushed {len} values");
    let popped = std::iter::from_fn(|| vec.pop())
        .map(|value| value.to_owned_string())
        .collect();
    (len, popped)
}

fn run_trim(values: &[String]) -> Vec<String> {
    let vec: RustVec<RustString> =
        values.iter().map(|v| RustString::from(v.as_str())).collect();
    vec.iter().map(|value| value.trim().to_owned()).collect()
}

fn run_numbers(values: &[i64]) -> Result<(Vec<i64>, i64)> {
    let vec: RustVec<i64> = values.iter().copied().collect();
    let slice = vec.as_slice();
    let mut sum = 0i64;
    for value in slice {
        sum = match sum.checked_add(*value) {
            Some(next) => next,
            None => bail!("sum of {} values overflows i64", slice.len()),
        };
    }
    Ok((slice.to_vec(), sum))
}

fn abi_declarations(type_name: &str) -> Result<String> {
    if type_name == RustString::TYPE_NAME {
        return Ok(c_declarations_for_opaque_vec(type_name));
    }
    let prim = Primitive::from_name(type_name)
        .with_context(|| format!("no vector ABI for type '{type_name}'"))?;
    Ok(c_declarations_for_primitive_vec(prim))
}

fn print_ledger(snap: &LedgerSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snap).context("failed to encode ledger")?);
    } else {
        print!("{}", render::ledger(snap));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn lifo_pops_in_reverse_and_frees_everything() {
        ledger::reset();
        let (len, popped) = run_lifo(&strings(&["a", "b", "c"]));
        assert_eq!(len, 3);
        assert_eq!(popped, ["c", "b", "a"]);

        let snap = ledger::snapshot();
        assert_eq!(snap.live_strings(), 0);
        assert_eq!(snap.live_vecs(), 0);
        assert_eq!(snap.string_frees, 3);
        assert_eq!(snap.elements_dropped, 0);
    }

    #[test]
    fn lifo_render_matches_expectation() {
        assert_snapshot!(render::lifo(2, &strings(&["y", "x"])), @r"
        len: 2
        pop: y
        pop: x
        pop: <empty>
        ");
    }

    #[test]
    fn trim_strips_each_element() {
        let trimmed = run_trim(&strings(&["  left", "right  ", " both "]));
        assert_eq!(trimmed, ["left", "right", "both"]);
        assert_snapshot!(render::trimmed(&trimmed), @r#"
        [0] "left"
        [1] "right"
        [2] "both"
        "#);
    }

    #[test]
    fn numbers_sum_the_slice_view() {
        let (slice, sum) = run_numbers(&[3, -1, 10]).expect("sum fits");
        assert_eq!(slice, [3, -1, 10]);
        assert_eq!(sum, 12);
        assert!(run_numbers(&[i64::MAX, 1]).is_err());
    }

    #[test]
    fn abi_accepts_string_and_primitives() {
        let strings = abi_declarations("RustString").expect("RustString ABI");
        assert!(strings.starts_with("typedef struct RustString RustString;\n"));
        let bytes = abi_declarations("u8").expect("u8 ABI");
        assert!(bytes.contains("__bridge__$Vec_u8$push(void* vec_ptr, uint8_t item);"));
        let err = abi_declarations("char").expect_err("char is not bridged");
        assert!(err.to_string().contains("char"));
    }

    #[test]
    fn ledger_render_lists_counters() {
        let snap = LedgerSnapshot {
            string_allocs: 3,
            string_frees: 1,
            string_transfers: 2,
            vec_allocs: 1,
            vec_frees: 1,
            elements_dropped: 2,
        };
        let text = render::ledger(&snap);
        assert!(text.starts_with("ledger:\n"));
        assert!(text.contains("  string allocs    3\n"));
        assert!(text.contains("  live strings     0\n"));
        let json = serde_json::to_value(snap).expect("ledger json");
        assert_eq!(json["string_transfers"], 2);
    }
}
