use capcheck::*;

/// A consistency checker for memory pool capacity tables
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a captured capacity table
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input:      PathBuf,

    /// Exit status of the process that produced the table
    #[arg(short, long, default_value_t = 0)]
    #[arg(value_parser = clap::value_parser!(i32))]
    exit:       i32,

    /// Active collection strategy, as the inspected runtime lists it
    /// (repeatable)
    #[arg(short, long)]
    strategy:   Vec<String>,

    /// Report every violation per row instead of stopping at the first
    #[arg(short, long, default_value_t = false)]
    #[arg(value_parser = clap::value_parser!(bool))]
    all:        bool,
}

fn main() {
    let cli = Args::parse();
    assert!(cli.input.exists() && cli.input.is_file(), "Invalid input path");
    let reports = read_from_path(cli.input, cli.exit).unwrap();
    let variant = CollectorVariant::from_registry(&FixedRegistry::new(cli.strategy));
    println!("{} rows to check, tenured variant: {:?}", reports.len(), variant);

    // Rows are independent and the validator keeps no state, so they
    // can be checked in parallel. Collection preserves row order.
    let failures: Vec<String> = if cli.all {
        reports.par_iter()
            .enumerate()
            .flat_map_iter(|(row, r)| {
                let lines: Vec<String> = match collect_violations(r, variant) {
                    Ok(found)   => {
                        found.into_iter()
                            .map(|v| format!("row {}: {}", row, v))
                            .collect()
                    },
                    Err(e)      => { vec![format!("row {}: {}", row, e)] }
                };
                lines.into_iter()
            })
            .collect()
    } else {
        reports.par_iter()
            .enumerate()
            .filter_map(|(row, r)| {
                assert_consistency(r, variant)
                    .err()
                    .map(|e| format!("row {}: {}", row, e))
            })
            .collect()
    };

    if failures.is_empty() {
        println!("All rows consistent.");
    } else {
        for line in &failures {
            println!("{}", line);
        }
        std::process::exit(1);
    }
}
