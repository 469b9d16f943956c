use clap::Parser;
use tomb_hash::Bounds;
use tomb_hash::HashTable;
use tomb_hash::KeyHasher;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Fraction of inserted keys to remove before printing statistics.
    #[arg(short = 'r', long = "remove_fraction", default_value_t = 0.3)]
    remove_fraction: f64,

    #[arg(long = "max_capacity", default_value_t = tomb_hash::DEFAULT_MAX_CAPACITY)]
    max_capacity: usize,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with target capacity: {} (max {})",
        args.target_capacity, args.max_capacity
    );

    let hasher = tomb_hash::DefaultKeyHasher::default();
    let mut table = match HashTable::with_bounds(
        tomb_hash::DEFAULT_CAPACITY,
        Bounds::new(tomb_hash::DEFAULT_CAPACITY, args.max_capacity),
        hasher,
    ) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let mut failures = 0;
    for i in 0..args.target_capacity {
        if table
            .try_insert(format!("key{i}"), format!("value{i}"))
            .is_err()
        {
            failures += 1;
        }
    }

    println!("Inserted {} keys into table", table.len());
    println!("Actual capacity: {}", table.capacity());

    let to_remove = (args.target_capacity as f64 * args.remove_fraction) as usize;
    let removed = table.remove_all((0..to_remove).map(|i| format!("key{i}")));
    println!(
        "Removed {} keys, leaving {} tombstones",
        removed,
        table.tombstones()
    );
    println!(
        "Final load factor: {:.2}%",
        table.load_factor() * 100.0
    );

    if let Some(entry) = table.dump().first() {
        println!(
            "First live slot: `{}` hashes to {} ({:#018x}), stored at {}",
            entry.key,
            entry.home,
            table.hasher().hash_key(entry.key),
            entry.actual
        );
    }

    table.print_probe_histogram();
    table.debug_stats().print();
    println!("Number of saturated inserts: {failures}");
}
