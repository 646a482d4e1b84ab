//! Demo workload: ten writer threads and three reader threads sharing one
//! file-backed row log.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example chat_log
//! ```

use rowlog_core::{Record, RowLog};
use rowlog_file::{FileRowLog, FileRowLogConfig};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let dir = tempfile::tempdir()?;
    let config = FileRowLogConfig::new(dir.path().join("chat.log"));
    let log = Arc::new(FileRowLog::open(config)?);

    let records = (1..=10)
        .map(|i| {
            let receiver = format!("User{i}");
            let body = format!("text, {receiver}!");
            Record::new("receiver", receiver, body)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let writer_handles: Vec<_> = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(300));
                log.append(&record).expect("append failed");
                println!("writer {:>2} wrote: {}", i + 1, record.encode());
            })
        })
        .collect();

    let reader_handles: Vec<_> = (1..=3u64)
        .map(|row| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(300));
                match log.read_row(row).expect("read failed") {
                    Some(record) => println!(
                        "reader row {row}: sender={} receiver={} body={}",
                        record.sender(),
                        record.receiver(),
                        record.body()
                    ),
                    None => println!("reader row {row}: not found"),
                }
            })
        })
        .collect();

    for handle in writer_handles {
        handle.join().expect("writer panicked");
    }
    for handle in reader_handles {
        handle.join().expect("reader panicked");
    }

    let stats = log.stats()?;
    println!(
        "done: {} rows, {} bytes at {}",
        stats.row_count,
        stats.total_bytes,
        log.path().display()
    );

    log.close()?;
    Ok(())
}
