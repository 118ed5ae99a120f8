use std::thread;

use anyhow::Result;
use clap::Parser;
use powchain_core::constants::DEFAULT_DIFFICULTY;
use powchain_core::{BlockAnnouncement, Ledger};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "powchain-node")]
#[command(about = "Single-writer proof-of-work chain demo")]
struct Args {
    /// Leading zero hex digits required of every block hash
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY)]
    difficulty: u32,

    /// Number of blocks to append after genesis
    #[arg(long, default_value_t = 5)]
    blocks: u32,

    /// Emit each block as a JSON line instead of the plain text form
    #[arg(long)]
    json: bool,
}

fn print_block(announcement: &BlockAnnouncement, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string(announcement).expect("announcement serializes")
        );
        return;
    }
    println!("Hash: {}", announcement.hash);
    println!("PrevHash: {}", announcement.previous_hash);
    println!("Nonce: {}", announcement.nonce);
    println!("Data: {}", String::from_utf8_lossy(&announcement.payload));
    println!("POW: {}", announcement.proof_valid);
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut ledger = Ledger::new(args.difficulty)?;
    info!("appending {} blocks at difficulty {}", args.blocks, args.difficulty);
    print_block(&BlockAnnouncement::from(ledger.tip()), args.json);

    let rx = ledger.subscribe();
    let json = args.json;
    let printer = thread::spawn(move || {
        while let Ok(announcement) = rx.recv() {
            print_block(&announcement, json);
        }
    });

    for i in 1..=args.blocks {
        ledger.append(format!("Block {i}").into_bytes())?;
    }

    // Dropping the ledger disconnects the hand-off and ends the printer.
    drop(ledger);
    printer.join().expect("printer thread panicked");
    Ok(())
}
