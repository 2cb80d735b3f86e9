//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `member_core` linkage.
//! - Open the configured store and print a short deterministic summary.

use member_core::{MemberStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("member_core ping={}", member_core::ping());
    println!("member_core version={}", member_core::core_version());

    let config = StoreConfig::from_env();
    println!("member_core db_path={}", config.db_path.display());

    let store = match MemberStore::open_with_config(&config) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("member_core store_open=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = store.count().and_then(|count| Ok((count, store.max_id()?)));
    let code = match summary {
        Ok((count, max_id)) => {
            println!("member_core members={count} max_id={max_id}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("member_core store_query=error error={err}");
            ExitCode::FAILURE
        }
    };

    if let Err(err) = store.close() {
        eprintln!("member_core store_close=error error={err}");
        return ExitCode::FAILURE;
    }
    code
}
