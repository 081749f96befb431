//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `docdesk_core` linkage and walk one landing-page session:
//!   seed, create, search, select, confirm delete.
//! - Keep output deterministic apart from ids and timestamps.

use docdesk_core::{
    core_version, ping, DocumentListSession, LoggingConfig, SessionConfig, SortKey, StoreResult,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    let logging = LoggingConfig::from_env();
    match logging.apply() {
        Ok(true) => println!("logging level={} dir={:?}", logging.level, logging.log_dir),
        Ok(false) => {}
        Err(err) => {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("docdesk_core ping={}", ping());
    println!("docdesk_core version={}", core_version());

    match run_session() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("session failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_session() -> StoreResult<()> {
    let mut session = DocumentListSession::in_memory(&SessionConfig {
        seed_sample_documents: true,
        initial_sort: SortKey::None,
    })?;
    print_rows("seeded", &mut session)?;

    if let Some(record) = session.create_document("Report")? {
        let href = session
            .controller_mut()
            .navigator_mut()
            .drain()
            .pop()
            .map(|location| location.href())
            .unwrap_or_default();
        println!("created id={} open={href}", record.id);
    }

    session.set_sort_key(SortKey::Title);
    print_rows("by title", &mut session)?;

    session.set_search_text("doc");
    session.toggle_all(true)?;
    print_rows("search=doc, all checked", &mut session)?;

    session.request_delete();
    let removed = session.confirm_delete()?;
    info!("event=cli_session module=cli status=ok removed={removed}");
    println!("deleted {removed}");

    session.set_search_text("");
    print_rows("after delete", &mut session)?;
    Ok(())
}

fn print_rows(label: &str, session: &mut DocumentListSession) -> StoreResult<()> {
    println!("-- {label} ({})", session.total_label()?);
    for row in session.rows()? {
        let mark = if row.checked { "x" } else { " " };
        println!(
            "[{mark}] {:<12} {}",
            row.record.title,
            row.record.updated_at.format("%a, %d %b %Y %H:%M:%S")
        );
    }
    Ok(())
}
