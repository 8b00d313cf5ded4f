//! Command execution: one view per command, torn down on Ctrl-C.

use std::collections::HashSet;
use std::io::Write;

use kc_app::{CatalogView, ClippingBoard, ClippingScope, ClippingView, ScheduledLookups};
use kc_core::book::shelve;
use kc_core::clipping::ClippingKey;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

use super::wiring::AppDeps;
use crate::cli::Command;
use crate::render;

/// Cancels `token` on Ctrl-C. The task ends on its own once the view is gone.
fn teardown_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            signal = tokio::signal::ctrl_c() => {
                if signal.is_ok() {
                    info!("Interrupted, tearing down view");
                    token.cancel();
                }
            }
        }
    })
}

pub async fn run_command(command: &Command, deps: &AppDeps, out: &mut dyn Write) -> anyhow::Result<()> {
    let span = info_span!("command", ?command);
    async {
        match command {
            Command::Books => books(deps, out).await,
            Command::Book { original_title } => book(deps, original_title, out).await,
            Command::Random => random(deps, out).await,
            Command::Search { query } => search(deps, query, out).await,
        }
    }
    .instrument(span)
    .await
}

async fn books(deps: &AppDeps, out: &mut dyn Write) -> anyhow::Result<()> {
    let view = CatalogView::new();
    let _interrupt = teardown_on_ctrl_c(view.scope.token());

    let report = deps.catalog_loader().execute(&view.items).await;
    if report.cancelled {
        return Ok(());
    }
    if report.index_failed {
        warn!("Book index unavailable, showing an empty catalog");
    }
    if report.failed > 0 {
        warn!(failed = report.failed, "Some books had no metadata and were left out");
    }

    let books = view.items.snapshot().await;
    out.write_all(render::render_shelves(&shelve(&books)).as_bytes())?;
    writeln!(out, "{} books", books.len())?;
    Ok(())
}

async fn book(deps: &AppDeps, original_title: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let view = ClippingView::new();
    let _interrupt = teardown_on_ctrl_c(view.scope.token());

    let report = deps
        .aggregator()
        .execute(
            &ClippingScope::ByBook {
                original_title: original_title.to_string(),
            },
            &view.items,
        )
        .await;
    if report.cancelled {
        return Ok(());
    }

    let clippings = view.items.snapshot().await;
    if clippings.is_empty() {
        writeln!(out, "No clippings found for \"{original_title}\"")?;
        return Ok(());
    }
    out.write_all(render::render_book(original_title, &deps.cover_base_url, &clippings).as_bytes())?;
    stream_definitions(&view.items, report.lookups, out).await
}

async fn random(deps: &AppDeps, out: &mut dyn Write) -> anyhow::Result<()> {
    let view = ClippingView::new();
    let _interrupt = teardown_on_ctrl_c(view.scope.token());

    let report = deps.aggregator().execute(&ClippingScope::Random, &view.items).await;
    if report.cancelled {
        return Ok(());
    }

    match view.items.snapshot().await.first() {
        Some(clipping) => {
            out.write_all(render::render_random(clipping, &deps.cover_base_url).as_bytes())?;
            stream_definitions(&view.items, report.lookups, out).await
        }
        None => {
            writeln!(out, "No clipping drawn this time, try again")?;
            Ok(())
        }
    }
}

/// Prints matches page by page while the scan is still running.
async fn search(deps: &AppDeps, query: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let view = ClippingView::new();
    let _interrupt = teardown_on_ctrl_c(view.scope.token());

    let aggregator = deps.aggregator();
    let scope = ClippingScope::ByKeyword {
        query: query.to_string(),
    };
    let run = aggregator.execute(&scope, &view.items);
    tokio::pin!(run);

    let mut revisions = view.items.subscribe();
    let mut shown = 0usize;
    let report = loop {
        tokio::select! {
            report = &mut run => break report,
            changed = revisions.changed() => {
                if changed.is_err() {
                    continue;
                }
                shown = print_hits_from(&view.items, query, shown, out).await?;
            }
        }
    };
    if report.cancelled {
        return Ok(());
    }

    let total = print_hits_from(&view.items, query, shown, out).await?;
    writeln!(out, "{} matching \"{query}\"", render::count_label(total))?;
    Ok(())
}

async fn print_hits_from(
    board: &ClippingBoard,
    query: &str,
    from: usize,
    out: &mut dyn Write,
) -> anyhow::Result<usize> {
    let clippings = board.snapshot().await;
    for clipping in clippings.iter().skip(from) {
        out.write_all(render::render_search_hit(query, clipping).as_bytes())?;
    }
    Ok(clippings.len().max(from))
}

/// Prints each definition as soon as it lands on the board.
async fn stream_definitions(
    board: &ClippingBoard,
    lookups: ScheduledLookups,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if lookups.is_empty() {
        return Ok(());
    }
    writeln!(out, "Looking up {} definition(s)...", lookups.len())?;

    let mut revisions = board.subscribe();
    let mut printed = HashSet::new();
    let join = lookups.join();
    tokio::pin!(join);

    loop {
        tokio::select! {
            _ = &mut join => break,
            changed = revisions.changed() => {
                if changed.is_err() {
                    continue;
                }
                print_new_definitions(board, &mut printed, out).await?;
            }
        }
    }
    print_new_definitions(board, &mut printed, out).await
}

async fn print_new_definitions(
    board: &ClippingBoard,
    printed: &mut HashSet<ClippingKey>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    for clipping in board.snapshot().await {
        if let Some(line) = render::render_definition(&clipping) {
            if printed.insert(clipping.key()) {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}
