use std::io::Write;

use postfeed::{
    application::{
        detail::ItemDetailReader, error::AppError, feed::FeedController, state::FeedState,
    },
    domain::{
        posts::{PostDetailView, PostId},
        window::LoadState,
    },
};
use tracing::warn;

use crate::output_error;

/// Mount the feed, walk forward to `page` and print the window.
pub(crate) async fn run_feed<W: Write>(
    controller: &mut FeedController,
    page: i32,
    out: &mut W,
) -> Result<(), AppError> {
    if let Err(err) = controller.mount().await {
        if controller.state().load_state() == LoadState::Error {
            return Err(err.into());
        }
        warn!(error = %err, "Feed loaded without status");
    }
    while controller.page_index() < page {
        controller.go_next().await?;
    }
    render_window(controller.state(), out).map_err(output_error)
}

pub(crate) async fn run_show<W: Write>(
    reader: &ItemDetailReader,
    id: &str,
    out: &mut W,
) -> Result<(), AppError> {
    let view = reader.load(&PostId::from(id)).await;
    render_detail(&view, out).map_err(output_error)
}

pub(crate) async fn run_status<W: Write>(
    controller: &mut FeedController,
    value: Option<&str>,
    out: &mut W,
) -> Result<(), AppError> {
    match value {
        Some(value) => controller.submit_status(value).await?,
        None => controller.refresh_status().await?,
    }
    writeln!(out, "Status: {}", controller.state().status().value()).map_err(output_error)
}

pub(crate) fn render_window<W: Write>(state: &FeedState, out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "Page {} of {} ({} posts)",
        state.page_index(),
        state.last_page(),
        state.total_items()
    )?;
    let status = state.status().value();
    if !status.is_empty() {
        writeln!(out, "Status: {status}")?;
    }
    if let Some(err) = state.error().current() {
        writeln!(out, "Error: {err}")?;
    }
    if state.posts().is_empty() {
        return writeln!(out, "No posts found.");
    }
    for post in state.posts() {
        writeln!(
            out,
            "{}  {} (by {} on {})",
            post.id,
            post.title,
            post.creator_name,
            post.display_date()
        )?;
    }
    Ok(())
}

/// The empty view prints nothing.
pub(crate) fn render_detail<W: Write>(view: &PostDetailView, out: &mut W) -> std::io::Result<()> {
    if *view == PostDetailView::default() {
        return Ok(());
    }
    writeln!(out, "{}", view.title)?;
    writeln!(out, "Created by {} on {}", view.author, view.date)?;
    writeln!(out, "Image: {}", view.image)?;
    writeln!(out)?;
    writeln!(out, "{}", view.content)
}
