//! Line-oriented session driving one feed controller from stdin.

use std::io::Write;
use std::path::PathBuf;

use postfeed::{
    application::{detail::ItemDetailReader, error::AppError, feed::FeedController},
    domain::posts::{PostDraft, PostId},
    infra::uploads::read_image,
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::{render_detail, render_window};
use crate::output_error;

const HELP: &str = "\
commands:
  next | prev | list
  new <title> | <content> [| <image path>]
  edit <id> <title> | <content> [| <image path>]
  delete <id>
  show <id>
  status [value]
  dismiss
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Next,
    Previous,
    List,
    New(DraftLine),
    Edit { id: PostId, draft: DraftLine },
    Delete(PostId),
    Show(PostId),
    Status(Option<String>),
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DraftLine {
    pub title: String,
    pub content: String,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a post id")]
    MissingId(&'static str),
    #[error("expected `<title> | <content> [| <image path>]`")]
    MalformedDraft,
}

pub(crate) fn parse_line(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "next" => ShellCommand::Next,
        "prev" => ShellCommand::Previous,
        "list" => ShellCommand::List,
        "new" => ShellCommand::New(parse_draft(rest)?),
        "edit" => {
            let (id, draft) = rest
                .split_once(char::is_whitespace)
                .ok_or(ParseError::MissingId("edit"))?;
            ShellCommand::Edit {
                id: PostId::from(id),
                draft: parse_draft(draft)?,
            }
        }
        "delete" => ShellCommand::Delete(required_id("delete", rest)?),
        "show" => ShellCommand::Show(required_id("show", rest)?),
        "status" => ShellCommand::Status((!rest.is_empty()).then(|| rest.to_string())),
        "dismiss" => ShellCommand::Dismiss,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required_id(verb: &'static str, rest: &str) -> Result<PostId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingId(verb));
    }
    Ok(PostId::from(rest))
}

fn parse_draft(rest: &str) -> Result<DraftLine, ParseError> {
    let mut fields = rest.split('|').map(str::trim);
    let title = fields.next().unwrap_or_default();
    let content = fields.next().ok_or(ParseError::MalformedDraft)?;
    let image = fields.next().filter(|path| !path.is_empty()).map(PathBuf::from);
    if fields.next().is_some() {
        return Err(ParseError::MalformedDraft);
    }
    Ok(DraftLine {
        title: title.to_string(),
        content: content.to_string(),
        image,
    })
}

/// Mount the feed, then execute commands until `quit` or end of input.
pub(crate) async fn run(
    mut controller: FeedController,
    reader: ItemDetailReader,
) -> Result<(), AppError> {
    let mut out = std::io::stdout();
    // Mount failures land in the error slot and are rendered below.
    let _ = controller.mount().await;
    render_window(controller.state(), &mut out).map_err(output_error)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(output_error)? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}").map_err(output_error)?;
                continue;
            }
        };
        debug!(?command, "Shell command");
        if command == ShellCommand::Quit {
            break;
        }
        execute(&mut controller, &reader, command, &mut out).await?;
    }
    Ok(())
}

async fn execute<W: Write>(
    controller: &mut FeedController,
    reader: &ItemDetailReader,
    command: ShellCommand,
    out: &mut W,
) -> Result<(), AppError> {
    // Controller failures are recorded in the error slot, which the window
    // rendering shows; they never end the session.
    match command {
        ShellCommand::Next => {
            let _ = controller.go_next().await;
        }
        ShellCommand::Previous => {
            let _ = controller.go_previous().await;
        }
        ShellCommand::List => {}
        ShellCommand::New(draft) => {
            controller.start_new_post();
            submit(controller, draft).await;
        }
        ShellCommand::Edit { id, draft } => {
            if !controller.start_edit(&id) {
                return writeln!(out, "post {id} is not on this page").map_err(output_error);
            }
            submit(controller, draft).await;
        }
        ShellCommand::Delete(id) => {
            let _ = controller.delete_post(&id).await;
        }
        ShellCommand::Show(id) => {
            let view = reader.load(&id).await;
            return render_detail(&view, out).map_err(output_error);
        }
        ShellCommand::Status(Some(value)) => {
            let _ = controller.submit_status(&value).await;
        }
        ShellCommand::Status(None) => {
            let _ = controller.refresh_status().await;
        }
        ShellCommand::Dismiss => {
            controller.dismiss_error();
        }
        ShellCommand::Help => return writeln!(out, "{HELP}").map_err(output_error),
        ShellCommand::Quit => return Ok(()),
    }
    render_window(controller.state(), out).map_err(output_error)
}

/// Read the draft's image, then hand the draft to the controller. Either
/// failure ends up in the error slot.
async fn submit(controller: &mut FeedController, draft: DraftLine) {
    let image = match draft.image.as_deref() {
        Some(path) => match read_image(path).await {
            Ok(image) => Some(image),
            Err(err) => {
                controller.abort_edit(err);
                return;
            }
        },
        None => None,
    };
    let _ = controller
        .finish_edit(PostDraft {
            title: draft.title,
            content: draft.content,
            image,
        })
        .await;
}
