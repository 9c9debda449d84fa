use std::{io, process, sync::Arc};

use postfeed::{
    application::{
        detail::ItemDetailReader, error::AppError, feed::FeedController, source::RemoteFeedSource,
    },
    config::{self, CliArgs, Command, Settings},
    infra::{
        auth, client::HttpContext, error::InfraError, graphql::GraphqlClient, telemetry,
        uploads::HttpImageStore,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

mod commands;
mod shell;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;
    info!(endpoint = %settings.remote.endpoint, "postfeed starting");

    let app = build_application(&cli_args, &settings)?;

    match cli_args.command {
        Command::Feed(args) => {
            let mut controller = app.controller;
            commands::run_feed(&mut controller, args.page, &mut io::stdout().lock()).await
        }
        Command::Show(args) => {
            commands::run_show(&app.reader, &args.id, &mut io::stdout().lock()).await
        }
        Command::Status(args) => {
            let mut controller = app.controller;
            commands::run_status(&mut controller, args.set.as_deref(), &mut io::stdout().lock())
                .await
        }
        Command::Shell => shell::run(app.controller, app.reader).await,
    }
}

struct Application {
    controller: FeedController,
    reader: ItemDetailReader,
}

fn build_application(cli: &CliArgs, settings: &Settings) -> Result<Application, AppError> {
    let token = auth::resolve_token(settings.remote.token_file.as_deref(), cli.token.as_deref())?;
    let ctx = HttpContext::new(&settings.remote.endpoint, Arc::new(token))?;

    let graphql = Arc::new(GraphqlClient::new(ctx.clone()));
    let images = Arc::new(HttpImageStore::new(ctx));
    let source: Arc<dyn RemoteFeedSource> = graphql.clone();

    Ok(Application {
        controller: FeedController::new(source.clone(), images, graphql),
        reader: ItemDetailReader::new(source, settings.remote.asset_base.as_str()),
    })
}

pub(crate) fn output_error(err: io::Error) -> AppError {
    AppError::from(InfraError::from(err))
}
