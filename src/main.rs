use std::process;

use tokio::fs;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use uferlos::{
    application::{
        article::ArticleLoader,
        catalog::Catalog,
        error::AppError,
        hub::HubController,
        index::IndexController,
        resolve::{ResolvedTarget, TagResolver},
        scheme::SchemeStore,
        stream::StreamController,
    },
    config::{self, Command, Settings},
    infra::{http::FetchClient, prefs::PreferenceFile, telemetry},
    presentation::views::{
        HubTemplate, IndexTemplate, LayoutContext, StreamTemplate, render_template,
    },
};

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

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let command = cli.command.unwrap_or(Command::Stream(Default::default()));
    let scheme = scheme_store(&settings);

    match command {
        Command::Scheme(args) => {
            let value = if args.toggle {
                scheme.toggle()
            } else {
                scheme.current()
            };
            println!("{}", value.as_str());
            return Ok(());
        }
        Command::Resolve(args) => {
            let catalog = build_catalog(&settings)?;
            let resolver = TagResolver::new(&catalog, &settings.site);
            match resolver.resolve(&args.tag).await {
                ResolvedTarget::Navigate { url } => println!("{url}"),
                ResolvedTarget::NoResults { tag } => {
                    eprintln!("Keine Einträge für #{tag} gefunden.");
                    process::exit(2);
                }
            }
            return Ok(());
        }
        Command::Index => {
            let catalog = build_catalog(&settings)?;
            let controller = IndexController::new(&catalog, &settings.ui);
            let view = LayoutContext::new(
                &settings.site,
                scheme.current(),
                "index.html",
                controller.view().await,
            );
            let html = render_template("index", &IndexTemplate { view })?;
            emit(cli.out.as_deref(), &html).await?;
        }
        Command::Stream(args) => {
            let catalog = build_catalog(&settings)?;
            let articles = ArticleLoader::new(fetch_client(&settings)?);
            let controller = StreamController::new(
                &catalog,
                &articles,
                &settings.ui,
                &settings.site.posts_index,
            );
            let view = LayoutContext::new(
                &settings.site,
                scheme.current(),
                settings.site.stream_page.as_str(),
                controller.view(&args).await,
            );
            let html = render_template("stream", &StreamTemplate { view })?;
            emit(cli.out.as_deref(), &html).await?;
        }
        Command::Hub(args) => {
            let catalog = build_catalog(&settings)?;
            let controller = HubController::new(&catalog, &settings.site);
            let view = LayoutContext::new(
                &settings.site,
                scheme.current(),
                settings.site.hub_page.as_str(),
                controller.view(&args).await,
            );
            let html = render_template("hub", &HubTemplate { view })?;
            emit(cli.out.as_deref(), &html).await?;
        }
    }

    Ok(())
}

fn fetch_client(settings: &Settings) -> Result<FetchClient, AppError> {
    Ok(FetchClient::new(&settings.site.base_url)?)
}

fn build_catalog(settings: &Settings) -> Result<Catalog, AppError> {
    Ok(Catalog::new(fetch_client(settings)?, settings.site.clone()))
}

fn scheme_store(settings: &Settings) -> SchemeStore {
    SchemeStore::new(
        PreferenceFile::new(settings.prefs.scheme_file.clone()),
        settings.ui.default_scheme,
    )
}

async fn emit(out: Option<&std::path::Path>, html: &str) -> Result<(), AppError> {
    match out {
        Some(path) => {
            fs::write(path, html)
                .await
                .map_err(uferlos::infra::error::InfraError::Io)?;
            info!(path = %path.display(), bytes = html.len(), "rendered page written");
        }
        None => println!("{html}"),
    }
    Ok(())
}
