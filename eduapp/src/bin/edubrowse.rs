use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};
use eduapp::{
    browser::ResourceBrowser,
    client::HttpClient,
    conf::Builder,
    fetcher::{load_translations, Fetcher},
    presenter::{Card, Present, Presentation, Presenter},
};
use educore::{
    filter::BrowserSpec,
    query::QueryState,
    resource::{Document, Exam, Exercise, Module},
};
use std::sync::Arc;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(flatten)]
    builder: Builder,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Modules,
    Exams,
    Documents,
    Exercises,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    List(ListArgs),
    #[command(arg_required_else_help = true)]
    Show {
        kind: Kind,
        id: i64,
    },
    #[command(arg_required_else_help = true)]
    Similar {
        kind: Kind,
        id: i64,
    },
    #[command(arg_required_else_help = true)]
    Comments {
        document_id: i64,
    },
    /// Like a document, or take the like back.
    #[command(arg_required_else_help = true)]
    Like {
        document_id: i64,
    },
    #[command(arg_required_else_help = true)]
    Solutions {
        exercise_id: i64,
    },
    Translations {
        #[clap(long)]
        locale: Option<String>,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    kind: Kind,
    #[clap(long)]
    search: Option<String>,
    /// Restrict to items whose field equals the value, e.g. `year=2024`.
    #[clap(long, value_name = "KEY=VALUE", value_parser = parse_filter)]
    filter: Vec<(String, String)>,
    #[clap(long)]
    sort: Option<String>,
    #[clap(long, default_value_t = 1)]
    page: u32,
    /// The endpoint filters and paginates server side.
    #[clap(long)]
    paged: bool,
    /// List from an alternative endpoint path, e.g. `exams/type/EFM`.
    #[clap(long)]
    path: Option<String>,
    /// Show this many randomly picked items instead of the query view.
    #[clap(long, value_name = "COUNT")]
    random: Option<usize>,
    #[clap(long)]
    require_login: bool,
}

fn parse_filter(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("eduapp")
        .module("educore")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let client = Arc::new(args.builder.client()?);
    let presenter = args.builder.presenter(&client);

    match args.command {
        Commands::List(list) => match list.kind {
            Kind::Modules => parse_list::<Module>(&client, &presenter, list).await?,
            Kind::Exams => parse_list::<Exam>(&client, &presenter, list).await?,
            Kind::Documents => parse_list::<Document>(&client, &presenter, list).await?,
            Kind::Exercises => parse_list::<Exercise>(&client, &presenter, list).await?,
        },
        Commands::Show { kind, id } => match kind {
            Kind::Modules => parse_show::<Module>(&client, &presenter, id).await?,
            Kind::Exams => parse_show::<Exam>(&client, &presenter, id).await?,
            Kind::Documents => parse_show::<Document>(&client, &presenter, id).await?,
            Kind::Exercises => parse_show::<Exercise>(&client, &presenter, id).await?,
        },
        Commands::Similar { kind, id } => match kind {
            Kind::Modules => parse_similar::<Module>(&client, &presenter, id).await?,
            Kind::Exams => parse_similar::<Exam>(&client, &presenter, id).await?,
            Kind::Documents => parse_similar::<Document>(&client, &presenter, id).await?,
            Kind::Exercises => parse_similar::<Exercise>(&client, &presenter, id).await?,
        },
        Commands::Comments { document_id } => {
            let comments = Fetcher::<Document, _>::new(client.clone())
                .comments(document_id)
                .await?;
            if comments.is_empty() {
                println!("Aucun commentaire.");
            }
            for comment in comments.iter() {
                println!(
                    "[{}] {}: {}",
                    comment.id,
                    comment.author().unwrap_or("Anonyme"),
                    comment.content.as_deref().unwrap_or_default(),
                );
            }
        }
        Commands::Like { document_id } => {
            let browser = ResourceBrowser::new(
                Fetcher::<Document, _>::new(client.clone()),
                BrowserSpec::documents(),
                client.session().clone(),
            );
            let document = browser.detail(document_id).await?;
            let status = browser.toggle_like(document_id).await?;
            println!("{status:?}: {} likes", status.apply(document.likes));
        }
        Commands::Solutions { exercise_id } => {
            let solutions = Fetcher::<Exercise, _>::new(client.clone())
                .solutions(exercise_id)
                .await?;
            if solutions.is_empty() {
                println!("Aucune solution disponible pour cet exercice.");
            }
            for solution in solutions.iter() {
                println!("[{}]", solution.id);
                println!("{}", solution.content.as_deref().unwrap_or_default());
            }
        }
        Commands::Translations { locale } => {
            let locale = locale.unwrap_or(args.builder.edu_locale);
            let (translations, error) = load_translations(client.as_ref(), &locale).await;
            if let Some(e) = error {
                anyhow::bail!("could not load translations for {locale}: {e}");
            }
            for (key, value) in translations.entries.iter() {
                println!("{key}\t{value}");
            }
        }
    }

    Ok(())
}

async fn parse_list<T: Present>(
    client: &Arc<HttpClient>,
    presenter: &Presenter,
    arg: ListArgs,
) -> anyhow::Result<()> {
    let mut fetcher = Fetcher::<T, _>::new(client.clone());
    if let Some(path) = arg.path {
        fetcher = fetcher.path(path);
    }
    if arg.paged {
        fetcher = fetcher.paged();
    }
    let mut query = QueryState::new().page(arg.page);
    if let Some(search) = arg.search {
        query = query.search(search);
    }
    for (key, value) in arg.filter {
        query = query.filter(key, value);
    }
    if let Some(sort) = arg.sort {
        query = query.sort(sort);
    }
    let spec = BrowserSpec::for_kind(T::KIND).unwrap_or_default();
    let browser = ResourceBrowser::new(fetcher, spec, client.session().clone())
        .require_login(arg.require_login)
        .initial_query(query);

    browser.refresh().await;
    if let Some(e) = browser.error() {
        anyhow::bail!("could not load {}: {e}", T::KIND);
    }
    if browser.failed() {
        anyhow::bail!("login required to list {}", T::KIND);
    }

    let presentation = match arg.random {
        Some(count) => presenter.present_items(
            false,
            &browser.sample(count, &mut rand::thread_rng()),
            &browser.query(),
        ),
        None => presenter.present(&browser),
    };
    print_presentation(&presentation);
    if let Some(pagination) = browser.pagination() {
        println!("page {} / {}", pagination.current_page, pagination.total_pages);
    }
    Ok(())
}

async fn parse_show<T: Present>(
    client: &Arc<HttpClient>,
    presenter: &Presenter,
    id: i64,
) -> anyhow::Result<()> {
    let item = Fetcher::<T, _>::new(client.clone()).detail(id).await?;
    print_card(&item.card(presenter.context()));
    Ok(())
}

async fn parse_similar<T: Present>(
    client: &Arc<HttpClient>,
    presenter: &Presenter,
    id: i64,
) -> anyhow::Result<()> {
    let listing = Fetcher::<T, _>::new(client.clone()).similar(id).await?;
    print_presentation(&presenter.present_items(false, &listing, &QueryState::new()));
    Ok(())
}

fn print_presentation(presentation: &Presentation) {
    match presentation {
        Presentation::Placeholders(count) => println!("({count} en cours de chargement)"),
        Presentation::Empty { message } => println!("{message}"),
        Presentation::Cards(cards) => cards.iter().for_each(print_card),
    }
}

fn print_card(card: &Card) {
    println!("[{}] {}", card.id, card.title);
    println!("    {}", card.subtitle);
    println!("    {}", card.description);
    println!("    {} · {}", card.duration, card.published);
    match &card.image.src {
        Some(src) => println!("    image: {src}"),
        None => println!("    image: {}", card.image.alt),
    }
    match &card.link.href {
        Some(href) => println!("    {}: {href}", card.link.label),
        None => println!("    {}", card.link.label),
    }
}
