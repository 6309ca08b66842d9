//! Quire - query the content collections of a research-network site.

use anyhow::{Context, Result, bail};
use clap::Parser;
use quire::{
    ContentRegistry, ContentStore, SiteConfig,
    cli::{Cli, Commands, FilterArgs, PageArgs},
    config::CollectionKind,
    log, logger,
    query::{Filter, PageRequest, SearchOptions, Sort},
    schema::Schema,
};
use serde::Serialize;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_quiet(cli.quiet);

    let config = load_config(&cli)?;
    let store = ContentStore::new(&config);

    match cli.command.collection() {
        None => check(&store),
        Some(CollectionKind::Events) => run(&store.events, &cli.command),
        Some(CollectionKind::Blog) => run(&store.blog, &cli.command),
        Some(CollectionKind::Members) => run(&store.members, &cli.command),
        Some(CollectionKind::Publications) => run(&store.publications, &cli.command),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = SiteConfig::from_cli(cli)?;
    config.validate()?;
    Ok(config)
}

/// Print per-collection counts; fail when any document was skipped.
fn check(store: &ContentStore) -> Result<()> {
    let summary = store.summary();
    print_json(&summary)?;

    let failed: usize = summary.iter().map(|s| s.failures.len()).sum();
    if failed > 0 {
        bail!("{failed} document(s) failed to load");
    }
    log!("check"; "all documents loaded");
    Ok(())
}

/// Run a collection command against one registry.
fn run<D: Schema>(registry: &ContentRegistry<D>, command: &Commands) -> Result<()> {
    match command {
        Commands::List {
            filter,
            sort,
            order,
            page,
            ..
        } => {
            let filter = to_filter(filter);
            let sort = sort.as_ref().map(|field| Sort::new(field, *order));
            match to_page(page) {
                Some(request) => print_json(&registry.paginate(&filter, sort.as_ref(), request)),
                None => print_json(&registry.list(&filter, sort.as_ref())),
            }
        }
        Commands::Search {
            query,
            fields,
            page,
            ..
        } => {
            let mut options = SearchOptions::new(query.as_str()).fields(fields.iter().cloned());
            options.page = to_page(page);
            print_json(&registry.query(&options))
        }
        Commands::Related { slug, limit, .. } => {
            if registry.by_slug(slug).is_none() {
                bail!("no document `{slug}` in {}", D::COLLECTION);
            }
            print_json(&registry.related(slug, *limit))
        }
        Commands::Tags { .. } => print_json(&registry.all_tags()),
        Commands::Render { slug, .. } => {
            let html = registry
                .render_content_to_html(slug)
                .with_context(|| format!("failed to render `{slug}`"))?;
            match html {
                Some(html) => {
                    println!("{html}");
                    Ok(())
                }
                None => bail!("no content for `{slug}` in {}", D::COLLECTION),
            }
        }
        Commands::Check => bail!("`check` runs over every collection, not {}", D::COLLECTION),
    }
}

fn to_filter(args: &FilterArgs) -> Filter {
    Filter {
        tags: args.tags.clone(),
        featured: args.featured,
        date_from: args.from,
        date_to: args.to,
        author: args.author.clone(),
        kind: args.kind.clone(),
    }
}

/// A page request when `--page` or `--limit` is given.
fn to_page(args: &PageArgs) -> Option<PageRequest> {
    match (args.page, args.limit) {
        (None, None) => None,
        (page, limit) => Some(PageRequest::new(
            page.unwrap_or(1),
            limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
        )),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
