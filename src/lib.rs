pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod persisters;
pub mod renderers;
pub mod stats;
pub mod store;

use app::MovieApp;
use cli::{Cli, Command};
use clients::omdb_client::{MetadataFetcher, OmdbClient};
use config::Config;
use error::Result;
use model::movie::Movie;
use persisters::storage_for;
use renderers::site_renderer::SiteRenderer;
use store::{RecordStore, SortOrder};

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.apply_to(Config::from_env()?);
    execute(&config, cli.command).await
}

/// Runs one command against the collection described by `config`.
pub async fn execute(config: &Config, command: Command) -> Result<()> {
    config.ensure_data_dir()?;
    let store = RecordStore::open(storage_for(config.format, config.data_file_path()))?;

    let fetcher: Option<Box<dyn MetadataFetcher>> = if command.needs_fetcher() {
        Some(Box::new(OmdbClient::from_config(config)?))
    } else {
        None
    };
    let mut app = MovieApp::new(store, fetcher);

    match command {
        Command::Add { title } => {
            let movie = app.add_movie(&title).await?;
            println!("Movie '{}' successfully added", movie.title);
            print_movie(movie);
        }
        Command::Delete { title } => {
            let movie = app.delete_movie(&title)?;
            println!("Movie '{}' deleted!", movie.title);
        }
        Command::Update { title, rating } => {
            let movie = app.update_movie(&title, rating)?;
            println!("Movie '{}' updated successfully!", movie.title);
        }
        Command::Refresh { title } => {
            let movie = app.refresh_movie(&title).await?;
            println!("Movie '{}' refreshed", movie.title);
            print_movie(movie);
        }
        Command::List => {
            let movies = app.list_movies();
            if movies.is_empty() {
                println!("No movies in the database.");
            } else {
                println!("{} movies in total", movies.len());
                movies.iter().for_each(print_movie);
            }
        }
        Command::Search { term } => {
            let found = app.search_movies(&term);
            if found.is_empty() {
                println!("No movies found.");
            } else {
                found.into_iter().for_each(print_movie);
            }
        }
        Command::Sort { by, desc } => {
            let order = if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            app.sorted_movies(by, order).into_iter().for_each(print_movie);
        }
        Command::Stats => match app.movie_stats() {
            None => println!("No movies in the database."),
            Some(stats) => {
                println!("Average rating: {:.2}", stats.average);
                println!("Median rating: {:.2}", stats.median);
                println!("Best movie: {} ({})", stats.best.title, stats.best.rating);
                println!("Worst movie: {} ({})", stats.worst.title, stats.worst.rating);
            }
        },
        Command::Random => match app.random_movie() {
            None => println!("No movies in the database."),
            Some(movie) => println!(
                "Tonight you will watch: {} ({}) - Rating: {}",
                movie.title, movie.year, movie.rating
            ),
        },
        Command::Export { path, to } => {
            let format = app.export(&path, to, config.format)?;
            println!(
                "Exported {} movies to {} ({})",
                app.store().len(),
                path.display(),
                format
            );
        }
        Command::Render {
            output,
            template,
            title,
        } => {
            let site_title = title.as_deref().unwrap_or(&config.site_title);
            let renderer = match template {
                Some(path) => SiteRenderer::from_template_file(site_title, &path)?,
                None => SiteRenderer::new(site_title),
            };
            let written = app.render_site(&renderer, &output)?;
            println!("Website was generated successfully.");
            for path in written {
                println!("  {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_movie(movie: &Movie) {
    println!("{} ({}): {}", movie.title, movie.year, movie.rating);
}

