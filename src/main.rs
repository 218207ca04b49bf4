use clap::Parser;

mod logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine; the environment may already be configured.
    dotenv::dotenv().ok();
    logging::setup_logging();

    let cli = moviedb::cli::Cli::parse();
    if let Err(e) = moviedb::run(cli).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
