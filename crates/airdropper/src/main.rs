use clap::Parser;

#[tokio::main]
async fn main() {
    let args = airdropper::arguments::Arguments::parse();
    observe::tracing::initialize(
        "warn,airdropper=debug",
        tracing::level_filters::LevelFilter::ERROR,
    );
    tracing::info!("running airdropper with validated arguments:\n{}", args);
    if let Err(err) = airdropper::main(args).await {
        tracing::error!(?err, "airdropper exited with an error");
        std::process::exit(1);
    }
}
