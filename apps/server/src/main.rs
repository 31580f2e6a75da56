use anyhow::Context;
use catalog_domain::constants::LOGGER_OPTIONS;
use catalog_domain::options::LoggerOptions;
use catalog_kernel::config::ConfigResolver;
use catalog_logger::Logger;
use catalog_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigResolver::builder().resolve();

    let logger_options: LoggerOptions = config
        .bind_options(LOGGER_OPTIONS)
        .context("Critical: loggerOptions section is malformed")?;
    let _log = Logger::builder(env!("CARGO_PKG_NAME")).options(&logger_options).init()?;

    Server::builder().config(config).build()?.run().await
}
