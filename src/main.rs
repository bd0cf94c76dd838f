use std::io::Write;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = loglens::config::Config::load()?;
    tracing::info!(path = %config.input.path.display(), "loglens starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let analysis = loglens::pipeline::run(&config, &mut out)?;

    writeln!(out)?;
    write!(out, "{}", analysis.report(&config))?;
    Ok(())
}
