use anyhow::{Context, Result};
use corral_console::{ColorMode, Output, OutputConfig};
use corral_match::{ArgValue, MatchResult, SubcommandMatch, help, match_tokens};
use corral_spec::{ArgSpec, CommandSchema, CommandSpec};
use tokio::io::Stdout;
use tracing_subscriber::{EnvFilter, fmt};

fn command_spec() -> Result<CommandSpec> {
    CommandSchema::new("corral")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Corral Contributors")
        .about("Declarative argument matching, demonstrated")
        .arg(
            ArgSpec::new("verbose")
                .short('v')
                .long("verbose")
                .switch()
                .help("Enable verbose output"),
        )
        .arg(
            ArgSpec::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .env("CORRAL_CONFIG")
                .default_value("corral.json")
                .required()
                .help("Descriptor file path"),
        )
        .arg(
            ArgSpec::new("count")
                .short('n')
                .long("count")
                .value_name("N")
                .default_value("10")
                .required()
                .help("Number of iterations"),
        )
        .arg(
            ArgSpec::new("input")
                .index(0)
                .value_name("INPUT")
                .required()
                .help("Input file"),
        )
        .arg(
            ArgSpec::new("outputs")
                .index(1)
                .value_name("OUTPUT")
                .multiple()
                .help("Output files"),
        )
        .subcommand(
            CommandSchema::new("serve")
                .about("Start the development server")
                .alias("s")
                .alias("server")
                .arg(
                    ArgSpec::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .default_value("8080")
                        .required()
                        .help("Port to listen on"),
                ),
        )
        .subcommand(
            CommandSchema::new("build").about("Build the project").arg(
                ArgSpec::new("release")
                    .long("release")
                    .switch()
                    .help("Build with optimizations"),
            ),
        )
        .build()
        .context("invalid command definition")
}

fn main() -> Result<()> {
    init_tracing();
    let _ = dotenvy::dotenv();

    let spec = command_spec()?;
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            match match_tokens(&spec, &tokens) {
                Ok(matches) => {
                    let config = OutputConfig {
                        color: ColorMode::Auto,
                        verbose: matches.contains("verbose"),
                        ..Default::default()
                    };
                    run(&matches, Output::stdout(config)).await
                }
                Err(err) => {
                    // Top-level policy only: the library returns errors, the
                    // binary prints them with the help text and exits.
                    let mut out = Output::stdout(OutputConfig::default());
                    out.error(&err.to_string()).await?;
                    out.write(&help::render(&spec)).await?;
                    std::process::exit(1);
                }
            }
        })
}

async fn run(matches: &MatchResult, mut out: Output<Stdout>) -> Result<()> {
    if let Some((name, sub)) = matches.subcommand() {
        return match (name, sub) {
            ("serve", SubcommandMatch::Matched(nested)) => serve(nested, &mut out).await,
            ("build", SubcommandMatch::Matched(nested)) => build(nested, &mut out).await,
            (name, _) => {
                out.warning(&format!("no handler wired for subcommand '{name}'"))
                    .await?;
                Ok(())
            }
        };
    }

    tracing::debug!("executing main command");
    out.info("starting up").await?;

    let input = matches.get("input").unwrap_or_default();
    let config = matches.get("config").unwrap_or_default();
    let count: usize = matches
        .get("count")
        .unwrap_or_default()
        .parse()
        .context("--count expects a number")?;

    out.writeln(&format!("Processing {input} (config: {config})"))
        .await?;

    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|(name, value)| {
            let rendered = match value {
                ArgValue::Flag => "true".to_string(),
                ArgValue::Single(value) => value.clone(),
                ArgValue::Many(values) => values.join(", "),
            };
            vec![name.to_string(), rendered]
        })
        .collect();
    out.table(&["argument", "value"], &rows).await?;
    tracing::debug!(iterations = count, "main command finished");

    out.success("done").await?;
    Ok(())
}

async fn serve(matches: &MatchResult, out: &mut Output<Stdout>) -> Result<()> {
    tracing::debug!("executing serve command");

    let port = matches.get("port").unwrap_or("8080");
    out.writeln(&format!("Serving on http://localhost:{port}"))
        .await?;
    out.success("server ready").await?;
    Ok(())
}

async fn build(matches: &MatchResult, out: &mut Output<Stdout>) -> Result<()> {
    tracing::debug!("executing build command");

    let profile = if matches.contains("release") {
        "release"
    } else {
        "debug"
    };
    out.section("Building project").await?;
    out.writeln(&format!("  profile: {profile}")).await?;
    out.success("build completed").await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
