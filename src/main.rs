use clap::Parser;
use std::process::ExitCode;
use ts_build_scripts::core::engine::report;
use ts_build_scripts::utils::{logger, logger::ConsoleLogger, validation::Validate};
use ts_build_scripts::{
    BuildScript, Cli, Commands, LocalFileSystem, PrePublishScript, ProcessRunner, ReleaseScript,
    Result, RewriteScript, ScriptEngine, ScriptsConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI args: {:?}", cli);

    let result = run(cli).await;
    report(&result)
}

async fn run(cli: Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            ScriptsConfig::from_file(path)?
        }
        None => ScriptsConfig::default(),
    };

    match cli.command {
        Commands::Build(args) => {
            let options = args.resolve(&file.build);
            options.validate()?;
            let script = BuildScript::new(
                LocalFileSystem::new(),
                ProcessRunner::new(),
                ConsoleLogger,
                options,
            );
            ScriptEngine::new(script).run().await
        }
        Commands::ImportPathRewrite(args) => {
            let options = args.resolve(&file.rewrite);
            options.validate()?;
            let script = RewriteScript::new(LocalFileSystem::new(), ConsoleLogger, options);
            ScriptEngine::new(script).run().await
        }
        Commands::PrePublish => ScriptEngine::new(PrePublishScript).run().await,
        Commands::Release(args) => {
            let options = args.resolve(&file.release);
            options.validate()?;
            let script = ReleaseScript::new(ProcessRunner::new(), ConsoleLogger, options);
            ScriptEngine::new(script).run().await
        }
    }
}
