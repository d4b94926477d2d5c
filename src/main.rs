use clap::Parser;
use ip_log_analyzer::utils::error::ErrorSeverity;
use ip_log_analyzer::utils::{logger, validation::Validate};
use ip_log_analyzer::{AnalysisEngine, AnalyzerConfig, AnalyzerError, CliConfig, FilePipeline, LocalStorage};

fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ip-log-analyzer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    display_config_summary(&config);

    if cli.dry_run {
        tracing::info!("Dry run: configuration is valid, no records processed");
        return;
    }

    let storage = LocalStorage::new(".".to_string());
    let result = FilePipeline::new(storage, config).and_then(|pipeline| AnalysisEngine::new(pipeline).run());

    match result {
        Ok(output_path) => {
            tracing::info!("Analysis completed");
            println!("Output saved to: {}", output_path);
        }
        Err(e) => exit_with(e),
    }
}

fn display_config_summary(config: &AnalyzerConfig) {
    tracing::info!(
        "Time window: {} .. {}",
        config.filter.time_start,
        config.filter.time_end
    );
    match config.filter.address_filter() {
        Some((start, mask)) => tracing::info!("Address range: start {} mask {}", start, mask),
        None => tracing::info!("Address range: any"),
    }
    tracing::info!("Input: {} ({:?})", config.input.path, config.input.format);
    tracing::info!("Output: {} ({:?})", config.output.path, config.output.format);
}

fn exit_with(e: AnalyzerError) -> ! {
    tracing::error!(
        "Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
