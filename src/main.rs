use clap::Parser;
use curriculum_builder::core::session::SessionReport;
use curriculum_builder::domain::ports::ConfigProvider;
use curriculum_builder::utils::error::CurriculumError;
use curriculum_builder::utils::{logger, validation::Validate};
use curriculum_builder::{BuildSession, BuilderConfig, CliConfig};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting curriculum-builder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            BuilderConfig::from_file(&path).and_then(run)
        }
        None => run(cli),
    };

    match result {
        Ok(report) => print_report(&report),
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}

fn run<C: ConfigProvider + Validate>(config: C) -> Result<SessionReport, CurriculumError> {
    config.validate()?;
    tracing::info!("✅ Configuration validated");
    BuildSession::local(config).run()
}

fn print_report(report: &SessionReport) {
    println!("📋 Curriculum structure:");
    for year in &report.summary {
        println!(
            "  Year {}: {} course(s), {} unit(s)",
            year.year, year.course_count, year.units
        );
        for semester in &year.semesters {
            println!(
                "    Semester {}: {} course(s), {} unit(s)",
                semester.semester, semester.course_count, semester.units
            );
        }
    }

    if !report.unresolved.is_empty() {
        println!("⚠️ Not in catalog: {}", report.unresolved.join(", "));
    }

    println!("✅ Applied {} action(s)", report.actions_applied);
    for file in &report.written {
        println!("📁 {}/{}", report.output_path, file);
    }
}
