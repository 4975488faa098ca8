//! COC Verify CLI
//!
//! Verifies extracted certificate data against a requirement list or a
//! named requirement template and prints the itemized result.
//!
//! Usage:
//!   cargo run --features cli --bin coc_verify -- \
//!     --extracted certificate.json \
//!     --template trade.high-risk \
//!     --subcontractor-name "Acme Scaffolding Pty Ltd" \
//!     --as-of 2026-03-01
//!
//! Examples:
//!   # Explicit requirements file, JSON output
//!   cargo run --features cli --bin coc_verify -- \
//!     --extracted certificate.json \
//!     --requirements project-requirements.yaml \
//!     --json
//!
//!   # List templates in force today
//!   cargo run --features cli --bin coc_verify -- --list-templates
//!
//! Exit codes: 0 pass, 1 fail, 2 review.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Parser;
use colored::{ColoredString, Colorize};

use coc_verify::presentation::{check_presentation, confidence_band_with};
use coc_verify::{
    parse_policy_date, severity_presentation, status_presentation, ExtractedData,
    InsuranceRequirement, RequirementTemplateRegistry, SubcontractorIdentity, Tone, Verification,
    VerificationPolicy, VerificationStatus, Verifier,
};

/// Certificate of Currency verification
#[derive(Parser, Debug)]
#[command(name = "coc_verify")]
#[command(about = "Verify a Certificate of Currency against project insurance requirements")]
struct Args {
    /// Extracted certificate data (JSON)
    #[arg(long, short = 'e', required_unless_present = "list_templates")]
    extracted: Option<PathBuf>,

    /// Requirement list (YAML or JSON array)
    #[arg(long, short = 'r', conflicts_with = "template")]
    requirements: Option<PathBuf>,

    /// Requirement template ID (e.g., "trade.baseline")
    #[arg(long, short = 't')]
    template: Option<String>,

    /// Requirement templates directory
    #[arg(long, short = 'd', env = "COC_TEMPLATES_DIR", default_value = "config/requirements")]
    templates_dir: PathBuf,

    /// Expected insured party name
    #[arg(long)]
    subcontractor_name: Option<String>,

    /// Expected insured party ABN
    #[arg(long)]
    abn: Option<String>,

    /// Evaluate as of this date (YYYY-MM-DD or DD/MM/YYYY; default: now)
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,

    /// Verification policy YAML (default: built-in thresholds with COC_* env overrides)
    #[arg(long, short = 'p')]
    policy: Option<PathBuf>,

    /// List templates effective on the as-of date and exit
    #[arg(long)]
    list_templates: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

fn parse_as_of(s: &str) -> Result<NaiveDate, String> {
    parse_policy_date(s).ok_or_else(|| format!("Invalid date: {}", s))
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let as_of: DateTime<Utc> = match args.as_of {
        Some(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        None => Utc::now(),
    };

    if args.list_templates {
        let registry = RequirementTemplateRegistry::load_from_dir(&args.templates_dir)?;
        for template in registry.list_effective_on(as_of.date_naive()) {
            println!("{}  {}", template.id.cyan().bold(), template.display_name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let policy = match &args.policy {
        Some(path) => VerificationPolicy::from_yaml_file(path)?,
        None => VerificationPolicy::from_env(),
    };
    let verifier = Verifier::new(policy)?;

    let requirements = load_requirements(&args)?;
    let extracted = match &args.extracted {
        Some(path) => load_extracted(path)?,
        None => bail!("--extracted is required"),
    };

    let subcontractor = if args.subcontractor_name.is_some() || args.abn.is_some() {
        Some(SubcontractorIdentity {
            name: args.subcontractor_name.clone(),
            abn: args.abn.clone(),
        })
    } else {
        None
    };

    let verification =
        verifier.verify_for(&requirements, Some(&extracted), subcontractor.as_ref(), as_of);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verification)?);
    } else {
        print_report(&verification, verifier.policy());
    }

    Ok(match verification.status {
        VerificationStatus::Pass => ExitCode::SUCCESS,
        VerificationStatus::Fail => ExitCode::from(1),
        VerificationStatus::Review => ExitCode::from(2),
    })
}

fn load_requirements(args: &Args) -> Result<Vec<InsuranceRequirement>> {
    if let Some(path) = &args.requirements {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file: {:?}", path))?;
        return serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse requirements file: {:?}", path));
    }

    let template_id = args
        .template
        .as_deref()
        .ok_or_else(|| anyhow!("Provide --requirements or --template"))?;
    let registry = RequirementTemplateRegistry::load_from_dir(&args.templates_dir)?;
    registry.requirements_for(template_id).ok_or_else(|| {
        anyhow!(
            "Template '{}' not found in {:?} (available: {})",
            template_id,
            args.templates_dir,
            registry.list_template_ids().join(", ")
        )
    })
}

fn load_extracted(path: &Path) -> Result<ExtractedData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read extracted data: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse extracted data: {:?}", path))
}

fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Positive => text.green(),
        Tone::Caution => text.yellow(),
        Tone::Negative => text.red(),
        Tone::Neutral => text.normal(),
    }
}

fn print_report(verification: &Verification, policy: &VerificationPolicy) {
    let status = status_presentation(verification.status);
    let band = confidence_band_with(verification.confidence_score, policy);

    println!(
        "\n{} {}",
        "Status:".cyan().bold(),
        paint(status.label, status.tone).bold()
    );
    println!(
        "{} {}% ({})",
        "Confidence:".cyan(),
        verification.confidence_score,
        paint(band.as_str(), band.tone())
    );
    if let Some(reason) = &verification.gate.reason {
        println!("{} {}", "Gate:".cyan(), reason);
    }

    println!("\n{}", "Checks:".cyan().bold());
    for check in &verification.checks {
        let p = check_presentation(check.status);
        println!(
            "  [{}] {} {}",
            paint(p.label, p.tone),
            check.check_type.as_str().dimmed(),
            check.description
        );
        if !check.details.is_empty() {
            println!("      {}", check.details.dimmed());
        }
    }

    if !verification.deficiencies.is_empty() {
        println!("\n{}", "Deficiencies:".cyan().bold());
        for deficiency in &verification.deficiencies {
            let p = severity_presentation(deficiency.severity);
            println!("  {} {}", paint(p.label, p.tone).bold(), deficiency.description);
            if let (Some(required), Some(actual)) =
                (&deficiency.required_value, &deficiency.actual_value)
            {
                println!("      required {}, found {}", required, actual.dimmed());
            }
        }
    }

    if !verification.flagged_fields.is_empty() {
        println!(
            "\n{} {}",
            "Low-confidence fields:".yellow(),
            verification.flagged_fields.join(", ")
        );
    }

    println!("\n{}", verification.summary().dimmed());
}
