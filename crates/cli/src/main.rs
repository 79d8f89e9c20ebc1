use clap::{Parser, Subcommand};
use directory_core::{
    dataset_path_from_env_value, resolve_dataset_path, CoreConfig, DirectoryService, PatientPage,
    QueryParams,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "Patient directory CLI")]
struct Cli {
    /// Path to the dataset file (default: PATIENT_DATASET_PATH, then data/patients.json)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List patients with the same filters, sorting and paging as the REST API
    List(ListArgs),
}

/// Listing options. Values are passed through the same permissive coercion as
/// the `/data` query string, so malformed numbers fall back to defaults.
#[derive(clap::Args)]
struct ListArgs {
    /// Page size (1-100, default 12)
    #[arg(long)]
    limit: Option<String>,
    /// Page number (default 1)
    #[arg(long)]
    page: Option<String>,
    /// Free-text search across id, name, issue, address and email
    #[arg(long)]
    q: Option<String>,
    /// Comma-separated issue names
    #[arg(long)]
    issue: Option<String>,
    /// Only patients with an email address
    #[arg(long)]
    has_email: bool,
    /// Only patients with a phone number
    #[arg(long)]
    has_phone: bool,
    /// Minimum age (inclusive)
    #[arg(long)]
    age_min: Option<String>,
    /// Maximum age (inclusive)
    #[arg(long)]
    age_max: Option<String>,
    /// Sort field: id, name, age, issue or email
    #[arg(long)]
    sort_by: Option<String>,
    /// Sort order: asc or desc
    #[arg(long)]
    order: Option<String>,
    /// Print the page as JSON instead of one line per patient
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn query_params(&self) -> QueryParams {
        let flag = |set: bool| set.then_some("1");
        let pairs = [
            ("limit", self.limit.as_deref()),
            ("page", self.page.as_deref()),
            ("q", self.q.as_deref()),
            ("issue", self.issue.as_deref()),
            ("hasEmail", flag(self.has_email)),
            ("hasPhone", flag(self.has_phone)),
            ("ageMin", self.age_min.as_deref()),
            ("ageMax", self.age_max.as_deref()),
            ("sortBy", self.sort_by.as_deref()),
            ("order", self.order.as_deref()),
        ];
        QueryParams::from_pairs(
            pairs
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List(args)) => {
            let override_path = cli.dataset.or_else(|| {
                dataset_path_from_env_value(std::env::var("PATIENT_DATASET_PATH").ok())
            });
            let cfg = CoreConfig::new(resolve_dataset_path(override_path)?)?;
            let service = DirectoryService::from_config(&cfg)?;

            let page = service.list_patients(&args.query_params())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_page(&page);
            }
        }
        None => {
            println!("Use 'directory --help' for commands");
        }
    }

    Ok(())
}

fn print_page(page: &PatientPage) {
    if page.data.is_empty() {
        println!("No patients found.");
    }
    for patient in &page.data {
        println!(
            "ID: {}, Name: {}, Age: {}, Issue: {} ({}), Email: {}",
            patient.id,
            patient.name,
            patient.age,
            patient.issue,
            patient.issue_color,
            patient.email.as_deref().unwrap_or("-")
        );
    }
    println!(
        "Page {} of {} ({} matching, {} per page)",
        page.page, page.total_pages, page.total, page.limit
    );
}
