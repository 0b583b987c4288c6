use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use transformer_inspector::{
    entities::{comment::CommentDraft, maintenance_record::MaintenanceRecord},
    repositories::inspection::InspectionRepository,
    settings::AppConfig,
    use_cases::{
        comments::added_message,
        inspections::InspectionFilter,
        maintenance::save_failed_message,
        notes::NotesSave,
        resource_view::{SubmitOutcome, ViewSnapshot},
        thermal_images::latest_pair,
        transformers::{TransformerFilter, TransformerStats},
    },
    utils::time_format::{format_local, time_ago_now},
    AppState,
};

#[derive(Parser)]
#[command(name = "transformer_inspector", version, about = "Transformer thermal-inspection client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List transformers
    Transformers {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List inspections, optionally for one transformer
    Inspections {
        #[arg(long)]
        transformer: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Replace the notes of an inspection
    Notes { inspection_id: String, text: String },
    /// Show the comment thread of an inspection
    Comments { inspection_id: String },
    /// Add a comment to an inspection
    Comment {
        inspection_id: String,
        text: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// List a transformer's thermal images
    Images { transformer_id: String },
    /// List maintenance records, optionally for one transformer
    Records {
        #[arg(long)]
        transformer: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Open the maintenance record of an inspection, creating it if needed
    Record { inspection_id: String },
    /// Finalize a maintenance record
    Finalize { record_id: String },
    /// Delete a draft maintenance record
    DeleteRecord { record_id: String },
    /// Transformer and inspection overview
    Dashboard,
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn print_banner<T>(snapshot: &ViewSnapshot<T>) {
    if let Some(error) = snapshot.banner() {
        eprintln!("error: {}", error);
    }
    if let Some(message) = snapshot.empty_message() {
        println!("{}", message);
    }
}

fn print_page_footer<T>(snapshot: &ViewSnapshot<T>) {
    if let Some(page) = snapshot.page.filter(|p| p.total_pages > 1) {
        println!(
            "Page {} of {} ({} total)",
            page.number + 1,
            page.total_pages,
            page.total_elements
        );
    }
}

fn print_record(record: &MaintenanceRecord) {
    println!(
        "{:<12} {:<10} {:<12} {:<10} {} anomalies",
        record.record_number,
        record.transformer_code,
        record.inspection_number,
        format!("{:?}", record.status),
        record.anomaly_count
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let state = AppState::new(config)?;
    if let Err(e) = state.sign_in_from_config().await {
        eprintln!("Login failed: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Command::Transformers { search, page } => {
            let view = state.transformers();
            view.go_to_page(page).await;
            let snapshot = view.snapshot();
            println!("{}", snapshot.heading());
            print_banner(&snapshot);

            let filter = TransformerFilter::search(search);
            for t in filter.apply(&snapshot.items) {
                println!(
                    "{:<12} {:<10} {:<14} {:<12} {}",
                    t.transformer_no,
                    t.pole_no,
                    t.region,
                    t.transformer_type.to_string(),
                    t.location_details
                );
            }
            print_page_footer(&snapshot);
        }
        Command::Inspections { transformer, search, page } => {
            let view = state.inspections(transformer.as_deref());
            view.go_to_page(page).await;
            let snapshot = view.snapshot();
            println!("{}", snapshot.heading());
            print_banner(&snapshot);

            let filter = InspectionFilter::search(search);
            for i in filter.apply(&snapshot.items) {
                println!(
                    "{:<12} {:<12} [{}] {:<16} {}",
                    i.inspection_no,
                    i.transformer_id,
                    i.status.badge_class(),
                    i.inspected_by,
                    format_local(i.inspected_date)
                );
            }
            print_page_footer(&snapshot);
        }
        Command::Notes { inspection_id, text } => {
            let inspection = state.repos.inspections.get_inspection(&inspection_id).await?;
            let editor = state.notes(&inspection);
            editor.begin_edit();
            editor.edit(text);

            match editor.save().await {
                NotesSave::Saved(_) => println!("Notes saved"),
                NotesSave::Unchanged => println!("Notes unchanged"),
                NotesSave::Failed(_) | NotesSave::Busy => {
                    if let Some(error) = editor.snapshot().error {
                        eprintln!("error: {}", error);
                    }
                    std::process::exit(2);
                }
            }
            println!("{}", editor.snapshot().display_text());
        }
        Command::Comments { inspection_id } => {
            let view = state.comments(&inspection_id);
            view.reload().await;
            let snapshot = view.snapshot();
            println!("{}", snapshot.heading());
            print_banner(&snapshot);

            for c in &snapshot.items {
                println!(
                    "{} · {} · {}\n  {}",
                    c.author,
                    time_ago_now(c.created_at),
                    format_local(c.created_at),
                    c.comment_text
                );
            }
        }
        Command::Comment { inspection_id, text, author } => {
            let view = state.comments(&inspection_id);
            let author = author.unwrap_or_else(|| view.draft().author);

            match view.submit(CommentDraft::new(author, text)).await {
                SubmitOutcome::Created { record, reload } => {
                    tracing::info!(comment_id = %record.id, "Comment added");
                    println!("{}", added_message(&reload, &view.snapshot()));
                    if !reload.is_loaded() {
                        if let Some(error) = view.load_error() {
                            eprintln!("warning: {}", error);
                        }
                    }
                }
                SubmitOutcome::Busy => {
                    eprintln!("error: a comment is already being added");
                    std::process::exit(2);
                }
                SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => {
                    if let Some(error) = view.error() {
                        eprintln!("error: {}", error);
                    }
                    std::process::exit(2);
                }
            }
        }
        Command::Images { transformer_id } => {
            let view = state.thermal_images(&transformer_id);
            view.reload().await;
            let snapshot = view.snapshot();
            println!("{}", snapshot.heading());
            print_banner(&snapshot);

            for image in &snapshot.items {
                println!(
                    "{:<12} {:<10} {} {}",
                    image.image_type.to_string(),
                    image.uploader,
                    format_local(image.upload_date),
                    image.image_url
                );
            }
            if let Some((baseline, maintenance)) = latest_pair(&snapshot.items).comparison() {
                println!("Compare: {} <-> {}", baseline.image_url, maintenance.image_url);
            }
        }
        Command::Records { transformer, page } => {
            let view = state.maintenance_records(transformer.as_deref());
            view.go_to_page(page).await;
            let snapshot = view.snapshot();
            println!("{}", snapshot.heading());
            print_banner(&snapshot);

            for record in &snapshot.items {
                print_record(record);
            }
            print_page_footer(&snapshot);
        }
        Command::Record { inspection_id } => {
            let author = state.session.display_name();
            match state.maintenance().open_for_inspection(&inspection_id, &author).await {
                Ok(record) => print_record(&record),
                Err(e) => {
                    eprintln!("error: {}", save_failed_message(&e));
                    std::process::exit(2);
                }
            }
        }
        Command::Finalize { record_id } => {
            let author = state.session.display_name();
            match state.maintenance().finalize(&record_id, &author).await {
                Ok(record) => print_record(&record),
                Err(e) => {
                    eprintln!("error: {}", save_failed_message(&e));
                    std::process::exit(2);
                }
            }
        }
        Command::DeleteRecord { record_id } => {
            if let Err(e) = state.maintenance().delete(&record_id).await {
                eprintln!("error: {}", save_failed_message(&e));
                std::process::exit(2);
            }
            println!("Maintenance record deleted");
        }
        Command::Dashboard => {
            let transformers = state.transformers();
            let inspections = state.inspections(None);
            futures::join!(transformers.reload(), inspections.reload());

            let snapshot = transformers.snapshot();
            print_banner(&snapshot);
            let stats = TransformerStats::from_transformers(&snapshot.items);
            println!("Transformers: {}", snapshot.total());
            if snapshot.is_partial() {
                println!("  (breakdown covers the first {} loaded)", stats.total);
            }
            for (region, count) in &stats.by_region {
                println!("  {:<16} {}", region, count);
            }
            for (kind, count) in &stats.by_type {
                println!("  {:<16} {}", kind.to_string(), count);
            }

            let snapshot = inspections.snapshot();
            print_banner(&snapshot);
            println!("Inspections: {}", snapshot.total());
        }
    }

    Ok(())
}
