use chrono::Utc;
use clap::{Parser, Subcommand};
use school_recs_core::{
    HttpApi, LocationType, ModelId, PreferenceForm, ProgressSink, ResultsView, SearchMode,
    SearchOutcome, SearchSession,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "school-recs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Recommendation service base URL
    #[arg(long, env = "SCHOOL_RECS_URL", default_value = "http://localhost:5000")]
    base_url: String,
}

#[derive(Subcommand)]
enum Command {
    /// Show the reference data the service knows about.
    Reference {
        /// Print the full lists instead of just the counts.
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    /// Recommend schools similar to a named school.
    ByName {
        /// School name to look up.
        #[arg(long)]
        school: String,
        /// Ranking model: knn, rf or svm.
        #[arg(long, default_value = "knn")]
        model: ModelId,
    },
    /// Recommend schools matching a preference profile.
    ByPreferences {
        /// Filter by city.
        #[arg(long)]
        city: Option<String>,
        /// Filter by zipcode instead of city.
        #[arg(long)]
        zipcode: Option<String>,
        /// Require elementary grades.
        #[arg(long, default_value_t = false)]
        elementary: bool,
        /// Require intermediate grades.
        #[arg(long, default_value_t = false)]
        intermediate: bool,
        /// Require middle grades.
        #[arg(long, default_value_t = false)]
        middle: bool,
        /// Require high-school grades.
        #[arg(long, default_value_t = false)]
        high: bool,
        /// Minimum school grade score.
        #[arg(long, default_value_t = 1)]
        school_grade: i64,
        /// Proficiency preference weight.
        #[arg(long, default_value_t = 50)]
        proficiency: i64,
        /// Graduation rate preference weight.
        #[arg(long, default_value_t = 50)]
        graduation_rate: i64,
        /// Ranking model: knn, rf or svm.
        #[arg(long, default_value = "knn")]
        model: ModelId,
    },
    /// Show the directory record for one school.
    Details {
        /// School name to look up.
        #[arg(long)]
        school: String,
    },
}

/// Maps the loading-lifecycle signals onto log lines; a richer frontend
/// would drive a spinner with the same pair.
struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn search_started(&mut self) {
        info!("searching");
    }

    fn search_finished(&mut self) {
        info!("search settled");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let api = HttpApi::new(&cli.base_url)?;
    info!(
        base_url = %cli.base_url,
        started_at = %Utc::now().to_rfc3339(),
        "school-recs boot"
    );

    let mut session = SearchSession::start(api, TerminalProgress)
        .await
        .map_err(|error| anyhow::anyhow!("reference data unavailable: {error}"))?;

    match cli.command {
        Command::Reference { full } => {
            let reference = session.reference();
            println!(
                "{} schools, {} cities, {} zipcodes (loaded {})",
                reference.school_count(),
                reference.city_count(),
                reference.zipcode_count(),
                reference.fetched_at().to_rfc3339()
            );

            if full {
                for school in reference.schools() {
                    println!("school: {school}");
                }
                for city in reference.cities() {
                    println!("city: {city}");
                }
                for zipcode in reference.zipcodes() {
                    println!("zipcode: {zipcode}");
                }
            }
        }
        Command::ByName { school, model } => {
            session.select_model(SearchMode::ByName, model);
            let outcome = session.search_by_name(&school).await?;
            print_outcome(&outcome);
        }
        Command::ByPreferences {
            city,
            zipcode,
            elementary,
            intermediate,
            middle,
            high,
            school_grade,
            proficiency,
            graduation_rate,
            model,
        } => {
            session.set_mode(SearchMode::ByPreferences);
            session.select_model(SearchMode::ByPreferences, model);

            let location_type = match (&city, &zipcode) {
                (_, Some(_)) => LocationType::Zipcode,
                (Some(_), None) => LocationType::City,
                (None, None) => anyhow::bail!("pass --city or --zipcode to pick a location"),
            };
            session.set_location_type(location_type);

            let form = PreferenceForm {
                city: city.unwrap_or_default(),
                zipcode: zipcode.unwrap_or_default(),
                elementary,
                intermediate,
                middle,
                high,
                school_grade: school_grade.to_string(),
                proficiency: proficiency.to_string(),
                graduation_rate: graduation_rate.to_string(),
            };

            let outcome = session.search_by_preferences(&form).await?;
            print_outcome(&outcome);
        }
        Command::Details { school } => {
            let record = session.school_details(&school).await?;
            println!("{}", record.school_name);
            println!("  location={}, {}", record.city, record.zipcode);
            if let Some(count) = record.total_students {
                println!("  total_students={count}");
            }
            println!("  school_grade={}", record.school_grade);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    if let Some(model) = &outcome.model_used {
        println!("model: {model}");
    }
    if let Some(total) = outcome.total_matches {
        println!("matched {total} school(s)");
    }

    match &outcome.view {
        ResultsView::NoRecommendations => match &outcome.message {
            Some(message) => println!("{message}"),
            None => println!("No recommendations found. Please try different criteria."),
        },
        ResultsView::Ranked(cards) => {
            for card in cards {
                println!("[{}] {}", card.rank, card.school_name);
                println!("  location={}", card.location);
                println!(
                    "  total_students={} school_grade={}",
                    card.total_students, card.school_grade
                );
            }
        }
    }
}
