use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

use ff_api::{ApiClient, Session};
use ff_app::{
    AppError, AppResult, admin_service, agents_service, auth_service, products_service,
    profile_service, retirement_service,
};
use ff_model::{ScenarioRequest, TimeMachineRequest, WhatIfRequest};

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(about = "Finflow CLI - personal finance client", long_about = None)]
struct Cli {
    /// Backend origin (defaults to $FINFLOW_API_URL, then localhost)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and cache the session
    Login {
        email: String,
    },
    /// Clear the cached session
    Logout,
    /// Show the stored profile
    Profile,
    /// Show the financial assessment
    Assessment {
        /// Skip the backend cache and recompute
        #[arg(long)]
        force_refresh: bool,
    },
    /// Show the current retirement plan
    Plan,
    /// Project a retirement what-if scenario
    WhatIf {
        #[arg(long, default_value_t = 35)]
        current_age: u32,
        #[arg(long, default_value_t = 65)]
        retirement_age: u32,
        #[arg(long, default_value_t = 90)]
        life_expectancy: u32,
        #[arg(long, default_value_t = 0.0)]
        current_savings: f64,
        #[arg(long, default_value_t = 0.0)]
        monthly_contribution: f64,
        #[arg(long, default_value_t = 5.0)]
        expected_return: f64,
        #[arg(long, default_value_t = 2.0)]
        inflation: f64,
        #[arg(long, default_value_t = 4000.0)]
        desired_income: f64,
        /// Exclude CPP & OAS from the projection
        #[arg(long)]
        no_benefits: bool,
    },
    /// Show the retirement health checklist
    Health,
    /// Show saved product recommendations
    Recommendations {
        /// Ask the advisor for a fresh recommendation
        #[arg(long)]
        force_new: bool,
    },
    /// Search investment products
    Products {
        query: String,
    },
    /// Search products from a recorded audio question (WAV)
    VoiceProducts {
        audio: std::path::PathBuf,
    },
    /// Transcribe a recorded audio clip (WAV)
    Transcribe {
        audio: std::path::PathBuf,
    },
    /// Run the retirement advisor and show its recommendation
    Advisor,
    /// Ask the portfolio analyst
    Analyst {
        request: String,
    },
    /// Replay a past financial decision
    Timemachine {
        description: String,
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
        #[arg(long, default_value_t = 5)]
        years: u32,
    },
    /// Run a market scenario analysis
    Scenario {
        description: String,
    },
    /// Report whether the signed-in user has admin privileges
    CheckAdmin,
}

fn client(api_url: Option<String>) -> AppResult<ApiClient> {
    let base = api_url
        .or_else(|| std::env::var("FINFLOW_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    Ok(ApiClient::new(base, Session::restore()).map_err(AppError::Api)?)
}

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = client(cli.api_url)?;

    match cli.command {
        Commands::Login { email } => cmd_login(&client, &email).await,
        Commands::Logout => {
            auth_service::logout(&client)?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Profile => cmd_profile(&client).await,
        Commands::Assessment { force_refresh } => cmd_assessment(&client, force_refresh).await,
        Commands::Plan => cmd_plan(&client).await,
        Commands::WhatIf {
            current_age,
            retirement_age,
            life_expectancy,
            current_savings,
            monthly_contribution,
            expected_return,
            inflation,
            desired_income,
            no_benefits,
        } => {
            let request = WhatIfRequest {
                current_age,
                retirement_age,
                life_expectancy,
                current_savings,
                monthly_contribution,
                expected_return_rate: expected_return,
                inflation_rate: inflation,
                desired_retirement_income: desired_income,
                include_cpp_oas: !no_benefits,
            };
            cmd_what_if(&client, &request).await
        }
        Commands::Health => cmd_health(&client).await,
        Commands::Recommendations { force_new } => cmd_recommendations(&client, force_new).await,
        Commands::Products { query } => cmd_products(&client, &query).await,
        Commands::VoiceProducts { audio } => cmd_voice_products(&client, &audio).await,
        Commands::Transcribe { audio } => {
            let bytes = read_audio(&audio).await?;
            let text = products_service::transcribe(&client, &file_name(&audio), bytes).await?;
            println!("{text}");
            Ok(())
        }
        Commands::Advisor => cmd_advisor(&client).await,
        Commands::Analyst { request } => {
            let report = agents_service::analyst(&client, &request).await?;
            print_report(&report);
            Ok(())
        }
        Commands::Timemachine {
            description,
            amount,
            years,
        } => {
            let request = TimeMachineRequest {
                decision_description: description,
                decision_amount: amount,
                timeframe_years: years,
            };
            let report = agents_service::time_machine(&client, &request).await?;
            print_report(&report);
            Ok(())
        }
        Commands::Scenario { description } => {
            let request = ScenarioRequest {
                scenario_description: description,
            };
            let report = agents_service::scenario(&client, &request).await?;
            print_report(&report);
            Ok(())
        }
        Commands::CheckAdmin => {
            let is_admin = admin_service::check_admin(&client).await;
            println!("admin: {is_admin}");
            Ok(())
        }
    }
}

fn prompt_password() -> AppResult<String> {
    print!("Password: ");
    io::stdout()
        .flush()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn cmd_login(client: &ApiClient, email: &str) -> AppResult<()> {
    let password = prompt_password()?;
    let response = auth_service::login(client, email, &password).await?;
    println!("Signed in as {}.", response.user.email);
    Ok(())
}

async fn cmd_profile(client: &ApiClient) -> AppResult<()> {
    let profile = profile_service::fetch_profile(client).await?;
    println!("Name: {}", profile.name);
    if let Some(age) = profile.age {
        println!("Age: {age}");
    }
    if let Some(income) = profile.monthly_income {
        println!("Monthly income: ${income:.0}");
    }
    if let Some(expenses) = profile.monthly_expenses {
        println!("Monthly expenses: ${expenses:.0}");
    }
    if let Some(cash) = profile.cash_balance {
        println!("Cash balance: ${cash:.0}");
    }
    if let Some(investments) = profile.investments {
        println!("Investments: ${investments:.0}");
    }
    if let Some(debt) = profile.debt {
        println!("Debt: ${debt:.0}");
    }
    Ok(())
}

async fn cmd_assessment(client: &ApiClient, force_refresh: bool) -> AppResult<()> {
    let assessment = profile_service::financial_assessment(client, force_refresh).await?;
    for (label, dimension) in assessment.dimensions() {
        println!("{label}: {}", dimension.status);
        for line in &dimension.strengths {
            println!("  + {line}");
        }
        for line in &dimension.areas_for_improvement {
            println!("  - {line}");
        }
    }
    Ok(())
}

async fn cmd_plan(client: &ApiClient) -> AppResult<()> {
    let plan = retirement_service::current_plan(client).await?;
    println!(
        "Retiring at {} ({} years away), {} years in retirement",
        plan.retirement_age, plan.years_until_retirement, plan.years_in_retirement
    );
    println!("Current savings: ${:.0}", plan.current_savings);
    println!("Projected savings: ${:.0}", plan.projected_savings);
    println!("Required savings:  ${:.0}", plan.required_savings);
    println!("Savings gap:       ${:.0}", plan.savings_gap);
    println!(
        "Retirement income: ${:.0}/mo (benefits ${:.0}, savings ${:.0})",
        plan.retirement_income, plan.government_benefits, plan.savings_income
    );
    Ok(())
}

async fn cmd_what_if(client: &ApiClient, request: &WhatIfRequest) -> AppResult<()> {
    let response = retirement_service::run_what_if(client, request).await?;
    for point in &response.savings_by_year {
        println!("{}: ${:.0}", point.year, point.amount);
    }
    if !response.monthly_income_breakdown.is_empty() {
        println!("Monthly income in retirement:");
        for (source, amount) in &response.monthly_income_breakdown {
            println!("  {source}: ${amount:.0}");
        }
    }
    Ok(())
}

async fn cmd_health(client: &ApiClient) -> AppResult<()> {
    let health = retirement_service::health(client).await?;
    println!("Status: {} ({:.0}%)", health.status, health.progress);
    for (name, item) in &health.checklist {
        let title = if item.title.is_empty() { name } else { &item.title };
        println!("  [{}] {title}", item.status);
        if !item.message.is_empty() {
            println!("      {}", item.message);
        }
    }
    if !health.missing_fields.is_empty() {
        println!("Missing fields: {}", health.missing_fields.join(", "));
    }
    Ok(())
}

async fn cmd_recommendations(client: &ApiClient, force_new: bool) -> AppResult<()> {
    let response = retirement_service::recommendations(client, force_new).await?;
    if !response.has_recommendation || response.recommendations.is_empty() {
        println!(
            "{}",
            response
                .message
                .as_deref()
                .unwrap_or("No recommendations yet.")
        );
        return Ok(());
    }
    for rec in &response.recommendations {
        println!("{}: {}", rec.recommended_symbol, rec.recommended_rationale);
    }
    Ok(())
}

async fn read_audio(path: &std::path::Path) -> AppResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InvalidInput(format!("could not read {}: {e}", path.display())))
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "clip.wav".to_string())
}

async fn cmd_voice_products(client: &ApiClient, audio: &std::path::Path) -> AppResult<()> {
    let bytes = read_audio(audio).await?;
    let cards = products_service::voice_search(client, &file_name(audio), bytes).await?;
    print_cards(&cards);
    Ok(())
}

async fn cmd_advisor(client: &ApiClient) -> AppResult<()> {
    let response = retirement_service::run_advisor(client).await?;
    if !response.has_recommendation || response.recommendations.is_empty() {
        println!(
            "{}",
            response
                .message
                .as_deref()
                .unwrap_or("The advisor has no recommendation right now.")
        );
        return Ok(());
    }
    for rec in &response.recommendations {
        println!("{}: {}", rec.recommended_symbol, rec.recommended_rationale);
    }
    Ok(())
}

async fn cmd_products(client: &ApiClient, query: &str) -> AppResult<()> {
    let cards = products_service::search(client, query).await?;
    print_cards(&cards);
    Ok(())
}

fn print_cards(cards: &[ff_model::ProductCard]) {
    if cards.is_empty() {
        println!("No matching products.");
        return;
    }
    for card in cards {
        println!("{} ({})", card.name, card.ticker);
        println!(
            "  provider {} | category {} | 1y {:.2}% | expense {:.2}%",
            card.provider, card.category, card.performance.one_year, card.expense_ratio
        );
        if !card.description.is_empty() && card.description != "N/A" {
            println!("  {}", card.description);
        }
    }
}

fn print_report(report: &ff_model::AgentReport) {
    if report.is_empty() {
        println!("(empty answer)");
        return;
    }
    if report.sections.is_empty() {
        println!("{}", report.raw_text);
    }
    for section in &report.sections {
        if !section.heading.is_empty() {
            println!("## {}", section.heading);
        }
        println!("{}", section.body);
        println!();
    }
    if let Some(url) = &report.image_url {
        println!("Visualization: {url}");
    }
}
