use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client::{ApiClient, ApiError, SessionStore};
use secrecy::SecretString;
use shared::{CareerProfile, CareerProfileUpdate, JobFitAnalysis};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(version, about = "Command-line client for the CareerBoost API")]
struct Cli {
    #[arg(long, env = "CAREERBOOST_API_URL", default_value = "http://localhost:8000")]
    api_url: Url,

    #[arg(long, env = "CAREERBOOST_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in.
    Signup(CredentialArgs),
    /// Sign in and store the session token.
    Login(CredentialArgs),
    /// Drop the stored session.
    Logout,
    /// Show the account behind the current session.
    Whoami,
    /// Generate a cover letter for a job description.
    CoverLetter(CoverLetterArgs),
    /// Analyze how well a resume matches a job description.
    JobFit(JobFitArgs),
    /// Rewrite a resume against a job description.
    Optimize(OptimizeArgs),
    /// Tailor the saved resume to a job description.
    Tailor(TailorArgs),
    /// Generate improved versions of a resume file.
    Improve(ImproveArgs),
    /// Manage the resume saved on the backend.
    #[command(subcommand)]
    Resume(ResumeCommand),
    /// Manage the career profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "CAREERBOOST_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct CoverLetterArgs {
    /// File holding the job description.
    #[arg(long)]
    job_description: PathBuf,

    /// File holding the resume text.
    #[arg(long, conflicts_with = "saved")]
    resume: Option<PathBuf>,

    /// Use the resume saved on the backend instead of a local file.
    #[arg(long)]
    saved: bool,

    /// Write the generated letter to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct JobFitArgs {
    #[arg(long)]
    job_description: PathBuf,

    #[arg(long, conflicts_with = "saved")]
    resume: Option<PathBuf>,

    #[arg(long)]
    saved: bool,
}

#[derive(Args, Debug)]
struct OptimizeArgs {
    #[arg(long)]
    job_description: PathBuf,

    #[arg(long)]
    resume: PathBuf,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TailorArgs {
    #[arg(long)]
    job_description: PathBuf,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ImproveArgs {
    /// Resume file to upload (txt, docx or pdf).
    #[arg(long)]
    resume: PathBuf,

    /// Directory to write the improved versions into.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ResumeCommand {
    /// Show the saved resume's metadata.
    Show,
    /// Print or save the saved resume's extracted text.
    Download {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upload a resume file, replacing any saved one.
    Upload {
        #[arg(long)]
        file: PathBuf,
    },
    /// Rename the saved resume.
    Rename {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    Set(ProfileSetArgs),
}

#[derive(Args, Debug, Default)]
struct ProfileSetArgs {
    #[arg(long)]
    experience_level: Option<String>,

    #[arg(long)]
    preferred_roles: Option<String>,

    #[arg(long)]
    preferred_industries: Option<String>,

    #[arg(long)]
    preferred_locations: Option<String>,

    #[arg(long)]
    skills: Option<String>,

    #[arg(long)]
    work_authorization: Option<String>,

    #[arg(long)]
    career_goal: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let store = match cli.session_file {
        Some(path) => SessionStore::new(path),
        None => SessionStore::new(
            SessionStore::default_path()
                .context("could not locate a home directory for the session file")?,
        ),
    };
    let mut client = ApiClient::new(cli.api_url, store)?;
    run(cli.command, &mut client).await
}

async fn run(command: Command, client: &mut ApiClient) -> Result<()> {
    match command {
        Command::Signup(args) => {
            client
                .signup(&args.email, SecretString::from(args.password.clone()))
                .await?;
            println!("Account created for {email}.", email = args.email);
            let session = client
                .login(&args.email, SecretString::from(args.password))
                .await?;
            println!("Signed in as {email}.", email = session.email);
        }
        Command::Login(args) => {
            let session = client
                .login(&args.email, SecretString::from(args.password))
                .await?;
            println!("Signed in as {email}.", email = session.email);
        }
        Command::Logout => {
            client.logout()?;
            println!("Signed out.");
        }
        Command::Whoami => {
            if client.session().is_none() {
                bail!("You are not logged in. Please log in first.");
            }
            let account = client.me().await.map_err(|e| surface(client, e))?;
            println!("{email} (account #{id})", email = account.email, id = account.id);
            println!("Member since {date}", date = account.created_at.date_naive());
        }
        Command::CoverLetter(args) => {
            let job_description = read_document(&args.job_description, "job description")?;
            let letter = if args.saved {
                client
                    .generate_cover_letter_from_saved(&job_description)
                    .await
                    .map_err(|e| surface(client, e))?
            } else {
                let resume_path = args
                    .resume
                    .context("provide --resume FILE or use --saved")?;
                let resume = read_document(&resume_path, "resume")?;
                client
                    .generate_cover_letter(&resume, &job_description)
                    .await
                    .map_err(|e| surface(client, e))?
            };
            emit_generated(&letter, args.output.as_deref())?;
        }
        Command::JobFit(args) => {
            let job_description = read_document(&args.job_description, "job description")?;
            let analysis = if args.saved {
                client
                    .analyze_job_fit_from_saved(&job_description)
                    .await
                    .map_err(|e| surface(client, e))?
            } else {
                let resume_path = args
                    .resume
                    .context("provide --resume FILE or use --saved")?;
                let resume = read_document(&resume_path, "resume")?;
                client
                    .analyze_job_fit(&job_description, &resume)
                    .await
                    .map_err(|e| surface(client, e))?
            };
            print_analysis(&analysis);
        }
        Command::Optimize(args) => {
            let job_description = read_document(&args.job_description, "job description")?;
            let resume = read_document(&args.resume, "resume")?;
            let optimized = client
                .optimize_resume(&job_description, &resume)
                .await
                .map_err(|e| surface(client, e))?;
            emit_generated(&optimized, args.output.as_deref())?;
        }
        Command::Tailor(args) => {
            let job_description = read_document(&args.job_description, "job description")?;
            let response = client
                .tailor_resume_from_saved(&job_description)
                .await
                .map_err(|e| surface(client, e))?;
            print_analysis(&response.improved_match);
            if !response.improvement_explanation.is_empty() {
                println!(
                    "\nWhy the tailored version is better: {explanation}",
                    explanation = response.improvement_explanation
                );
            }
            println!();
            emit_generated(&response.tailored_resume, args.output.as_deref())?;
        }
        Command::Improve(args) => {
            let (filename, bytes) = read_upload(&args.resume)?;
            let response = client
                .improve_resume(&filename, bytes)
                .await
                .map_err(|e| surface(client, e))?;
            if response.versions.is_empty() {
                println!("The generator returned no content. Please try again.");
                return Ok(());
            }
            match args.output {
                Some(dir) => {
                    fs::create_dir_all(&dir)?;
                    for (index, version) in response.versions.iter().enumerate() {
                        let path = dir.join(format!("version-{}.txt", index + 1));
                        write_artifact(&path, version)?;
                        println!("Saved {path}", path = path.display());
                    }
                }
                None => {
                    for (index, version) in response.versions.iter().enumerate() {
                        println!("----- Version {} -----", index + 1);
                        println!("{version}\n");
                    }
                }
            }
        }
        Command::Resume(command) => run_resume(command, client).await?,
        Command::Profile(command) => run_profile(command, client).await?,
    }
    Ok(())
}

async fn run_resume(command: ResumeCommand, client: &mut ApiClient) -> Result<()> {
    match command {
        ResumeCommand::Show => match client.saved_resume().await.map_err(|e| surface(client, e))? {
            Some(record) => {
                println!("{name}", name = record.original_filename);
                println!("  uploaded: {date}", date = record.created_at.date_naive());
                println!("  updated:  {date}", date = record.updated_at.date_naive());
                println!(
                    "  extracted text: {chars} characters",
                    chars = record.extracted_text.chars().count()
                );
            }
            None => println!("No resume saved for this account."),
        },
        ResumeCommand::Download { output } => {
            match client.saved_resume().await.map_err(|e| surface(client, e))? {
                Some(record) => emit(&record.extracted_text, output.as_deref())?,
                None => println!("No resume saved for this account."),
            }
        }
        ResumeCommand::Upload { file } => {
            let (filename, bytes) = read_upload(&file)?;
            let record = client
                .upload_resume(&filename, bytes)
                .await
                .map_err(|e| surface(client, e))?;
            println!("Saved {name}.", name = record.original_filename);
        }
        ResumeCommand::Rename { name } => {
            if name.trim().is_empty() {
                bail!("Please provide a non-empty name.");
            }
            let record = client
                .rename_resume(&name)
                .await
                .map_err(|e| surface(client, e))?;
            println!("Renamed to {name}.", name = record.original_filename);
        }
    }
    Ok(())
}

async fn run_profile(command: ProfileCommand, client: &mut ApiClient) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            match client.career_profile().await.map_err(|e| surface(client, e))? {
                Some(profile) => print_profile(&profile),
                None => println!("No profile yet. Use `careerboost profile set` to create one."),
            }
        }
        ProfileCommand::Set(args) => {
            let update = CareerProfileUpdate {
                experience_level: args.experience_level,
                preferred_roles: args.preferred_roles,
                preferred_industries: args.preferred_industries,
                preferred_locations: args.preferred_locations,
                skills: args.skills,
                work_authorization: args.work_authorization,
                career_goal: args.career_goal,
            };
            if update == CareerProfileUpdate::default() {
                bail!("Nothing to update. Pass at least one field, e.g. --skills.");
            }
            let profile = client
                .update_career_profile(&update)
                .await
                .map_err(|e| surface(client, e))?;
            println!("Profile updated.");
            print_profile(&profile);
        }
    }
    Ok(())
}

/// Unified reaction to authentication rejections: drop the session and ask
/// for a fresh login.
fn surface(client: &mut ApiClient, error: ApiError) -> anyhow::Error {
    if error.is_auth_rejection() {
        if let Err(clear_error) = client.logout() {
            warn!(%clear_error, "Failed to clear rejected session");
        }
        anyhow!("Your session has expired. Please log in again.")
    } else {
        anyhow::Error::new(error)
    }
}

fn read_document(path: &Path, what: &str) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {path}", path = path.display()))?;
    if text.trim().is_empty() {
        bail!("Please provide a {what}: {path} is empty.", path = path.display());
    }
    Ok(text)
}

fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read {path}", path = path.display()))?;
    if bytes.is_empty() {
        bail!("{path} is empty.", path = path.display());
    }
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("resume")
        .to_owned();
    Ok((filename, bytes))
}

/// Prints or saves a generated artifact, falling back to a notice when the
/// generator produced nothing.
fn emit_generated(text: &str, output: Option<&Path>) -> Result<()> {
    if text.trim().is_empty() {
        println!("The generator returned no content. Please try again.");
        return Ok(());
    }
    emit(text, output)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_artifact(path, text)?;
            println!("Saved to {path}", path = path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

// The file must reproduce the displayed string byte for byte.
fn write_artifact(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)
        .with_context(|| format!("failed to write {path}", path = path.display()))?;
    Ok(())
}

fn print_analysis(analysis: &JobFitAnalysis) {
    println!("Match score: {score}%", score = analysis.match_score);
    print_section("Strengths", &analysis.strengths);
    print_section("Missing skills", &analysis.missing_skills);
    print_section("Red flags", &analysis.red_flags);
    print_section("Recommendations", &analysis.recommendations);
}

fn print_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}

fn print_profile(profile: &CareerProfile) {
    print_field("Experience level", &profile.experience_level);
    print_field("Preferred roles", &profile.preferred_roles);
    print_field("Preferred industries", &profile.preferred_industries);
    print_field("Preferred locations", &profile.preferred_locations);
    print_field("Skills", &profile.skills);
    print_field("Work authorization", &profile.work_authorization);
    print_field("Career goal", &profile.career_goal);
}

fn print_field(label: &str, value: &Option<String>) {
    match value {
        Some(value) if !value.is_empty() => println!("{label}: {value}"),
        _ => println!("{label}: -"),
    }
}
