use std::path::Path;
use std::time::Instant;

use referral_backend::{
    client::{HttpCandidateApi, ResumeFile},
    config::ClientConfig,
    models::candidate::CandidateStatus,
    ui::{
        dashboard::Dashboard,
        referral_form::{FormField, SubmitOutcome},
    },
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const HELP: &str = "\
Commands:
  list                       show the dashboard
  search <text>              filter by name, job title or status
  clear                      clear the search
  add                        add a candidate (prompts for each field)
  status <n> <status>        set status of the n-th listed candidate (Pending|Reviewed|Hired)
  delete <n>                 delete the n-th listed candidate
  dismiss                    hide the error banner
  help                       show this help
  quit                       exit";

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let api = HttpCandidateApi::new(&config.api_base_url)?;
    let mut dashboard = Dashboard::new(api, config.api_base_url.clone());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    print_screen(&dashboard).await?;
    dashboard.load().await;
    print_screen(&dashboard).await?;

    loop {
        let Some(line) = prompt(&mut input, "> ").await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "list" => dashboard.load().await,
            "search" => {
                dashboard.search().input(rest);
            }
            "clear" => {
                dashboard.search().clear();
            }
            "dismiss" => dashboard.dismiss_error(),
            "add" => add_candidate(&mut dashboard, &mut input).await?,
            "status" => {
                let mut parts = rest.split_whitespace();
                let target = parts.next().and_then(|n| nth_visible(&dashboard, n));
                let status = parts.next().and_then(|s| s.parse::<CandidateStatus>().ok());
                match (target, status) {
                    (Some(id), Some(status)) => {
                        dashboard.change_status(id, status, Instant::now).await;
                    }
                    _ => println!("usage: status <n> <Pending|Reviewed|Hired>"),
                }
            }
            "delete" => match nth_visible(&dashboard, rest) {
                Some(id) => {
                    let prompt_text = referral_backend::ui::candidate_card::DELETE_PROMPT;
                    let answer = prompt(&mut input, &format!("{} [y/N] ", prompt_text)).await?;
                    let confirmed = matches!(answer.as_deref().map(str::trim), Some("y" | "Y" | "yes"));
                    dashboard.delete(id, |_| confirmed, Instant::now).await;
                }
                None => println!("usage: delete <n>"),
            },
            other => println!("Unknown command `{}`. Type `help`.", other),
        }

        print_screen(&dashboard).await?;
    }

    Ok(())
}

async fn add_candidate(
    dashboard: &mut Dashboard<HttpCandidateApi>,
    input: &mut Input,
) -> anyhow::Result<()> {
    for field in FormField::TEXT_FIELDS {
        let Some(value) = prompt(input, &format!("{}: ", field.label())).await? else {
            return Ok(());
        };
        dashboard.form().set(field, value.trim());
    }

    let path = prompt(input, "Resume path (.pdf, empty to skip): ").await?.unwrap_or_default();
    let path = path.trim();
    if !path.is_empty() {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let file_name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                dashboard.form().choose_resume(ResumeFile { file_name, bytes });
            }
            Err(e) => println!("Could not read {}: {}", path, e),
        }
    }

    if dashboard.submit_form(Instant::now).await == SubmitOutcome::Invalid {
        println!("Please fix the highlighted fields and run `add` again.");
    }
    Ok(())
}

fn nth_visible<A: referral_backend::client::CandidateApi>(
    dashboard: &Dashboard<A>,
    position: &str,
) -> Option<Uuid> {
    let index: usize = position.parse().ok()?;
    dashboard
        .visible_cards()
        .get(index.checked_sub(1)?)
        .map(|card| card.candidate().id)
}

async fn prompt(input: &mut Input, text: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?)
}

async fn print_screen<A: referral_backend::client::CandidateApi>(
    dashboard: &Dashboard<A>,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let screen = format!("\n{}\n", dashboard.render(Instant::now()));
    stdout.write_all(screen.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
