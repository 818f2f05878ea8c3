use std::env;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Result};
use tracing_subscriber::EnvFilter;

use event_booker::{ApiClient, Backend, BookingForm, PageController, Submission};

const USAGE: &str = "usage:
  event-booker list
  event-booker book <event-id> --name <name> --phone <phone> --location <location> --email <email> --guests <count>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<ExitCode> {
    let page = PageController::new(ApiClient::new(Backend::from_env()));

    match args.first().map(String::as_str) {
        Some("list") | None => {
            page.load_events().await;
            println!("{}", page.state().grid);
            Ok(ExitCode::SUCCESS)
        }
        Some("book") => {
            let (event_id, form) = parse_book_args(&args[1..])?;
            page.book_ticket(&event_id);
            page.set_form(form);
            match page.submit_booking().await? {
                Submission::Accepted => {
                    println!("Booking confirmed.");
                    Ok(ExitCode::SUCCESS)
                }
                Submission::Failed { alert } => {
                    eprintln!("{alert}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Some(other) => Err(anyhow!("unknown command: {other}")),
    }
}

fn parse_book_args(args: &[String]) -> Result<(String, BookingForm)> {
    let mut args = args.iter();
    let event_id = args
        .next()
        .filter(|id| !id.starts_with("--"))
        .ok_or_else(|| anyhow!("an event id is required"))?
        .to_string();

    let mut form = BookingForm::default();
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| anyhow!("missing value for {flag}"))?;
        match flag.as_str() {
            "--name" => form.name = value.clone(),
            "--phone" => form.phone = value.clone(),
            "--location" => form.location = value.clone(),
            "--email" => form.email = value.clone(),
            "--guests" => {
                form.guests = value
                    .parse()
                    .map_err(|_| anyhow!("--guests expects a number, got '{value}'"))?
            }
            other => bail!("unknown flag: {other}"),
        }
    }

    if form.name.trim().is_empty() {
        bail!("--name is required");
    }
    if form.email.trim().is_empty() {
        bail!("--email is required");
    }
    if form.guests == 0 {
        bail!("--guests must be at least 1");
    }

    Ok((event_id, form))
}
