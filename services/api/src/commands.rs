use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use knightsource::assistant::AssistantService;
use knightsource::config::AppConfig;
use knightsource::error::AppError;
use knightsource::estimator::{
    round_currency, CategoryId, EstimationResult, EstimationSession, EstimatorConfig, LineItem,
    Role,
};

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Category id to include (repeatable)
    #[arg(long = "select", required = true)]
    pub(crate) select: Vec<String>,
    /// Role for role-dependent categories: individual or rso
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Estimator categories JSON (defaults to the built-in campus catalog)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// Question for the assistant
    #[arg(required = true, num_args = 1..)]
    pub(crate) message: Vec<String>,
    /// Remote answer service URL (defaults to ASSISTANT_ENDPOINT)
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        select,
        role,
        config,
    } = args;

    let config = match config {
        Some(path) => EstimatorConfig::from_path(path)?,
        None => EstimatorConfig::campus_default(),
    };
    let role = match role {
        Some(raw) => Role::parse(&raw)?,
        None => None,
    };

    let mut session = EstimationSession::new(Arc::new(config));
    for raw in &select {
        let id = CategoryId::from(raw.as_str());
        if !session.config().contains(&id) {
            eprintln!("warning: unknown category '{id}' ignored");
        }
        session.toggle_category(&id, true);
    }
    session.set_role(role);

    let result = session.calculate()?;
    println!("{}", render_estimate(result, role));
    Ok(())
}

pub(crate) async fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let AskArgs { message, endpoint } = args;
    let endpoint = match endpoint {
        Some(endpoint) => Some(endpoint),
        None => AppConfig::load()?.assistant.endpoint,
    };

    let question = message.join(" ");
    let reply = AssistantService::connect(endpoint.as_deref())
        .ask(&question)
        .await?;
    println!("{}", reply.text);
    Ok(())
}

fn render_estimate(result: &EstimationResult, role: Option<Role>) -> String {
    let mut lines = vec!["Savings estimate".to_string()];
    if let Some(role) = role {
        lines.push(format!("Role: {}", role.label()));
    }

    lines.push(String::new());
    lines.push("Breakdown".to_string());
    for item in &result.line_items {
        lines.push(format!("- {}: {}", item.label, format_item(item)));
    }

    lines.push(String::new());
    lines.push(format!(
        "You could save approximately {}",
        format_usd(result.midpoint)
    ));
    lines.push(format!(
        "Estimated range: {}-{}",
        format_usd(result.total_min),
        format_usd(result.total_max)
    ));
    lines.join("\n")
}

fn format_item(item: &LineItem) -> String {
    let min = format_usd(round_currency(item.min));
    let max = format_usd(round_currency(item.max));
    if min == max {
        min
    } else {
        format!("{min}-{max}")
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$1,500`.
fn format_usd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
