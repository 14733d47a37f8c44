//! Menu-driven mode, entered when no subcommand is given.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use crate::{App, Cli, build_app};

/// Actions offered by the interactive menu.
enum Action {
    Assess,
    Forecast,
    Ask,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[Self::Assess, Self::Forecast, Self::Ask, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Assess => "Assess a place now",
            Self::Forecast => "Forecast a place",
            Self::Ask => "Ask a question",
            Self::Quit => "Quit",
        }
    }
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Runs the interactive menu until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or the engine cannot be configured.
/// Invalid forecast horizons are reported and the menu continues.
pub async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("Health Risk");
    println!();

    let snapshot = match &cli.snapshot {
        Some(path) => path.clone(),
        None => PathBuf::from(
            Input::<String>::new()
                .with_prompt("Hazard snapshot file")
                .interact_text()?,
        ),
    };
    let app: App = build_app(cli, snapshot)?;

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let result = match Action::ALL[idx] {
            Action::Assess => {
                let place: String = Input::new()
                    .with_prompt("Place (blank for region-wide)")
                    .allow_empty(true)
                    .interact_text()?;
                app.assess(optional(&place).as_deref()).await
            }
            Action::Forecast => {
                let place: String = Input::new()
                    .with_prompt("Place (blank for region-wide)")
                    .allow_empty(true)
                    .interact_text()?;
                let max = app.service.engine().max_horizon_days();
                let days: i64 = Input::new()
                    .with_prompt(format!("Days ahead (1-{max})"))
                    .default(3)
                    .validate_with(|days: &i64| -> Result<(), String> {
                        if (1..=i64::from(max)).contains(days) {
                            Ok(())
                        } else {
                            Err(format!("Enter a number of days from 1 to {max}"))
                        }
                    })
                    .interact_text()?;
                app.forecast(optional(&place).as_deref(), days).await
            }
            Action::Ask => {
                let message: String = Input::new().with_prompt("Question").interact_text()?;
                app.ask(&message).await
            }
            Action::Quit => return Ok(()),
        };

        if let Err(e) = result {
            eprintln!("Error: {e}");
        }
    }
}
