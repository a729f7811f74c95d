//! Interactive search: load the index once, then answer queries until an
//! empty line or Ctrl+C.

mod theme;

use clap::Args;
use console::Style;
use dialoguer::Input;
use glimpse_core::{Config, SearchResult};

use super::setup::{load_index, query_deadline, resolve_with_deadline, IndexArgs};

/// Arguments for the `interactive` command.
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub index: IndexArgs,
}

/// Convert a dialoguer result into `Ok(None)` on interrupt (Ctrl+C).
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Execute the interactive command.
pub async fn execute(args: InteractiveArgs, mut config: Config) -> anyhow::Result<()> {
    args.index.apply(&mut config);
    let index = load_index(&config).await?;
    let deadline = query_deadline(&config);

    theme::print_banner(index.stats().images, index.stats().terms);
    let theme = theme::glimpse_theme();

    loop {
        let input = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Search (empty to quit)")
                .allow_empty(true)
                .interact_text(),
        )?;
        let term = match input {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => break,
        };

        match resolve_with_deadline(index.clone(), term, deadline).await {
            Ok(result) => print_result(&result),
            Err(e) => eprintln!("  {}", Style::new().for_stderr().red().apply_to(e)),
        }
    }

    Ok(())
}

/// Human-readable rendering: one block per match set, "No matches" for
/// empty ones.
fn print_result(result: &SearchResult) {
    let heading = Style::new().bold();
    let dim = Style::new().dim();

    let expansions: Vec<&str> = result.expansions().collect();
    if !expansions.is_empty() {
        println!("{}", dim.apply_to(format!("Also searching: {}", expansions.join(", "))));
    }

    for set in &result.match_sets {
        if set.matches.is_empty() {
            println!("{}", dim.apply_to(format!("No matches for {}", set.term)));
            continue;
        }
        println!("{}", heading.apply_to(format!("Results for: {}", set.term)));
        for m in &set.matches {
            println!("  {:>6.3}  {}", m.score, m.image);
        }
    }
    println!();
}
