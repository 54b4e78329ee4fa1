use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use engine::{Bill, Money, Percent};

use crate::{
    error::{AppError, Result},
    session::SessionStore,
};

mod error;
mod export;
mod report;
mod session;
mod settings;

/// Palette cycled through when a participant is added without an explicit
/// color tag.
const PARTICIPANT_COLORS: [&str; 8] = [
    "blue", "green", "yellow", "purple", "pink", "indigo", "red", "orange",
];

#[derive(Parser, Debug)]
#[command(name = "scontrino")]
#[command(about = "Split a restaurant bill between participants")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the session file path.
    #[arg(long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a fresh bill, replacing the stored session.
    New,
    /// Print the bill preview and summary.
    Show,
    /// Manage the people splitting the bill.
    Participant(Participant),
    /// Manage the menu items on the bill.
    Item(Item),
    /// Toggle whether a participant shares an item.
    Share {
        /// Item id or name.
        item: String,
        /// Participant id or name.
        participant: String,
    },
    /// Show or set the surcharge percentages.
    Charges(ChargesArgs),
    /// Replace the session with a JSON payload from a file.
    Import {
        file: PathBuf,
    },
    /// Write the bill out as JSON or CSV.
    Export(Export),
}

#[derive(Args, Debug)]
struct Participant {
    #[command(subcommand)]
    command: ParticipantCommand,
}

#[derive(Subcommand, Debug)]
enum ParticipantCommand {
    Add {
        name: String,
        /// Display color; defaults to the next palette entry.
        #[arg(long)]
        color: Option<String>,
    },
    Remove {
        /// Participant id or name.
        participant: String,
    },
    List,
}

#[derive(Args, Debug)]
struct Item {
    #[command(subcommand)]
    command: ItemCommand,
}

#[derive(Subcommand, Debug)]
enum ItemCommand {
    Add {
        name: String,
        #[arg(long)]
        price: Money,
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Comma-separated participant ids or names; defaults to everybody.
        #[arg(long, value_delimiter = ',')]
        shared_by: Option<Vec<String>>,
    },
    Remove {
        /// Item id or name.
        item: String,
    },
    List,
}

#[derive(Args, Debug)]
struct ChargesArgs {
    #[arg(long)]
    service_charge: Option<Percent>,
    #[arg(long)]
    tax: Option<Percent>,
}

#[derive(Args, Debug)]
struct Export {
    #[command(subcommand)]
    command: ExportCommand,
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Print the bill as JSON, or write it to a file.
    Json {
        path: Option<PathBuf>,
    },
    /// Write `<stem>_details.csv` and `<stem>_summary.csv`.
    Csv {
        /// Defaults to `Bill_Splitter_<bill date>`.
        stem: Option<PathBuf>,
    },
}

fn resolve_participant(bill: &Bill, reference: &str) -> Result<String> {
    if let Some(participant) = bill.participant(reference) {
        return Ok(participant.id.clone());
    }
    if let Some(participant) = bill.participant_by_name(reference) {
        return Ok(participant.id.clone());
    }
    Err(AppError::NotFound(format!(
        "no participant matches \"{reference}\""
    )))
}

fn resolve_item(bill: &Bill, reference: &str) -> Result<String> {
    if let Some(item) = bill.item(reference) {
        return Ok(item.id.clone());
    }
    let mut matches = bill.items.iter().filter(|item| item.name == reference);
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item.id.clone()),
        (Some(_), Some(_)) => Err(AppError::Ambiguous(format!(
            "several items are named \"{reference}\", use the id"
        ))),
        _ => Err(AppError::NotFound(format!(
            "no item matches \"{reference}\""
        ))),
    }
}

fn run(command: Command, store: &SessionStore, settings: &settings::AppConfig) -> Result<()> {
    match command {
        Command::New => {
            store.save(&Bill::new())?;
            println!("started a fresh bill");
        }
        Command::Show => {
            let bill = store.load()?;
            print!("{}", report::render(&bill, &settings.currency_symbol));
        }
        Command::Participant(Participant { command }) => match command {
            ParticipantCommand::Add { name, color } => {
                let mut bill = store.load()?;
                let color = color.unwrap_or_else(|| {
                    PARTICIPANT_COLORS[bill.participants.len() % PARTICIPANT_COLORS.len()]
                        .to_string()
                });
                let id = bill.add_participant(&name, Some(color))?;
                store.save(&bill)?;
                println!("added participant {name} ({id})");
            }
            ParticipantCommand::Remove { participant } => {
                let mut bill = store.load()?;
                let id = resolve_participant(&bill, &participant)?;
                bill.remove_participant(&id)?;
                store.save(&bill)?;
                println!("removed participant {participant}");
            }
            ParticipantCommand::List => {
                let bill = store.load()?;
                for participant in &bill.participants {
                    match &participant.color {
                        Some(color) => {
                            println!("{}  {} [{color}]", participant.id, participant.name);
                        }
                        None => println!("{}  {}", participant.id, participant.name),
                    }
                }
            }
        },
        Command::Item(Item { command }) => match command {
            ItemCommand::Add {
                name,
                price,
                quantity,
                shared_by,
            } => {
                let mut bill = store.load()?;
                let shared_by = match shared_by {
                    Some(references) => Some(
                        references
                            .iter()
                            .map(|reference| resolve_participant(&bill, reference))
                            .collect::<Result<Vec<_>>>()?,
                    ),
                    None => None,
                };
                let id = bill.add_item(&name, price, quantity, shared_by)?;
                store.save(&bill)?;
                println!("added item {name} ({id})");
            }
            ItemCommand::Remove { item } => {
                let mut bill = store.load()?;
                let id = resolve_item(&bill, &item)?;
                bill.remove_item(&id)?;
                store.save(&bill)?;
                println!("removed item {item}");
            }
            ItemCommand::List => {
                let bill = store.load()?;
                let symbol = &settings.currency_symbol;
                for item in &bill.items {
                    let names: Vec<&str> = item
                        .shared_by
                        .iter()
                        .filter_map(|id| bill.participant(id).map(|p| p.name.as_str()))
                        .collect();
                    println!(
                        "{}  {} {symbol}{} x{} = {symbol}{}  shared by: {}",
                        item.id,
                        item.name,
                        item.price,
                        item.quantity,
                        item.total(),
                        if names.is_empty() {
                            "nobody".to_string()
                        } else {
                            names.join(", ")
                        }
                    );
                }
            }
        },
        Command::Share { item, participant } => {
            let mut bill = store.load()?;
            let item_id = resolve_item(&bill, &item)?;
            let participant_id = resolve_participant(&bill, &participant)?;
            let shares = bill.toggle_share(&item_id, &participant_id)?;
            store.save(&bill)?;
            if shares {
                println!("{participant} now shares {item}");
            } else {
                println!("{participant} no longer shares {item}");
            }
        }
        Command::Charges(ChargesArgs {
            service_charge,
            tax,
        }) => {
            let mut bill = store.load()?;
            if service_charge.is_none() && tax.is_none() {
                println!(
                    "service charge: {}%  tax: {}%",
                    bill.service_charge, bill.tax
                );
                return Ok(());
            }
            if let Some(service_charge) = service_charge {
                bill.set_service_charge(service_charge);
            }
            if let Some(tax) = tax {
                bill.set_tax(tax);
            }
            store.save(&bill)?;
            println!(
                "service charge: {}%  tax: {}%",
                bill.service_charge, bill.tax
            );
        }
        Command::Import { file } => {
            let data = fs::read_to_string(&file)?;
            let bill = match api_types::BillPayload::from_json(&data)
                .and_then(api_types::BillPayload::try_into_bill)
            {
                Ok(bill) => bill,
                Err(err) => {
                    // The stored session stays as it was.
                    tracing::warn!(file = %file.display(), "import rejected: {err}");
                    return Err(err.into());
                }
            };
            store.save(&bill)?;
            println!(
                "imported bill with {} participants and {} items",
                bill.participants.len(),
                bill.items.len()
            );
        }
        Command::Export(Export { command }) => match command {
            ExportCommand::Json { path } => {
                let bill = store.load()?;
                let json = api_types::BillPayload::from_bill(&bill).to_json_pretty()?;
                match path {
                    Some(path) => {
                        fs::write(&path, json)?;
                        println!("wrote {}", path.display());
                    }
                    None => println!("{json}"),
                }
            }
            ExportCommand::Csv { stem } => {
                let bill = store.load()?;
                let stem = stem.unwrap_or_else(|| {
                    PathBuf::from(format!("Bill_Splitter_{}", bill.date.format("%Y-%m-%d")))
                });
                let (details, summary) = export::write_csv(&bill, &stem)?;
                println!("wrote {} and {}", details.display(), summary.display());
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let settings = match settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "scontrino={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let session_path = cli
        .session
        .clone()
        .unwrap_or_else(|| settings.session_path.clone());
    let store = SessionStore::new(session_path);

    if let Err(err) = run(cli.command, &store, &settings) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
