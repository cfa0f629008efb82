use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use finanza_rs::{
    CategorySet, NewTransaction, SqliteStorage, StoragePort, TransactionKind, TransactionStore,
    initialize_db,
};

/// A utility for creating a database pre-filled with demo data for finanza-rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    let storage: Arc<dyn StoragePort> = Arc::new(SqliteStorage::new(Arc::new(Mutex::new(
        connection,
    ))));

    println!("Installing the default categories...");
    let _ = CategorySet::load(storage.clone())?;

    println!("Recording the demo transactions...");
    let transaction_store = TransactionStore::load(storage)?;

    for (description, amount, kind, category, date) in [
        (
            "Salário Base",
            4500.0,
            TransactionKind::Income,
            "Salário",
            "2024-05-01",
        ),
        (
            "Aluguel Mensal",
            1200.0,
            TransactionKind::Expense,
            "Aluguel/Condomínio",
            "2024-05-05",
        ),
        (
            "Conta de Luz (Enel)",
            180.0,
            TransactionKind::Expense,
            "Água/Luz/Gás",
            "2024-05-07",
        ),
        (
            "Conta de Água",
            65.0,
            TransactionKind::Expense,
            "Água/Luz/Gás",
            "2024-05-08",
        ),
        (
            "Internet Fibra",
            110.0,
            TransactionKind::Expense,
            "Internet/TV",
            "2024-05-10",
        ),
        (
            "Compras do Mês",
            950.0,
            TransactionKind::Expense,
            "Mercado",
            "2024-05-12",
        ),
        (
            "Combustível",
            300.0,
            TransactionKind::Expense,
            "Transporte",
            "2024-05-15",
        ),
        (
            "Freelance Design",
            800.0,
            TransactionKind::Income,
            "Outros",
            "2024-05-20",
        ),
    ] {
        transaction_store.add(NewTransaction {
            description: description.to_string(),
            amount,
            kind,
            category: category.to_string(),
            date: date.to_string(),
        })?;
    }

    println!("Success!");
    println!("Browse the demo month at '/dashboard?month=2024-05' after logging in.");

    Ok(())
}
