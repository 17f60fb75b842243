//! Command-line caller for the OCR record store.
//!
//! # Responsibility
//! - Load store settings from the environment and open MongoDB.
//! - Run one gateway operation and print its JSON envelope.
//!
//! # Invariants
//! - Exit status is non-zero whenever the operation failed.

use clap::{Parser, Subcommand};
use ocr_core::{
    default_log_level, init_logging, MongoOcrStore, Ocr, OcrOperation, OcrPageData,
    OcrResponse, OcrService, OcrServiceError, OcrStore, StoreConfig,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage OCR records stored in MongoDB", long_about = None)]
struct Cli {
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every record.
    List,
    /// Create a record.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        company_name: String,
        #[arg(long, default_value = "")]
        model: String,
    },
    /// Set the title and completion flag of a record.
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        completed: bool,
    },
    /// Delete one record by id.
    Delete { id: String },
    /// Delete every completed record.
    DeleteCompleted,
    /// Print the data bound into the OCR page template.
    Page {
        #[arg(long)]
        csrf_token: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            print_json(&json!({ "message": "Invalid store configuration", "error": err.to_string() }));
            return ExitCode::from(2);
        }
    };

    let store = match MongoOcrStore::open(&config) {
        Ok(store) => store,
        Err(err) => {
            print_json(&json!({ "message": "Failed to connect to store", "error": err.to_string() }));
            return ExitCode::FAILURE;
        }
    };
    let service = OcrService::new(store);

    match run(&service, cli.command) {
        Ok(body) => {
            print_json(&body);
            ExitCode::SUCCESS
        }
        Err((operation, err)) => {
            log::error!("event=cli_command module=cli status=error error={}", err);
            print_json(&failure_body(operation, &err));
            ExitCode::FAILURE
        }
    }
}

fn run<S: OcrStore>(
    service: &OcrService<S>,
    command: Command,
) -> Result<Value, (OcrOperation, OcrServiceError)> {
    let (operation, result) = match command {
        Command::List => (OcrOperation::List, service.list()),
        Command::Create {
            title,
            company_name,
            model,
        } => (
            OcrOperation::Create,
            service.create(&Ocr::new(title, company_name, model)),
        ),
        Command::Update {
            id,
            title,
            completed,
        } => (
            OcrOperation::Update,
            service.update(&id, &Ocr::patch(title, completed)),
        ),
        Command::Delete { id } => (OcrOperation::DeleteOne, service.delete_one(&id)),
        Command::DeleteCompleted => (OcrOperation::DeleteCompleted, service.delete_completed()),
        Command::Page { csrf_token } => {
            let ocrs = service
                .list()
                .map_err(|err| (OcrOperation::List, err))?;
            return Ok(json!(OcrPageData::new(csrf_token, ocrs)));
        }
    };

    let ocrs = result.map_err(|err| (operation, err))?;
    Ok(json!(OcrResponse::new(operation, ocrs)))
}

fn failure_body(operation: OcrOperation, err: &OcrServiceError) -> Value {
    json!({
        "message": operation.failure_message(err),
        "error": err.to_string(),
    })
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("failed to encode output: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{failure_body, run, Command};
    use ocr_core::{InMemoryOcrStore, OcrOperation, OcrService, OcrServiceError};

    fn service() -> OcrService<InMemoryOcrStore> {
        OcrService::new(InMemoryOcrStore::new())
    }

    fn create(title: &str) -> Command {
        Command::Create {
            title: title.to_string(),
            company_name: "Acme".to_string(),
            model: "v2".to_string(),
        }
    }

    #[test]
    fn create_prints_message_and_refreshed_list() {
        let service = service();

        let body = run(&service, create("Invoice OCR")).unwrap();
        assert_eq!(body["message"], "OCR is created successfully");
        assert_eq!(body["ocrs"].as_array().unwrap().len(), 1);
        assert_eq!(body["ocrs"][0]["title"], "Invoice OCR");
        assert_eq!(body["ocrs"][0]["company_name"], "Acme");
        assert_eq!(body["ocrs"][0]["model"], "v2");
        assert_eq!(body["ocrs"][0]["completed"], false);
    }

    #[test]
    fn list_prints_records_without_message() {
        let service = service();
        run(&service, create("Invoice OCR")).unwrap();

        let body = run(&service, Command::List).unwrap();
        assert!(body.get("message").is_none());
        assert_eq!(body["ocrs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn update_then_delete_completed_empties_the_list() {
        let service = service();
        let created = run(&service, create("Invoice OCR")).unwrap();
        let id = created["ocrs"][0]["id"].as_str().unwrap().to_string();

        let updated = run(
            &service,
            Command::Update {
                id,
                title: "Invoice OCR v2".to_string(),
                completed: true,
            },
        )
        .unwrap();
        assert_eq!(updated["message"], "OCR updated successfully");
        assert_eq!(updated["ocrs"][0]["completed"], true);

        let cleared = run(&service, Command::DeleteCompleted).unwrap();
        assert_eq!(cleared["message"], "OCR is successfully deleted");
        assert!(cleared["ocrs"].as_array().unwrap().is_empty());
    }

    #[test]
    fn delete_with_malformed_id_reports_invalid_id() {
        let service = service();

        let (operation, err) = run(
            &service,
            Command::Delete {
                id: "not-an-id".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(operation, OcrOperation::DeleteOne);
        assert!(matches!(err, OcrServiceError::InvalidIdentifier(_)));

        let body = failure_body(operation, &err);
        assert_eq!(body["message"], "The id is invalid");
        assert_eq!(body["error"], err.to_string());
    }

    #[test]
    fn create_with_empty_title_reports_validation_message() {
        let service = service();

        let (operation, err) = run(&service, create("")).unwrap_err();
        assert_eq!(operation, OcrOperation::Create);
        assert_eq!(failure_body(operation, &err)["message"], "The title is required");
    }

    #[test]
    fn page_binds_token_and_current_list() {
        let service = service();
        run(&service, create("Invoice OCR")).unwrap();

        let body = run(
            &service,
            Command::Page {
                csrf_token: "token-123".to_string(),
            },
        )
        .unwrap();
        assert_eq!(body["csrf_token"], "token-123");
        assert_eq!(body["ocrs"][0]["title"], "Invoice OCR");
        assert!(body.get("message").is_none());
    }
}
