//! Command-line access to QuickBlox Custom Objects.
//!
//! Credentials come from the environment:
//!
//! ```sh
//! export QB_SESSION_TOKEN='...'
//! export QB_API_ENDPOINT='https://apiXXXX.quickblox.com'   # optional
//! cargo run --bin qb-objects -- list Movie 20
//! ```
//!
//! Set `RUST_LOG=quickblox_client=debug` to see requests.

use std::path::Path;
use std::process::ExitCode;

use quickblox_sdk::auth::QuickbloxCredentials;
use quickblox_sdk::custom_objects::{
    CustomObjectFile, CustomObjectsClient, Error, ExtendedRequest, Result,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: qb-objects <command> [args]

Commands:
  get <class> <id>                      Print one record
  list <class> [limit]                  Print a page of records
  delete <class> <id>                   Delete a record
  permissions <class> <id>              Print the access rules of a record
  download <class> <id> <field> <out>   Save a file field to <out>
  upload <class> <id> <field> <path>    Upload <path> into a file field";

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: &CustomObjectsClient, args: &[String]) -> Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["get", class_name, id] => print_json(&client.get_object(class_name, id).await?),
        ["list", class_name] => print_json(&client.get_objects(class_name).await?),
        ["list", class_name, limit] => {
            let limit: u32 = limit
                .parse()
                .map_err(|_| Error::invalid_input("INVALID_LIMIT", format!("not a number: {}", limit)))?;
            let request = ExtendedRequest::builder().limit(limit).build()?;
            print_json(&client.get_objects_extended(class_name, &request).await?)
        }
        ["delete", class_name, id] => {
            client.delete_object(class_name, id).await?;
            eprintln!("Deleted {} {}", class_name, id);
            Ok(())
        }
        ["permissions", class_name, id] => print_json(&client.get_permissions(class_name, id).await?),
        ["download", class_name, id, field, out] => {
            let download = client.download_file(class_name, id, field).await?;
            tokio::fs::write(out, &download.data).await?;
            eprintln!("Wrote {} bytes to {}", download.len(), out);
            Ok(())
        }
        ["upload", class_name, id, field, path] => {
            let file = CustomObjectFile::from_path(Path::new(path)).await?;
            client.upload_file(&file, class_name, id, field).await?;
            eprintln!("Uploaded {} ({} bytes)", file.name, file.len());
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            Err(Error::invalid_input("USAGE", "unrecognized command"))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        eprintln!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let creds = match QuickbloxCredentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Set QB_SESSION_TOKEN (and optionally QB_API_ENDPOINT).");
            return ExitCode::FAILURE;
        }
    };

    let client = match CustomObjectsClient::from_credentials(&creds, Default::default()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
