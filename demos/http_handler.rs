//! Request handling with annotated errors.
//!
//! A data layer fails with a foreign error, the handler layer annotates it
//! for clients, and the router layer logs and answers without knowing any
//! concrete error type.
//!
//! Run with: cargo run --example http_handler

use annotated_errors::{
    BoxError, ErrorReport, ResultExt, error_code, http_status, human_message, tags,
};
use std::error::Error;
use std::fmt;

// Database/Model layer

/// Stand-in for an error coming from an SQL driver.
#[derive(Debug)]
struct NoRows;

impl fmt::Display for NoRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no rows found")
    }
}

impl Error for NoRows {}

/// Query a user that is never found.
fn find_user(user_id: u64) -> Result<String, BoxError> {
    let lookup: Result<String, NoRows> = Err(NoRows);
    let user = lookup.with_tags(tags!["user_id", user_id])?;
    Ok(user)
}

// Controller/Handler layer

/// Error enum exposed to clients.
const USER_NOT_FOUND_ERROR_CODE: i64 = 1;

fn handle_get_user() -> Result<String, BoxError> {
    match find_user(2) {
        Ok(user) => Ok(user),
        Err(err) if annotated_errors::walk(err.as_ref(), |e| e.is::<NoRows>()) => {
            let user = Err::<String, _>(err)
                .with_error_code(USER_NOT_FOUND_ERROR_CODE)
                .with_http_status(404)
                .with_human_message("Sorry, we couldn't find that user")?;
            Ok(user)
        }
        Err(err) => Err(err),
    }
}

// Router/Middleware layer

fn handle_request() {
    let Err(err) = handle_get_user() else {
        return;
    };

    // Middleware logs everything, including the per-link trace
    if let Some(report) = ErrorReport::new(err.as_ref()) {
        println!("{report}");
        println!("trace:\n{}", report.trace());
    }

    // The response only carries what is safe to expose
    println!(
        "\nHTTP Status: {}\nError Code: {}\nMessage: {}",
        http_status(err.as_ref()),
        error_code(err.as_ref()),
        human_message(err.as_ref()),
    );
}

fn main() {
    handle_request();
}
