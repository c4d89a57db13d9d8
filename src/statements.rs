// Statement operations (menu options 5-8). A statement's object key is also
// its local file name, resolved against the session's working directory.

use std::fs;

use tracing::{info, warn};

use crate::error::{AdminError, StoreError};
use crate::ui::progress::with_spinner;
use crate::ui::{prompt_text, Session};

/// Option 5: print every object key in the bucket.
pub fn list_statements(session: &mut Session<'_>) -> Result<(), AdminError> {
    let bucket = session.bucket;
    let keys = with_spinner(session.interactive(), "Listing...", || {
        bucket.list_statements()
    })?;
    let out = session.console.out();
    writeln!(out, "\nCURRENT STATEMENTS: \n")?;
    for key in keys {
        writeln!(out, "{key}")?;
    }
    Ok(())
}

/// Option 6: fetch an object into a local file of the same name,
/// overwriting whatever is there.
pub fn download_statement(session: &mut Session<'_>) -> Result<(), AdminError> {
    let key = prompt_text(
        session.console,
        "Enter the name of the statement you wish to download",
    )?;
    let bucket = session.bucket;
    let result = with_spinner(session.interactive(), "Downloading...", || {
        bucket.get_statement(&key)
    });

    let body = match result {
        Ok(body) => body,
        Err(StoreError::NotFound(_)) => {
            warn!(key = %key, "statement not found");
            writeln!(session.console.out(), "The object does not exist.")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let path = session.workdir.join(&key);
    fs::write(&path, &body).map_err(|source| AdminError::WriteLocal {
        path: path.clone(),
        source,
    })?;
    info!(key = %key, bytes = body.len(), "statement downloaded");
    writeln!(
        session.console.out(),
        "Downloaded '{}' to {}.",
        key,
        path.display()
    )?;
    Ok(())
}

/// Option 7: upload a local file under its own name.
pub fn upload_statement(session: &mut Session<'_>) -> Result<(), AdminError> {
    let name = prompt_text(session.console, "Enter a file name")?;
    let path = session.workdir.join(&name);
    let body = fs::read(&path).map_err(|source| AdminError::ReadLocal {
        path: path.clone(),
        source,
    })?;

    let bucket = session.bucket;
    with_spinner(session.interactive(), "Uploading...", || {
        bucket.put_statement(&name, body)
    })?;
    info!(key = %name, "statement uploaded");
    writeln!(
        session.console.out(),
        "Uploaded '{}' to bucket {}.",
        name,
        bucket.bucket_name()
    )?;
    Ok(())
}

/// Option 8: delete an object by key. Missing keys are not reported.
pub fn delete_statement(session: &mut Session<'_>) -> Result<(), AdminError> {
    let key = prompt_text(session.console, "Enter the name of the statement to delete")?;
    let bucket = session.bucket;
    with_spinner(session.interactive(), "Deleting...", || {
        bucket.delete_statement(&key)
    })?;
    writeln!(session.console.out(), "Statement '{key}' deleted.")?;
    Ok(())
}
