// Client-record operations (menu options 1-4).

use tracing::{debug, info};

use crate::api::{ClientTable, Item};
use crate::error::{AdminError, StoreError};
use crate::format::render_item;
use crate::model::ClientRecord;
use crate::ui::progress::with_spinner;
use crate::ui::{prompt_text, Session};

/// Option 1: look up one client by ID and print it.
pub fn show_client(session: &mut Session<'_>) -> Result<(), AdminError> {
    let client_id = prompt_client_id(session, "Enter a client's ID number")?;
    let table = session.table;
    let items = with_spinner(session.interactive(), "Querying...", || {
        table.query_client(client_id)
    })?;
    debug!(client_id, found = items.len(), "query finished");
    print_items(session, &items)
}

/// Option 2: scan the whole table and print every record.
pub fn show_all_clients(session: &mut Session<'_>) -> Result<(), AdminError> {
    let table = session.table;
    let items = with_spinner(session.interactive(), "Scanning...", || scan_all(table))?;
    print_items(session, &items)
}

/// Follow the scan's continuation markers until the table is exhausted,
/// collecting the items of every page.
pub fn scan_all(table: &dyn ClientTable) -> Result<Vec<Item>, StoreError> {
    let mut page = table.scan_page(None)?;
    let mut items = std::mem::take(&mut page.items);
    let mut pages = 1;
    while let Some(start_key) = page.last_evaluated_key.take() {
        page = table.scan_page(Some(start_key))?;
        items.append(&mut page.items);
        pages += 1;
    }
    debug!(table = table.table_name(), pages, items = items.len(), "scan finished");
    Ok(items)
}

/// Option 3: prompt for a full record and write it, replacing any client
/// already stored under the same ID.
pub fn create_client(session: &mut Session<'_>) -> Result<(), AdminError> {
    let client_id = prompt_client_id(session, "Enter a unique, 5-digit ID for your client")?;
    let record = ClientRecord {
        client_id,
        business_name: prompt_text(session.console, "Enter the client's business name")?,
        point_of_contact: prompt_text(session.console, "Enter the point of contact's full name")?,
        email: prompt_text(session.console, "Enter the point of contact's e-mail address")?,
        phone_number: prompt_text(session.console, "Enter the point of contact's phone number")?,
    };

    let table = session.table;
    with_spinner(session.interactive(), "Saving...", || table.put_client(&record))?;
    info!(client_id, "client saved");
    writeln!(
        session.console.out(),
        "\nClient [{}] successfully uploaded to database. Key number: {}",
        record.business_name, record.client_id
    )?;
    Ok(())
}

/// Option 4: delete a client by ID. A conditional-check failure is shown
/// to the operator rather than treated as an error.
pub fn remove_client(session: &mut Session<'_>) -> Result<(), AdminError> {
    let client_id = prompt_client_id(session, "Enter a client ID key")?;
    let table = session.table;
    let result = with_spinner(session.interactive(), "Deleting...", || {
        table.delete_client(client_id)
    });
    let out = session.console.out();
    match result {
        Ok(()) => {
            info!(client_id, "client removed");
            writeln!(out, "Client information removed.")?;
        }
        Err(StoreError::ConditionalCheckFailed(message)) => {
            writeln!(out, "{message}")?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn prompt_client_id(session: &mut Session<'_>, prompt: &str) -> Result<i64, AdminError> {
    let raw = prompt_text(session.console, prompt)?;
    raw.trim()
        .parse()
        .map_err(|_| AdminError::InvalidClientId(raw.trim().to_string()))
}

fn print_items(session: &mut Session<'_>, items: &[Item]) -> Result<(), AdminError> {
    let out = session.console.out();
    for item in items {
        writeln!(out, "{}", render_item(item)?)?;
    }
    Ok(())
}
