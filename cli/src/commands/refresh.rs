//! Refresh command - rebuild widget choice lists.

use anyhow::Result;
use panelkit_core::{RefreshRequest, RefreshService};

pub async fn run(args: &[String]) -> Result<()> {
    let requests = RefreshRequest::from_args(args)?;
    let service = RefreshService::new();
    let choices = service.refresh(&requests).await?;

    // A single update prints as one object, several as an array, which is
    // the shape the widget binding expects.
    println!("{}", serde_json::to_string_pretty(&choices)?);

    Ok(())
}
