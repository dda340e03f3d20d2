//! JSON input

use std::io::Read;

use serde::Deserialize;

use crate::error::XpenseResult;
use crate::models::RawTransaction;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonInput {
    List(Vec<RawTransaction>),
    Wrapped { transactions: Vec<RawTransaction> },
}

/// Read raw records from JSON
pub fn read_json<R: Read>(reader: R) -> XpenseResult<Vec<RawTransaction>> {
    let input: JsonInput = serde_json::from_reader(reader)?;
    Ok(match input {
        JsonInput::List(records) => records,
        JsonInput::Wrapped { transactions } => transactions,
    })
}
