//! Greeting and arithmetic endpoints mounted outside the API prefix.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct HelloQuery {
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    "world".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AddQuery {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddResult {
    pub a: i64,
    pub b: i64,
    pub result: i64,
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// GET /
pub async fn index() -> Json<Message> {
    Json(Message {
        message: "Hello, Index!".to_string(),
    })
}

/// GET /hello/?name=...
pub async fn hello(Query(query): Query<HelloQuery>) -> Json<Message> {
    let name = title_case(query.name.trim());
    Json(Message {
        message: format!("Hello, {name}"),
    })
}

/// POST /calc/add/?a=...&b=...
///
/// Saturates instead of overflowing.
pub async fn add(Query(query): Query<AddQuery>) -> Json<AddResult> {
    Json(AddResult {
        a: query.a,
        b: query.b,
        result: query.a.saturating_add(query.b),
    })
}
