//! Admin export/import of the raw documents.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminSession;
use storage::documents;

/// Response body for an import: the document names that were overwritten.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub imported: Vec<String>,
}

/// The empty shape of each document: record collections are arrays,
/// guild-keyed documents are objects.
fn empty_document(name: &str) -> Value {
    match name {
        documents::USERS | documents::BOT_CREDENTIALS | documents::GUILD_BINDINGS => json!([]),
        _ => json!({}),
    }
}

/// Removes the `token` field from every credential in a raw
/// `bot-credentials` value.
fn strip_bot_tokens(value: &mut Value) {
    if let Some(bots) = value.as_array_mut() {
        for bot in bots {
            if let Some(obj) = bot.as_object_mut() {
                obj.remove("token");
            }
        }
    }
}

/// Dump every document, with bot secrets stripped.
///
/// GET /api/v1/admin/export
pub async fn export_documents(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let store = state.docs.store();

    let mut dump = Map::new();
    for name in documents::ALL {
        let mut value = store.read(name, &empty_document(name)).await?;
        if name == documents::BOT_CREDENTIALS {
            strip_bot_tokens(&mut value);
        }
        dump.insert(name.to_string(), value);
    }

    Ok(Json(dump))
}

/// Overwrite named documents from a dump.
///
/// POST /api/v1/admin/import
///
/// Unknown document names are rejected before anything is written. Writes
/// are sequential and atomic per document only: a mid-import failure
/// leaves earlier documents overwritten.
pub async fn import_documents(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(dump): Json<Map<String, Value>>,
) -> Result<Json<ImportResponse>, ApiError> {
    for name in dump.keys() {
        if !documents::ALL.contains(&name.as_str()) {
            return Err(ApiError::Validation(format!(
                "Unknown document name: {:?}",
                name
            )));
        }
    }

    let store = state.docs.store();
    let mut imported = Vec::with_capacity(dump.len());
    for (name, value) in &dump {
        store.write(name, value).await?;
        imported.push(name.clone());
    }

    info!(count = imported.len(), "Documents imported");
    Ok(Json(ImportResponse { imported }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_shapes() {
        assert!(empty_document(documents::USERS).is_array());
        assert!(empty_document(documents::BOT_CREDENTIALS).is_array());
        assert!(empty_document(documents::GUILD_BINDINGS).is_array());
        assert!(empty_document(documents::GUILD_CONFIGS).is_object());
        assert!(empty_document(documents::PUBLISH_FLAGS).is_object());
    }

    #[test]
    fn test_strip_bot_tokens() {
        let mut value = json!([
            {"id": "a", "apiKey": "bk_1", "token": "secret-1"},
            {"id": "b", "apiKey": "bk_2"}
        ]);
        strip_bot_tokens(&mut value);

        assert!(value[0].get("token").is_none());
        assert_eq!(value[0]["apiKey"], "bk_1");
        assert!(value[1].get("token").is_none());
    }

    #[test]
    fn test_strip_bot_tokens_ignores_non_arrays() {
        let mut value = json!({"not": "an array"});
        strip_bot_tokens(&mut value);
        assert_eq!(value, json!({"not": "an array"}));
    }
}
