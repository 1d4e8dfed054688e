//! Key-property indexes, one per label

use crate::client::{ClientResult, GraphClient};
use crate::cypher::Statement;
use crate::model::EntityLabel;
use tracing::info;

/// Create (if absent) an index on every label's key property, in one
/// schema transaction.
pub async fn create_indexes(client: &dyn GraphClient) -> ClientResult<()> {
    let statements: Vec<Statement> = EntityLabel::ALL
        .into_iter()
        .map(Statement::CreateIndex)
        .collect();
    client.execute_write(&statements).await?;
    info!(count = statements.len(), "Indexes ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::EmbeddedClient;
    use crate::graph::Label;

    #[tokio::test]
    async fn test_indexes_are_idempotent() {
        let client = EmbeddedClient::new();
        create_indexes(&client).await.unwrap();
        create_indexes(&client).await.unwrap();

        let store = client.store().read().await;
        assert_eq!(store.index_count(), 5);
        assert!(store.has_index(&Label::new("Symptom"), "type"));
        assert!(store.has_index(&Label::new("Hospital"), "name"));
    }
}
