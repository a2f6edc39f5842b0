//! Service status, message counters, manual triggers, and the source-folder
//! mapping endpoints.

use super::*;

impl ApiClient {
    pub async fn status(&self) -> Result<StatusResponse> {
        let resp = self
            .get("/status")
            .send()
            .await
            .context("status request")?;
        let resp = self.ensure_ok(resp, "status").await?;
        resp.json().await.context("parse status response")
    }

    pub async fn message_count(&self, team_id: Option<&str>) -> Result<u64> {
        let params = match team_id {
            Some(id) => vec![("team_id", id.to_string())],
            None => Vec::new(),
        };
        let resp = self
            .get("/messages/count")
            .query(&params)
            .send()
            .await
            .context("message count request")?;
        let resp = self.ensure_ok(resp, "message count").await?;
        let body: MessageCountResponse =
            resp.json().await.context("parse message count response")?;
        Ok(body.count)
    }

    /// Ask the pipeline to process a document immediately.
    pub async fn trigger_update(&self, doc_id: &str) -> Result<TriggerResponse> {
        let resp = self
            .post("/trigger")
            .json(&serde_json::json!({ "doc_id": doc_id }))
            .send()
            .await
            .context("trigger request")?;
        let resp = self.ensure_ok(resp, "trigger").await?;
        resp.json().await.context("parse trigger response")
    }

    /// Resynchronize the pipeline's source-folder mapping.
    pub async fn sync_mapping(&self, folder_id: Option<&str>) -> Result<SyncMappingResponse> {
        let resp = self
            .post("/drive/mapping/sync")
            .query(&folder_query(folder_id))
            .send()
            .await
            .context("sync mapping request")?;
        let resp = self.ensure_ok(resp, "sync mapping").await?;
        resp.json().await.context("parse sync mapping response")
    }

    pub async fn get_mapping(&self, folder_id: Option<&str>) -> Result<DriveMappingResponse> {
        let resp = self
            .get("/drive/mapping")
            .query(&folder_query(folder_id))
            .send()
            .await
            .context("get mapping request")?;
        let resp = self.ensure_ok(resp, "get mapping").await?;
        resp.json().await.context("parse mapping response")
    }
}
