//! Version history and revert endpoints.

use super::*;

impl ApiClient {
    pub async fn list_versions(&self, doc_id: &str) -> Result<VersionsResponse> {
        let resp = self
            .get(&format!("/versions/{}", doc_id))
            .send()
            .await
            .context("list versions request")?;
        let resp = self.ensure_ok(resp, "list versions").await?;
        resp.json().await.context("parse versions response")
    }

    pub async fn get_version(
        &self,
        doc_id: &str,
        version_id: &str,
    ) -> Result<serde_json::Value> {
        let resp = self
            .get(&format!("/versions/{}/{}", doc_id, version_id))
            .send()
            .await
            .context("get version request")?;
        let resp = self.ensure_ok(resp, "get version").await?;
        resp.json().await.context("parse version response")
    }

    /// `version_ref` is the opaque version token when one exists, else the
    /// positional number rendered as a string.
    pub async fn revert(&self, doc_id: &str, version_ref: &str) -> Result<RevertResponse> {
        let resp = self
            .post(&format!("/revert/{}/{}", doc_id, version_ref))
            .send()
            .await
            .context("revert request")?;
        let resp = self.ensure_ok(resp, "revert").await?;
        resp.json().await.context("parse revert response")
    }
}
