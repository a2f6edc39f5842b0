//! Document listing, metadata, search, and creation endpoints.

use super::*;

impl ApiClient {
    pub async fn list_documents(&self, folder_id: Option<&str>) -> Result<DocumentsResponse> {
        let resp = self
            .get("/documents")
            .query(&folder_query(folder_id))
            .send()
            .await
            .context("list documents request")?;
        let resp = self.ensure_ok(resp, "list documents").await?;
        resp.json().await.context("parse documents response")
    }

    pub async fn all_metadata(&self, folder_id: Option<&str>) -> Result<MetadataAllResponse> {
        let resp = self
            .get("/documents/metadata/all")
            .query(&folder_query(folder_id))
            .send()
            .await
            .context("list metadata request")?;
        let resp = self.ensure_ok(resp, "list metadata").await?;
        resp.json().await.context("parse metadata response")
    }

    pub async fn get_document(&self, doc_id: &str) -> Result<DocumentContentResponse> {
        let resp = self
            .get(&format!("/documents/{}", doc_id))
            .send()
            .await
            .context("get document request")?;
        let resp = self.ensure_ok(resp, "get document").await?;
        resp.json().await.context("parse document response")
    }

    pub async fn create_document(
        &self,
        req: &CreateDocumentRequest,
    ) -> Result<CreateDocumentResponse> {
        let resp = self
            .post("/documents")
            .json(req)
            .send()
            .await
            .context("create document request")?;
        let resp = self.ensure_ok(resp, "create document").await?;
        resp.json().await.context("parse create document response")
    }

    pub async fn update_metadata(
        &self,
        doc_id: &str,
        req: &UpdateMetadataRequest,
    ) -> Result<StatusMessage> {
        let resp = self
            .put(&format!("/documents/{}/metadata", doc_id))
            .json(req)
            .send()
            .await
            .context("update metadata request")?;
        let resp = self.ensure_ok(resp, "update metadata").await?;
        resp.json().await.context("parse update metadata response")
    }

    pub async fn search_documents(
        &self,
        query: &str,
        folder_id: Option<&str>,
    ) -> Result<SearchResponse> {
        let mut params = folder_query(folder_id);
        params.push(("query", query.to_string()));
        let resp = self
            .get("/documents/search")
            .query(&params)
            .send()
            .await
            .context("search documents request")?;
        let resp = self.ensure_ok(resp, "search documents").await?;
        resp.json().await.context("parse search response")
    }
}
