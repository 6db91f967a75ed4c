use crate::{
    asset::AssetRecord,
    client::EnterMediaClient,
    error::{EnterMediaError, EnterMediaResult},
    models::{
        sanitize_metadata, Metadata, SearchQuery, SearchRequest, SearchResults, SearchTerm,
        UploadedAsset,
    },
    validation,
};
use log::{debug, info};
use reqwest::{
    multipart::{Form, Part},
    Method,
};
use serde_json::{Map, Value};

pub(crate) const CREATE_PATH: &str = "mediadb/services/module/asset/create";
pub(crate) const SEARCH_PATH: &str = "mediadb/services/module/asset/search";

/// Asset API operations
pub struct AssetApi<'a> {
    client: &'a EnterMediaClient,
}

impl<'a> AssetApi<'a> {
    pub fn new(client: &'a EnterMediaClient) -> Self {
        Self { client }
    }

    /// Upload a file to EnterMedia as a new asset
    ///
    /// On success the record's asset id and source path are replaced with
    /// the values EnterMedia assigned. On any error the record is untouched.
    ///
    /// # Arguments
    /// * `asset` - Record describing the local file
    /// * `metadata` - Extra asset fields; non-scalar values are dropped
    pub async fn upload<A>(
        &self,
        asset: &mut A,
        metadata: Metadata,
    ) -> EnterMediaResult<UploadedAsset>
    where
        A: AssetRecord + ?Sized,
    {
        let config = self.client.config();
        self.client.ensure_authenticated(&config).await?;
        info!("Uploading {} to EnterMedia", asset.filename());

        let files = self.client.files();
        let path = files.realpath(asset.source_path())?;
        let contents = files.read(&path).await?;
        validation::check_all(
            self.client.upload_rules(),
            asset.filename(),
            contents.len() as u64,
        )?;

        let mut payload = Map::new();
        payload.insert(
            "id".into(),
            asset.original_id().map_or(Value::Null, |id| Value::String(id.into())),
        );
        payload.insert("description".into(), Value::String(asset.filename().into()));
        payload.extend(sanitize_metadata(metadata));
        let json = serde_json::to_string(&payload)?;
        debug!("Upload of {} bytes with request {}", contents.len(), json);

        let form = Form::new().text("jsonrequest", json).part(
            "file",
            Part::bytes(contents.to_vec()).file_name(asset.filename().to_string()),
        );

        let req = self
            .client
            .request(&config, Method::POST, CREATE_PATH)?
            .multipart(form);
        let body = self.client.execute(req).await?;

        let uploaded = UploadedAsset::from_envelope(&body).ok_or_else(|| {
            EnterMediaError::InvalidResponse("create response is missing data.id or data.sourcepath".into())
        })?;
        asset.set_asset_id(uploaded.id.clone());
        asset.set_source_path(uploaded.source_path.clone());
        info!("Uploaded {} as asset {}", asset.filename(), uploaded.id);

        Ok(uploaded)
    }

    /// Search assets, returning the decoded response body as-is
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `hits_per_page` - Page size
    /// * `filters` - Terms combined by EnterMedia in order
    pub async fn search(
        &self,
        page: u32,
        hits_per_page: u32,
        filters: &[SearchTerm],
    ) -> EnterMediaResult<Value> {
        let config = self.client.config();
        self.client.ensure_authenticated(&config).await?;
        info!(
            "Searching assets: page {} ({} per page), {} terms",
            page,
            hits_per_page,
            filters.len()
        );

        let req = self
            .client
            .request(&config, Method::POST, SEARCH_PATH)?
            .json(&SearchRequest::new(page, hits_per_page, filters));

        self.client.execute(req).await
    }

    /// Run a search described by a [`SearchQuery`]
    pub async fn search_query(&self, query: &SearchQuery) -> EnterMediaResult<Value> {
        self.search(query.page, query.hits_per_page, &query.terms).await
    }

    /// Run a search and pick the hits and paging numbers out of the response
    pub async fn search_results(&self, query: &SearchQuery) -> EnterMediaResult<SearchResults> {
        let body = self.search_query(query).await?;
        Ok(SearchResults::from_envelope(&body))
    }
}
